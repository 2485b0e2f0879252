//! HTTP server.
//!
//! This module provides:
//! - [`router`]: the axum router for the four API routes plus metrics and `/`
//! - [`AppState`]: shared state for handlers
//! - [`HttpServer`]: wires configuration, backend, optional CLI flow and listener
//!
//! # Example
//!
//! ```no_run
//! use scenario_timeline::config::Config;
//! use scenario_timeline::server::HttpServer;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env()?;
//! HttpServer::new(config).run().await?;
//! # Ok(())
//! # }
//! ```

mod routes;
mod types;

pub use routes::router;
pub use types::{AppState, ExportResponse};

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::cli::Cli;
use crate::config::Config;
use crate::error::AppError;
use crate::gateway::ModelGateway;
use crate::scenarios::ScenarioElaborator;
use crate::traits::{ModelClient, RealTimeProvider, TimeProvider};

/// Serve `app` on `listener` until `shutdown` resolves.
///
/// # Errors
///
/// Returns [`AppError::Server`] if the accept loop fails.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<(), AppError>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| AppError::Server {
            message: e.to_string(),
        })
}

/// Resolves on Ctrl-C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Main HTTP server that orchestrates all components.
#[derive(Debug)]
pub struct HttpServer {
    config: Config,
}

impl HttpServer {
    /// Creates a new server with the given configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Returns the server configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Build the backend and state, run the CLI flow if enabled, then serve
    /// until Ctrl-C.
    ///
    /// A failed CLI run is logged and the server starts anyway.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The HTTP client cannot be built
    /// - The listener cannot bind
    /// - The accept loop fails
    #[cfg_attr(coverage_nightly, coverage(off))]
    pub async fn run(&self) -> Result<(), AppError> {
        let gateway = ModelGateway::from_config(&self.config)?;
        let backend = gateway.backend_name();
        let client: Arc<dyn ModelClient> = Arc::new(gateway);
        let clock: Arc<dyn TimeProvider> = Arc::new(RealTimeProvider);
        let state = AppState::new(&self.config, Arc::clone(&client), backend, Arc::clone(&clock));

        if self.config.cli_mode {
            let cli = Cli::new(
                ScenarioElaborator::new(client),
                Arc::clone(&state.scenarios),
                state.logs.clone(),
                clock,
            );
            if let Err(e) = cli.run_stdio().await {
                error!(error = %e, "CLI flow failed");
            }
        }

        let addr = self.config.bind_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| AppError::Server {
                message: format!("failed to bind {addr}: {e}"),
            })?;
        info!(addr = %addr, backend = backend, "Server listening");

        serve(listener, router(state), shutdown_signal()).await
    }
}
