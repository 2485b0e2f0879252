//! Scenario Timeline binary entry point.
//!
//! All logs go to stderr; stdout is reserved for the interactive CLI flow.
//!
//! Coverage is excluded because the main function only wires components
//! that are tested individually.

// Enable the coverage attribute when running with nightly for llvm-cov exclusions
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use scenario_timeline::config::{Config, LogFormat};
use scenario_timeline::server::HttpServer;
use tracing_subscriber::EnvFilter;

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() {
    // Load configuration first so LOG_LEVEL / LOG_FORMAT apply to every log line
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    let filter = config
        .log_level
        .parse()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false);
    match config.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }

    tracing::info!("scenario-timeline starting...");
    tracing::info!(
        backend = config.backend().as_ref().map_or("none", |b| b.name()),
        log_dir = %config.log_dir,
        timeout_ms = config.request_timeout_ms,
        cli_mode = config.cli_mode,
        "Configuration loaded"
    );

    let server = HttpServer::new(config);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }

    tracing::info!("scenario-timeline shutdown complete");
}
