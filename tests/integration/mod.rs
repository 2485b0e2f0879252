//! Integration tests for the scenario timeline server.
//!
//! These tests verify end-to-end workflows including:
//! - Timeline generation against local and hosted backends
//! - Session export and log download
//! - Scenario store and metrics endpoints

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod api_scenarios;
mod download;
mod export_session;

use std::net::SocketAddr;
use std::sync::Arc;

use scenario_timeline::config::{Config, SecretString};
use scenario_timeline::gateway::{HostedClient, LocalClient, ModelGateway};
use scenario_timeline::server::{router, serve, AppState};
use scenario_timeline::traits::{ModelClient, RealTimeProvider};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// A running server; dropping it stops the server and removes its directories.
pub struct TestApp {
    pub addr: SocketAddr,
    pub dir: TempDir,
    pub state: AppState,
    _shutdown: oneshot::Sender<()>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    pub fn log_dir(&self) -> std::path::PathBuf {
        self.dir.path().join("logs")
    }
}

/// Start a server around `gateway`.
pub async fn spawn_app(gateway: ModelGateway) -> TestApp {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = Config {
        log_dir: dir.path().join("logs").display().to_string(),
        static_dir: dir.path().display().to_string(),
        ..Config::default()
    };
    let backend = gateway.backend_name();
    let client: Arc<dyn ModelClient> = Arc::new(gateway);
    let state = AppState::new(&config, client, backend, Arc::new(RealTimeProvider));

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("No local addr");
    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(serve(listener, router(state.clone()), async {
        let _ = rx.await;
    }));

    TestApp {
        addr,
        dir,
        state,
        _shutdown: tx,
    }
}

/// Gateway for a local NDJSON endpoint at `url`.
pub fn local_gateway(url: &str) -> ModelGateway {
    ModelGateway::Local(
        LocalClient::new(url, Some("llama3".to_string()), 5_000).expect("Failed to build client"),
    )
}

/// Gateway for a hosted API at `base_url`.
pub fn hosted_gateway(base_url: &str) -> ModelGateway {
    ModelGateway::Hosted(
        HostedClient::new(
            SecretString::new("sk-test"),
            "gpt-4o-mini",
            base_url,
            5_000,
        )
        .expect("Failed to build client"),
    )
}

/// An NDJSON body streaming `fragments` as separate lines.
pub fn ndjson(fragments: &[&str]) -> String {
    let mut body = String::new();
    for fragment in fragments {
        body.push_str(&serde_json::json!({"response": fragment, "done": false}).to_string());
        body.push('\n');
    }
    body.push_str("{\"done\":true}\n");
    body
}

/// Names of the files in `dir`, sorted.
pub fn files_in(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}
