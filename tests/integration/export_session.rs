//! `POST /api/export-session` workflows.

use pretty_assertions::assert_eq;
use scenario_timeline::gateway::ModelGateway;
use serde_json::{json, Value};

use super::{files_in, spawn_app};

async fn export(url: &str, body: &Value) -> reqwest::Response {
    reqwest::Client::new()
        .post(url)
        .json(body)
        .send()
        .await
        .expect("request failed")
}

#[tokio::test]
async fn test_export_empty_session_writes_header_only() {
    let app = spawn_app(ModelGateway::Unconfigured).await;

    let response = export(&app.url("/api/export-session"), &json!({"timelineEvents": []})).await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    let filename = body["filename"].as_str().unwrap();
    assert!(filename.ends_with("-session.md"));

    let content = std::fs::read_to_string(app.log_dir().join(filename)).unwrap();
    assert_eq!(content, "# Session Timeline: Untitled\n\n");
}

#[tokio::test]
async fn test_export_nested_session() {
    let app = spawn_app(ModelGateway::Unconfigured).await;
    let body = json!({
        "sessionTitle": "Ocean Cleanup 2040",
        "timelineEvents": [
            {"title": "Nets", "date": "2027", "description": "Deploy nets"},
            {"title": "Drones", "date": "2030", "description": "Autonomous sweeps"}
        ],
        "expandedNodes": [
            {
                "children": [{"title": "Pilot", "date": "2026", "description": "Small bay"}],
                "childrenExpanded": [
                    {"children": [{"title": "Permits", "date": "2025", "description": "Paperwork"}]}
                ]
            },
            null
        ]
    });

    let response = export(&app.url("/api/export-session"), &body).await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    let filename = body["filename"].as_str().unwrap();
    assert!(filename.ends_with("-ocean-cleanup-2040.md"));

    let content = std::fs::read_to_string(app.log_dir().join(filename)).unwrap();
    assert_eq!(
        content,
        "# Session Timeline: Ocean Cleanup 2040\n\n\
         ## Nets (2027)\n\nDeploy nets\n\n\
         ### Pilot (2026)\n\nSmall bay\n\n\
         #### Permits (2025)\n\nPaperwork\n\n\
         ## Drones (2030)\n\nAutonomous sweeps\n\n"
    );
}

#[tokio::test]
async fn test_export_then_download_roundtrip() {
    let app = spawn_app(ModelGateway::Unconfigured).await;
    let body = json!({
        "sessionTitle": "Trip",
        "timelineEvents": [{"title": "Go", "date": "2030", "description": "Leave"}]
    });

    let exported: Value = export(&app.url("/api/export-session"), &body)
        .await
        .json()
        .await
        .unwrap();
    let filename = exported["filename"].as_str().unwrap();

    let download = reqwest::get(app.url(&format!("/api/download-log/{filename}")))
        .await
        .unwrap();
    assert_eq!(download.status(), 200);
    assert_eq!(
        download.headers()["content-disposition"],
        format!("attachment; filename=\"{filename}\"").as_str()
    );
    assert_eq!(
        download.text().await.unwrap(),
        "# Session Timeline: Trip\n\n## Go (2030)\n\nLeave\n\n"
    );
}

#[tokio::test]
async fn test_export_requires_events_array() {
    let app = spawn_app(ModelGateway::Unconfigured).await;

    for body in [json!({}), json!({"timelineEvents": {"0": {}}}), json!("text")] {
        let response = export(&app.url("/api/export-session"), &body).await;
        assert_eq!(response.status(), 400);
        let error: Value = response.json().await.unwrap();
        assert_eq!(error, json!({"error": "timelineEvents array required"}));
    }
    assert!(files_in(&app.log_dir()).is_empty());
}

#[tokio::test]
async fn test_export_filesystem_failure() {
    let app = spawn_app(ModelGateway::Unconfigured).await;
    // A regular file where the log directory should be.
    std::fs::write(app.log_dir(), "occupied").unwrap();

    let response = export(&app.url("/api/export-session"), &json!({"timelineEvents": []})).await;

    assert_eq!(response.status(), 500);
    let error: Value = response.json().await.unwrap();
    assert_eq!(error, json!({"error": "Failed to export session."}));
    assert_eq!(app.state.metrics.summary().exports_failed, 1);
}
