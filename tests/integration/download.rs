//! `GET /api/download-log/:filename` and static index workflows.

use pretty_assertions::assert_eq;
use scenario_timeline::gateway::ModelGateway;

use super::spawn_app;

#[tokio::test]
async fn test_download_existing_log() {
    let app = spawn_app(ModelGateway::Unconfigured).await;
    std::fs::create_dir_all(app.log_dir()).unwrap();
    std::fs::write(app.log_dir().join("260101-1200-report.md"), "# Report\n").unwrap();

    let response = reqwest::get(app.url("/api/download-log/260101-1200-report.md"))
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["content-disposition"],
        "attachment; filename=\"260101-1200-report.md\""
    );
    assert_eq!(response.text().await.unwrap(), "# Report\n");
}

#[tokio::test]
async fn test_download_missing_log() {
    let app = spawn_app(ModelGateway::Unconfigured).await;

    let response = reqwest::get(app.url("/api/download-log/nope.md")).await.unwrap();

    assert_eq!(response.status(), 404);
    assert_eq!(response.text().await.unwrap(), "File not found");
}

#[tokio::test]
async fn test_download_rejects_traversal() {
    let app = spawn_app(ModelGateway::Unconfigured).await;
    std::fs::write(app.dir.path().join("secret.txt"), "hidden").unwrap();

    for name in ["..%2Fsecret.txt", "%2E%2E%2Fsecret.txt", "..%5Csecret.txt"] {
        let response = reqwest::get(app.url(&format!("/api/download-log/{name}")))
            .await
            .unwrap();
        assert_eq!(response.status(), 404, "name: {name}");
        assert_eq!(response.text().await.unwrap(), "File not found");
    }
}

#[tokio::test]
async fn test_index_page() {
    let app = spawn_app(ModelGateway::Unconfigured).await;

    let missing = reqwest::get(app.url("/")).await.unwrap();
    assert_eq!(missing.status(), 404);

    std::fs::write(app.dir.path().join("index.html"), "<h1>Timeline</h1>").unwrap();
    let page = reqwest::get(app.url("/")).await.unwrap();
    assert_eq!(page.status(), 200);
    assert_eq!(page.text().await.unwrap(), "<h1>Timeline</h1>");
}
