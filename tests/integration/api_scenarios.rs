//! `GET`/`POST /api/scenarios` and `GET /api/metrics` workflows.

use pretty_assertions::assert_eq;
use scenario_timeline::gateway::ModelGateway;
use scenario_timeline::timeline::{TimelineEvent, FALLBACK_DESCRIPTION};
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{files_in, hosted_gateway, local_gateway, ndjson, spawn_app};

async fn post_prompt(url: &str, body: &Value) -> reqwest::Response {
    reqwest::Client::new()
        .post(url)
        .json(body)
        .send()
        .await
        .expect("request failed")
}

#[tokio::test]
async fn test_get_scenarios_returns_sample_before_generation() {
    let app = spawn_app(ModelGateway::Unconfigured).await;

    let response = reqwest::get(app.url("/api/scenarios")).await.unwrap();
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    let scenarios = body.as_array().unwrap();
    assert_eq!(scenarios.len(), 1);
    assert_eq!(scenarios[0]["scenario"]["title"], "Sample AI Scenario");
    assert_eq!(scenarios[0]["items"].as_array().unwrap().len(), 1);
    assert!(scenarios[0]["items"][0].get("futureTimelines").is_some());
}

#[tokio::test]
async fn test_post_scenarios_with_local_backend() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            ndjson(&[
                "Here you go:\n[{\"title\":\"First reactor\",",
                "\"date\":\"2029\",\"description\":\"Grid power\"}]",
            ]),
            "application/x-ndjson",
        ))
        .expect(1)
        .mount(&backend)
        .await;

    let app = spawn_app(local_gateway(&format!("{}/api/generate", backend.uri()))).await;
    let response = post_prompt(&app.url("/api/scenarios"), &json!({"prompt": "Fusion power"})).await;

    assert_eq!(response.status(), 200);
    let events: Vec<TimelineEvent> = response.json().await.unwrap();
    assert_eq!(
        events,
        vec![TimelineEvent::new("First reactor", "2029", "Grid power")]
    );

    let logs = files_in(&app.log_dir());
    assert_eq!(logs.len(), 1);
    assert!(logs[0].ends_with("-fusion-power.md"));
    let content = std::fs::read_to_string(app.log_dir().join(&logs[0])).unwrap();
    assert_eq!(
        content,
        "# Timeline for: Fusion power\n\n## First reactor (2029)\n\nGrid power\n\n"
    );
}

#[tokio::test]
async fn test_post_scenarios_with_hosted_backend() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": "```json\n{\"title\":\"Launch\",\"date\":\"2031\",\"description\":\"Liftoff\"}\n```"
                }
            }]
        })))
        .expect(1)
        .mount(&backend)
        .await;

    let app = spawn_app(hosted_gateway(&backend.uri())).await;
    let response = post_prompt(&app.url("/api/scenarios"), &json!({"prompt": "Mars"})).await;

    assert_eq!(response.status(), 200);
    let events: Vec<TimelineEvent> = response.json().await.unwrap();
    assert_eq!(events, vec![TimelineEvent::new("Launch", "2031", "Liftoff")]);
}

#[tokio::test]
async fn test_post_scenarios_degrades_when_backend_fails() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&backend)
        .await;

    let app = spawn_app(hosted_gateway(&backend.uri())).await;
    let response = post_prompt(&app.url("/api/scenarios"), &json!({"prompt": "Oceans"})).await;

    assert_eq!(response.status(), 200);
    let events: Vec<TimelineEvent> = response.json().await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].title, "Scenario for: Oceans");
    assert_eq!(events[0].description, FALLBACK_DESCRIPTION);
}

#[tokio::test]
async fn test_post_scenarios_degrades_when_backend_unreachable() {
    let app = spawn_app(local_gateway("http://127.0.0.1:1/api/generate")).await;
    let response = post_prompt(&app.url("/api/scenarios"), &json!({"prompt": "Cities"})).await;

    assert_eq!(response.status(), 200);
    let events: Vec<TimelineEvent> = response.json().await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].description, FALLBACK_DESCRIPTION);
}

#[tokio::test]
async fn test_post_scenarios_without_backend() {
    let app = spawn_app(ModelGateway::Unconfigured).await;
    let response = post_prompt(&app.url("/api/scenarios"), &json!({"prompt": "x"})).await;

    assert_eq!(response.status(), 200);
    let events: Vec<Value> = response.json().await.unwrap();
    assert_eq!(events.len(), 1);
}

#[tokio::test]
async fn test_post_scenarios_requires_prompt() {
    let app = spawn_app(ModelGateway::Unconfigured).await;
    let client = reqwest::Client::new();

    for body in ["not json", "{}", r#"{"prompt":""}"#, r#"{"prompt":7}"#] {
        let response = client
            .post(app.url("/api/scenarios"))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 400, "body: {body}");
        let error: Value = response.json().await.unwrap();
        assert_eq!(error, json!({"error": "Prompt is required."}));
    }
    assert!(files_in(&app.log_dir()).is_empty());
}

#[tokio::test]
async fn test_metrics_reflect_generations() {
    let app = spawn_app(ModelGateway::Unconfigured).await;
    post_prompt(&app.url("/api/scenarios"), &json!({"prompt": "a"})).await;
    post_prompt(&app.url("/api/scenarios"), &json!({"prompt": "b"})).await;

    let summary: Value = reqwest::get(app.url("/api/metrics"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(summary["total_generations"], 2);
    assert_eq!(summary["fallback_rate"], 1.0);
    assert_eq!(summary["by_backend"]["none"]["failed"], 2);
    assert_eq!(summary["by_strategy"]["raw_fallback"], 2);
}
