//! End-to-end tests for the `/search` route.
//!
//! The router is served on an ephemeral port in front of a mock subgraph,
//! and exercised over HTTP exactly as a client would.

use std::sync::Arc;

use agent_index::server::router;
use agent_search::{RankConfig, SubgraphConfig, SubgraphSource};
use serde_json::{Value, json};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mock_subgraph(body: Value, status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(&server)
        .await;
    server
}

async fn spawn_service(subgraph: &MockServer) -> String {
    let source = SubgraphSource::new(SubgraphConfig::new(format!("{}/graphql", subgraph.uri())))
        .expect("valid subgraph config");
    let app = router(Arc::new(source), RankConfig::default());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

fn agents_body() -> Value {
    json!({
        "data": { "agents": [
            { "id": "1", "name": "Atlas Agent", "description": "search tool", "isActive": true },
            { "id": "2", "name": "Orion", "description": "atlas mapping system", "isActive": true },
            { "id": "3", "name": "Vega", "description": "star catalogue", "isActive": true }
        ]}
    })
}

#[tokio::test]
async fn search_returns_ranked_agents_with_scores() {
    let subgraph = mock_subgraph(agents_body(), 200).await;
    let base = spawn_service(&subgraph).await;

    let response = reqwest::get(format!("{base}/search?q=atlas"))
        .await
        .expect("request");
    assert_eq!(response.status(), 200);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );

    let body: Vec<Value> = response.json().await.expect("json array");
    assert_eq!(body.len(), 2);
    assert_eq!(body[0]["id"], "1");
    assert_eq!(body[1]["id"], "2");
    assert_eq!(body[0]["isActive"], true);
    let first = body[0]["score"].as_f64().expect("score");
    let second = body[1]["score"].as_f64().expect("score");
    assert!(first >= second && second > 0.0);
}

#[tokio::test]
async fn top_k_limits_results() {
    let subgraph = mock_subgraph(agents_body(), 200).await;
    let base = spawn_service(&subgraph).await;

    let body: Vec<Value> = reqwest::get(format!("{base}/search?q=atlas&top_k=1"))
        .await
        .expect("request")
        .json()
        .await
        .expect("json array");
    assert_eq!(body.len(), 1);
    assert_eq!(body[0]["id"], "1");
}

#[tokio::test]
async fn missing_query_is_rejected() {
    let subgraph = mock_subgraph(agents_body(), 200).await;
    let base = spawn_service(&subgraph).await;

    let response = reqwest::get(format!("{base}/search?q=%20%20"))
        .await
        .expect("request");
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("json");
    assert_eq!(body["error"], "Missing query parameter 'q'");
}

#[tokio::test]
async fn no_candidates_returns_empty_list() {
    let subgraph = mock_subgraph(json!({"data": {"agents": []}}), 200).await;
    let base = spawn_service(&subgraph).await;

    let body: Vec<Value> = reqwest::get(format!("{base}/search?q=atlas"))
        .await
        .expect("request")
        .json()
        .await
        .expect("json array");
    assert!(body.is_empty());
}

#[tokio::test]
async fn upstream_failure_is_internal_error() {
    let subgraph = mock_subgraph(json!({"message": "unavailable"}), 503).await;
    let base = spawn_service(&subgraph).await;

    let response = reqwest::get(format!("{base}/search?q=atlas"))
        .await
        .expect("request");
    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.expect("json");
    assert!(body["error"].as_str().expect("message").contains("503"));
}

#[tokio::test]
async fn health_reports_ok() {
    let subgraph = mock_subgraph(agents_body(), 200).await;
    let base = spawn_service(&subgraph).await;

    let body: Value = reqwest::get(format!("{base}/health"))
        .await
        .expect("request")
        .json()
        .await
        .expect("json");
    assert_eq!(body["status"], "ok");
}
