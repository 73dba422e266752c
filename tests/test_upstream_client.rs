use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use gitmetrics::services::github::{ApiError, GitHubClient};
use serde_json::{Value, json};
use tokio::net::TcpListener;

async fn spawn_upstream(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn client_for(base_url: &str) -> GitHubClient {
    GitHubClient::new(None, base_url).expect("client should build")
}

#[tokio::test]
async fn success_returns_parsed_body() {
    let app = Router::new().route(
        "/repos/octocat/Hello-World",
        get(|| async {
            Json(json!({"full_name": "octocat/Hello-World", "stargazers_count": 1500}))
        }),
    );
    let base = spawn_upstream(app).await;

    let value = client_for(&base)
        .request("/repos/octocat/Hello-World")
        .await
        .expect("request should succeed");

    assert_eq!(value["full_name"], "octocat/Hello-World");
    assert_eq!(value["stargazers_count"], 1500);
}

#[tokio::test]
async fn missing_resource_maps_to_not_found() {
    let base = spawn_upstream(Router::new()).await;

    let err = client_for(&base)
        .request("/users/no-such-user")
        .await
        .unwrap_err();

    assert_eq!(err, ApiError::NotFound);
}

#[tokio::test]
async fn forbidden_with_rate_limit_message_maps_to_rate_limited() {
    let app = Router::new().route(
        "/users/octocat",
        get(|| async {
            (
                StatusCode::FORBIDDEN,
                Json(json!({
                    "message": "API rate limit exceeded for 203.0.113.7.",
                    "documentation_url": "https://docs.github.com/rest"
                })),
            )
        }),
    );
    let base = spawn_upstream(app).await;

    let err = client_for(&base).request("/users/octocat").await.unwrap_err();

    match err {
        ApiError::RateLimited(message) => {
            assert!(message.contains("rate limit exceeded"));
        }
        other => panic!("expected RateLimited, got {:?}", other),
    }
}

#[tokio::test]
async fn forbidden_without_rate_limit_message_maps_to_upstream_http() {
    let app = Router::new().route(
        "/users/octocat",
        get(|| async { (StatusCode::FORBIDDEN, Json(json!({"message": "Forbidden"}))) }),
    );
    let base = spawn_upstream(app).await;

    let err = client_for(&base).request("/users/octocat").await.unwrap_err();

    assert_eq!(err, ApiError::UpstreamHttp(403));
}

#[tokio::test]
async fn other_failure_statuses_map_to_upstream_http() {
    let app = Router::new().route(
        "/users/octocat",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base = spawn_upstream(app).await;

    let err = client_for(&base).request("/users/octocat").await.unwrap_err();

    assert_eq!(err, ApiError::UpstreamHttp(500));
}

#[tokio::test]
async fn transport_failure_maps_to_network_error() {
    // Bind then drop so the port is known to refuse connections.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client_for(&format!("http://{}", addr))
        .request("/users/octocat")
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Network(_)));
}

#[derive(Clone)]
struct PagedUpstream {
    sizes: Arc<Vec<usize>>,
    hits: Arc<AtomicUsize>,
}

async fn paged_items(
    State(upstream): State<PagedUpstream>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    upstream.hits.fetch_add(1, Ordering::SeqCst);

    assert_eq!(params.get("per_page").map(String::as_str), Some("100"));

    let page: usize = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let size = upstream.sizes.get(page - 1).copied().unwrap_or(0);

    let items: Vec<Value> = (0..size).map(|i| json!({"id": (page - 1) * 100 + i})).collect();
    Json(Value::Array(items))
}

async fn paged_upstream(sizes: Vec<usize>) -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let state = PagedUpstream {
        sizes: Arc::new(sizes),
        hits: hits.clone(),
    };
    let app = Router::new().route("/items", get(paged_items)).with_state(state);

    (spawn_upstream(app).await, hits)
}

#[tokio::test]
async fn pagination_stops_after_a_short_page() {
    let (base, hits) = paged_upstream(vec![100, 100, 40]).await;

    let items = client_for(&base).paginated_request("/items", 10).await;

    assert_eq!(items.len(), 240);
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn pagination_respects_max_pages() {
    let (base, hits) = paged_upstream(vec![100; 12]).await;

    let items = client_for(&base).paginated_request("/items", 10).await;

    assert_eq!(items.len(), 1000);
    assert_eq!(hits.load(Ordering::SeqCst), 10);
}

#[tokio::test]
async fn pagination_stops_on_an_empty_page() {
    let (base, hits) = paged_upstream(vec![100, 0]).await;

    let items = client_for(&base).paginated_request("/items", 10).await;

    assert_eq!(items.len(), 100);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn pagination_keeps_pages_gathered_before_a_failure() {
    let hits = Arc::new(AtomicUsize::new(0));
    let handler_hits = hits.clone();

    let flaky = move |Query(params): Query<HashMap<String, String>>| {
        let hits = handler_hits.clone();
        async move {
            hits.fetch_add(1, Ordering::SeqCst);

            let page: usize = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
            if page >= 2 {
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }

            let items: Vec<Value> = (0..100).map(|i| json!({"id": i})).collect();
            Json(Value::Array(items)).into_response()
        }
    };

    let app = Router::new().route("/items", get(flaky));
    let base = spawn_upstream(app).await;

    let items = client_for(&base).paginated_request("/items", 10).await;

    assert_eq!(items.len(), 100);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn pagination_appends_to_an_existing_query_string() {
    async fn handler(Query(params): Query<HashMap<String, String>>) -> Response {
        if params.get("state").map(String::as_str) != Some("all") {
            return StatusCode::BAD_REQUEST.into_response();
        }

        Json(json!([{"id": 1}])).into_response()
    }

    let app = Router::new().route("/items", get(handler));
    let base = spawn_upstream(app).await;

    let items = client_for(&base).paginated_request("/items?state=all", 10).await;

    assert_eq!(items.len(), 1);
}
