//! Endpoint contract tests.
//!
//! Each test spawns the real router on an ephemeral localhost port and talks
//! to it over HTTP with reqwest. The metadata client is pointed at either a
//! stub metadata service or a deliberately unreachable address, so no test
//! depends on running inside a cloud instance.

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use axum::extract::Request;
use axum::routing::{get, put};
use axum::Router;
use http::StatusCode;

use pulsecheck::host::LocalIpResolver;
use pulsecheck::metadata::MetadataClient;
use pulsecheck::routes::create_router;
use pulsecheck::state::AppState;

const TOKEN_HEADER: &str = "X-aws-ec2-metadata-token";
const STUB_TOKEN: &str = "stub-session-token";
const STUB_INSTANCE_ID: &str = "i-0123456789abcdef0";

/// Spawn the application on an ephemeral port, returning its base URL.
async fn spawn_app(metadata_base_url: String, local_ip: LocalIpResolver) -> String {
    let metadata = MetadataClient::with_base_url(metadata_base_url).expect("client builds");
    let state = AppState::new(Instant::now(), metadata, local_ip);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("server runs");
    });

    format!("http://{addr}")
}

/// Spawn a stub IMDSv2 metadata service, returning its base URL.
///
/// Answers the token PUT with a fixed token and the instance-id GET with a
/// fixed id, but only when the correct token header is presented.
async fn spawn_stub_metadata() -> String {
    let app = Router::new()
        .route("/latest/api/token", put(|| async { STUB_TOKEN }))
        .route(
            "/latest/meta-data/instance-id",
            get(|request: Request| async move {
                let token = request
                    .headers()
                    .get(TOKEN_HEADER)
                    .and_then(|v| v.to_str().ok());
                if token == Some(STUB_TOKEN) {
                    (StatusCode::OK, STUB_INSTANCE_ID)
                } else {
                    (StatusCode::UNAUTHORIZED, "")
                }
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub port");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub runs");
    });

    format!("http://{addr}")
}

/// A localhost URL nothing listens on (bound once, then dropped).
async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind throwaway port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}

#[tokio::test]
async fn root_returns_empty_204() {
    let base = spawn_app(unreachable_base_url().await, LocalIpResolver::system()).await;

    let response = reqwest::get(format!("{base}/")).await.expect("request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(response.headers().get("content-type").is_none());
    assert!(response.bytes().await.expect("body").is_empty());
}

#[tokio::test]
async fn health_returns_ok_json() {
    let base = spawn_app(unreachable_base_url().await, LocalIpResolver::system()).await;

    let response = reqwest::get(format!("{base}/health"))
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("application/json")
    );
    assert_eq!(response.text().await.expect("body"), r#"{"status":"ok"}"#);
}

#[tokio::test]
async fn health_responses_are_byte_identical() {
    let base = spawn_app(unreachable_base_url().await, LocalIpResolver::system()).await;

    let first = reqwest::get(format!("{base}/health"))
        .await
        .expect("request")
        .bytes()
        .await
        .expect("body");
    let second = reqwest::get(format!("{base}/health"))
        .await
        .expect("request")
        .bytes()
        .await
        .expect("body");
    assert_eq!(first, second);
}

#[tokio::test]
async fn unknown_path_returns_empty_404() {
    let base = spawn_app(unreachable_base_url().await, LocalIpResolver::system()).await;

    let response = reqwest::get(format!("{base}/nope")).await.expect("request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.bytes().await.expect("body").is_empty());
}

#[tokio::test]
async fn non_get_method_is_rejected() {
    let base = spawn_app(unreachable_base_url().await, LocalIpResolver::system()).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/health"))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn uptime_is_non_negative_and_monotonic() {
    let base = spawn_app(unreachable_base_url().await, LocalIpResolver::system()).await;

    let fetch = || async {
        let body: serde_json::Value = reqwest::get(format!("{base}/uptime"))
            .await
            .expect("request")
            .json()
            .await
            .expect("json body");
        body.get("uptime_seconds")
            .and_then(serde_json::Value::as_u64)
            .expect("uptime_seconds is a non-negative integer")
    };

    let first = fetch().await;
    tokio::time::sleep(Duration::from_millis(1100)).await;
    let second = fetch().await;

    assert!(second >= first);
    // ~1.1s elapsed: at least 1, and a ceiling that would catch the value
    // being reported in the wrong unit
    assert!(second >= 1);
    assert!(second <= 3);
}

#[tokio::test]
async fn status_reports_instance_id_from_token_protocol() {
    let stub = spawn_stub_metadata().await;
    let base = spawn_app(stub, LocalIpResolver::system()).await;

    let body: serde_json::Value = reqwest::get(format!("{base}/status"))
        .await
        .expect("request")
        .json()
        .await
        .expect("json body");

    assert_eq!(body["instance_id"], STUB_INSTANCE_ID);
    assert!(body["local_ip"].is_string());
}

#[tokio::test]
async fn status_falls_back_when_metadata_unreachable() {
    let base = spawn_app(unreachable_base_url().await, LocalIpResolver::system()).await;

    // Bounded by the two 1-second lookup timeouts
    let response = tokio::time::timeout(
        Duration::from_secs(5),
        reqwest::get(format!("{base}/status")),
    )
    .await
    .expect("completes within the lookup timeouts")
    .expect("request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("json body");

    let object = body.as_object().expect("json object");
    assert_eq!(object.len(), 2);
    assert_eq!(body["instance_id"], "not available");
    assert!(body["local_ip"].is_string());
}

#[tokio::test]
async fn status_falls_back_when_all_lookups_fail() {
    let base = spawn_app(
        unreachable_base_url().await,
        LocalIpResolver::with_hostname("pulsecheck-no-such-host.invalid"),
    )
    .await;

    // Bounded by the two 1-second lookup timeouts
    let response = tokio::time::timeout(
        Duration::from_secs(5),
        reqwest::get(format!("{base}/status")),
    )
    .await
    .expect("completes within the lookup timeouts")
    .expect("request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("json body");

    assert_eq!(body["instance_id"], "not available");
    assert_eq!(body["local_ip"], "not available");
}

#[tokio::test]
async fn status_falls_back_on_metadata_error_status() {
    // Stub that refuses to issue tokens
    let app = Router::new().route(
        "/latest/api/token",
        put(|| async { (StatusCode::FORBIDDEN, "") }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub runs");
    });

    let base = spawn_app(format!("http://{addr}"), LocalIpResolver::system()).await;

    let body: serde_json::Value = reqwest::get(format!("{base}/status"))
        .await
        .expect("request")
        .json()
        .await
        .expect("json body");

    assert_eq!(body["instance_id"], "not available");
}
