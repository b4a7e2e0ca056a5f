use std::sync::Arc;
use std::time::Duration;

use news_core::{
    probe_once, spawn_connectivity_monitor, ClientConfig, Connectivity, HttpNewsClient,
    MonitorConfig, NewsApi,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(uri: String) -> HttpNewsClient {
    let config = ClientConfig {
        base_url: uri,
        request_timeout_seconds: 2,
        ..ClientConfig::default()
    };
    HttpNewsClient::new(&config).unwrap()
}

#[tokio::test]
async fn probe_reports_online_for_healthy_backend() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "Server is healthy",
            "time": "2024-10-21T07:28:00Z"
        })))
        .mount(&server)
        .await;

    let client = client_for(server.uri());
    assert_eq!(probe_once(&client).await, Connectivity::Online);
    let health = client.check_health().await.unwrap();
    assert_eq!(health.message.as_deref(), Some("Server is healthy"));
}

#[tokio::test]
async fn probe_reports_offline_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    assert_eq!(probe_once(&client_for(server.uri())).await, Connectivity::Offline);
}

#[tokio::test]
async fn monitor_publishes_transition_and_stops() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "status": "ok" })),
        )
        .mount(&server)
        .await;

    let api: Arc<dyn NewsApi> = Arc::new(client_for(server.uri()));
    let handle = spawn_connectivity_monitor(
        api,
        MonitorConfig {
            interval: Duration::from_millis(50),
        },
    );
    assert_eq!(handle.status(), Connectivity::Unknown);

    let mut status = handle.subscribe();
    tokio::time::timeout(Duration::from_secs(2), status.changed())
        .await
        .expect("timed out")
        .expect("monitor dropped");
    assert_eq!(*status.borrow(), Connectivity::Online);
    assert_eq!(handle.status(), Connectivity::Online);

    handle.stop().await.expect("stop monitor");
}

#[tokio::test]
async fn zero_interval_monitor_keeps_running() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "status": "ok" })),
        )
        .mount(&server)
        .await;

    let api: Arc<dyn NewsApi> = Arc::new(client_for(server.uri()));
    let handle = spawn_connectivity_monitor(
        api,
        MonitorConfig {
            interval: Duration::ZERO,
        },
    );

    let mut status = handle.subscribe();
    tokio::time::timeout(Duration::from_secs(2), status.changed())
        .await
        .expect("timed out")
        .expect("monitor dropped");
    assert_eq!(*status.borrow(), Connectivity::Online);

    handle.stop().await.expect("stop monitor");
}
