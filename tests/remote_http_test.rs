//! Remote sync client against a real HTTP server.

use seatbelt::adapters::{MockGpio, RecordingUi, ReqwestHttpClient};
use seatbelt::app::{run_headless, App};
use seatbelt::config::BeltConfig;
use seatbelt::controller::MSG_CONNECTED;
use seatbelt::error::SyncError;
use seatbelt::remote::{RemoteSyncClient, JSON_CONTENT_TYPE};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DEVICE: &str = "5a180c10857aba0001b937f4";

fn client(server: &MockServer) -> RemoteSyncClient<ReqwestHttpClient> {
    let config = BeltConfig::default().with_base_url(server.uri());
    RemoteSyncClient::new(ReqwestHttpClient::new(), &config.base_url).unwrap()
}

#[tokio::test]
async fn test_fetch_status_reads_secured_flag() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/seatbelt"))
        .and(query_param("id", DEVICE))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "secured": true,
            "updatedAt": "2026-10-18T08:00:00Z"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let record = client(&mock_server).fetch_status(DEVICE).await.unwrap();
    assert!(record.secured);
    assert_eq!(record.device_id, DEVICE);
}

#[tokio::test]
async fn test_fetch_status_server_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/seatbelt"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server).fetch_status(DEVICE).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(matches!(err, SyncError::Status { ref body, .. } if body == "boom"));
}

#[tokio::test]
async fn test_fetch_status_missing_field() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/seatbelt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "buckled": true })))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server).fetch_status(DEVICE).await.unwrap_err();
    assert!(matches!(err, SyncError::Decode { .. }));
}

#[tokio::test]
async fn test_fetch_status_non_boolean_field() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/seatbelt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "secured": "yes" })))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server).fetch_status(DEVICE).await.unwrap_err();
    assert!(matches!(err, SyncError::Decode { .. }));
}

#[tokio::test]
async fn test_push_status_sends_json_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/seatbelt"))
        .and(query_param("id", DEVICE))
        .and(header("content-type", JSON_CONTENT_TYPE))
        .and(body_json(json!({ "secured": true })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    client(&mock_server).push_status(DEVICE, true).await.unwrap();
}

#[tokio::test]
async fn test_push_status_accepts_any_response() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/seatbelt"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such device"))
        .expect(1)
        .mount(&mock_server)
        .await;

    assert!(client(&mock_server).push_status(DEVICE, false).await.is_ok());
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let mock_server = MockServer::start().await;
    let sync = client(&mock_server);
    drop(mock_server);

    let err = sync.fetch_status(DEVICE).await.unwrap_err();
    assert!(matches!(err, SyncError::Transport { .. }));
    assert!(sync.push_status(DEVICE, true).await.is_err());
}

#[tokio::test]
async fn test_app_startup_over_http() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/seatbelt"))
        .and(body_json(json!({ "secured": false })))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/seatbelt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "secured": true })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = BeltConfig::default()
        .with_base_url(mock_server.uri())
        .with_echo_requests(false);
    let gpio = MockGpio::new();
    let mut handle = gpio.clone();
    let app = App::open(&config, ReqwestHttpClient::new(), &mut handle, RecordingUi::new()).unwrap();
    gpio.disconnect(config.button_pin);

    let ctl = run_headless(app, std::future::pending()).await;
    assert!(ctl.secured());
    assert_eq!(ctl.ui().transcript, vec![MSG_CONNECTED.to_string()]);
}
