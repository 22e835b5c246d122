use std::sync::Arc;
use std::time::Duration;

use barconsole::client::poller;
use barconsole::client::{
    ActionRequest, ActionTransport, Endpoint, HttpActionClient, TransportError,
};
use tokio_test::{assert_err, assert_ok};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string, header, method},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn client(appliance: &MockServer, system: &MockServer) -> HttpActionClient {
    HttpActionClient::new(appliance.uri(), system.uri(), Duration::from_secs(2)).unwrap()
}

fn json_reply(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "application/json")
}

// ============================================================================
// Request Encoding
// ============================================================================

#[tokio::test]
async fn test_request_is_form_encoded_with_ajax_header() {
    let appliance = MockServer::start().await;
    let system = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header("X-Requested-With", "XMLHttpRequest"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("action=X&a=1&b=2"))
        .respond_with(json_reply(r#"{"a": 1, "b": 2}"#))
        .expect(1)
        .mount(&appliance)
        .await;

    let request = ActionRequest::new("X").with("a", 1).with("b", 2);
    let response = assert_ok!(client(&appliance, &system).send(Endpoint::Appliance, &request).await);
    assert_eq!(response.get("b"), Some(&serde_json::json!(2)));
}

#[tokio::test]
async fn test_system_commands_go_to_system_endpoint() {
    let appliance = MockServer::start().await;
    let system = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string("action=reboot"))
        .respond_with(json_reply("{}"))
        .expect(1)
        .mount(&system)
        .await;
    Mock::given(method("POST"))
        .respond_with(json_reply("{}"))
        .expect(0)
        .mount(&appliance)
        .await;

    let request = ActionRequest::new("reboot");
    assert_ok!(client(&appliance, &system).send(Endpoint::System, &request).await);
}

// ============================================================================
// Reply Handling
// ============================================================================

#[tokio::test]
async fn test_application_error_is_data_not_failure() {
    let appliance = MockServer::start().await;
    let system = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(json_reply(r#"{"error": "Recipe name taken"}"#))
        .mount(&appliance)
        .await;

    let response = assert_ok!(
        client(&appliance, &system)
            .send(Endpoint::Appliance, &ActionRequest::new("saverecipe"))
            .await
    );
    assert_eq!(response.error(), Some("Recipe name taken"));
}

#[tokio::test]
async fn test_json_body_without_json_content_type() {
    let appliance = MockServer::start().await;
    let system = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"status": "idle"}"#, "text/plain"),
        )
        .mount(&appliance)
        .await;

    let response = assert_ok!(
        client(&appliance, &system)
            .send(Endpoint::Appliance, &ActionRequest::new("status"))
            .await
    );
    assert_eq!(response.str_field("status"), Some("idle"));
}

#[tokio::test]
async fn test_http_error_status() {
    let appliance = MockServer::start().await;
    let system = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&appliance)
        .await;

    let result = client(&appliance, &system)
        .send(Endpoint::Appliance, &ActionRequest::new("status"))
        .await;
    assert_eq!(assert_err!(result), TransportError::Status(500));
}

#[tokio::test]
async fn test_non_json_body_is_decode_error() {
    let appliance = MockServer::start().await;
    let system = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&appliance)
        .await;

    let result = client(&appliance, &system)
        .send(Endpoint::Appliance, &ActionRequest::new("status"))
        .await;
    assert!(matches!(result, Err(TransportError::Decode(_))));
}

#[tokio::test]
async fn test_connection_refused_is_unreachable() {
    let appliance = MockServer::start().await;
    let uri = appliance.uri();
    drop(appliance);

    let client = HttpActionClient::new(uri.clone(), uri, Duration::from_secs(2)).unwrap();
    let result = client
        .send(Endpoint::Appliance, &ActionRequest::new("status"))
        .await;
    assert!(matches!(result, Err(TransportError::Unreachable(_))));
}

// ============================================================================
// Status Poller
// ============================================================================

#[tokio::test]
async fn test_poller_ticks_until_stopped() {
    let appliance = MockServer::start().await;
    let system = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string("action=status"))
        .respond_with(json_reply(r#"{"status": "mixing", "progress": 40}"#))
        .expect(3)
        .mount(&appliance)
        .await;

    let transport: Arc<dyn ActionTransport> = Arc::new(client(&appliance, &system));
    let mut ticks = Vec::new();
    poller::run(transport, Duration::from_millis(10), |result| {
        ticks.push(result);
        ticks.len() < 3
    })
    .await;

    assert_eq!(ticks.len(), 3);
    for tick in ticks {
        let response = assert_ok!(tick);
        assert_eq!(response.str_field("status"), Some("mixing"));
    }
}

#[tokio::test]
async fn test_poller_reports_failures_and_keeps_going() {
    let appliance = MockServer::start().await;
    let system = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&appliance)
        .await;

    let transport = Arc::new(client(&appliance, &system));
    let mut failures = 0;
    poller::run(transport, Duration::from_millis(10), |result| {
        if result.is_err() {
            failures += 1;
        }
        failures < 2
    })
    .await;

    assert_eq!(failures, 2);
}
