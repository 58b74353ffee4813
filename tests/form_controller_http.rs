/// Form controller driven against a mocked submission endpoint
use solaris_mission_control::form_controller::{
    FormController, HttpSubmissionClient, SubmissionTransport, SubmitOutcome, TransportError,
};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_successful_submission_posts_json_and_resets() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/submit-email"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({"email": "user@example.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"success": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let transport = HttpSubmissionClient::new(&mock_server.uri()).unwrap();
    let mut form = FormController::new();
    form.open_dialog();
    form.set_input("user@example.com");

    assert_eq!(form.submit(&transport).await, SubmitOutcome::Submitted);
    assert_eq!(form.input(), "");
    assert!(!form.is_dialog_open());
}

#[tokio::test]
async fn test_server_error_keeps_input() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/submit-email"))
        .respond_with(ResponseTemplate::new(500).set_body_json(
            serde_json::json!({"error": "Failed to submit email", "status": 500}),
        ))
        .mount(&mock_server)
        .await;

    let transport = HttpSubmissionClient::new(&mock_server.uri()).unwrap();
    let mut form = FormController::new();
    form.open_dialog();
    form.set_input("user@example.com");

    assert_eq!(form.submit(&transport).await, SubmitOutcome::Failed);
    assert_eq!(form.input(), "user@example.com");
    assert_eq!(form.error(), Some("Failed to submit email"));
    assert!(form.is_dialog_open());
}

#[tokio::test]
async fn test_invalid_input_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let transport = HttpSubmissionClient::new(&mock_server.uri()).unwrap();
    let mut form = FormController::new();
    form.set_input("not-an-email");

    assert_eq!(form.submit(&transport).await, SubmitOutcome::Invalid);
    assert_eq!(form.error(), Some("Please enter a valid email address"));
}

#[tokio::test]
async fn test_transport_reports_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&mock_server)
        .await;

    let transport = HttpSubmissionClient::new(&mock_server.uri()).unwrap();
    let result = transport.submit_email("user@example.com").await;

    assert_eq!(result, Err(TransportError::Status(502)));
}

#[tokio::test]
async fn test_network_error_is_a_failure() {
    // Nothing listens on the discard port
    let transport = HttpSubmissionClient::new("http://127.0.0.1:9").unwrap();
    let mut form = FormController::new();
    form.set_input("user@example.com");

    assert_eq!(form.submit(&transport).await, SubmitOutcome::Failed);
    assert_eq!(form.input(), "user@example.com");
    assert!(!form.is_submitting());
}

#[test]
fn test_endpoint_is_joined_to_site_url() {
    let transport = HttpSubmissionClient::new("https://hacksolaris.com").unwrap();
    assert_eq!(
        transport.endpoint().as_str(),
        "https://hacksolaris.com/api/submit-email"
    );
}
