/// Resend client against a mocked provider
use solaris_mission_control::email_template::render_recruitment_letter;
use solaris_mission_control::errors::AppError;
use solaris_mission_control::mailer::{EmailDispatcher, ResendMailer};
use solaris_mission_control::models::OutboundEmail;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn letter(to: &str) -> OutboundEmail {
    OutboundEmail {
        from: "Solaris Mission Control <onboarding@hacksolaris.com>".to_string(),
        to: vec![to.to_string()],
        subject: "Welcome to Mission Control!".to_string(),
        html: render_recruitment_letter(to),
    }
}

#[tokio::test]
async fn test_send_posts_message_with_bearer_key() {
    let mock_server = MockServer::start().await;
    let email = letter("cadet@example.com");

    Mock::given(method("POST"))
        .and(path("/emails"))
        .and(header("authorization", "Bearer re_test_key"))
        .and(body_json(serde_json::to_value(&email).unwrap()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "abc"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mailer = ResendMailer::new(mock_server.uri(), "re_test_key".to_string()).unwrap();
    let result = mailer.send(&email).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_provider_rejection_is_dispatch_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
            "statusCode": 422,
            "name": "validation_error",
            "message": "Invalid `to` field."
        })))
        .mount(&mock_server)
        .await;

    let mailer = ResendMailer::new(mock_server.uri(), "re_test_key".to_string()).unwrap();
    let err = mailer.send(&letter("cadet@example.com")).await.unwrap_err();

    match err {
        AppError::Dispatch(msg) => assert!(msg.contains("422")),
        other => panic!("expected dispatch error, got {}", other),
    }
}

#[tokio::test]
async fn test_unreachable_provider_is_dispatch_error() {
    let mailer = ResendMailer::new("http://127.0.0.1:9".to_string(), "k".to_string()).unwrap();
    let err = mailer.send(&letter("cadet@example.com")).await.unwrap_err();
    match err {
        AppError::Dispatch(msg) => assert!(msg.starts_with("Resend request failed")),
        other => panic!("expected dispatch error, got {}", other),
    }
}
