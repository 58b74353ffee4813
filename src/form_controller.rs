//! Client side of the lead capture form.
//!
//! [`FormController`] owns the dialog state (input text, error line,
//! dialog visibility, in-flight flag) and talks to the server through a
//! [`SubmissionTransport`].

use crate::errors::SUBMIT_FAILED_MESSAGE;
use crate::models::SubmitEmailRequest;
use crate::validation::{is_valid_email, INVALID_EMAIL_MESSAGE};
use async_trait::async_trait;
use std::time::Duration;
use url::Url;

/// Path of the submission endpoint relative to the site root.
pub const SUBMIT_EMAIL_PATH: &str = "/api/submit-email";

/// Sends one address to the submission endpoint.
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    /// `Ok(())` only for a 2xx answer. Any other status or network error is `Err`.
    async fn submit_email(&self, email: &str) -> Result<(), TransportError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Server answered with a non-2xx status.
    Status(u16),
    /// Request never completed.
    Network(String),
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportError::Status(code) => write!(f, "server answered {}", code),
            TransportError::Network(msg) => write!(f, "network error: {}", msg),
        }
    }
}

impl std::error::Error for TransportError {}

/// reqwest-based transport pointed at a running site.
#[derive(Clone)]
pub struct HttpSubmissionClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpSubmissionClient {
    pub fn new(site_url: &str) -> anyhow::Result<Self> {
        let endpoint = Url::parse(site_url)?.join(SUBMIT_EMAIL_PATH)?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SubmissionTransport for HttpSubmissionClient {
    async fn submit_email(&self, email: &str) -> Result<(), TransportError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&SubmitEmailRequest {
                email: email.to_string(),
            })
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }
        Ok(())
    }
}

/// What a call to [`FormController::submit`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Server accepted the address; the form was reset.
    Submitted,
    /// Local validation failed; no request was sent.
    Invalid,
    /// Request sent but failed; input kept for retry.
    Failed,
    /// Another submission from this form is still in flight.
    AlreadySubmitting,
}

/// Ticket for a request that [`FormController::begin_submit`] allowed.
#[derive(Debug)]
pub struct PendingSubmission {
    pub email: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormController {
    input: String,
    error: Option<String>,
    dialog_open: bool,
    submitting: bool,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_dialog(&mut self) {
        self.dialog_open = true;
    }

    pub fn close_dialog(&mut self) {
        self.dialog_open = false;
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_dialog_open(&self) -> bool {
        self.dialog_open
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Whether the submit button should accept a click.
    pub fn can_submit(&self) -> bool {
        !self.submitting
    }

    /// Validates the input and, if allowed, marks the form as in flight.
    ///
    /// Returns `Err(SubmitOutcome::AlreadySubmitting)` while a previous request
    /// is pending, and `Err(SubmitOutcome::Invalid)` (with the error line set)
    /// when the address has the wrong shape.
    pub fn begin_submit(&mut self) -> Result<PendingSubmission, SubmitOutcome> {
        if self.submitting {
            return Err(SubmitOutcome::AlreadySubmitting);
        }

        if !is_valid_email(&self.input) {
            self.error = Some(INVALID_EMAIL_MESSAGE.to_string());
            return Err(SubmitOutcome::Invalid);
        }

        self.error = None;
        self.submitting = true;
        Ok(PendingSubmission {
            email: self.input.clone(),
        })
    }

    /// Applies the server's answer to a pending submission.
    pub fn finish_submit(&mut self, result: Result<(), TransportError>) -> SubmitOutcome {
        self.submitting = false;
        match result {
            Ok(()) => {
                self.input.clear();
                self.error = None;
                self.dialog_open = false;
                SubmitOutcome::Submitted
            }
            Err(e) => {
                tracing::warn!("Email submission failed: {}", e);
                self.error = Some(SUBMIT_FAILED_MESSAGE.to_string());
                SubmitOutcome::Failed
            }
        }
    }

    /// Validates, sends, and applies the result in one step.
    pub async fn submit<T>(&mut self, transport: &T) -> SubmitOutcome
    where
        T: SubmissionTransport + ?Sized,
    {
        let pending = match self.begin_submit() {
            Ok(pending) => pending,
            Err(outcome) => return outcome,
        };
        let result = transport.submit_email(&pending.email).await;
        self.finish_submit(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubTransport {
        calls: AtomicUsize,
        answer: Result<(), TransportError>,
    }

    impl StubTransport {
        fn answering(answer: Result<(), TransportError>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                answer,
            }
        }
    }

    #[async_trait]
    impl SubmissionTransport for StubTransport {
        async fn submit_email(&self, _email: &str) -> Result<(), TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answer.clone()
        }
    }

    #[tokio::test]
    async fn test_invalid_input_never_hits_network() {
        let transport = StubTransport::answering(Ok(()));

        for raw in ["", "not-an-email", "user@", "user@domain", "@example.com"] {
            let mut form = FormController::new();
            form.open_dialog();
            form.set_input(raw);

            assert_eq!(form.submit(&transport).await, SubmitOutcome::Invalid);
            assert_eq!(form.error(), Some("Please enter a valid email address"));
            assert_eq!(form.input(), raw);
            assert!(form.is_dialog_open());
            assert!(!form.is_submitting());
        }

        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_success_resets_form() {
        let transport = StubTransport::answering(Ok(()));
        let mut form = FormController::new();
        form.open_dialog();
        form.set_input("user@example.com");

        assert_eq!(form.submit(&transport).await, SubmitOutcome::Submitted);
        assert_eq!(form.input(), "");
        assert_eq!(form.error(), None);
        assert!(!form.is_dialog_open());
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn test_failure_keeps_input_for_retry() {
        let transport = StubTransport::answering(Err(TransportError::Status(500)));
        let mut form = FormController::new();
        form.open_dialog();
        form.set_input("user@example.com");

        assert_eq!(form.submit(&transport).await, SubmitOutcome::Failed);
        assert_eq!(form.input(), "user@example.com");
        assert_eq!(form.error(), Some("Failed to submit email"));
        assert!(form.is_dialog_open());
        assert!(form.can_submit());
    }

    #[test]
    fn test_in_flight_blocks_second_submit() {
        let mut form = FormController::new();
        form.set_input("user@example.com");

        let pending = form.begin_submit().unwrap();
        assert_eq!(pending.email, "user@example.com");
        assert!(!form.can_submit());
        assert!(matches!(
            form.begin_submit(),
            Err(SubmitOutcome::AlreadySubmitting)
        ));

        assert_eq!(form.finish_submit(Ok(())), SubmitOutcome::Submitted);
        assert!(form.can_submit());
    }

    #[test]
    fn test_valid_submit_clears_stale_error() {
        let mut form = FormController::new();
        form.set_input("nope");
        assert!(form.begin_submit().is_err());
        assert!(form.error().is_some());

        form.set_input("user@example.com");
        assert!(form.begin_submit().is_ok());
        assert_eq!(form.error(), None);
    }
}
