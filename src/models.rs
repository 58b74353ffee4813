use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Origin address recorded when the forwarding header is absent.
pub const UNKNOWN_IP_ADDRESS: &str = "unknown";

/// A persisted record of one email address that expressed interest.
///
/// Leads are written once and never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Lead {
    pub id: Uuid,
    /// Normalized (trimmed, lowercased) address.
    pub email: String,
    pub ip_address: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a lead. `email` must already be normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLead {
    pub email: String,
    pub ip_address: String,
}

impl NewLead {
    pub fn new(email: impl Into<String>, ip_address: Option<String>) -> Self {
        Self {
            email: email.into(),
            ip_address: ip_address.unwrap_or_else(|| UNKNOWN_IP_ADDRESS.to_string()),
        }
    }
}

/// Body of `POST /api/submit-email`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitEmailRequest {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitEmailResponse {
    pub success: bool,
}

impl SubmitEmailResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Uniform failure body. `status` mirrors the HTTP status code unless the
/// legacy mode is on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub status: u16,
}

/// Outbound message handed to the email provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}
