use crate::config::Config;
use crate::errors::AppError;
use crate::models::OutboundEmail;
use async_trait::async_trait;
use std::time::Duration;

/// Hands a composed email to a transactional provider.
///
/// Failures are opaque: any error means the message was not accepted.
#[async_trait]
pub trait EmailDispatcher: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<(), AppError>;
}

/// Client for the Resend transactional email API.
#[derive(Clone)]
pub struct ResendMailer {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ResendMailer {
    /// Creates a new `ResendMailer`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the Resend API, without trailing slash.
    /// * `api_key` - The API key for authentication.
    pub fn new(base_url: String, api_key: String) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create Resend client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Self::new(config.resend_base_url.clone(), config.resend_api_key.clone())
    }
}

#[async_trait]
impl EmailDispatcher for ResendMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), AppError> {
        let url = format!("{}/emails", self.base_url);
        tracing::info!("Dispatching '{}' to {:?} via Resend", email.subject, email.to);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(email)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Dispatch(format!(
                "Resend returned {}: {}",
                status, error_text
            )));
        }

        let data: serde_json::Value = response.json().await.unwrap_or_default();
        match data.get("id").and_then(|id| id.as_str()) {
            Some(id) => tracing::info!("✓ Email accepted by Resend: {}", id),
            None => tracing::info!("✓ Email accepted by Resend"),
        }

        Ok(())
    }
}
