use crate::config::Config;
use crate::email_template::render_recruitment_letter;
use crate::errors::{AppError, ResultExt};
use crate::lead_storage::LeadRepository;
use crate::mailer::EmailDispatcher;
use crate::models::{Lead, NewLead, OutboundEmail};
use crate::validation::parse_email;
use std::sync::Arc;

/// Validate → persist → notify, for one submitted address.
///
/// There is no compensation step: if the email cannot be dispatched the
/// stored lead is kept and the caller still sees a failure.
#[derive(Clone)]
pub struct SubmissionService {
    store: Arc<dyn LeadRepository>,
    mailer: Arc<dyn EmailDispatcher>,
    mail_from: String,
    mail_subject: String,
}

impl SubmissionService {
    pub fn new(
        store: Arc<dyn LeadRepository>,
        mailer: Arc<dyn EmailDispatcher>,
        mail_from: impl Into<String>,
        mail_subject: impl Into<String>,
    ) -> Self {
        Self {
            store,
            mailer,
            mail_from: mail_from.into(),
            mail_subject: mail_subject.into(),
        }
    }

    pub fn from_config(
        config: &Config,
        store: Arc<dyn LeadRepository>,
        mailer: Arc<dyn EmailDispatcher>,
    ) -> Self {
        Self::new(
            store,
            mailer,
            config.mail_from.clone(),
            config.mail_subject.clone(),
        )
    }

    /// Runs the whole pipeline and returns the stored lead.
    ///
    /// # Arguments
    ///
    /// * `raw_email` - The address exactly as submitted.
    /// * `ip_address` - Origin address from the forwarding header, if present.
    #[tracing::instrument(name = "Submit email", skip(self), fields(email = %raw_email.trim()))]
    pub async fn submit(
        &self,
        raw_email: &str,
        ip_address: Option<String>,
    ) -> Result<Lead, AppError> {
        // 1. Validate
        let email = parse_email(raw_email).map_err(|msg| AppError::Validation(msg.to_string()))?;

        // 2. Persist
        let lead = self
            .store
            .insert(&NewLead::new(email, ip_address))
            .await
            .context("Persisting lead")?;
        tracing::info!("✓ Lead stored: {} from {}", lead.email, lead.ip_address);

        // 3. Notify
        let message = self.compose(&lead.email);
        if let Err(e) = self.mailer.send(&message).await {
            tracing::warn!(
                "Lead {} kept although the welcome email was not dispatched",
                lead.id
            );
            return Err(e).context("Dispatching welcome email");
        }

        tracing::info!("✓ Welcome email dispatched to {}", lead.email);
        Ok(lead)
    }

    fn compose(&self, recipient: &str) -> OutboundEmail {
        OutboundEmail {
            from: self.mail_from.clone(),
            to: vec![recipient.to_string()],
            subject: self.mail_subject.clone(),
            html: render_recruitment_letter(recipient),
        }
    }
}
