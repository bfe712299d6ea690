//! Resend HTTP client for transactional email.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::email::{EmailError, EmailMessage, EmailSender, SentEmail};

/// Default Resend API address.
pub const RESEND_API_BASE: &str = "https://api.resend.com";

/// Configuration for connecting to Resend.
#[derive(Clone)]
pub struct ResendConfig {
    /// API base address, e.g. `"https://api.resend.com"`.
    pub api_base: String,

    /// Resend API key.
    pub api_key: String,

    /// Sender mailbox, e.g. `"Billing <billing@example.com>"`.
    pub from: String,
}

impl std::fmt::Debug for ResendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResendConfig")
            .field("api_base", &self.api_base)
            .field("api_key", &"**redacted**")
            .field("from", &self.from)
            .finish()
    }
}

/// HTTP client for the Resend `emails` endpoint.
#[derive(Debug, Clone)]
pub struct ResendClient {
    config: ResendConfig,
    http: Client,
}

impl ResendClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: ResendConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/emails", self.config.api_base.trim_end_matches('/'))
    }

    fn request_body(&self, message: &EmailMessage) -> Value {
        json!({
            "from": self.config.from,
            "to": [message.to],
            "subject": message.subject,
            "html": message.html,
            "text": message.text,
            "tags": [{ "name": "template", "value": message.template.as_str() }],
        })
    }
}

#[async_trait]
impl EmailSender for ResendClient {
    async fn send(&self, message: &EmailMessage) -> Result<SentEmail, EmailError> {
        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&self.request_body(message))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(EmailError::UnexpectedResponse(format!(
                "send request failed with status {status}: {text}"
            )));
        }

        let parsed: SendResponse = response.json().await?;

        Ok(SentEmail { id: parsed.id })
    }
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    id: String,
}
