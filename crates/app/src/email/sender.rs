//! Email sender seam.

use async_trait::async_trait;
use mockall::automock;

use crate::email::{EmailError, EmailMessage, SentEmail};

#[automock]
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Deliver a rendered message.
    async fn send(&self, message: &EmailMessage) -> Result<SentEmail, EmailError>;
}

/// Sender used when no provider is configured; every send fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredEmailSender;

#[async_trait]
impl EmailSender for UnconfiguredEmailSender {
    async fn send(&self, _message: &EmailMessage) -> Result<SentEmail, EmailError> {
        Err(EmailError::NotConfigured)
    }
}
