//! Email delivery log.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{PgPool, query};
use uuid::Uuid;

use crate::email::{EmailError, EmailMessage, EmailTemplate, SentEmail};

const CREATE_EMAIL_LOG_SQL: &str = include_str!("sql/create_email_log.sql");

/// Delivery outcome persisted with each log row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailStatus {
    Sent,
    Failed,
}

impl EmailStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Failed => "failed",
        }
    }
}

/// New email log persistence payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmailLog {
    pub uuid: Uuid,
    pub recipient: String,
    pub subject: String,
    pub template: EmailTemplate,
    pub status: EmailStatus,
    pub provider_message_id: Option<String>,
    pub error: Option<String>,
}

impl NewEmailLog {
    /// Build a log entry from a delivery attempt.
    #[must_use]
    pub fn from_outcome(message: &EmailMessage, outcome: &Result<SentEmail, EmailError>) -> Self {
        let (status, provider_message_id, error) = match outcome {
            Ok(sent) => (EmailStatus::Sent, Some(sent.id.clone()), None),
            Err(error) => (EmailStatus::Failed, None, Some(error.to_string())),
        };

        Self {
            uuid: Uuid::now_v7(),
            recipient: message.to.clone(),
            subject: message.subject.clone(),
            template: message.template,
            status,
            provider_message_id,
            error,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PgEmailLogRepository {
    pool: PgPool,
}

impl PgEmailLogRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmailLogRepository for PgEmailLogRepository {
    async fn record(&self, entry: &NewEmailLog) -> Result<(), sqlx::Error> {
        query(CREATE_EMAIL_LOG_SQL)
            .bind(entry.uuid)
            .bind(&entry.recipient)
            .bind(&entry.subject)
            .bind(entry.template.as_str())
            .bind(entry.status.as_str())
            .bind(entry.provider_message_id.as_deref())
            .bind(entry.error.as_deref())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait EmailLogRepository: Send + Sync {
    /// Persist one delivery attempt.
    async fn record(&self, entry: &NewEmailLog) -> Result<(), sqlx::Error>;
}
