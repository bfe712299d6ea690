//! Email delivery errors.

use thiserror::Error;

/// Errors that can occur when delivering an email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider returned a non-2xx response or an unexpected body.
    #[error("unexpected response from email provider: {0}")]
    UnexpectedResponse(String),

    /// No provider is configured for this process.
    #[error("email delivery is not configured")]
    NotConfigured,
}
