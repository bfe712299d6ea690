//! Email Config

use clap::Args;

use portal_app::email::{ResendConfig, resend::RESEND_API_BASE};

/// Resend delivery settings.
#[derive(Debug, Args)]
pub struct EmailConfig {
    /// Resend API key; portal links are not emailed when unset
    #[arg(long, env = "RESEND_API_KEY", hide_env_values = true)]
    pub resend_api_key: Option<String>,

    /// Resend API base address
    #[arg(long, env = "RESEND_API_BASE", default_value = RESEND_API_BASE)]
    pub resend_api_base: String,

    /// Sender mailbox for portal emails
    #[arg(long, env = "EMAIL_FROM", default_value = "Billing <billing@localhost>")]
    pub email_from: String,
}

impl EmailConfig {
    /// Resend client settings, when an API key is present.
    #[must_use]
    pub fn resend_config(&self) -> Option<ResendConfig> {
        self.resend_api_key.as_ref().map(|api_key| ResendConfig {
            api_base: self.resend_api_base.clone(),
            api_key: api_key.clone(),
            from: self.email_from.clone(),
        })
    }
}
