//! Server configuration module

use clap::Parser;

use crate::config::{
    db::DatabaseConfig,
    email::EmailConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    portal::PortalConfig,
    server::ServerRuntimeConfig,
};

pub(crate) mod db;
pub(crate) mod email;
pub(crate) mod observability;
pub(crate) mod portal;
pub(crate) mod server;

/// Client Portal JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "portal-json", about = "Client Portal JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Transactional email settings.
    #[command(flatten)]
    pub email: EmailConfig,

    /// Public portal link settings.
    #[command(flatten)]
    pub portal: PortalConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_required_settings_from_arguments() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "portal-json",
            "--database-url",
            "postgres://localhost/portal",
            "--portal-base-url",
            "https://billing.example.test/",
        ])?;

        assert_eq!(config.database.database_url, "postgres://localhost/portal");
        assert_eq!(config.portal.portal_base_url, "https://billing.example.test/");
        assert_eq!(config.socket_addr(), "0.0.0.0:8698");

        Ok(())
    }

    #[test]
    fn email_is_disabled_without_api_key() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "portal-json",
            "--database-url",
            "postgres://localhost/portal",
            "--portal-base-url",
            "https://billing.example.test",
        ])?;

        assert!(
            config.email.resend_config().is_none(),
            "resend should not be configured without an API key"
        );

        Ok(())
    }
}
