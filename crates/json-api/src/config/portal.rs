//! Portal Config

use clap::Args;

/// Client portal link settings.
#[derive(Debug, Args)]
pub struct PortalConfig {
    /// Public base URL that access links and redirects point at
    #[arg(long, env = "PORTAL_BASE_URL")]
    pub portal_base_url: String,
}
