use clap::{Args, Subcommand};
use portal_app::{
    context::{AppContext, AppInitError},
    domain::portal::data::PortalLinks,
    email::ResendConfig,
};

mod issue;
mod session;
mod validate;

#[derive(Debug, Args)]
pub(crate) struct PortalCommand {
    #[command(subcommand)]
    command: PortalSubcommand,
}

#[derive(Debug, Subcommand)]
enum PortalSubcommand {
    Issue(issue::IssueArgs),
    Validate(validate::ValidateArgs),
    Session(session::SessionArgs),
}

pub(crate) async fn run(command: PortalCommand) -> Result<(), String> {
    match command.command {
        PortalSubcommand::Issue(args) => issue::run(args).await,
        PortalSubcommand::Validate(args) => validate::run(args).await,
        PortalSubcommand::Session(args) => session::run(&args),
    }
}

/// Connection settings shared by the portal subcommands.
#[derive(Debug, Args)]
pub(crate) struct PortalServiceArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Public base URL that access links point at
    #[arg(long, env = "PORTAL_BASE_URL", default_value = "http://localhost:8698")]
    portal_base_url: String,

    /// Resend API key; email delivery is disabled when omitted
    #[arg(long, env = "RESEND_API_KEY", hide_env_values = true)]
    resend_api_key: Option<String>,

    /// Resend API base address
    #[arg(long, env = "RESEND_API_BASE", default_value = portal_app::email::resend::RESEND_API_BASE)]
    resend_api_base: String,

    /// Sender mailbox for portal emails
    #[arg(long, env = "EMAIL_FROM", default_value = "Billing <billing@localhost>")]
    email_from: String,
}

impl PortalServiceArgs {
    pub(crate) fn links(&self) -> PortalLinks {
        PortalLinks::new(&self.portal_base_url)
    }

    fn resend_config(&self) -> Option<ResendConfig> {
        self.resend_api_key.as_ref().map(|api_key| ResendConfig {
            api_base: self.resend_api_base.clone(),
            api_key: api_key.clone(),
            from: self.email_from.clone(),
        })
    }

    pub(crate) async fn connect(&self) -> Result<AppContext, String> {
        AppContext::from_database_url(&self.database_url, self.resend_config(), self.links())
            .await
            .map_err(|AppInitError::Database(source)| {
                format!("failed to connect to database: {source}")
            })
    }
}
