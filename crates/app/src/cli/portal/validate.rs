use std::path::PathBuf;

use clap::Args;
use jiff::Timestamp;
use portal_app::session::{ClientSession, FileSessionStorage, SessionStore};

use super::PortalServiceArgs;

#[derive(Debug, Args)]
pub(crate) struct ValidateArgs {
    #[command(flatten)]
    service: PortalServiceArgs,

    /// Access token from the portal link
    #[arg(long)]
    token: String,

    /// Directory to cache the resulting client session in
    #[arg(long)]
    session_dir: Option<PathBuf>,
}

pub(crate) async fn run(args: ValidateArgs) -> Result<(), String> {
    let app = args.service.connect().await?;

    let Some(descriptor) = app
        .portal
        .validate_token(&args.token, Timestamp::now())
        .await
        .map_err(|error| format!("failed to validate token: {error}"))?
    else {
        return Err("invalid or expired link".to_string());
    };

    println!("customer_uuid: {}", descriptor.customer_uuid);
    println!("customer_name: {}", descriptor.customer_name);
    println!("email: {}", descriptor.email);
    println!("expires_at: {}", descriptor.expires_at);

    if let Some(dir) = args.session_dir {
        let storage = FileSessionStorage::open(&dir)
            .map_err(|error| format!("failed to open session storage: {error}"))?;

        SessionStore::new(storage)
            .save(&ClientSession::from(descriptor))
            .map_err(|error| format!("failed to cache session: {error}"))?;

        println!("session cached in {}", dir.display());
    }

    Ok(())
}
