use std::path::PathBuf;

use clap::Args;
use jiff::Timestamp;
use portal_app::session::{FileSessionStorage, SessionStore};

#[derive(Debug, Args)]
pub(crate) struct SessionArgs {
    /// Directory the client session is cached in
    #[arg(long)]
    session_dir: PathBuf,

    /// Remove the cached session
    #[arg(long)]
    clear: bool,
}

pub(crate) fn run(args: &SessionArgs) -> Result<(), String> {
    let storage = FileSessionStorage::open(&args.session_dir)
        .map_err(|error| format!("failed to open session storage: {error}"))?;

    let store = SessionStore::new(storage);

    if args.clear {
        store
            .clear()
            .map_err(|error| format!("failed to clear session: {error}"))?;

        println!("session cleared");

        return Ok(());
    }

    match store
        .load(Timestamp::now())
        .map_err(|error| format!("failed to read session: {error}"))?
    {
        Some(session) => {
            println!("customer_id: {}", session.customer_id);
            println!("customer_name: {}", session.customer_name);
            println!("email: {}", session.email);
            println!("expires_at: {}", session.expires_at);
        }
        None => println!("no active session"),
    }

    Ok(())
}
