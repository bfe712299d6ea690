use clap::{Parser, Subcommand};

mod customer;
mod db;
mod portal;

#[derive(Debug, Parser)]
#[command(name = "portal-app", about = "Client portal CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Customer(customer::CustomerCommand),
    Portal(portal::PortalCommand),
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Customer(command) => customer::run(command).await,
            Commands::Portal(command) => portal::run(command).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}
