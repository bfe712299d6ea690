//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database,
    domain::{
        customers::{CustomersService, PgCustomersService},
        portal::{PgPortalService, PortalService, data::PortalLinks},
    },
    email::{EmailSender, ResendClient, ResendConfig, UnconfiguredEmailSender},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub customers: Arc<dyn CustomersService>,
    pub portal: Arc<dyn PortalService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// Email delivery is disabled when no Resend configuration is given; portal
    /// links can still be issued and validated.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        email: Option<ResendConfig>,
        links: PortalLinks,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let sender: Arc<dyn EmailSender> = match email {
            Some(config) => Arc::new(ResendClient::new(config)),
            None => Arc::new(UnconfiguredEmailSender),
        };

        Ok(Self {
            customers: Arc::new(PgCustomersService::new(pool.clone())),
            portal: Arc::new(PgPortalService::new(pool, sender, links)),
        })
    }
}
