//! Portal service errors.

use sqlx::Error;
use thiserror::Error;

use crate::{domain::customers::CustomersServiceError, email::EmailError};

#[derive(Debug, Error)]
pub enum PortalServiceError {
    #[error("customer id and email are required")]
    MissingRequiredData,

    #[error("customer not found")]
    CustomerNotFound,

    #[error("customer lookup failed")]
    Customer(#[source] CustomersServiceError),

    #[error("access expiry is out of range")]
    ExpiryOutOfRange(#[source] jiff::Error),

    #[error("storage error")]
    Sql(#[source] Error),

    /// The access record was written but the email could not be delivered.
    #[error("access record created but email delivery failed")]
    EmailDelivery(#[source] EmailError),
}

impl From<Error> for PortalServiceError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}

impl From<CustomersServiceError> for PortalServiceError {
    fn from(error: CustomersServiceError) -> Self {
        match error {
            CustomersServiceError::NotFound => Self::CustomerNotFound,
            CustomersServiceError::Sql(source) => Self::Sql(source),
            other => Self::Customer(other),
        }
    }
}
