//! Customers service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;

use crate::domain::customers::{
    data::NewCustomer,
    errors::CustomersServiceError,
    records::{CustomerRecord, CustomerUuid},
    repository::PgCustomersRepository,
};

#[derive(Debug, Clone)]
pub struct PgCustomersService {
    repository: PgCustomersRepository,
}

impl PgCustomersService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgCustomersRepository::new(pool),
        }
    }
}

#[async_trait]
impl CustomersService for PgCustomersService {
    async fn create_customer(
        &self,
        customer: NewCustomer,
    ) -> Result<CustomerRecord, CustomersServiceError> {
        if customer.name.trim().is_empty() || customer.email.trim().is_empty() {
            return Err(CustomersServiceError::MissingRequiredData);
        }

        self.repository
            .create_customer(customer)
            .await
            .map_err(Into::into)
    }

    async fn get_customer(
        &self,
        customer: CustomerUuid,
    ) -> Result<CustomerRecord, CustomersServiceError> {
        self.repository
            .get_customer(customer)
            .await
            .map_err(Into::into)
    }
}

#[automock]
#[async_trait]
/// Customer persistence operations.
pub trait CustomersService: Send + Sync {
    /// Creates a new customer.
    async fn create_customer(
        &self,
        customer: NewCustomer,
    ) -> Result<CustomerRecord, CustomersServiceError>;

    /// Fetches a customer by UUID.
    async fn get_customer(
        &self,
        customer: CustomerUuid,
    ) -> Result<CustomerRecord, CustomersServiceError>;
}
