//! Portal Access Repository

use async_trait::async_trait;
use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};

use crate::domain::{
    customers::records::CustomerUuid,
    portal::{
        data::NewPortalAccess,
        records::{PortalAccessLookup, PortalAccessRecord, PortalAccessUuid},
        token::AccessToken,
    },
};

const UPSERT_PORTAL_ACCESS_SQL: &str = include_str!("sql/upsert_portal_access.sql");
const FIND_PORTAL_ACCESS_BY_TOKEN_SQL: &str = include_str!("sql/find_portal_access_by_token.sql");
const TOUCH_PORTAL_ACCESS_LAST_LOGIN_SQL: &str =
    include_str!("sql/touch_portal_access_last_login.sql");

/// PostgreSQL-backed portal access repository.
#[derive(Debug, Clone)]
pub struct PgPortalAccessRepository {
    pool: PgPool,
}

impl PgPortalAccessRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PortalAccessRepository for PgPortalAccessRepository {
    async fn upsert_access(
        &self,
        access: &NewPortalAccess,
    ) -> Result<PortalAccessRecord, sqlx::Error> {
        query_as::<Postgres, PortalAccessRecord>(UPSERT_PORTAL_ACCESS_SQL)
            .bind(access.uuid.into_uuid())
            .bind(access.customer_uuid.into_uuid())
            .bind(&access.email)
            .bind(access.access_token.to_hex())
            .bind(SqlxTimestamp::from(access.expires_at))
            .fetch_one(&self.pool)
            .await
    }

    async fn find_by_token(
        &self,
        token: &AccessToken,
    ) -> Result<Option<PortalAccessLookup>, sqlx::Error> {
        query_as::<Postgres, PortalAccessLookup>(FIND_PORTAL_ACCESS_BY_TOKEN_SQL)
            .bind(token.to_hex())
            .fetch_optional(&self.pool)
            .await
    }

    async fn touch_last_login(
        &self,
        access: PortalAccessUuid,
        at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        query(TOUCH_PORTAL_ACCESS_LAST_LOGIN_SQL)
            .bind(access.into_uuid())
            .bind(SqlxTimestamp::from(at))
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait PortalAccessRepository: Send + Sync {
    /// Insert an access record, or replace the token and expiry of the existing
    /// record for the same customer/email pair.
    async fn upsert_access(
        &self,
        access: &NewPortalAccess,
    ) -> Result<PortalAccessRecord, sqlx::Error>;

    async fn find_by_token(
        &self,
        token: &AccessToken,
    ) -> Result<Option<PortalAccessLookup>, sqlx::Error>;

    async fn touch_last_login(
        &self,
        access: PortalAccessUuid,
        at: Timestamp,
    ) -> Result<(), sqlx::Error>;
}

impl<'r> FromRow<'r, PgRow> for PortalAccessRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: PortalAccessUuid::from_uuid(row.try_get("uuid")?),
            customer_uuid: CustomerUuid::from_uuid(row.try_get("customer_uuid")?),
            email: row.try_get("email")?,
            expires_at: row.try_get::<SqlxTimestamp, _>("expires_at")?.to_jiff(),
            last_login_at: row
                .try_get::<Option<SqlxTimestamp>, _>("last_login_at")?
                .map(SqlxTimestamp::to_jiff),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for PortalAccessLookup {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            access: PortalAccessRecord::from_row(row)?,
            customer_name: row.try_get("customer_name")?,
        })
    }
}
