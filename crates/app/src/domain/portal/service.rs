//! Portal access service: link issuance, delivery, and token validation.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::PgPool;
use tracing::{debug, error, info, warn};

use crate::{
    domain::{
        customers::{
            CustomersService, PgCustomersService,
            records::{CustomerRecord, CustomerUuid},
        },
        portal::{
            data::{IssuedPortalAccess, NewPortalAccess, PORTAL_ACCESS_TTL, PortalLinks, SentAccessLink},
            errors::PortalServiceError,
            records::{PortalAccessUuid, SessionDescriptor},
            repository::{PgPortalAccessRepository, PortalAccessRepository},
            token::{generate_access_token, parse_access_token},
        },
    },
    email::{
        EmailError, EmailLogRepository, EmailMessage, EmailSender, NewEmailLog,
        PgEmailLogRepository, SentEmail, templates,
    },
};

#[derive(Clone)]
pub struct PgPortalService {
    access: Arc<dyn PortalAccessRepository>,
    customers: Arc<dyn CustomersService>,
    email: Arc<dyn EmailSender>,
    email_log: Arc<dyn EmailLogRepository>,
    links: PortalLinks,
}

impl PgPortalService {
    #[must_use]
    pub fn new(pool: PgPool, email: Arc<dyn EmailSender>, links: PortalLinks) -> Self {
        Self {
            access: Arc::new(PgPortalAccessRepository::new(pool.clone())),
            customers: Arc::new(PgCustomersService::new(pool.clone())),
            email,
            email_log: Arc::new(PgEmailLogRepository::new(pool)),
            links,
        }
    }

    /// Assemble the service from explicit collaborators.
    #[must_use]
    pub fn from_parts(
        access: Arc<dyn PortalAccessRepository>,
        customers: Arc<dyn CustomersService>,
        email: Arc<dyn EmailSender>,
        email_log: Arc<dyn EmailLogRepository>,
        links: PortalLinks,
    ) -> Self {
        Self {
            access,
            customers,
            email,
            email_log,
            links,
        }
    }

    async fn issue_for(
        &self,
        customer: &CustomerRecord,
        email: &str,
        now: Timestamp,
    ) -> Result<IssuedPortalAccess, PortalServiceError> {
        let token = generate_access_token();

        let expires_at = now
            .checked_add(PORTAL_ACCESS_TTL)
            .map_err(PortalServiceError::ExpiryOutOfRange)?;

        let access = self
            .access
            .upsert_access(&NewPortalAccess {
                uuid: PortalAccessUuid::new(),
                customer_uuid: customer.uuid,
                email: email.to_string(),
                access_token: token.clone(),
                expires_at,
            })
            .await?;

        info!(
            customer_uuid = %customer.uuid,
            access_uuid = %access.uuid,
            expires_at = %access.expires_at,
            "portal access issued"
        );

        Ok(IssuedPortalAccess { token, access })
    }

    async fn log_delivery(&self, message: &EmailMessage, outcome: &Result<SentEmail, EmailError>) {
        let entry = NewEmailLog::from_outcome(message, outcome);

        if let Err(source) = self.email_log.record(&entry).await {
            warn!(
                recipient = %entry.recipient,
                template = %entry.template,
                "failed to write email log: {source}"
            );
        }
    }
}

impl fmt::Debug for PgPortalService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgPortalService")
            .field("links", &self.links)
            .finish_non_exhaustive()
    }
}

fn required_email(email: &str) -> Result<&str, PortalServiceError> {
    let email = email.trim();

    if email.is_empty() {
        return Err(PortalServiceError::MissingRequiredData);
    }

    Ok(email)
}

#[async_trait]
impl PortalService for PgPortalService {
    async fn issue_access(
        &self,
        customer: CustomerUuid,
        email: &str,
        now: Timestamp,
    ) -> Result<IssuedPortalAccess, PortalServiceError> {
        let email = required_email(email)?;
        let customer = self.customers.get_customer(customer).await?;

        self.issue_for(&customer, email, now).await
    }

    async fn send_access_link(
        &self,
        customer: CustomerUuid,
        email: &str,
        now: Timestamp,
    ) -> Result<SentAccessLink, PortalServiceError> {
        let email = required_email(email)?;
        let customer = self.customers.get_customer(customer).await?;
        let issued = self.issue_for(&customer, email, now).await?;

        let access_link = self.links.access_link(&issued.token);

        let message = templates::client_portal_link(
            email,
            &customer.name,
            &access_link,
            issued.access.expires_at,
        );

        let outcome = self.email.send(&message).await;

        self.log_delivery(&message, &outcome).await;

        match outcome {
            Ok(sent) => {
                info!(
                    customer_uuid = %customer.uuid,
                    message_id = %sent.id,
                    "portal link email sent"
                );

                Ok(SentAccessLink {
                    access_link,
                    access: issued.access,
                })
            }
            Err(source) => {
                error!(
                    customer_uuid = %customer.uuid,
                    access_uuid = %issued.access.uuid,
                    "portal link email failed: {source}"
                );

                Err(PortalServiceError::EmailDelivery(source))
            }
        }
    }

    async fn validate_token(
        &self,
        token: &str,
        now: Timestamp,
    ) -> Result<Option<SessionDescriptor>, PortalServiceError> {
        let token = match parse_access_token(token) {
            Ok(token) => token,
            Err(reason) => {
                debug!("rejecting malformed portal token: {reason}");

                return Ok(None);
            }
        };

        let Some(lookup) = self.access.find_by_token(&token).await? else {
            debug!("portal token not found");

            return Ok(None);
        };

        if !lookup.access.is_active_at(now) {
            debug!(
                access_uuid = %lookup.access.uuid,
                expires_at = %lookup.access.expires_at,
                "portal token expired"
            );

            return Ok(None);
        }

        // Best-effort metadata update; validation success does not depend on this write.
        if let Err(source) = self.access.touch_last_login(lookup.access.uuid, now).await {
            warn!(
                access_uuid = %lookup.access.uuid,
                "failed to record portal login: {source}"
            );
        }

        Ok(Some(lookup.into()))
    }
}

#[automock]
#[async_trait]
/// Client portal access operations.
pub trait PortalService: Send + Sync {
    /// Issue (or reissue) a 7-day access token for a customer/email pair.
    async fn issue_access(
        &self,
        customer: CustomerUuid,
        email: &str,
        now: Timestamp,
    ) -> Result<IssuedPortalAccess, PortalServiceError>;

    /// Issue access and email the resulting link to `email`.
    ///
    /// An email failure is reported as [`PortalServiceError::EmailDelivery`]; the
    /// access record written beforehand is kept.
    async fn send_access_link(
        &self,
        customer: CustomerUuid,
        email: &str,
        now: Timestamp,
    ) -> Result<SentAccessLink, PortalServiceError>;

    /// Resolve a token into a session descriptor.
    ///
    /// Unknown, malformed, and expired tokens all yield `Ok(None)`.
    async fn validate_token(
        &self,
        token: &str,
        now: Timestamp,
    ) -> Result<Option<SessionDescriptor>, PortalServiceError>;
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use jiff::SignedDuration;
    use jiff_sqlx::Timestamp as SqlxTimestamp;
    use testresult::TestResult;

    use crate::{
        domain::{
            customers::{CustomersServiceError, MockCustomersService},
            portal::{
                records::{PortalAccessLookup, PortalAccessRecord},
                repository::MockPortalAccessRepository,
                token::ACCESS_TOKEN_HEX_CHARS,
            },
        },
        email::{EmailStatus, EmailTemplate, MockEmailLogRepository, MockEmailSender},
        test::TestContext,
    };

    use super::*;

    const T0: Timestamp = Timestamp::constant(1_772_366_400, 0);
    const DAY: SignedDuration = SignedDuration::from_hours(24);
    const PORTAL_BASE_URL: &str = "https://portal.test";

    /// Mock repository backed by a shared vector with upsert-on-(customer, email) semantics.
    #[derive(Default)]
    struct AccessTable {
        rows: Mutex<Vec<(String, PortalAccessLookup)>>,
    }

    impl AccessTable {
        fn len(&self) -> usize {
            self.rows.lock().expect("table lock").len()
        }

        fn last_login(&self) -> Option<Timestamp> {
            self.rows
                .lock()
                .expect("table lock")
                .first()
                .and_then(|(_, row)| row.access.last_login_at)
        }
    }

    fn table_repository(table: &Arc<AccessTable>) -> MockPortalAccessRepository {
        let mut repo = MockPortalAccessRepository::new();

        let upserts = Arc::clone(table);
        repo.expect_upsert_access().returning(move |new| {
            let mut rows = upserts.rows.lock().expect("table lock");

            let existing = rows.iter_mut().find(|(_, row)| {
                row.access.customer_uuid == new.customer_uuid && row.access.email == new.email
            });

            let record = match existing {
                Some((token, row)) => {
                    *token = new.access_token.to_hex();
                    row.access.expires_at = new.expires_at;
                    row.access.clone()
                }
                None => {
                    let record = PortalAccessRecord {
                        uuid: new.uuid,
                        customer_uuid: new.customer_uuid,
                        email: new.email.clone(),
                        expires_at: new.expires_at,
                        last_login_at: None,
                        created_at: T0,
                        updated_at: T0,
                    };

                    rows.push((
                        new.access_token.to_hex(),
                        PortalAccessLookup {
                            access: record.clone(),
                            customer_name: "Acme Ltd".to_string(),
                        },
                    ));

                    record
                }
            };

            Ok(record)
        });

        let lookups = Arc::clone(table);
        repo.expect_find_by_token().returning(move |token| {
            let hex = token.to_hex();

            Ok(lookups
                .rows
                .lock()
                .expect("table lock")
                .iter()
                .find(|(stored, _)| *stored == hex)
                .map(|(_, row)| row.clone()))
        });

        let touches = Arc::clone(table);
        repo.expect_touch_last_login().returning(move |uuid, at| {
            for (_, row) in touches.rows.lock().expect("table lock").iter_mut() {
                if row.access.uuid == uuid {
                    row.access.last_login_at = Some(at);
                }
            }

            Ok(())
        });

        repo
    }

    fn customer_record(uuid: CustomerUuid) -> CustomerRecord {
        CustomerRecord {
            uuid,
            name: "Acme Ltd".to_string(),
            email: "a@x.com".to_string(),
            created_at: T0,
            updated_at: T0,
        }
    }

    fn known_customer(uuid: CustomerUuid) -> MockCustomersService {
        let mut customers = MockCustomersService::new();

        customers
            .expect_get_customer()
            .withf(move |requested| *requested == uuid)
            .returning(move |_| Ok(customer_record(uuid)));

        customers.expect_create_customer().never();

        customers
    }

    fn idle_email() -> MockEmailSender {
        let mut email = MockEmailSender::new();

        email.expect_send().never();

        email
    }

    fn idle_email_log() -> MockEmailLogRepository {
        let mut log = MockEmailLogRepository::new();

        log.expect_record().never();

        log
    }

    fn make_service(
        access: MockPortalAccessRepository,
        customers: MockCustomersService,
        email: MockEmailSender,
        email_log: MockEmailLogRepository,
    ) -> PgPortalService {
        PgPortalService::from_parts(
            Arc::new(access),
            Arc::new(customers),
            Arc::new(email),
            Arc::new(email_log),
            PortalLinks::new(PORTAL_BASE_URL),
        )
    }

    fn table_service(table: &Arc<AccessTable>, customer: CustomerUuid) -> PgPortalService {
        make_service(
            table_repository(table),
            known_customer(customer),
            idle_email(),
            idle_email_log(),
        )
    }

    #[tokio::test]
    async fn issued_token_expires_after_seven_days() -> TestResult {
        let table = Arc::new(AccessTable::default());
        let customer = CustomerUuid::new();
        let svc = table_service(&table, customer);

        let issued = svc.issue_access(customer, "a@x.com", T0).await?;

        assert_eq!(issued.access.expires_at, T0.checked_add(DAY * 7)?);
        assert_eq!(issued.access.customer_uuid, customer);
        assert_eq!(issued.access.email, "a@x.com");
        assert_eq!(issued.token.to_hex().len(), ACCESS_TOKEN_HEX_CHARS);

        Ok(())
    }

    #[tokio::test]
    async fn token_is_valid_until_expiry_and_rejected_after() -> TestResult {
        let table = Arc::new(AccessTable::default());
        let customer = CustomerUuid::new();
        let svc = table_service(&table, customer);

        let issued = svc.issue_access(customer, "a@x.com", T0).await?;
        let token = issued.token.to_hex();

        let session = svc.validate_token(&token, T0.checked_add(DAY * 6)?).await?;

        assert_eq!(
            session,
            Some(SessionDescriptor {
                customer_uuid: customer,
                email: "a@x.com".to_string(),
                customer_name: "Acme Ltd".to_string(),
                expires_at: T0.checked_add(DAY * 7)?,
            })
        );

        let expired = svc.validate_token(&token, T0.checked_add(DAY * 8)?).await?;

        assert_eq!(expired, None);

        Ok(())
    }

    #[tokio::test]
    async fn token_is_rejected_at_exact_expiry() -> TestResult {
        let table = Arc::new(AccessTable::default());
        let customer = CustomerUuid::new();
        let svc = table_service(&table, customer);

        let issued = svc.issue_access(customer, "a@x.com", T0).await?;

        let session = svc
            .validate_token(&issued.token.to_hex(), issued.access.expires_at)
            .await?;

        assert_eq!(session, None);

        Ok(())
    }

    #[tokio::test]
    async fn reissue_replaces_prior_token() -> TestResult {
        let table = Arc::new(AccessTable::default());
        let customer = CustomerUuid::new();
        let svc = table_service(&table, customer);

        let first = svc.issue_access(customer, "a@x.com", T0).await?;
        let second = svc
            .issue_access(customer, "a@x.com", T0.checked_add(DAY)?)
            .await?;

        assert_eq!(table.len(), 1, "reissue must not add a second record");
        assert_eq!(first.access.uuid, second.access.uuid);

        let now = T0.checked_add(DAY * 2)?;

        assert_eq!(svc.validate_token(&first.token.to_hex(), now).await?, None);
        assert!(
            svc.validate_token(&second.token.to_hex(), now)
                .await?
                .is_some()
        );

        Ok(())
    }

    #[tokio::test]
    async fn successful_validation_records_last_login() -> TestResult {
        let table = Arc::new(AccessTable::default());
        let customer = CustomerUuid::new();
        let svc = table_service(&table, customer);

        let issued = svc.issue_access(customer, "a@x.com", T0).await?;
        let now = T0.checked_add(DAY)?;

        svc.validate_token(&issued.token.to_hex(), now).await?;

        assert_eq!(table.last_login(), Some(now));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_token_returns_no_session() -> TestResult {
        let table = Arc::new(AccessTable::default());
        let customer = CustomerUuid::new();
        let svc = table_service(&table, customer);

        let session = svc.validate_token(&"ab".repeat(32), T0).await?;

        assert_eq!(session, None);

        Ok(())
    }

    #[tokio::test]
    async fn malformed_token_skips_lookup() -> TestResult {
        let mut access = MockPortalAccessRepository::new();

        access.expect_find_by_token().never();
        access.expect_touch_last_login().never();
        access.expect_upsert_access().never();

        let svc = make_service(
            access,
            MockCustomersService::new(),
            idle_email(),
            idle_email_log(),
        );

        assert_eq!(svc.validate_token("not-a-token", T0).await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn last_login_failure_does_not_fail_validation() -> TestResult {
        let customer = CustomerUuid::new();
        let record = PortalAccessRecord {
            uuid: PortalAccessUuid::new(),
            customer_uuid: customer,
            email: "a@x.com".to_string(),
            expires_at: T0.checked_add(DAY)?,
            last_login_at: None,
            created_at: T0,
            updated_at: T0,
        };

        let mut access = MockPortalAccessRepository::new();

        access.expect_find_by_token().once().return_once(move |_| {
            Ok(Some(PortalAccessLookup {
                access: record,
                customer_name: "Acme Ltd".to_string(),
            }))
        });

        access
            .expect_touch_last_login()
            .once()
            .return_once(|_, _| Err(sqlx::Error::PoolTimedOut));

        let svc = make_service(
            access,
            MockCustomersService::new(),
            idle_email(),
            idle_email_log(),
        );

        let session = svc.validate_token(&"cd".repeat(32), T0).await?;

        assert!(session.is_some(), "validation should ignore touch failures");

        Ok(())
    }

    #[tokio::test]
    async fn blank_email_is_rejected_before_any_lookup() -> TestResult {
        let mut customers = MockCustomersService::new();
        customers.expect_get_customer().never();

        let mut access = MockPortalAccessRepository::new();
        access.expect_upsert_access().never();

        let svc = make_service(access, customers, idle_email(), idle_email_log());

        let result = svc.issue_access(CustomerUuid::new(), "   ", T0).await;

        assert!(
            matches!(result, Err(PortalServiceError::MissingRequiredData)),
            "expected MissingRequiredData, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn unknown_customer_returns_customer_not_found() -> TestResult {
        let mut customers = MockCustomersService::new();
        customers
            .expect_get_customer()
            .once()
            .return_once(|_| Err(CustomersServiceError::NotFound));

        let mut access = MockPortalAccessRepository::new();
        access.expect_upsert_access().never();

        let svc = make_service(access, customers, idle_email(), idle_email_log());

        let result = svc
            .send_access_link(CustomerUuid::new(), "a@x.com", T0)
            .await;

        assert!(
            matches!(result, Err(PortalServiceError::CustomerNotFound)),
            "expected CustomerNotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn send_access_link_emails_link_and_logs_delivery() -> TestResult {
        let table = Arc::new(AccessTable::default());
        let customer = CustomerUuid::new();

        let mut email = MockEmailSender::new();
        email
            .expect_send()
            .once()
            .withf(|message| {
                message.to == "a@x.com"
                    && message.template == EmailTemplate::ClientPortalLink
                    && message.text.contains("https://portal.test/client/")
                    && message.html.contains("Acme Ltd")
            })
            .return_once(|_| {
                Ok(SentEmail {
                    id: "msg_1".to_string(),
                })
            });

        let mut email_log = MockEmailLogRepository::new();
        email_log
            .expect_record()
            .once()
            .withf(|entry| {
                entry.status == EmailStatus::Sent
                    && entry.provider_message_id.as_deref() == Some("msg_1")
                    && entry.recipient == "a@x.com"
            })
            .return_once(|_| Ok(()));

        let svc = make_service(
            table_repository(&table),
            known_customer(customer),
            email,
            email_log,
        );

        let sent = svc.send_access_link(customer, "a@x.com", T0).await?;

        let token = sent
            .access_link
            .strip_prefix("https://portal.test/client/")
            .ok_or("access link should point at the client route")?;

        assert_eq!(token.len(), ACCESS_TOKEN_HEX_CHARS);
        assert!(svc.validate_token(token, T0).await?.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn email_failure_keeps_access_record_and_logs_failure() -> TestResult {
        let table = Arc::new(AccessTable::default());
        let customer = CustomerUuid::new();

        let mut email = MockEmailSender::new();
        email
            .expect_send()
            .once()
            .return_once(|_| Err(EmailError::UnexpectedResponse("rejected".to_string())));

        let mut email_log = MockEmailLogRepository::new();
        email_log
            .expect_record()
            .once()
            .withf(|entry| entry.status == EmailStatus::Failed && entry.error.is_some())
            .return_once(|_| Ok(()));

        let svc = make_service(
            table_repository(&table),
            known_customer(customer),
            email,
            email_log,
        );

        let result = svc.send_access_link(customer, "a@x.com", T0).await;

        assert!(
            matches!(result, Err(PortalServiceError::EmailDelivery(_))),
            "expected EmailDelivery, got {result:?}"
        );
        assert_eq!(table.len(), 1, "access record must survive email failure");

        Ok(())
    }

    #[tokio::test]
    async fn email_log_failure_does_not_fail_delivery() -> TestResult {
        let table = Arc::new(AccessTable::default());
        let customer = CustomerUuid::new();

        let mut email = MockEmailSender::new();
        email.expect_send().once().return_once(|_| {
            Ok(SentEmail {
                id: "msg_2".to_string(),
            })
        });

        let mut email_log = MockEmailLogRepository::new();
        email_log
            .expect_record()
            .once()
            .return_once(|_| Err(sqlx::Error::PoolTimedOut));

        let svc = make_service(
            table_repository(&table),
            known_customer(customer),
            email,
            email_log,
        );

        let sent = svc.send_access_link(customer, "a@x.com", T0).await?;

        assert!(sent.access_link.starts_with(PORTAL_BASE_URL));

        Ok(())
    }

    #[tokio::test]
    async fn postgres_reissue_invalidates_old_token() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_customer("Acme Ltd", "a@x.com").await;

        let first = ctx.portal.issue_access(customer.uuid, "a@x.com", T0).await?;
        let second = ctx
            .portal
            .issue_access(customer.uuid, "a@x.com", T0.checked_add(DAY)?)
            .await?;

        assert_eq!(first.access.uuid, second.access.uuid);

        let now = T0.checked_add(DAY * 2)?;

        assert_eq!(
            ctx.portal
                .validate_token(&first.token.to_hex(), now)
                .await?,
            None
        );

        let session = ctx
            .portal
            .validate_token(&second.token.to_hex(), now)
            .await?
            .ok_or("second token should validate")?;

        assert_eq!(session.customer_name, "Acme Ltd");
        assert_eq!(session.expires_at, T0.checked_add(DAY * 8)?);

        Ok(())
    }

    #[tokio::test]
    async fn postgres_expired_token_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_customer("Acme Ltd", "a@x.com").await;

        let issued = ctx.portal.issue_access(customer.uuid, "a@x.com", T0).await?;
        let token = issued.token.to_hex();

        assert!(
            ctx.portal
                .validate_token(&token, T0.checked_add(DAY * 6)?)
                .await?
                .is_some()
        );
        assert_eq!(
            ctx.portal
                .validate_token(&token, T0.checked_add(DAY * 8)?)
                .await?,
            None
        );

        Ok(())
    }

    #[tokio::test]
    async fn postgres_validation_records_last_login() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_customer("Acme Ltd", "a@x.com").await;

        let issued = ctx.portal.issue_access(customer.uuid, "a@x.com", T0).await?;
        let login_at = T0.checked_add(DAY)?;

        let before: Option<SqlxTimestamp> = sqlx::query_scalar(
            "SELECT last_login_at FROM client_portal_access WHERE uuid = $1",
        )
        .bind(issued.access.uuid.into_uuid())
        .fetch_one(ctx.db.pool())
        .await?;

        assert!(before.is_none(), "fresh access should have no login yet");

        ctx.portal
            .validate_token(&issued.token.to_hex(), login_at)
            .await?
            .ok_or("token should validate")?;

        let after: Option<SqlxTimestamp> = sqlx::query_scalar(
            "SELECT last_login_at FROM client_portal_access WHERE uuid = $1",
        )
        .bind(issued.access.uuid.into_uuid())
        .fetch_one(ctx.db.pool())
        .await?;

        assert_eq!(after.map(SqlxTimestamp::to_jiff), Some(login_at));

        Ok(())
    }

    #[tokio::test]
    async fn postgres_failed_delivery_is_logged_and_access_kept() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_customer("Acme Ltd", "a@x.com").await;

        let result = ctx
            .portal
            .send_access_link(customer.uuid, "a@x.com", T0)
            .await;

        assert!(
            matches!(result, Err(PortalServiceError::EmailDelivery(_))),
            "expected EmailDelivery, got {result:?}"
        );

        let (recipient, template, status, error): (String, String, String, Option<String>) =
            sqlx::query_as(
                "SELECT recipient, template_type, status, error FROM email_logs",
            )
            .fetch_one(ctx.db.pool())
            .await?;

        assert_eq!(recipient, "a@x.com");
        assert_eq!(template, EmailTemplate::ClientPortalLink.as_str());
        assert_eq!(status, EmailStatus::Failed.as_str());
        assert!(error.is_some());

        let kept: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM client_portal_access WHERE customer_uuid = $1",
        )
        .bind(customer.uuid.into_uuid())
        .fetch_one(ctx.db.pool())
        .await?;

        assert_eq!(kept, 1);

        Ok(())
    }

    #[tokio::test]
    async fn postgres_sent_link_is_logged_with_provider_id() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_customer("Acme Ltd", "a@x.com").await;
        let pool = ctx.db.pool().clone();

        let mut email = MockEmailSender::new();

        email.expect_send().once().return_once(|_| {
            Ok(SentEmail {
                id: "msg_123".to_string(),
            })
        });

        let svc = PgPortalService::from_parts(
            Arc::new(PgPortalAccessRepository::new(pool.clone())),
            Arc::new(PgCustomersService::new(pool.clone())),
            Arc::new(email),
            Arc::new(PgEmailLogRepository::new(pool.clone())),
            PortalLinks::new(PORTAL_BASE_URL),
        );

        let sent = svc.send_access_link(customer.uuid, "a@x.com", T0).await?;

        assert!(sent.access_link.starts_with(PORTAL_BASE_URL));

        let (status, message_id): (String, Option<String>) =
            sqlx::query_as("SELECT status, provider_message_id FROM email_logs WHERE recipient = $1")
                .bind("a@x.com")
                .fetch_one(&pool)
                .await?;

        assert_eq!(status, EmailStatus::Sent.as_str());
        assert_eq!(message_id.as_deref(), Some("msg_123"));

        Ok(())
    }

    #[tokio::test]
    async fn postgres_unknown_customer_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .portal
            .issue_access(CustomerUuid::new(), "a@x.com", T0)
            .await;

        assert!(
            matches!(result, Err(PortalServiceError::CustomerNotFound)),
            "expected CustomerNotFound, got {result:?}"
        );

        Ok(())
    }
}
