//! Client Portal Session Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use portal_app::domain::portal::records::SessionDescriptor;

use crate::{
    extensions::*,
    portal::errors::{INVALID_LINK, into_status_error},
    state::State,
};

/// Client Portal Session Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PortalSessionRequest {
    /// Access token from the portal link
    pub token: String,
}

/// Client Portal Session Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PortalSessionResponse {
    /// Customer the session belongs to
    pub customer_id: Uuid,

    /// Email the access link was issued to
    pub email: String,

    /// Customer display name
    pub customer_name: String,

    /// When the session stops being valid
    pub expires_at: String,
}

impl From<SessionDescriptor> for PortalSessionResponse {
    fn from(session: SessionDescriptor) -> Self {
        PortalSessionResponse {
            customer_id: session.customer_uuid.into(),
            email: session.email,
            customer_name: session.customer_name,
            expires_at: session.expires_at.to_string(),
        }
    }
}

/// Client Portal Session Handler
///
/// Exchanges an access token for the session descriptor the client caches.
#[endpoint(
    tags("client-portal"),
    summary = "Validate Client Portal Token",
    responses(
        (status_code = StatusCode::OK, description = "Token valid"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid or expired link"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<PortalSessionRequest>,
    depot: &mut Depot,
) -> Result<Json<PortalSessionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let session = state
        .app
        .portal
        .validate_token(&json.into_inner().token, Timestamp::now())
        .await
        .map_err(into_status_error)?
        .or_401(INVALID_LINK)?;

    Ok(Json(session.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use portal_app::domain::{
        customers::{CustomersServiceError, records::CustomerUuid},
        portal::{MockPortalService, PortalServiceError},
    };

    use crate::{portal::handlers::tests::make_descriptor, test_helpers::portal_service};

    use super::*;

    const TOKEN: &str = "00112233445566778899aabbccddeeff00112233445566778899aabbccddeeff";

    fn make_service(portal: MockPortalService) -> Service {
        portal_service(portal, Router::with_path("api/client-portal/session").post(handler))
    }

    fn strict_mock() -> MockPortalService {
        let mut portal = MockPortalService::new();

        portal.expect_issue_access().never();
        portal.expect_send_access_link().never();

        portal
    }

    #[tokio::test]
    async fn test_valid_token_returns_session() -> TestResult {
        let customer = CustomerUuid::new();
        let descriptor = make_descriptor(customer);
        let expires_at = descriptor.expires_at.to_string();

        let mut portal = strict_mock();

        portal
            .expect_validate_token()
            .once()
            .withf(|token, _| token == TOKEN)
            .return_once(move |_, _| Ok(Some(descriptor)));

        let mut res = TestClient::post("http://example.com/api/client-portal/session")
            .json(&json!({ "token": TOKEN }))
            .send(&make_service(portal))
            .await;

        let body: PortalSessionResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.customer_id, customer.into_uuid());
        assert_eq!(body.customer_name, "Acme Ltd");
        assert_eq!(body.email, "a@x.com");
        assert_eq!(body.expires_at, expires_at);

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_token_returns_401() -> TestResult {
        let mut portal = strict_mock();

        portal
            .expect_validate_token()
            .once()
            .return_once(|_, _| Ok(None));

        let mut res = TestClient::post("http://example.com/api/client-portal/session")
            .json(&json!({ "token": "nope" }))
            .send(&make_service(portal))
            .await;

        let body = res.take_string().await?;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
        assert!(
            body.contains(INVALID_LINK),
            "expected invalid link message, got {body}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_lookup_failure_returns_500() -> TestResult {
        let mut portal = strict_mock();

        portal
            .expect_validate_token()
            .once()
            .return_once(|_, _| {
                Err(PortalServiceError::Customer(
                    CustomersServiceError::InvalidData,
                ))
            });

        let res = TestClient::post("http://example.com/api/client-portal/session")
            .json(&json!({ "token": TOKEN }))
            .send(&make_service(portal))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
