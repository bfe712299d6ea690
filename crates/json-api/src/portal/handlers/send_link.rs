//! Send Client Portal Link Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use portal_app::domain::portal::PortalServiceError;

use crate::{extensions::*, portal::errors::into_status_error, state::State};

/// Send Client Portal Link Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SendPortalLinkRequest {
    /// Customer to grant portal access to
    pub customer_id: Option<String>,

    /// Recipient email address
    pub email: Option<String>,
}

/// Send Client Portal Link Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SendPortalLinkResponse {
    /// Link that was emailed to the customer
    pub access_link: String,
}

/// Send Client Portal Link Handler
///
/// Issues a 7-day access token for the customer and emails the portal link.
#[endpoint(
    tags("client-portal"),
    summary = "Send Client Portal Link",
    responses(
        (status_code = StatusCode::OK, description = "Access link emailed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing customer id or email"),
        (status_code = StatusCode::NOT_FOUND, description = "Customer not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<SendPortalLinkRequest>,
    depot: &mut Depot,
) -> Result<Json<SendPortalLinkResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let (Some(customer_id), Some(email)) = (
        request.customer_id.filter(|id| !id.trim().is_empty()),
        request.email.filter(|email| !email.trim().is_empty()),
    ) else {
        return Err(StatusError::bad_request().brief("Missing required fields: customerId and email"));
    };

    // Customers are keyed by UUID, so any other id cannot name one.
    let customer_uuid = Uuid::parse_str(customer_id.trim()).map_err(|_| {
        debug!(customer_id = %customer_id, "customer id is not a uuid");

        into_status_error(PortalServiceError::CustomerNotFound)
    })?;

    let sent = state
        .app
        .portal
        .send_access_link(customer_uuid.into(), &email, Timestamp::now())
        .await
        .map_err(into_status_error)?;

    info!(
        customer_uuid = %sent.access.customer_uuid,
        access_uuid = %sent.access.uuid,
        "client portal link sent"
    );

    Ok(Json(SendPortalLinkResponse {
        access_link: sent.access_link,
    }))
}
