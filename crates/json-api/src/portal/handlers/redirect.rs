//! Client Portal Link Redirect Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    http::header::{CACHE_CONTROL, LOCATION},
    oapi::extract::PathParam,
    prelude::*,
};
use tracing::debug;

use portal_app::domain::portal::token::parse_access_token;

use crate::{
    extensions::*,
    portal::errors::{INVALID_LINK, into_status_error},
    state::State,
};

/// Client Portal Link Redirect Handler
///
/// Target of the emailed access link. Valid tokens are sent on to the portal page,
/// which exchanges the token from the URL fragment for a session descriptor.
#[endpoint(
    tags("client-portal"),
    summary = "Follow Client Portal Link",
    responses(
        (status_code = StatusCode::SEE_OTHER, description = "Redirect to the client portal"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid or expired link"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    token: PathParam<String>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let raw_token = token.into_inner();

    let session = state
        .app
        .portal
        .validate_token(&raw_token, Timestamp::now())
        .await
        .map_err(into_status_error)?
        .or_401(INVALID_LINK)?;

    let token = parse_access_token(&raw_token).ok().or_401(INVALID_LINK)?;

    debug!(customer_uuid = %session.customer_uuid, "client portal link followed");

    res.add_header(LOCATION, state.links.portal_handoff(&token), true)
        .or_500("failed to set location header")?
        .add_header(CACHE_CONTROL, "no-store", true)
        .or_500("failed to set cache-control header")?
        .status_code(StatusCode::SEE_OTHER);

    Ok(())
}
