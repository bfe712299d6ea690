//! Client Portal Errors

use salvo::http::StatusError;
use tracing::error;

use portal_app::domain::portal::PortalServiceError;

pub(crate) const INVALID_LINK: &str = "Invalid or expired link";

pub(crate) fn into_status_error(error: PortalServiceError) -> StatusError {
    match error {
        PortalServiceError::MissingRequiredData => {
            StatusError::bad_request().brief("Missing required fields: customerId and email")
        }
        PortalServiceError::CustomerNotFound => StatusError::not_found().brief("Customer not found"),
        PortalServiceError::EmailDelivery(source) => {
            error!("failed to deliver client portal email: {source}");

            StatusError::internal_server_error()
                .brief("Access record created but email delivery failed")
        }
        PortalServiceError::Sql(source) => {
            error!("client portal storage error: {source}");

            StatusError::internal_server_error()
        }
        PortalServiceError::Customer(source) => {
            error!("client portal customer lookup failed: {source}");

            StatusError::internal_server_error()
        }
        PortalServiceError::ExpiryOutOfRange(source) => {
            error!("client portal expiry out of range: {source}");

            StatusError::internal_server_error()
        }
    }
}
