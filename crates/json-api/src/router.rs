//! App Router

use salvo::Router;

use crate::portal;

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(
            Router::with_path("api")
                .push(Router::with_path("send-client-portal-link").post(portal::send_link::handler))
                .push(Router::with_path("client-portal/session").post(portal::session::handler)),
        )
        .push(Router::with_path("client/{token}").get(portal::redirect::handler))
}
