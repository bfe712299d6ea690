//! State

use std::sync::Arc;

use portal_app::{context::AppContext, domain::portal::data::PortalLinks};

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) links: PortalLinks,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, links: PortalLinks) -> Self {
        Self { app, links }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext, links: PortalLinks) -> Arc<Self> {
        Arc::new(Self::new(app, links))
    }
}
