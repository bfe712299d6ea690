//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};

use portal_app::{
    context::AppContext,
    domain::{
        customers::MockCustomersService,
        portal::{MockPortalService, data::PortalLinks},
    },
};

use crate::state::State;

pub(crate) const TEST_PORTAL_BASE_URL: &str = "https://portal.example.test";

fn strict_customers_mock() -> MockCustomersService {
    let mut customers = MockCustomersService::new();

    customers.expect_create_customer().never();
    customers.expect_get_customer().never();

    customers
}

pub(crate) fn state_with_portal(portal: MockPortalService) -> Arc<State> {
    State::from_app_context(
        AppContext {
            customers: Arc::new(strict_customers_mock()),
            portal: Arc::new(portal),
        },
        PortalLinks::new(TEST_PORTAL_BASE_URL),
    )
}

pub(crate) fn portal_service(portal: MockPortalService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_portal(portal)))
            .push(route),
    )
}
