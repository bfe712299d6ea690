//! Client Portal Handlers

pub(crate) mod redirect;
pub(crate) mod send_link;
pub(crate) mod session;
