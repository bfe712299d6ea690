//! Client portal domain, persistence, email delivery, and session modules.

pub mod context;
pub mod database;
pub mod domain;
pub mod email;
pub mod session;

#[cfg(test)]
mod test;

mod uuids;
