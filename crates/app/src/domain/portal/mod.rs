//! Client Portal Access

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;
pub mod token;

pub use errors::PortalServiceError;
pub use repository::{MockPortalAccessRepository, PgPortalAccessRepository, PortalAccessRepository};
pub use service::*;
