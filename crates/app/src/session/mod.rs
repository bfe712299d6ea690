//! Client-held portal session cache.
//!
//! Mirrors browser local storage: the validated [`SessionDescriptor`] is kept as
//! JSON under a fixed key and re-checked against its own expiry on every read.
//! It is never synchronised with the server, so deleting an access record does
//! not evict a cached session before it expires.
//!
//! [`SessionDescriptor`]: crate::domain::portal::records::SessionDescriptor

mod storage;
mod store;

pub use storage::*;
pub use store::*;
