//! Client Portal

mod errors;
mod handlers;

pub(crate) use handlers::*;
