//! Portal Domain Concerns

pub mod customers;
pub mod portal;
