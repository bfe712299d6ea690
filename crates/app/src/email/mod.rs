//! Transactional email delivery and logging.

mod errors;
mod log;
mod message;
pub mod resend;
mod sender;
pub mod templates;

pub use errors::*;
pub use log::*;
pub use message::*;
pub use resend::{ResendClient, ResendConfig};
pub use sender::*;
