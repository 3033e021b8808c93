//! Service layer
//!
//! The presence registry exposes a single service: a stateless facade over
//! the injected presence store.

mod error;
mod presence;

pub use error::{ServiceError, ServiceResult};
pub use presence::PresenceService;
