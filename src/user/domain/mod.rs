//! Domain model for users referenced as task assignees.

mod error;
mod ids;
mod user;

pub use error::UserDomainError;
pub use ids::UserId;
pub use user::{EmailAddress, User};
