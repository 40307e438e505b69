//! Directory port for user lookup and storage.

use crate::user::domain::{EmailAddress, User, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user directory operations.
pub type UserDirectoryResult<T> = Result<T, UserDirectoryError>;

/// User lookup contract consumed by the task lifecycle.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Stores a new user.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::DuplicateUser`] when the ID exists or
    /// [`UserDirectoryError::DuplicateEmail`] when the email is taken.
    async fn store(&self, user: &User) -> UserDirectoryResult<()>;

    /// Finds a user by identifier.
    ///
    /// Returns `None` when the user does not exist.
    async fn find_by_id(&self, id: UserId) -> UserDirectoryResult<Option<User>>;

    /// Finds a user by email address.
    async fn find_by_email(&self, email: &EmailAddress) -> UserDirectoryResult<Option<User>>;

    /// Returns all users ordered by name.
    async fn list_all(&self) -> UserDirectoryResult<Vec<User>>;

    /// Returns `true` when a user with the given identifier exists.
    async fn exists(&self, id: UserId) -> UserDirectoryResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}

/// Errors returned by user directory implementations.
#[derive(Debug, Clone, Error)]
pub enum UserDirectoryError {
    /// A user with the same identifier already exists.
    #[error("duplicate user identifier: {0}")]
    DuplicateUser(UserId),

    /// A user with the same email already exists.
    #[error("duplicate user email: {0}")]
    DuplicateEmail(EmailAddress),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserDirectoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
