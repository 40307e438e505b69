//! User entity.

use super::{UserDomainError, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized, lowercase email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::InvalidEmail`] unless the trimmed value has
    /// exactly one `@` with non-empty text on both sides and no whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, UserDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_lowercase();
        let mut parts = normalized.split('@');
        let local = parts.next().unwrap_or_default();
        let domain = parts.next().unwrap_or_default();
        let is_valid = !local.is_empty()
            && !domain.is_empty()
            && parts.next().is_none()
            && !normalized.chars().any(char::is_whitespace);

        if !is_valid {
            return Err(UserDomainError::InvalidEmail(raw));
        }
        Ok(Self(normalized))
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A person tasks can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    email: EmailAddress,
}

impl User {
    /// Creates a user with a fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyName`] when the name is blank.
    pub fn new(name: impl Into<String>, email: EmailAddress) -> Result<Self, UserDomainError> {
        Self::from_parts(UserId::new(), name, email)
    }

    /// Reconstructs a user from persisted parts.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyName`] when the name is blank.
    pub fn from_parts(
        id: UserId,
        name: impl Into<String>,
        email: EmailAddress,
    ) -> Result<Self, UserDomainError> {
        let raw_name = name.into();
        let trimmed = raw_name.trim();
        if trimmed.is_empty() {
            return Err(UserDomainError::EmptyName);
        }
        Ok(Self {
            id,
            name: trimmed.to_owned(),
            email,
        })
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }
}
