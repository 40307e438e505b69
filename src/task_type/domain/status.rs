//! Positive workflow status numbers.

use super::InvalidStatusNumber;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a task within its type's linear status sequence.
///
/// Statuses are numbered from [`StatusNumber::START`]; zero is never valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct StatusNumber(u32);

impl StatusNumber {
    /// Status every task starts at. It never requires fields.
    pub const START: Self = Self(1);

    /// Creates a validated status number.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidStatusNumber`] when `value` is zero.
    pub const fn new(value: u32) -> Result<Self, InvalidStatusNumber> {
        if value == 0 {
            return Err(InvalidStatusNumber(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Returns the status immediately after this one, if representable.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    /// Returns `true` for the universal start status.
    #[must_use]
    pub const fn is_start(self) -> bool {
        self.0 == Self::START.0
    }
}

impl TryFrom<u32> for StatusNumber {
    type Error = InvalidStatusNumber;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StatusNumber> for u32 {
    fn from(status: StatusNumber) -> Self {
        status.0
    }
}

impl fmt::Display for StatusNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
