//! Required field names declared by a workflow configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of a free-form data field a status may require.
///
/// Field names are case-sensitive (`priceQuote1` and `pricequote1` differ)
/// and are stored trimmed. Emptiness is checked by the owning
/// [`super::WorkflowConfig`], which knows the status the name belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldName(String);

impl FieldName {
    pub(super) fn trimmed(value: &str) -> Self {
        Self(value.trim().to_owned())
    }

    /// Returns the field name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(super) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<FieldName> for String {
    fn from(name: FieldName) -> Self {
        name.0
    }
}

impl AsRef<str> for FieldName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
