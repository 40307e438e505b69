//! Free-form data fields carried by a task.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::num::FpCategory;

/// Field name to opaque JSON value mapping attached to a task.
///
/// Values are untyped. A field counts as supplied only when its value is
/// present in the sense of [`is_present_value`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskFields(BTreeMap<String, Value>);

impl TaskFields {
    /// Creates an empty field set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a field set from a JSON value.
    ///
    /// `null` is accepted as an empty set.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::FieldsNotAnObject`] for any value other
    /// than an object or `null`.
    pub fn from_json(value: Value) -> Result<Self, TaskDomainError> {
        match value {
            Value::Object(map) => Ok(Self(map.into_iter().collect())),
            Value::Null => Ok(Self::new()),
            Value::Bool(_) => Err(TaskDomainError::FieldsNotAnObject("a boolean")),
            Value::Number(_) => Err(TaskDomainError::FieldsNotAnObject("a number")),
            Value::String(_) => Err(TaskDomainError::FieldsNotAnObject("a string")),
            Value::Array(_) => Err(TaskDomainError::FieldsNotAnObject("an array")),
        }
    }

    /// Converts the field set into a JSON object.
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect::<Map<String, Value>>(),
        )
    }

    /// Sets `name` to `value`, replacing any earlier value.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Returns the value stored under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Returns `true` when `name` holds a present value.
    #[must_use]
    pub fn is_supplied(&self, name: &str) -> bool {
        self.get(name).is_some_and(is_present_value)
    }

    /// Adds or overwrites entries from `incoming`. Existing entries not
    /// named in `incoming` are kept.
    pub fn merge(&mut self, incoming: Self) {
        self.0.extend(incoming.0);
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for TaskFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// Returns `true` when `value` counts as supplied for a required field.
///
/// `null`, `false`, numeric zero, `NaN` and the empty string are absent.
/// Every other value, including empty arrays and objects, is present.
#[must_use]
pub fn is_present_value(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number
            .as_f64()
            .is_some_and(|float| !matches!(float.classify(), FpCategory::Zero | FpCategory::Nan)),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
