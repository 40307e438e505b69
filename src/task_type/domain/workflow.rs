//! Workflow configuration value object.

use super::{FieldName, StatusNumber, TaskTypeDomainError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Linear workflow definition for one task type.
///
/// Holds the final status and, per status, the ordered field names that must
/// be supplied when a task enters that status. Statuses without an entry
/// require nothing. The serialized form is the externally visible
/// configuration format shared with clients:
///
/// ```json
/// { "finalStatus": 3, "statusFields": { "1": [], "2": ["priceQuote1", "priceQuote2"], "3": ["receipt"] } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WorkflowConfigRepr", into = "WorkflowConfigRepr")]
pub struct WorkflowConfig {
    final_status: StatusNumber,
    status_fields: BTreeMap<StatusNumber, Vec<FieldName>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WorkflowConfigRepr {
    final_status: u32,
    #[serde(default)]
    status_fields: BTreeMap<u32, Vec<String>>,
}

impl WorkflowConfig {
    /// Creates a configuration with the given final status and no required
    /// fields.
    #[must_use]
    pub const fn new(final_status: StatusNumber) -> Self {
        Self {
            final_status,
            status_fields: BTreeMap::new(),
        }
    }

    /// Declares the fields required when entering `status`, replacing any
    /// earlier declaration for the same status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskTypeDomainError::StatusOutOfRange`] when `status` lies
    /// beyond the final status,
    /// [`TaskTypeDomainError::StartStatusRequiresFields`] when fields are
    /// declared for [`StatusNumber::START`], and
    /// [`TaskTypeDomainError::EmptyFieldName`] or
    /// [`TaskTypeDomainError::DuplicateFieldName`] for malformed names.
    pub fn with_required_fields<I, S>(
        mut self,
        status: StatusNumber,
        fields: I,
    ) -> Result<Self, TaskTypeDomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if status > self.final_status {
            return Err(TaskTypeDomainError::StatusOutOfRange {
                status: status.value(),
                final_status: self.final_status.value(),
            });
        }

        let names = validated_field_names(status, fields)?;
        if status.is_start() && !names.is_empty() {
            return Err(TaskTypeDomainError::StartStatusRequiresFields);
        }

        self.status_fields.insert(status, names);
        Ok(self)
    }

    /// Returns the status at which tasks become eligible for closure.
    #[must_use]
    pub const fn final_status(&self) -> StatusNumber {
        self.final_status
    }

    /// Returns the fields required when entering `status`, in declaration
    /// order. Unconfigured statuses require nothing.
    #[must_use]
    pub fn required_fields(&self, status: StatusNumber) -> &[FieldName] {
        self.status_fields
            .get(&status)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Iterates every status from [`StatusNumber::START`] to the final status
    /// together with its required fields.
    pub fn statuses(&self) -> impl Iterator<Item = (StatusNumber, &[FieldName])> + '_ {
        (StatusNumber::START.value()..=self.final_status.value())
            .filter_map(|value| StatusNumber::new(value).ok())
            .map(|status| (status, self.required_fields(status)))
    }
}

fn validated_field_names<I, S>(
    status: StatusNumber,
    fields: I,
) -> Result<Vec<FieldName>, TaskTypeDomainError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = BTreeSet::new();
    let mut names = Vec::new();
    for raw in fields {
        let name = FieldName::trimmed(raw.as_ref());
        if name.is_empty() {
            return Err(TaskTypeDomainError::EmptyFieldName {
                status: status.value(),
            });
        }
        if !seen.insert(name.clone()) {
            return Err(TaskTypeDomainError::DuplicateFieldName {
                status: status.value(),
                field: name.as_str().to_owned(),
            });
        }
        names.push(name);
    }
    Ok(names)
}

impl TryFrom<WorkflowConfigRepr> for WorkflowConfig {
    type Error = TaskTypeDomainError;

    fn try_from(repr: WorkflowConfigRepr) -> Result<Self, Self::Error> {
        let final_status = StatusNumber::new(repr.final_status)?;
        repr.status_fields
            .into_iter()
            .try_fold(Self::new(final_status), |config, (status, fields)| {
                config.with_required_fields(StatusNumber::new(status)?, fields)
            })
    }
}

impl From<WorkflowConfig> for WorkflowConfigRepr {
    fn from(config: WorkflowConfig) -> Self {
        let status_fields = config
            .status_fields
            .into_iter()
            .map(|(status, fields)| {
                let names = fields.into_iter().map(String::from).collect();
                (status.value(), names)
            })
            .collect();
        Self {
            final_status: config.final_status.value(),
            status_fields,
        }
    }
}
