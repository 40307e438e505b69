//! Shared fixtures for task unit tests.

use crate::task::domain::{PersistedTaskData, Task, TaskFields, TaskId};
use crate::task_type::domain::{StatusNumber, TaskType, TaskTypeName, WorkflowConfig};
use crate::user::domain::UserId;
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use std::sync::atomic::{AtomicI64, Ordering};

/// Clock advancing one second on every reading.
#[derive(Debug, Default)]
pub struct StepClock {
    ticks: AtomicI64,
}

impl Clock for StepClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        let base = Utc
            .with_ymd_and_hms(2026, 1, 1, 9, 0, 0)
            .single()
            .expect("valid base timestamp");
        base + Duration::seconds(tick)
    }
}

pub fn status(value: u32) -> StatusNumber {
    StatusNumber::new(value).expect("positive status")
}

/// `procurement`: final status 3, quotes at 2, receipt at 3.
pub fn procurement(clock: &impl Clock) -> TaskType {
    let workflow = WorkflowConfig::new(status(3))
        .with_required_fields(status(2), ["priceQuote1", "priceQuote2"])
        .and_then(|config| config.with_required_fields(status(3), ["receipt"]))
        .expect("valid procurement workflow");
    TaskType::new(
        TaskTypeName::new("procurement").expect("valid name"),
        workflow,
        clock,
    )
}

/// `development`: final status 4, one field at each of 2, 3 and 4.
pub fn development(clock: &impl Clock) -> TaskType {
    let workflow = WorkflowConfig::new(status(4))
        .with_required_fields(status(2), ["specification"])
        .and_then(|config| config.with_required_fields(status(3), ["branchName"]))
        .and_then(|config| config.with_required_fields(status(4), ["versionNumber"]))
        .expect("valid development workflow");
    TaskType::new(
        TaskTypeName::new("development").expect("valid name"),
        workflow,
        clock,
    )
}

/// Builds a task of `task_type` already sitting at `at`.
pub fn task_at(task_type: &TaskType, at: u32, is_closed: bool) -> Task {
    let timestamp = Utc::now();
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        task_type_id: task_type.id(),
        assigned_user_id: UserId::new(),
        status: status(at),
        is_closed,
        fields: TaskFields::new(),
        created_at: timestamp,
        updated_at: timestamp,
    })
}
