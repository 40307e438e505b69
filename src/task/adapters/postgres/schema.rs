//! Diesel schema for task persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Task type the task follows.
        task_type_id -> Uuid,
        /// Current assignee.
        assigned_user_id -> Uuid,
        /// Current workflow status, always at least 1.
        status -> Int4,
        /// Whether the task has been closed.
        is_closed -> Bool,
        /// Accumulated free-form fields as a JSON object.
        fields -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only status change history.
    task_status_changes (id) {
        /// Entry identifier.
        id -> Uuid,
        /// Task the transition belongs to.
        task_id -> Uuid,
        /// Status before the transition.
        from_status -> Int4,
        /// Status after the transition.
        to_status -> Int4,
        /// Assignee after the transition.
        assigned_user_id -> Uuid,
        /// Time the transition was accepted.
        changed_at -> Timestamptz,
    }
}
