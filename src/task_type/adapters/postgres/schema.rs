//! Diesel schema for task type persistence.

diesel::table! {
    /// Registered task types and their workflow configuration.
    task_types (id) {
        /// Internal task type identifier.
        id -> Uuid,
        /// Unique task type name.
        #[max_length = 100]
        name -> Varchar,
        /// Serialized workflow configuration.
        status_config -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
