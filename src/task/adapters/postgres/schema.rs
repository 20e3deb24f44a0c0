//! Diesel schema for task and subtask persistence.

diesel::table! {
    /// Top-level task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task title.
        #[max_length = 500]
        title -> Varchar,
        /// Optional free-text description.
        description -> Nullable<Text>,
        /// Task status.
        #[max_length = 50]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Ordered subtasks belonging to a task.
    subtasks (id) {
        /// Subtask identifier.
        id -> Uuid,
        /// Owning task identifier.
        task_id -> Uuid,
        /// Subtask title.
        #[max_length = 500]
        title -> Varchar,
        /// Optional rationale text.
        description -> Nullable<Text>,
        /// Subtask status.
        #[max_length = 50]
        status -> Varchar,
        /// Position within the owning task.
        order_index -> Int4,
    }
}

diesel::joinable!(subtasks -> tasks (task_id));
diesel::allow_tables_to_appear_in_same_query!(tasks, subtasks);
