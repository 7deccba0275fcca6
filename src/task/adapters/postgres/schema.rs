//! Diesel schema for task lifecycle persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Project the task belongs to.
        project_id -> Uuid,
        /// User the task is assigned to.
        assignee_id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional free-form description.
        description -> Nullable<Text>,
        /// Task lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Task priority.
        #[max_length = 10]
        priority -> Varchar,
        /// Calendar date the task is due.
        due_date -> Date,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
