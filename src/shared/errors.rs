use thiserror::Error;

/// Errors surfaced by the task store.
///
/// Read failures never show up here: a missing or unreadable backing file
/// loads as an empty list. Write failures do, so the caller can tell the
/// user persistence failed.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to write backing file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize tasks: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Task title cannot be empty")]
    EmptyTitle,

    #[error("Invalid due date (expected YYYY-MM-DD): {0}")]
    BadDate(String),

    #[error("Task index {index} is out of range (list has {len} tasks)")]
    IndexOutOfRange { index: usize, len: usize },
}

impl StoreError {
    /// True for input mistakes the caller can fix, as opposed to I/O trouble.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            StoreError::EmptyTitle | StoreError::BadDate(_) | StoreError::IndexOutOfRange { .. }
        )
    }
}
