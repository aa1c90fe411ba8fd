// Error types for store mutations and view lookups

use crate::task::TaskId;
use thiserror::Error;

/// Errors returned by [`crate::Store`] operations and row resolution
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Task title is empty after trimming
    #[error("task title must not be empty")]
    EmptyInput,

    /// No task with this id exists in the store
    #[error("no task with id {0}")]
    NotFound(TaskId),

    /// Two tasks share an id
    #[error("duplicate task id {0}")]
    DuplicateId(TaskId),

    /// Positional access past the end of the full task sequence
    #[error("index {index} out of range for {len} tasks")]
    IndexOutOfRange { index: usize, len: usize },

    /// Displayed row number not present in the current view
    #[error("row {row} out of range ({visible} rows visible)")]
    RowOutOfRange { row: usize, visible: usize },
}
