// Task record and identifiers

use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Durable task identifier, assigned once at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Generate a fresh time-ordered id
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// A single to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub is_finished: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Task {
    /// Build an unfinished task from user input
    ///
    /// The title is trimmed; a title that is empty after trimming is rejected
    /// with [`StoreError::EmptyInput`].
    pub fn new(title: &str) -> Result<Self, StoreError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(StoreError::EmptyInput);
        }

        let now = now_ms();
        Ok(Self {
            id: TaskId::new(),
            title: title.to_string(),
            is_finished: false,
            created_at: now,
            updated_at: now,
        })
    }

    /// Flip the completion flag and return the new value
    pub fn toggle(&mut self) -> bool {
        self.is_finished = !self.is_finished;
        self.updated_at = now_ms();
        self.is_finished
    }

    fn seeded(title: &str, is_finished: bool) -> Self {
        let now = now_ms();
        Self {
            id: TaskId::new(),
            title: title.to_string(),
            is_finished,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Titles of the built-in demo list, in display order
pub const DEMO_TITLES: [&str; 5] = [
    "Setup structure",
    "Render a list of tasks",
    "Add a new task",
    "Change the status of a task",
    "Separate in 2 tabs: todo and complete",
];

/// The five-task demo list a fresh store starts with; only the first is finished
pub fn demo_tasks() -> Vec<Task> {
    DEMO_TITLES
        .iter()
        .enumerate()
        .map(|(i, title)| Task::seeded(title, i == 0))
        .collect()
}

/// Current time in milliseconds since the Unix epoch
pub fn now_ms() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
