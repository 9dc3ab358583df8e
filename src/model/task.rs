use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Task identifier. Stored as a bare JSON number (milliseconds since the
/// epoch at creation time, bumped when needed to stay unique).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub i64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Create a new, not yet completed task
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Task {
            id,
            title: title.into(),
            completed: false,
        }
    }

    /// Copy of this task with `completed` flipped
    pub fn toggled(&self) -> Self {
        Task {
            completed: !self.completed,
            ..self.clone()
        }
    }
}

/// Pick an id for a new task: the current time in milliseconds, or one past
/// the largest id in `tasks` if the clock has not moved past it. When the
/// largest id is `i64::MAX`, the first unused id from the clock upward
/// (wrapping to 1) is taken instead.
pub fn next_task_id(tasks: &[Task], now_millis: i64) -> TaskId {
    let max = tasks.iter().map(|t| t.id.0).max();
    match max {
        Some(m) if m >= now_millis => match m.checked_add(1) {
            Some(next) => TaskId(next),
            None => first_unused_id(tasks, now_millis),
        },
        _ => TaskId(now_millis),
    }
}

fn first_unused_id(tasks: &[Task], from: i64) -> TaskId {
    let used: HashSet<i64> = tasks.iter().map(|t| t.id.0).collect();
    (from.max(1)..=i64::MAX)
        .chain(1..from.max(1))
        .find(|id| !used.contains(id))
        .map_or(TaskId(from), TaskId)
}
