use std::{fmt, str::FromStr};

use pocket_core::tasks::{Task, TaskStatus, ValidationError};

/// Orderings offered by `view`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Pending before completed, dated before undated, then earliest due first.
    DueDate,
    /// Pending before completed, then high > medium > low.
    Priority,
    /// Oldest first.
    CreatedAt,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::DueDate => "due_date",
            SortKey::Priority => "priority",
            SortKey::CreatedAt => "created_at",
        }
    }
}

impl FromStr for SortKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "due_date" => Ok(SortKey::DueDate),
            "priority" => Ok(SortKey::Priority),
            "created_at" => Ok(SortKey::CreatedAt),
            _ => Err(ValidationError::InvalidSortKey(s.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task as shown by `view`, with the 1-based position that `complete` and
/// `delete` accept for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewEntry<'a> {
    pub position: usize,
    pub task: &'a Task,
}

pub(crate) fn select(
    tasks: &[Task],
    status: Option<TaskStatus>,
    sort: Option<SortKey>,
) -> Vec<ViewEntry<'_>> {
    let mut entries: Vec<ViewEntry<'_>> = tasks
        .iter()
        .enumerate()
        .map(|(index, task)| ViewEntry {
            position: index + 1,
            task,
        })
        .filter(|entry| status.map_or(true, |wanted| entry.task.status() == wanted))
        .collect();

    // Stable sorts: ties keep insertion order.
    match sort {
        Some(SortKey::DueDate) => entries.sort_by_key(|e| {
            let due = e.task.due_date();
            (e.task.is_completed(), due.is_none(), due)
        }),
        Some(SortKey::Priority) => {
            entries.sort_by_key(|e| (e.task.is_completed(), e.task.priority().rank()))
        }
        Some(SortKey::CreatedAt) => entries.sort_by_key(|e| e.task.created_at()),
        None => {}
    }
    entries
}
