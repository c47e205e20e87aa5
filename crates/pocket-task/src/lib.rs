//! Task manager: owns the in-memory task list, applies changes to it, and
//! writes the whole list back to storage after every change.
//!
//! Tasks are addressed by their 1-based position in the current list. Positions
//! shift after `add` and `delete`, so callers should re-`view` between edits.

mod codec;
mod view;

use chrono::NaiveDate;
use pocket_core::{
    storage::{StorageError, TaskStorage},
    tasks::{Priority, Task, TaskStatus, ValidationError},
};
use thiserror::Error;
use tracing::{debug, instrument, warn};

pub use codec::LoadWarning;
pub use view::{SortKey, ViewEntry};

/// Errors returned by manager operations. None of them change the list.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("invalid task ID {position}: {count} task(s) in the list")]
    OutOfRange { position: usize, count: usize },
}

/// Result of `complete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The task was pending and is now completed.
    Completed,
    /// The task was already completed; nothing changed and nothing was saved.
    AlreadyCompleted,
}

/// Positional task manager backed by a `TaskStorage`.
pub struct TaskManager<S: TaskStorage> {
    storage: S,
    tasks: Vec<Task>,
    warnings: Vec<LoadWarning>,
    save_error: Option<StorageError>,
}

impl<S: TaskStorage> TaskManager<S> {
    /// Load the task list from storage. Never fails: unreadable, corrupt or
    /// mis-shaped data starts an empty list, and malformed entries are
    /// skipped. Every such problem is logged and kept in `warnings()`.
    #[instrument(skip_all, fields(location = %storage.location()))]
    pub fn load(storage: S) -> Self {
        let mut warnings = Vec::new();
        let tasks = match storage.read() {
            Ok(Some(bytes)) => {
                let decoded = codec::decode(&bytes);
                warnings = decoded.warnings;
                decoded.tasks
            }
            Ok(None) => Vec::new(),
            Err(err) => {
                warnings.push(LoadWarning::Unreadable {
                    reason: err.to_string(),
                });
                Vec::new()
            }
        };

        for warning in &warnings {
            warn!("{warning}");
        }
        debug!(count = tasks.len(), "loaded tasks");

        Self {
            storage,
            tasks,
            warnings,
            save_error: None,
        }
    }

    /// Tasks in their current order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Problems found while loading.
    pub fn warnings(&self) -> &[LoadWarning] {
        &self.warnings
    }

    /// Take the error from the most recent failed save, if any. The in-memory
    /// list is still authoritative after a failed save.
    pub fn take_save_error(&mut self) -> Option<StorageError> {
        self.save_error.take()
    }

    /// Write the full list to storage.
    pub fn save(&self) -> Result<(), StorageError> {
        let bytes = codec::encode(&self.tasks).map_err(|err| StorageError::Write {
            location: self.storage.location(),
            reason: err.to_string(),
        })?;
        self.storage.write(&bytes)?;
        debug!(count = self.tasks.len(), "saved tasks");
        Ok(())
    }

    /// Append a new pending task and save.
    #[instrument(skip(self))]
    pub fn add(
        &mut self,
        description: &str,
        due_date: Option<NaiveDate>,
        priority: Option<Priority>,
    ) -> Result<&Task, TaskError> {
        let task = Task::new(
            description,
            due_date,
            priority.unwrap_or_default(),
            TaskStatus::Pending,
        )?;
        self.tasks.push(task);
        self.persist();
        let index = self.tasks.len() - 1;
        Ok(&self.tasks[index])
    }

    /// Tasks to display, optionally filtered by status and sorted. Each entry
    /// carries the position that `complete` and `delete` accept.
    pub fn view(&self, status: Option<TaskStatus>, sort: Option<SortKey>) -> Vec<ViewEntry<'_>> {
        view::select(&self.tasks, status, sort)
    }

    /// Mark the task at `position` (1-based) completed and save. Completing a
    /// task twice is a no-op that does not save.
    #[instrument(skip(self))]
    pub fn complete(&mut self, position: usize) -> Result<Completion, TaskError> {
        let index = self.index_of(position)?;
        let task = &mut self.tasks[index];
        if task.is_completed() {
            debug!("task already completed");
            return Ok(Completion::AlreadyCompleted);
        }
        task.mark_completed();
        self.persist();
        Ok(Completion::Completed)
    }

    /// Remove the task at `position` (1-based), save, and return it.
    #[instrument(skip(self))]
    pub fn delete(&mut self, position: usize) -> Result<Task, TaskError> {
        let index = self.index_of(position)?;
        let removed = self.tasks.remove(index);
        self.persist();
        Ok(removed)
    }

    fn index_of(&self, position: usize) -> Result<usize, TaskError> {
        if position == 0 || position > self.tasks.len() {
            return Err(TaskError::OutOfRange {
                position,
                count: self.tasks.len(),
            });
        }
        Ok(position - 1)
    }

    fn persist(&mut self) {
        match self.save() {
            Ok(()) => self.save_error = None,
            Err(err) => {
                warn!("{err}");
                self.save_error = Some(err);
            }
        }
    }
}
