use std::{fmt, str::FromStr};

use chrono::{Local, NaiveDate, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Format of `due_date` on disk and on the command line.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Format of `created_at` on disk.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Errors raised while building a task from user input or stored data.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("task description cannot be empty")]
    EmptyDescription,
    #[error("task record has no description")]
    MissingDescription,
    #[error("invalid due date '{0}', expected YYYY-MM-DD")]
    InvalidDueDate(String),
    #[error("invalid priority '{0}', expected one of: low, medium, high")]
    InvalidPriority(String),
    #[error("invalid status '{0}', expected one of: pending, completed")]
    InvalidStatus(String),
    #[error("invalid created_at '{0}', expected YYYY-MM-DD HH:MM:SS")]
    InvalidTimestamp(String),
    #[error("invalid sort key '{0}', expected one of: due_date, priority, created_at")]
    InvalidSortKey(String),
}

/// Task priority. Input is case-insensitive; stored lowercase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Capitalized form used in listings.
    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    /// Sort rank, most urgent first.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(ValidationError::InvalidPriority(s.to_string())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task status lifecycle. The only transition is pending -> completed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    #[default]
    Pending,
    Completed,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Completed => "completed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::Completed => "Completed",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "completed" => Ok(TaskStatus::Completed),
            _ => Err(ValidationError::InvalidStatus(s.to_string())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_due_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDueDate(raw.to_string()))
}

fn parse_created_at(raw: &str) -> Result<NaiveDateTime, ValidationError> {
    NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT)
        .map_err(|_| ValidationError::InvalidTimestamp(raw.to_string()))
}

/// Current local time at the precision `created_at` is stored with.
fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

/// Task entity. Fields are private so a constructed task always satisfies
/// its invariants: non-empty trimmed description, valid enums and date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    description: String,
    due_date: Option<NaiveDate>,
    priority: Priority,
    status: TaskStatus,
    created_at: NaiveDateTime,
}

impl Task {
    /// Build a fresh task stamped with the current time.
    pub fn new(
        description: &str,
        due_date: Option<NaiveDate>,
        priority: Priority,
        status: TaskStatus,
    ) -> Result<Self, ValidationError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        Ok(Self {
            description: description.to_string(),
            due_date,
            priority,
            status,
            created_at: now(),
        })
    }

    /// Build a fresh task from raw text fields; absent fields take their defaults.
    pub fn parse(
        description: &str,
        due_date: Option<&str>,
        priority: Option<&str>,
        status: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let due_date = due_date.map(parse_due_date).transpose()?;
        let priority = priority
            .map(str::parse::<Priority>)
            .transpose()?
            .unwrap_or_default();
        let status = status
            .map(str::parse::<TaskStatus>)
            .transpose()?
            .unwrap_or_default();
        Self::new(description, due_date, priority, status)
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Set status to completed. Calling it twice is harmless.
    pub fn mark_completed(&mut self) {
        self.status = TaskStatus::Completed;
    }
}

/// On-disk shape of a task. Every field is optional so that a partially
/// filled record can be reported precisely instead of failing the whole file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<String>,
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        Self {
            description: Some(task.description.clone()),
            due_date: task
                .due_date
                .map(|date| date.format(DATE_FORMAT).to_string()),
            priority: Some(task.priority.as_str().to_string()),
            status: Some(task.status.as_str().to_string()),
            created_at: Some(task.created_at.format(TIMESTAMP_FORMAT).to_string()),
        }
    }
}

impl TryFrom<TaskRecord> for Task {
    type Error = ValidationError;

    /// Rebuild a stored task. `created_at` is kept when present; a blank
    /// `due_date` counts as absent.
    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        let description = record
            .description
            .ok_or(ValidationError::MissingDescription)?;
        let due_date = record
            .due_date
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .map(parse_due_date)
            .transpose()?;
        let priority = record
            .priority
            .as_deref()
            .map(str::parse::<Priority>)
            .transpose()?
            .unwrap_or_default();
        let status = record
            .status
            .as_deref()
            .map(str::parse::<TaskStatus>)
            .transpose()?
            .unwrap_or_default();
        let created_at = match record.created_at.as_deref() {
            Some(raw) => parse_created_at(raw)?,
            None => now(),
        };

        let mut task = Task::new(&description, due_date, priority, status)?;
        task.created_at = created_at;
        Ok(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> TaskRecord {
        serde_json::from_str(json).expect("valid record json")
    }

    #[test]
    fn record_round_trip_preserves_every_field() {
        let mut task = Task::parse("Write report", Some("2025-07-30"), Some("high"), None)
            .expect("valid task");
        task.mark_completed();

        let restored = Task::try_from(TaskRecord::from(&task)).expect("restore");
        assert_eq!(restored, task);
    }

    #[test]
    fn priority_is_case_insensitive_and_stored_lowercase() {
        for raw in ["LOW", "Low", "low"] {
            let task = Task::parse("x", None, Some(raw), None).expect("valid priority");
            assert_eq!(task.priority(), Priority::Low);
            assert_eq!(
                TaskRecord::from(&task).priority.as_deref(),
                Some("low"),
                "input {raw}"
            );
        }
    }

    #[test]
    fn rejects_blank_description() {
        for raw in ["", "   ", "\t\n"] {
            let err = Task::parse(raw, None, None, None).expect_err("blank must fail");
            assert_eq!(err, ValidationError::EmptyDescription);
        }
    }

    #[test]
    fn trims_description() {
        let task = Task::parse("  Buy milk ", None, None, None).expect("valid");
        assert_eq!(task.description(), "Buy milk");
    }

    #[test]
    fn validates_due_date() {
        let err = Task::parse("x", Some("2025-13-40"), None, None).expect_err("bad date");
        assert_eq!(err, ValidationError::InvalidDueDate("2025-13-40".into()));

        let task = Task::parse("x", Some("2025-07-30"), None, None).expect("good date");
        assert_eq!(
            TaskRecord::from(&task).due_date.as_deref(),
            Some("2025-07-30")
        );
    }

    #[test]
    fn rejects_unknown_priority_and_status() {
        assert!(matches!(
            Task::parse("x", None, Some("urgent"), None),
            Err(ValidationError::InvalidPriority(_))
        ));
        assert!(matches!(
            Task::parse("x", None, None, Some("doing")),
            Err(ValidationError::InvalidStatus(_))
        ));
    }

    #[test]
    fn defaults_apply_to_fresh_tasks() {
        let task = Task::parse("x", None, None, None).expect("valid");
        assert_eq!(task.priority(), Priority::Medium);
        assert_eq!(task.status(), TaskStatus::Pending);
        assert_eq!(task.due_date(), None);
    }

    #[test]
    fn record_without_description_is_rejected() {
        let err = Task::try_from(record(r#"{"priority": "high"}"#)).expect_err("no description");
        assert_eq!(err, ValidationError::MissingDescription);
    }

    #[test]
    fn record_defaults_missing_fields_and_keeps_created_at() {
        let task = Task::try_from(record(
            r#"{"description": "Old task", "created_at": "2024-01-02 03:04:05"}"#,
        ))
        .expect("valid record");
        assert_eq!(task.priority(), Priority::Medium);
        assert_eq!(task.status(), TaskStatus::Pending);
        assert_eq!(task.due_date(), None);
        assert_eq!(
            task.created_at().format(TIMESTAMP_FORMAT).to_string(),
            "2024-01-02 03:04:05"
        );
    }

    #[test]
    fn record_with_null_due_date_has_none() {
        let task = Task::try_from(record(
            r#"{"description": "x", "due_date": null, "priority": "LOW", "status": "Completed"}"#,
        ))
        .expect("valid record");
        assert_eq!(task.due_date(), None);
        assert_eq!(task.priority(), Priority::Low);
        assert!(task.is_completed());
    }

    #[test]
    fn record_with_bad_created_at_is_rejected() {
        let err = Task::try_from(record(r#"{"description": "x", "created_at": "yesterday"}"#))
            .expect_err("bad timestamp");
        assert_eq!(err, ValidationError::InvalidTimestamp("yesterday".into()));
    }

    #[test]
    fn mark_completed_is_idempotent() {
        let mut task = Task::parse("x", None, None, None).expect("valid");
        let created = task.created_at();
        task.mark_completed();
        task.mark_completed();
        assert!(task.is_completed());
        assert_eq!(task.created_at(), created);
    }

    #[test]
    fn priority_rank_orders_high_first() {
        assert!(Priority::High.rank() < Priority::Medium.rank());
        assert!(Priority::Medium.rank() < Priority::Low.rank());
    }

    #[test]
    fn serialized_record_writes_null_due_date() {
        let task = Task::parse("x", None, None, None).expect("valid");
        let value = serde_json::to_value(TaskRecord::from(&task)).expect("serialize");
        assert!(value["due_date"].is_null());
        assert_eq!(value["priority"], "medium");
        assert_eq!(value["status"], "pending");
    }
}
