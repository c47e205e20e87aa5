use std::fmt;

use pocket_core::tasks::{Task, TaskRecord};
use serde::Serialize;
use serde_json::{ser::PrettyFormatter, Serializer, Value};

/// Something that went wrong while loading, without stopping the load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// The backing storage exists but could not be read.
    Unreadable { reason: String },
    /// The document is not valid JSON.
    Corrupt { reason: String },
    /// The document is valid JSON but not a list.
    NotAList,
    /// One list element could not be turned into a task and was skipped.
    MalformedEntry { index: usize, reason: String },
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadWarning::Unreadable { reason } => {
                write!(f, "could not read task file ({reason}); starting with no tasks")
            }
            LoadWarning::Corrupt { reason } => {
                write!(f, "task file is not valid JSON ({reason}); starting with no tasks")
            }
            LoadWarning::NotAList => {
                write!(f, "task file does not contain a list; starting with no tasks")
            }
            LoadWarning::MalformedEntry { index, reason } => {
                write!(f, "skipping malformed task at index {index}: {reason}")
            }
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct Decoded {
    pub tasks: Vec<Task>,
    pub warnings: Vec<LoadWarning>,
}

/// Decode a stored document. Never fails: anything unusable becomes a warning.
pub(crate) fn decode(bytes: &[u8]) -> Decoded {
    let value: Value = match serde_json::from_slice(bytes) {
        Ok(value) => value,
        Err(err) => {
            return Decoded {
                tasks: Vec::new(),
                warnings: vec![LoadWarning::Corrupt {
                    reason: err.to_string(),
                }],
            }
        }
    };

    let Value::Array(entries) = value else {
        return Decoded {
            tasks: Vec::new(),
            warnings: vec![LoadWarning::NotAList],
        };
    };

    let mut decoded = Decoded::default();
    for (index, entry) in entries.into_iter().enumerate() {
        let task = serde_json::from_value::<TaskRecord>(entry)
            .map_err(|err| err.to_string())
            .and_then(|record| Task::try_from(record).map_err(|err| err.to_string()));
        match task {
            Ok(task) => decoded.tasks.push(task),
            Err(reason) => decoded
                .warnings
                .push(LoadWarning::MalformedEntry { index, reason }),
        }
    }
    decoded
}

/// Encode the full list as a pretty-printed JSON array.
pub(crate) fn encode(tasks: &[Task]) -> Result<Vec<u8>, serde_json::Error> {
    let records: Vec<TaskRecord> = tasks.iter().map(TaskRecord::from).collect();
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    records.serialize(&mut ser)?;
    Ok(buf)
}
