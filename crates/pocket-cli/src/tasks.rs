use std::{io::Write, path::Path, process::ExitCode};

use clap::CommandFactory;
use color_eyre::Result;
use pocket_core::tasks::{DATE_FORMAT, TIMESTAMP_FORMAT};
use pocket_task::{Completion, TaskManager, ViewEntry};

use crate::{
    cli::{Cli, TaskCommand},
    storage,
};

pub const NO_TASKS: &str = "No tasks to display.";

/// How a task command ended. Reported errors still let the process finish
/// normally, but with a failing exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::Failure => ExitCode::FAILURE,
        }
    }
}

/// Execute a task subcommand against the task file at `path`: one load, at
/// most one save. Messages go to `out`.
pub fn handle<W: Write>(cmd: TaskCommand, path: &Path, out: &mut W) -> Result<Outcome> {
    let mut manager = TaskManager::load(storage::store_for(path));

    let mut outcome = match cmd {
        TaskCommand::Add {
            description,
            due,
            priority,
        } => match manager.add(&description, due, priority) {
            Ok(task) => {
                writeln!(out, "Task added: {}", task.description())?;
                Outcome::Success
            }
            Err(err) => report(out, &err)?,
        },
        TaskCommand::View { status, sort } => {
            let entries = manager.view(status, sort);
            if entries.is_empty() {
                writeln!(out, "{NO_TASKS}")?;
            }
            for entry in &entries {
                writeln!(out, "{}", render_entry(entry))?;
            }
            Outcome::Success
        }
        TaskCommand::Complete { id } => match manager.complete(id) {
            Ok(Completion::Completed) => {
                writeln!(out, "Task {id} marked as completed.")?;
                Outcome::Success
            }
            Ok(Completion::AlreadyCompleted) => {
                writeln!(out, "Task {id} is already completed.")?;
                Outcome::Success
            }
            Err(err) => report(out, &err)?,
        },
        TaskCommand::Delete { id } => match manager.delete(id) {
            Ok(task) => {
                writeln!(out, "Task deleted: {}", task.description())?;
                Outcome::Success
            }
            Err(err) => report(out, &err)?,
        },
    };

    if let Some(err) = manager.take_save_error() {
        writeln!(out, "Error: changes were not saved: {err}")?;
        outcome = Outcome::Failure;
    }
    Ok(outcome)
}

/// What `pocket` does with no subcommand: usage text, then every task.
pub fn run_default<W: Write>(path: &Path, out: &mut W) -> Result<Outcome> {
    writeln!(out, "{}", Cli::command().render_help())?;
    let view = TaskCommand::View {
        status: None,
        sort: None,
    };
    handle(view, path, out)
}

/// One listing line, e.g.
/// `1. [Pending] Buy milk | Due: 2030-01-01 | Priority: High | Created: 2026-01-01 09:00:00`.
pub fn render_entry(entry: &ViewEntry<'_>) -> String {
    let task = entry.task;
    let due = task
        .due_date()
        .map(|date| date.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| "None".to_string());
    format!(
        "{}. [{}] {} | Due: {} | Priority: {} | Created: {}",
        entry.position,
        task.status().label(),
        task.description(),
        due,
        task.priority().label(),
        task.created_at().format(TIMESTAMP_FORMAT),
    )
}

fn report<W: Write>(out: &mut W, err: &pocket_task::TaskError) -> Result<Outcome> {
    writeln!(out, "Error: {err}")?;
    Ok(Outcome::Failure)
}
