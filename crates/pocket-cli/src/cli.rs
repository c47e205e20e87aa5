use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use pocket_core::tasks::{parse_due_date, Priority, TaskStatus};
use pocket_task::SortKey;

/// CLI surface definition.
#[derive(Parser, Debug)]
#[command(
    name = "pocket",
    about = "Pocket to-do list and calculator",
    version,
    propagate_version = true
)]
pub struct Cli {
    /// JSON file holding the tasks [default: tasks.json]
    #[arg(long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Optional subcommand; prints help and lists all tasks when absent.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    #[command(flatten)]
    Task(TaskCommand),
    /// Start the interactive calculator.
    Calc,
    /// Manage CLI configuration.
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Task list subcommands. Task IDs are positions as printed by `view`.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum TaskCommand {
    /// Add a new task.
    Add {
        /// What needs doing.
        description: String,
        /// Due date (YYYY-MM-DD).
        #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_due_date)]
        due: Option<NaiveDate>,
        /// low, medium or high [default: medium]
        #[arg(long)]
        priority: Option<Priority>,
    },
    /// List tasks.
    View {
        /// Only show pending or completed tasks.
        #[arg(long)]
        status: Option<TaskStatus>,
        /// due_date, priority or created_at.
        #[arg(long)]
        sort: Option<SortKey>,
    },
    /// Mark a task as completed.
    Complete {
        /// Task ID from `view`.
        id: usize,
    },
    /// Delete a task.
    Delete {
        /// Task ID from `view`.
        id: usize,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommand {
    /// Create a default config file if one does not exist.
    Init,
    /// Print the config file location and the task file in use.
    Path,
}
