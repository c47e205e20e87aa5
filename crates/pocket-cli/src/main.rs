mod cli;
mod config;
mod storage;
mod tasks;

use std::{
    io::{self, Write},
    process::ExitCode,
};

use clap::Parser;
use color_eyre::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Command, ConfigCommand};

/// Entry point wiring the CLI to the task list and the calculator.
fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    init_tracing();

    let cli = cli::Cli::parse();
    let tasks_file = storage::resolve_tasks_file(cli.file);
    let mut stdout = io::stdout().lock();

    let outcome = match cli.command {
        None => tasks::run_default(&tasks_file, &mut stdout)?,
        Some(Command::Task(cmd)) => tasks::handle(cmd, &tasks_file, &mut stdout)?,
        Some(Command::Calc) => {
            pocket_calc::run_session(io::stdin().lock(), &mut stdout)?;
            tasks::Outcome::Success
        }
        Some(Command::Config(ConfigCommand::Init)) => {
            init_config(&config::load()?, &mut stdout)?;
            tasks::Outcome::Success
        }
        Some(Command::Config(ConfigCommand::Path)) => {
            writeln!(stdout, "config: {}", config::default_path()?.display())?;
            writeln!(stdout, "tasks:  {}", tasks_file.display())?;
            tasks::Outcome::Success
        }
    };

    Ok(outcome.into())
}

fn init_tracing() {
    // Respect user-provided filters; logs go to stderr so command output stays clean.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(io::stderr);
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn init_config<W: Write>(config: &config::Config, out: &mut W) -> Result<()> {
    let seeded = config::Config {
        tasks_file: config
            .tasks_file
            .clone()
            .or_else(|| Some(storage::DEFAULT_TASKS_FILE.into())),
    };
    let path = config::write_default_if_missing(&seeded)?;
    writeln!(out, "Config initialized at {}", path.display())?;
    Ok(())
}
