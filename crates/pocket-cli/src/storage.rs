use std::path::{Path, PathBuf};

use pocket_storage::json_file_store::JsonFileStore;
use tracing::debug;

use crate::config;

/// Task file used when nothing else is configured.
pub const DEFAULT_TASKS_FILE: &str = "tasks.json";
/// Environment override for the task file.
pub const TASKS_FILE_ENV: &str = "POCKET_TASKS_FILE";

/// Pick the task file: `--file`, then `POCKET_TASKS_FILE`, then config, then
/// the default. The config file is only read when the first two are absent.
pub fn resolve_tasks_file(flag: Option<PathBuf>) -> PathBuf {
    let env = std::env::var_os(TASKS_FILE_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from);
    resolve(flag, env, config::configured_tasks_file)
}

fn resolve(
    flag: Option<PathBuf>,
    env: Option<PathBuf>,
    configured: impl FnOnce() -> Option<PathBuf>,
) -> PathBuf {
    flag.or(env)
        .or_else(configured)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TASKS_FILE))
}

/// Build the file store for the resolved task file.
pub fn store_for(path: &Path) -> JsonFileStore {
    let store = JsonFileStore::new(path);
    debug!(path = %store.path().display(), "using task file");
    store
}
