use std::{
    fs, io,
    path::{Path, PathBuf},
};

use color_eyre::{eyre::eyre, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// User-level configuration loaded from `~/.config/pocket/config.toml` (platform-specific).
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Task file used when `--file` and `POCKET_TASKS_FILE` are not given.
    pub tasks_file: Option<PathBuf>,
}

/// Load config from the default path; if missing, return defaults.
pub fn load() -> Result<Config> {
    load_from_path(default_path()?)
}

/// Strict load used by `config` subcommands: a missing or blank file is the
/// default config, anything unreadable or malformed is an error.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(err) => return Err(eyre!("cannot read config {}: {err}", path.display())),
    };
    if contents.trim().is_empty() {
        return Ok(Config::default());
    }
    toml::from_str(&contents).map_err(|err| eyre!("invalid config {}: {err}", path.display()))
}

/// `tasks_file` from the user config, for task commands. A broken config only
/// costs the setting, never the command.
pub fn configured_tasks_file() -> Option<PathBuf> {
    match default_path() {
        Ok(path) => tasks_file_at(&path),
        Err(err) => {
            debug!(%err, "skipping config lookup");
            None
        }
    }
}

/// Lenient `tasks_file` lookup in the config at `path`.
pub fn tasks_file_at(path: &Path) -> Option<PathBuf> {
    match load_from_path(path) {
        Ok(config) => config.tasks_file,
        Err(err) => {
            warn!("ignoring config: {err}");
            None
        }
    }
}

/// Resolve the default config path (platform aware).
pub fn default_path() -> Result<PathBuf> {
    let base = config_dir().ok_or_else(|| eyre!("no config dir available"))?;
    Ok(base.join("pocket").join("config.toml"))
}

/// Write the given config to the default path unless a file is already there.
pub fn write_default_if_missing(config: &Config) -> Result<PathBuf> {
    let path = default_path()?;
    write_if_missing(config, &path)?;
    Ok(path)
}

/// Write `config` to `path`, creating parent directories as needed. An
/// existing file is left alone to avoid clobbering user edits. Returns whether
/// a file was written.
pub fn write_if_missing(config: &Config, path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let body = toml::to_string_pretty(config)?;
    fs::write(path, body)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_default_when_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = load_from_path(dir.path().join("config.toml")).expect("load");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn returns_default_when_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "  \n").expect("write");
        assert_eq!(load_from_path(&path).expect("load"), Config::default());
    }

    #[test]
    fn parses_custom_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, r#"tasks_file = "/tmp/pocket/tasks.json""#).expect("write temp config");

        let cfg = load_from_path(&path).expect("load");
        assert_eq!(
            cfg,
            Config {
                tasks_file: Some(PathBuf::from("/tmp/pocket/tasks.json")),
            }
        );
    }

    #[test]
    fn rejects_malformed_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "tasks_file = [").expect("write");
        assert!(load_from_path(&path).is_err());
    }

    #[test]
    fn malformed_config_yields_no_tasks_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "tasks_file = [").expect("write");
        assert_eq!(tasks_file_at(&path), None);
    }

    #[test]
    fn tasks_file_at_reads_setting() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, r#"tasks_file = "todo.json""#).expect("write");
        assert_eq!(tasks_file_at(&path), Some(PathBuf::from("todo.json")));
        assert_eq!(tasks_file_at(&dir.path().join("absent.toml")), None);
    }

    #[test]
    fn write_creates_file_once() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");
        let cfg = Config {
            tasks_file: Some(PathBuf::from("todo.json")),
        };

        assert!(write_if_missing(&cfg, &path).expect("write should succeed"));
        let other = Config {
            tasks_file: Some(PathBuf::from("other.json")),
        };
        assert!(!write_if_missing(&other, &path).expect("second write ok"));

        assert_eq!(load_from_path(&path).expect("load"), cfg);
    }
}
