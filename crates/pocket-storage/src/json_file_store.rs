use std::{
    fs::{self, File},
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

use pocket_core::storage::{StorageError, TaskStorage};
use tempfile::NamedTempFile;
use tracing::{debug, instrument};

/// File-backed storage holding the task list as a single JSON document.
/// Every write replaces the whole file atomically.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_err<E: ToString>(&self, err: E) -> StorageError {
        StorageError::Read {
            location: self.location(),
            reason: err.to_string(),
        }
    }

    fn write_err<E: ToString>(&self, err: E) -> StorageError {
        StorageError::Write {
            location: self.location(),
            reason: err.to_string(),
        }
    }
}

impl TaskStorage for JsonFileStore {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    #[instrument(skip_all, fields(path = %self.path.display()))]
    fn read(&self) -> Result<Option<Vec<u8>>, StorageError> {
        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("no task file yet");
                return Ok(None);
            }
            Err(err) => return Err(self.read_err(err)),
        };

        let mut buf = Vec::new();
        file.read_to_end(&mut buf).map_err(|e| self.read_err(e))?;
        debug!(bytes = buf.len(), "read task file");
        Ok(Some(buf))
    }

    #[instrument(skip_all, fields(path = %self.path.display()))]
    fn write(&self, contents: &[u8]) -> Result<(), StorageError> {
        let parent = parent_dir(&self.path);
        fs::create_dir_all(parent).map_err(|e| self.write_err(e))?;

        let mut tmp = NamedTempFile::new_in(parent).map_err(|e| self.write_err(e))?;
        tmp.write_all(contents).map_err(|e| self.write_err(e))?;
        tmp.flush().map_err(|e| self.write_err(e))?;
        tmp.persist(&self.path)
            .map_err(|e| self.write_err(e.error))?;
        debug!(bytes = contents.len(), "wrote task file");
        Ok(())
    }
}

/// Directory the temp file must live in so the final rename stays on one filesystem.
fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
