use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use tracing::debug;

use crate::backup::Backup;
use crate::error::{OperationError, Result};
use crate::ops::FileOperation;

/// Appends text to a file, creating it if absent.
pub struct AppendTextOperation {
    path: PathBuf,
    text: String,
    backup: Backup,
}

impl AppendTextOperation {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let path = path.into();
        let backup = Backup::new(&path);
        Self {
            path,
            text: text.into(),
            backup,
        }
    }
}

impl FileOperation for AppendTextOperation {
    fn execute(&mut self) -> Result<()> {
        self.backup.capture()?;

        let append = || -> std::io::Result<()> {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)?;
            file.write_all(self.text.as_bytes())
        };
        append().map_err(|source| OperationError::Append {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), "appended to file");
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        self.backup.rollback_target()?;
        debug!(path = %self.path.display(), "rolled back append");
        Ok(())
    }

    fn dispose(&mut self) {
        self.backup.dispose();
    }
}
