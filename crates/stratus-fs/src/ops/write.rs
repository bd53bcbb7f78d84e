use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::backup::Backup;
use crate::error::{OperationError, Result};
use crate::ops::FileOperation;

/// Replaces a file's contents with the given bytes.
pub struct WriteBytesOperation {
    path: PathBuf,
    bytes: Vec<u8>,
    backup: Backup,
}

impl WriteBytesOperation {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        let path = path.into();
        let backup = Backup::new(&path);
        Self {
            path,
            bytes,
            backup,
        }
    }
}

impl FileOperation for WriteBytesOperation {
    fn execute(&mut self) -> Result<()> {
        self.backup.capture()?;

        fs::write(&self.path, &self.bytes).map_err(|source| OperationError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), bytes = self.bytes.len(), "wrote file");
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        self.backup.rollback_target()?;
        debug!(path = %self.path.display(), "rolled back write");
        Ok(())
    }

    fn dispose(&mut self) {
        self.backup.dispose();
    }
}
