use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::backup::Backup;
use crate::error::{OperationError, Result};
use crate::fsutil;
use crate::ops::FileOperation;

/// Copies a file or directory tree to a destination.
///
/// The destination is backed up before anything is written, so `rollback`
/// restores whatever was there (or removes a destination that did not
/// exist beforehand).
pub struct CopyOperation {
    source: PathBuf,
    destination: PathBuf,
    overwrite: bool,
    backup: Backup,
}

impl CopyOperation {
    #[must_use]
    pub fn new(
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
        overwrite: bool,
    ) -> Self {
        let destination = destination.into();
        let backup = Backup::new(&destination);
        Self {
            source: source.into(),
            destination,
            overwrite,
            backup,
        }
    }
}

impl FileOperation for CopyOperation {
    fn execute(&mut self) -> Result<()> {
        self.backup.capture()?;

        if self.source.is_dir() {
            if self.destination.exists() && self.overwrite {
                fsutil::remove_any(&self.destination).map_err(|source| OperationError::Remove {
                    path: self.destination.clone(),
                    source,
                })?;
            }
            fsutil::copy_dir_recursive(&self.source, &self.destination).map_err(|source| {
                OperationError::Copy {
                    from: self.source.clone(),
                    to: self.destination.clone(),
                    source,
                }
            })?;
        } else {
            if self.destination.exists() && !self.overwrite {
                return Err(OperationError::DestinationExists(self.destination.clone()));
            }
            fs::copy(&self.source, &self.destination).map_err(|source| OperationError::Copy {
                from: self.source.clone(),
                to: self.destination.clone(),
                source,
            })?;
        }

        debug!(
            from = %self.source.display(),
            to = %self.destination.display(),
            "copied"
        );
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        self.backup.rollback_target()?;
        debug!(to = %self.destination.display(), "rolled back copy");
        Ok(())
    }

    fn dispose(&mut self) {
        self.backup.dispose();
    }
}
