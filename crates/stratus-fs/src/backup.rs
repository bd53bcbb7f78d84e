use std::fs;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::{OperationError, Result};
use crate::fsutil;

/// Snapshot state for one operation target.
///
/// A backup path is recorded only if something existed at the target
/// before the mutation; restoring without a backup is a no-op. The backup
/// copy lives in temp storage until [`Backup::dispose`] runs.
pub(crate) struct Backup {
    target: PathBuf,
    backup_path: Option<PathBuf>,
    disposed: bool,
}

impl Backup {
    pub(crate) fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            backup_path: None,
            disposed: false,
        }
    }

    pub(crate) fn has_backup(&self) -> bool {
        self.backup_path.is_some()
    }

    #[cfg(test)]
    pub(crate) fn backup_path(&self) -> Option<&std::path::Path> {
        self.backup_path.as_deref()
    }

    /// Copies the current target state aside, if the target exists.
    ///
    /// Idempotent: a second call keeps the first snapshot.
    pub(crate) fn capture(&mut self) -> Result<()> {
        if self.backup_path.is_some() {
            return Ok(());
        }

        if self.target.is_dir() {
            let dest = fsutil::backup_path(None);
            fsutil::copy_dir_recursive(&self.target, &dest).map_err(|source| {
                OperationError::Backup {
                    path: self.target.clone(),
                    source,
                }
            })?;
            debug!(
                target = %self.target.display(),
                backup = %dest.display(),
                "backed up directory"
            );
            self.backup_path = Some(dest);
        } else if self.target.is_file() {
            let dest = fsutil::backup_path(self.target.extension());
            fs::copy(&self.target, &dest).map_err(|source| OperationError::Backup {
                path: self.target.clone(),
                source,
            })?;
            debug!(
                target = %self.target.display(),
                backup = %dest.display(),
                "backed up file"
            );
            self.backup_path = Some(dest);
        }

        Ok(())
    }

    /// Copies the backup back over the target. No-op without a backup.
    pub(crate) fn restore(&self) -> Result<()> {
        let Some(backup) = &self.backup_path else {
            return Ok(());
        };

        if backup.is_dir() {
            if self.target.exists() {
                fsutil::remove_any(&self.target).map_err(|source| OperationError::Restore {
                    path: self.target.clone(),
                    source,
                })?;
            }
            fsutil::copy_dir_recursive(backup, &self.target).map_err(|source| {
                OperationError::Restore {
                    path: self.target.clone(),
                    source,
                }
            })?;
        } else {
            if let Some(parent) = self.target.parent() {
                fs::create_dir_all(parent).map_err(|source| OperationError::Restore {
                    path: self.target.clone(),
                    source,
                })?;
            }
            fs::copy(backup, &self.target).map_err(|source| OperationError::Restore {
                path: self.target.clone(),
                source,
            })?;
        }

        debug!(target = %self.target.display(), "restored from backup");
        Ok(())
    }

    /// Rolls the target back to its pre-execute state.
    ///
    /// With a backup this is a restore; without one the target did not
    /// exist beforehand, so whatever now sits there is deleted.
    pub(crate) fn rollback_target(&self) -> Result<()> {
        if self.backup_path.is_some() {
            self.restore()
        } else if self.target.exists() {
            fsutil::remove_any(&self.target).map_err(|source| OperationError::Remove {
                path: self.target.clone(),
                source,
            })
        } else {
            Ok(())
        }
    }

    /// Deletes the backup copy from temp storage. Idempotent; failures are
    /// logged, never propagated.
    pub(crate) fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;

        if let Some(backup) = self.backup_path.take() {
            let result = if backup.is_dir() {
                fs::remove_dir_all(&backup)
            } else {
                fsutil::clear_readonly(&backup).and_then(|()| fs::remove_file(&backup))
            };

            if let Err(error) = result {
                warn!(
                    backup = %backup.display(),
                    %error,
                    "failed to delete backup copy"
                );
            }
        }
    }
}

impl Drop for Backup {
    fn drop(&mut self) {
        self.dispose();
    }
}
