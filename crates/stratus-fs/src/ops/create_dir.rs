use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::backup::Backup;
use crate::error::{OperationError, Result};
use crate::fsutil;
use crate::ops::FileOperation;

/// Creates an empty directory, replacing any existing one.
///
/// An existing directory is backed up and deleted first, so `rollback`
/// can bring back its full prior contents.
pub struct CreateDirectoryOperation {
    path: PathBuf,
    backup: Backup,
}

impl CreateDirectoryOperation {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let backup = Backup::new(&path);
        Self { path, backup }
    }
}

impl FileOperation for CreateDirectoryOperation {
    fn execute(&mut self) -> Result<()> {
        if self.path.exists() {
            self.backup.capture()?;
            fsutil::remove_any(&self.path).map_err(|source| OperationError::Remove {
                path: self.path.clone(),
                source,
            })?;
        }

        fs::create_dir_all(&self.path).map_err(|source| OperationError::CreateDir {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), "created directory");
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        if self.path.exists() {
            fsutil::remove_any(&self.path).map_err(|source| OperationError::Remove {
                path: self.path.clone(),
                source,
            })?;
        }

        if self.backup.has_backup() {
            self.backup.restore()?;
        }
        debug!(path = %self.path.display(), "rolled back directory creation");
        Ok(())
    }

    fn dispose(&mut self) {
        self.backup.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn execute_creates_fresh_directory() {
        let temp = TempDir::new().expect("temp dir");
        let dir = temp.path().join("catalog");

        let mut op = CreateDirectoryOperation::new(&dir);
        op.execute().expect("execute");

        assert!(dir.is_dir());
    }

    #[test]
    fn execute_replaces_existing_directory_with_empty_one() {
        let temp = TempDir::new().expect("temp dir");
        let dir = temp.path().join("catalog");
        fs::create_dir(&dir).expect("create");
        fs::write(dir.join("old.txt"), "old").expect("write");

        let mut op = CreateDirectoryOperation::new(&dir);
        op.execute().expect("execute");

        assert!(dir.is_dir());
        assert!(!dir.join("old.txt").exists());
    }

    #[test]
    fn rollback_restores_previous_contents() {
        let temp = TempDir::new().expect("temp dir");
        let dir = temp.path().join("catalog");
        fs::create_dir_all(dir.join("nested")).expect("create");
        fs::write(dir.join("nested/old.txt"), "old").expect("write");

        let mut op = CreateDirectoryOperation::new(&dir);
        op.execute().expect("execute");
        op.rollback().expect("rollback");

        assert_eq!(
            fs::read_to_string(dir.join("nested/old.txt")).expect("read"),
            "old"
        );
    }

    #[test]
    fn rollback_of_fresh_creation_deletes_the_directory() {
        let temp = TempDir::new().expect("temp dir");
        let dir = temp.path().join("catalog");

        let mut op = CreateDirectoryOperation::new(&dir);
        op.execute().expect("execute");
        fs::write(dir.join("made-later.txt"), "x").expect("write");
        op.rollback().expect("rollback");

        assert!(!dir.exists());
    }

    #[test]
    fn dispose_is_idempotent() {
        let temp = TempDir::new().expect("temp dir");
        let dir = temp.path().join("catalog");
        fs::create_dir(&dir).expect("create");

        let mut op = CreateDirectoryOperation::new(&dir);
        op.execute().expect("execute");
        op.dispose();
        op.dispose();
    }
}
