use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::backup::Backup;
use crate::error::{OperationError, Result};
use crate::fsutil;
use crate::ops::FileOperation;

/// Moves a file or directory to a destination.
///
/// The source is backed up before the move. Directories on the same
/// filesystem are renamed in place; across filesystems the tree is copied
/// and the source deleted. `rollback` restores the source and removes
/// whatever now exists at the destination.
pub struct MoveOperation {
    source: PathBuf,
    destination: PathBuf,
    backup: Backup,
}

impl MoveOperation {
    #[must_use]
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        let source = source.into();
        let backup = Backup::new(&source);
        Self {
            source,
            destination: destination.into(),
            backup,
        }
    }

    fn move_error(&self, source: std::io::Error) -> OperationError {
        OperationError::Move {
            from: self.source.clone(),
            to: self.destination.clone(),
            source,
        }
    }
}

impl FileOperation for MoveOperation {
    fn execute(&mut self) -> Result<()> {
        self.backup.capture()?;

        if let Some(parent) = self.destination.parent() {
            fs::create_dir_all(parent).map_err(|source| self.move_error(source))?;
        }

        if self.source.is_dir() {
            let same = fsutil::same_device(&self.source, &self.destination)
                .map_err(|source| self.move_error(source))?;
            if same {
                fs::rename(&self.source, &self.destination)
                    .map_err(|source| self.move_error(source))?;
            } else {
                fsutil::copy_dir_recursive(&self.source, &self.destination)
                    .map_err(|source| self.move_error(source))?;
                fs::remove_dir_all(&self.source).map_err(|source| OperationError::Remove {
                    path: self.source.clone(),
                    source,
                })?;
            }
        } else {
            fs::rename(&self.source, &self.destination)
                .map_err(|source| self.move_error(source))?;
        }

        debug!(
            from = %self.source.display(),
            to = %self.destination.display(),
            "moved"
        );
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        self.backup.restore()?;

        if self.destination.exists() {
            fsutil::remove_any(&self.destination).map_err(|source| OperationError::Remove {
                path: self.destination.clone(),
                source,
            })?;
        }
        debug!(from = %self.source.display(), "rolled back move");
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
    fn execute_moves_file() {
        let temp = TempDir::new().expect("temp dir");
        let src = temp.path().join("src.txt");
        let dst = temp.path().join("dst.txt");
        fs::write(&src, "payload").expect("write");

        let mut op = MoveOperation::new(&src, &dst);
        op.execute().expect("execute");

        assert!(!src.exists());
        assert_eq!(fs::read_to_string(&dst).expect("read"), "payload");
    }

    #[test]
    fn execute_renames_directory_on_same_volume() {
        let temp = TempDir::new().expect("temp dir");
        let src = temp.path().join("src/dir");
        let dst = temp.path().join("dst/dir");
        fs::create_dir_all(&src).expect("create");
        fs::write(src.join("a.txt"), "a").expect("write");

        let mut op = MoveOperation::new(&src, &dst);
        op.execute().expect("execute");

        assert!(!src.exists());
        assert_eq!(fs::read_to_string(dst.join("a.txt")).expect("read"), "a");
    }

    #[test]
    fn rollback_restores_source_and_removes_destination() {
        let temp = TempDir::new().expect("temp dir");
        let src = temp.path().join("src/dir");
        let dst = temp.path().join("dst/dir");
        fs::create_dir_all(&src).expect("create");
        fs::write(src.join("a.txt"), "original").expect("write");

        let mut op = MoveOperation::new(&src, &dst);
        op.execute().expect("execute");
        op.rollback().expect("rollback");

        assert_eq!(
            fs::read_to_string(src.join("a.txt")).expect("read"),
            "original"
        );
        assert!(!dst.exists());
    }

    #[test]
    fn rollback_restores_moved_file() {
        let temp = TempDir::new().expect("temp dir");
        let src = temp.path().join("src.txt");
        let dst = temp.path().join("dst.txt");
        fs::write(&src, "payload").expect("write");

        let mut op = MoveOperation::new(&src, &dst);
        op.execute().expect("execute");
        op.rollback().expect("rollback");

        assert_eq!(fs::read_to_string(&src).expect("read"), "payload");
        assert!(!dst.exists());
    }
}
