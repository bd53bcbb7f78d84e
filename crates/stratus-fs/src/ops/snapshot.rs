use std::path::PathBuf;

use tracing::debug;

use crate::backup::Backup;
use crate::error::Result;
use crate::ops::FileOperation;

/// Captures a consistency point without mutating anything.
///
/// `execute` only takes the backup. `rollback` is a no-op: the snapshot
/// is there for surrounding tooling to inspect or archive, not to revert
/// the target.
pub struct SnapshotOperation {
    path: PathBuf,
    backup: Backup,
}

impl SnapshotOperation {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let backup = Backup::new(&path);
        Self { path, backup }
    }
}

impl FileOperation for SnapshotOperation {
    fn execute(&mut self) -> Result<()> {
        self.backup.capture()?;
        debug!(path = %self.path.display(), "captured snapshot");
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        Ok(())
    }

    fn dispose(&mut self) {
        self.backup.dispose();
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use tempfile::TempDir;

    #[test]
    fn execute_takes_backup_without_touching_target() {
        let temp = TempDir::new().expect("temp dir");
        let file = temp.path().join("a.txt");
        fs::write(&file, "content").expect("write");

        let mut op = SnapshotOperation::new(&file);
        op.execute().expect("execute");

        assert!(op.backup.has_backup());
        assert_eq!(fs::read_to_string(&file).expect("read"), "content");
    }

    #[test]
    fn rollback_is_a_noop() {
        let temp = TempDir::new().expect("temp dir");
        let file = temp.path().join("a.txt");
        fs::write(&file, "before").expect("write");

        let mut op = SnapshotOperation::new(&file);
        op.execute().expect("execute");
        fs::write(&file, "after").expect("write");
        op.rollback().expect("rollback");

        assert_eq!(fs::read_to_string(&file).expect("read"), "after");
    }
}
