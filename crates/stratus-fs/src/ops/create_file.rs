use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;

use tracing::debug;

use crate::backup::Backup;
use crate::error::{OperationError, Result};
use crate::ops::FileOperation;

/// Creates a file from a streamed content source.
///
/// An existing file at the target is backed up first. Content is streamed
/// from the source and flushed through to disk before `execute` returns.
pub struct CreateFileOperation {
    path: PathBuf,
    source: Option<Box<dyn Read + Send>>,
    backup: Backup,
}

impl CreateFileOperation {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, source: impl Read + Send + 'static) -> Self {
        let path = path.into();
        let backup = Backup::new(&path);
        Self {
            path,
            source: Some(Box::new(source)),
            backup,
        }
    }
}

impl FileOperation for CreateFileOperation {
    fn execute(&mut self) -> Result<()> {
        if self.path.is_file() {
            self.backup.capture()?;
        }

        let mut source = self
            .source
            .take()
            .ok_or_else(|| OperationError::CreateFile {
                path: self.path.clone(),
                source: io::Error::other("content source already consumed"),
            })?;

        let mut create = || -> io::Result<()> {
            let mut file = File::create(&self.path)?;
            io::copy(&mut source, &mut file)?;
            file.sync_all()
        };
        create().map_err(|source| OperationError::CreateFile {
            path: self.path.clone(),
            source,
        })?;

        debug!(path = %self.path.display(), "created file");
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path).map_err(|source| OperationError::Remove {
                path: self.path.clone(),
                source,
            })?;
        }

        if self.backup.has_backup() {
            self.backup.restore()?;
        }
        debug!(path = %self.path.display(), "rolled back file creation");
        Ok(())
    }

    fn dispose(&mut self) {
        self.backup.dispose();
    }
}
