use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error from a filesystem operation.
///
/// Each variant wraps the untouched [`io::Error`] so callers can still
/// inspect the original kind (missing path, permission denied, ...).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OperationError {
    #[error("failed to back up '{path}'")]
    Backup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to restore '{path}' from its backup")]
    Restore {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create directory '{path}'")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create file '{path}'")]
    CreateFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to copy '{from}' to '{to}'")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to move '{from}' to '{to}'")]
    Move {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write '{path}'")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to append to '{path}'")]
    Append {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to remove '{path}'")]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("destination '{0}' already exists")]
    DestinationExists(PathBuf),
}

pub type Result<T> = std::result::Result<T, OperationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backup_error_includes_path() {
        let err = OperationError::Backup {
            path: PathBuf::from("/data/catalogs/photos"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };

        assert!(err.to_string().contains("/data/catalogs/photos"));
    }

    #[test]
    fn io_source_is_preserved() {
        let err = OperationError::Write {
            path: PathBuf::from("/data/a.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };

        let source = std::error::Error::source(&err).expect("source should be set");
        assert!(source.to_string().contains("gone"));
    }
}
