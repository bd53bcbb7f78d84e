//! Filesystem helpers shared by the operations.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use uuid::Uuid;

/// Generates a unique path under the OS temp directory for a backup copy.
///
/// File backups keep the original extension so tooling that sniffs by
/// extension still recognizes them.
pub(crate) fn backup_path(extension: Option<&OsStr>) -> PathBuf {
    let mut name = format!("stratus-backup-{}", Uuid::new_v4());
    if let Some(ext) = extension.and_then(OsStr::to_str) {
        name.push('.');
        name.push_str(ext);
    }
    env::temp_dir().join(name)
}

/// Recursively copies a directory tree.
pub(crate) fn copy_dir_recursive(from: &Path, to: &Path) -> io::Result<()> {
    fs::create_dir_all(to)?;

    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let from_path = entry.path();
        let to_path = to.join(entry.file_name());

        if file_type.is_dir() {
            copy_dir_recursive(&from_path, &to_path)?;
        } else {
            fs::copy(&from_path, &to_path)?;
        }
    }

    Ok(())
}

/// Removes a path, recursively if it is a directory.
pub(crate) fn remove_any(path: &Path) -> io::Result<()> {
    if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

/// Clears a read-only attribute so the file can be deleted.
pub(crate) fn clear_readonly(path: &Path) -> io::Result<()> {
    let metadata = fs::metadata(path)?;
    let mut perms = metadata.permissions();
    if perms.readonly() {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            perms.set_mode(perms.mode() | 0o200);
        }
        #[cfg(not(unix))]
        {
            #[allow(clippy::permissions_set_readonly_false)]
            perms.set_readonly(false);
        }
        fs::set_permissions(path, perms)?;
    }
    Ok(())
}

/// Checks whether two paths live on the same filesystem.
///
/// Determines if an atomic `rename()` is possible, or if a cross-volume
/// copy+delete is required. The second path may not exist yet, so its
/// parent is probed instead.
pub(crate) fn same_device(existing: &Path, destination: &Path) -> io::Result<bool> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        let meta1 = fs::metadata(existing)?;
        let probe = destination.parent().unwrap_or(destination);
        let meta2 = fs::metadata(probe)?;
        Ok(meta1.dev() == meta2.dev())
    }

    #[cfg(not(unix))]
    {
        let a = existing.to_string_lossy();
        let b = destination.to_string_lossy();

        if a.len() >= 2 && b.len() >= 2 {
            Ok(a.chars().next() == b.chars().next())
        } else {
            Ok(true)
        }
    }
}
