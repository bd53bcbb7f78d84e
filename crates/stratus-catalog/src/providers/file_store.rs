use std::path::{Path, PathBuf};

use crate::types::CatalogId;

/// On-disk layout provider for catalog storage.
///
/// Maps catalog names to directories under a root. The commands driving
/// the filesystem backend build their reversible operations against the
/// paths this provider hands out; the provider itself never mutates.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding a catalog's files.
    #[must_use]
    pub fn catalog_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Holding area for a catalog directory while its deletion saga is in
    /// flight; rollback moves the directory back from here.
    #[must_use]
    pub fn trash_dir(&self, id: CatalogId) -> PathBuf {
        self.root.join(".trash").join(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_dir_nests_under_root() {
        let store = FileStore::new("/srv/stratus");

        assert_eq!(
            store.catalog_dir("photos"),
            PathBuf::from("/srv/stratus/photos")
        );
    }

    #[test]
    fn trash_dir_is_keyed_by_id() {
        let store = FileStore::new("/srv/stratus");
        let id = CatalogId::new();

        assert_eq!(
            store.trash_dir(id),
            PathBuf::from("/srv/stratus/.trash").join(id.to_string())
        );
    }
}
