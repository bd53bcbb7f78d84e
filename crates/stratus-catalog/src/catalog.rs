use std::sync::{Arc, Mutex, PoisonError};

use stratus_fs::{CreateDirectoryOperation, FileOperation, MoveOperation};
use stratus_saga::CommandProcessor;
use tracing::debug;

use crate::backends::CatalogBackends;
use crate::error::CatalogError;
use crate::providers::FileStore;
use crate::traits::{DocumentStore, RecordStore};
use crate::types::{CatalogDocument, CatalogId, CatalogRecord};

/// Slot shared between a command's execute and undo delegates, carrying
/// the filesystem operation (or fetched state) from one to the other.
type Slot<T> = Arc<Mutex<Option<T>>>;

fn slot<T>() -> Slot<T> {
    Arc::new(Mutex::new(None))
}

fn put<T>(slot: &Slot<T>, value: T) {
    *slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(value);
}

fn take<T>(slot: &Slot<T>) -> Option<T> {
    slot.lock().unwrap_or_else(PoisonError::into_inner).take()
}

/// Catalog business operations spanning the three backends.
///
/// Each operation builds a fresh saga: one handler per backend, attached
/// in dependency order (filesystem, then relational row, then aggregation
/// document), so a failure in a later backend unwinds the earlier ones.
pub struct CatalogOperations {
    backends: Arc<CatalogBackends>,
}

impl CatalogOperations {
    #[must_use]
    pub fn new(backends: Arc<CatalogBackends>) -> Self {
        Self { backends }
    }

    /// Creates a catalog: directory on disk, row in the relational store,
    /// summary document in the aggregation store.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidName`] for unusable names, or the
    /// saga failure after backward compensation when a backend rejects
    /// its step.
    pub async fn create_catalog(
        &self,
        name: &str,
        owner: &str,
    ) -> Result<CatalogRecord, CatalogError> {
        validate_name(name)?;

        let record = CatalogRecord {
            id: CatalogId::new(),
            name: name.to_string(),
            owner: owner.to_string(),
        };
        let document = CatalogDocument {
            id: record.id,
            name: record.name.clone(),
            summary: serde_json::json!({ "owner": owner, "files": 0 }),
        };

        let mut processor = CommandProcessor::new();

        let dir_op: Slot<CreateDirectoryOperation> = slot();
        let fs_handler = processor.create_data_handler::<FileStore, _>(self.backends.as_ref());
        {
            let exec_slot = Arc::clone(&dir_op);
            let undo_slot = Arc::clone(&dir_op);
            let catalog_name = record.name.clone();
            fs_handler.create_command(
                move |files: Arc<FileStore>| {
                    let exec_slot = Arc::clone(&exec_slot);
                    let catalog_name = catalog_name.clone();
                    async move {
                        let mut op =
                            CreateDirectoryOperation::new(files.catalog_dir(&catalog_name));
                        op.execute()?;
                        put(&exec_slot, op);
                        Ok(())
                    }
                },
                move |_files: Arc<FileStore>| {
                    let undo_slot = Arc::clone(&undo_slot);
                    async move {
                        if let Some(mut op) = take(&undo_slot) {
                            op.rollback()?;
                        }
                        Ok(())
                    }
                },
            );
        }

        let record_handler =
            processor.create_data_handler::<dyn RecordStore, _>(self.backends.as_ref());
        {
            let row = record.clone();
            let id = record.id;
            record_handler.create_command(
                move |store: Arc<dyn RecordStore>| {
                    let row = row.clone();
                    async move { store.insert_catalog(&row).await.map_err(Into::into) }
                },
                move |store: Arc<dyn RecordStore>| async move {
                    store.delete_catalog(id).await.map_err(Into::into)
                },
            );
        }

        let document_handler =
            processor.create_data_handler::<dyn DocumentStore, _>(self.backends.as_ref());
        {
            let doc = document.clone();
            let id = record.id;
            document_handler.create_command(
                move |store: Arc<dyn DocumentStore>| {
                    let doc = doc.clone();
                    async move { store.upsert_document(&doc).await.map_err(Into::into) }
                },
                move |store: Arc<dyn DocumentStore>| async move {
                    store.remove_document(id).await.map_err(Into::into)
                },
            );
        }

        processor.process().await?;
        debug!(catalog = %record.id, name = %record.name, "created catalog");
        Ok(record)
    }

    /// Deletes a catalog across all three backends.
    ///
    /// The directory is parked in the file store's trash area while the
    /// saga runs, so a failure in a later backend can move it back.
    ///
    /// # Errors
    ///
    /// Returns the saga failure after backward compensation when a
    /// backend rejects its step.
    pub async fn delete_catalog(&self, record: &CatalogRecord) -> Result<(), CatalogError> {
        let mut processor = CommandProcessor::new();

        let move_op: Slot<MoveOperation> = slot();
        let fs_handler = processor.create_data_handler::<FileStore, _>(self.backends.as_ref());
        {
            let exec_slot = Arc::clone(&move_op);
            let undo_slot = Arc::clone(&move_op);
            let catalog_name = record.name.clone();
            let id = record.id;
            fs_handler.create_command(
                move |files: Arc<FileStore>| {
                    let exec_slot = Arc::clone(&exec_slot);
                    let catalog_name = catalog_name.clone();
                    async move {
                        let dir = files.catalog_dir(&catalog_name);
                        if dir.exists() {
                            let mut op = MoveOperation::new(dir, files.trash_dir(id));
                            op.execute()?;
                            put(&exec_slot, op);
                        }
                        Ok(())
                    }
                },
                move |_files: Arc<FileStore>| {
                    let undo_slot = Arc::clone(&undo_slot);
                    async move {
                        if let Some(mut op) = take(&undo_slot) {
                            op.rollback()?;
                        }
                        Ok(())
                    }
                },
            );
        }

        let record_handler =
            processor.create_data_handler::<dyn RecordStore, _>(self.backends.as_ref());
        {
            let id = record.id;
            let row = record.clone();
            record_handler.create_command(
                move |store: Arc<dyn RecordStore>| async move {
                    store.delete_catalog(id).await.map_err(Into::into)
                },
                move |store: Arc<dyn RecordStore>| {
                    let row = row.clone();
                    async move { store.insert_catalog(&row).await.map_err(Into::into) }
                },
            );
        }

        let removed_doc: Slot<CatalogDocument> = slot();
        let document_handler =
            processor.create_data_handler::<dyn DocumentStore, _>(self.backends.as_ref());
        {
            let exec_slot = Arc::clone(&removed_doc);
            let undo_slot = Arc::clone(&removed_doc);
            let id = record.id;
            document_handler.create_command(
                move |store: Arc<dyn DocumentStore>| {
                    let exec_slot = Arc::clone(&exec_slot);
                    async move {
                        if let Some(existing) = store.get_document(id).await? {
                            put(&exec_slot, existing);
                        }
                        store.remove_document(id).await.map_err(Into::into)
                    }
                },
                move |store: Arc<dyn DocumentStore>| {
                    let undo_slot = Arc::clone(&undo_slot);
                    async move {
                        if let Some(doc) = take(&undo_slot) {
                            store.upsert_document(&doc).await?;
                        }
                        Ok(())
                    }
                },
            );
        }

        processor.process().await?;
        debug!(catalog = %record.id, name = %record.name, "deleted catalog");
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), CatalogError> {
    if name.is_empty() {
        return Err(CatalogError::InvalidName {
            name: name.to_string(),
            reason: "name is empty",
        });
    }
    if name.starts_with('.') {
        return Err(CatalogError::InvalidName {
            name: name.to_string(),
            reason: "names starting with '.' are reserved",
        });
    }
    if name.contains(['/', '\\']) || name.contains("..") {
        return Err(CatalogError::InvalidName {
            name: name.to_string(),
            reason: "path separators are not allowed",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_is_rejected() {
        assert!(validate_name("").is_err());
    }

    #[test]
    fn hidden_and_traversing_names_are_rejected() {
        assert!(validate_name(".trash").is_err());
        assert!(validate_name("a/b").is_err());
        assert!(validate_name("a\\b").is_err());
        assert!(validate_name("a..b").is_err());
    }

    #[test]
    fn plain_names_are_accepted() {
        assert!(validate_name("photos").is_ok());
        assert!(validate_name("photos-2026").is_ok());
    }

    #[tokio::test]
    async fn create_with_no_configured_backends_is_a_noop() {
        let operations = CatalogOperations::new(Arc::new(CatalogBackends::new()));

        let record = operations
            .create_catalog("photos", "ada")
            .await
            .expect("all steps degrade to no-ops");

        assert_eq!(record.name, "photos");
    }

    mod saga_rollback {
        use tempfile::TempDir;

        use super::*;
        use crate::mocks::{MockDocumentStore, MockRecordStore};

        struct Fixture {
            _root: TempDir,
            files: Arc<FileStore>,
            records: Arc<MockRecordStore>,
            documents: Arc<MockDocumentStore>,
            operations: CatalogOperations,
        }

        fn fixture() -> Fixture {
            let root = TempDir::new().expect("temp dir");
            let files = Arc::new(FileStore::new(root.path()));
            let records = Arc::new(MockRecordStore::new());
            let documents = Arc::new(MockDocumentStore::new());

            let backends = CatalogBackends::new()
                .with_file_store(Arc::clone(&files))
                .with_record_store(Arc::clone(&records) as Arc<dyn RecordStore>)
                .with_document_store(Arc::clone(&documents) as Arc<dyn DocumentStore>);

            Fixture {
                _root: root,
                files,
                records,
                documents,
                operations: CatalogOperations::new(Arc::new(backends)),
            }
        }

        #[tokio::test]
        async fn create_catalog_touches_all_three_backends() {
            let fx = fixture();

            let record = fx
                .operations
                .create_catalog("photos", "ada")
                .await
                .expect("create succeeds");

            assert!(fx.files.catalog_dir("photos").is_dir());
            assert!(fx.records.contains(record.id));
            assert!(fx.documents.contains(record.id));
        }

        #[tokio::test]
        async fn relational_failure_unwinds_the_filesystem_step() {
            let fx = fixture();
            fx.records.set_fail_on_insert(true);

            let error = fx
                .operations
                .create_catalog("photos", "ada")
                .await
                .expect_err("relational step fails");

            match error {
                CatalogError::Saga { handler, source } => {
                    assert_eq!(handler, "RecordStore");
                    assert!(source.to_string().contains("record store offline"));
                }
                other => panic!("expected Saga error, got {other}"),
            }

            // the directory was removed and the aggregation step never ran
            assert!(!fx.files.catalog_dir("photos").exists());
            assert!(fx.records.is_empty());
            assert!(fx.documents.is_empty());
        }

        #[tokio::test]
        async fn document_failure_unwinds_filesystem_and_relational_steps() {
            let fx = fixture();
            fx.documents.set_fail_on_upsert(true);

            fx.operations
                .create_catalog("photos", "ada")
                .await
                .expect_err("document step fails");

            assert!(!fx.files.catalog_dir("photos").exists());
            assert!(fx.records.is_empty());
            assert!(fx.documents.is_empty());
        }

        #[tokio::test]
        async fn create_preserves_an_unrelated_existing_catalog() {
            let fx = fixture();
            fx.operations
                .create_catalog("archive", "ada")
                .await
                .expect("first create succeeds");

            fx.records.set_fail_on_insert(true);
            fx.operations
                .create_catalog("photos", "ada")
                .await
                .expect_err("second create fails");

            assert!(fx.files.catalog_dir("archive").is_dir());
            assert_eq!(fx.records.len(), 1);
            assert_eq!(fx.documents.len(), 1);
        }

        #[tokio::test]
        async fn delete_catalog_clears_all_three_backends() {
            let fx = fixture();
            let record = fx
                .operations
                .create_catalog("photos", "ada")
                .await
                .expect("create succeeds");
            std::fs::write(fx.files.catalog_dir("photos").join("a.jpg"), "data")
                .expect("store a file");

            fx.operations
                .delete_catalog(&record)
                .await
                .expect("delete succeeds");

            assert!(!fx.files.catalog_dir("photos").exists());
            assert!(!fx.records.contains(record.id));
            assert!(!fx.documents.contains(record.id));
        }

        #[tokio::test]
        async fn failed_delete_restores_directory_row_and_document() {
            let fx = fixture();
            let record = fx
                .operations
                .create_catalog("photos", "ada")
                .await
                .expect("create succeeds");
            std::fs::write(fx.files.catalog_dir("photos").join("a.jpg"), "data")
                .expect("store a file");

            fx.documents.set_fail_on_remove(true);

            fx.operations
                .delete_catalog(&record)
                .await
                .expect_err("document step fails");

            assert!(
                fx.files.catalog_dir("photos").join("a.jpg").exists(),
                "directory contents must be restored from the trash area"
            );
            assert!(fx.records.contains(record.id));
            assert!(fx.documents.contains(record.id));
        }

        #[tokio::test]
        async fn invalid_names_never_reach_the_backends() {
            let fx = fixture();

            let error = fx
                .operations
                .create_catalog("../escape", "ada")
                .await
                .expect_err("name is invalid");

            assert!(matches!(error, CatalogError::InvalidName { .. }));
            assert!(fx.records.is_empty());
        }
    }
}
