//! In-memory backend providers for tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::error::StoreError;
use crate::traits::{DocumentStore, RecordStore};
use crate::types::{CatalogDocument, CatalogId, CatalogRecord};

/// In-memory relational store with failure switches.
#[derive(Default)]
pub struct MockRecordStore {
    records: Mutex<HashMap<CatalogId, CatalogRecord>>,
    fail_on_insert: AtomicBool,
    fail_on_delete: AtomicBool,
}

impl MockRecordStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_on_insert(&self, fail: bool) {
        self.fail_on_insert.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_on_delete(&self, fail: bool) {
        self.fail_on_delete.store(fail, Ordering::SeqCst);
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn contains(&self, id: CatalogId) -> bool {
        self.records.lock().expect("lock poisoned").contains_key(&id)
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().expect("lock poisoned").len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RecordStore for MockRecordStore {
    async fn insert_catalog(&self, record: &CatalogRecord) -> Result<(), StoreError> {
        if self.fail_on_insert.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("record store offline".to_string()));
        }

        let mut records = self.records.lock().expect("lock poisoned");
        if records.contains_key(&record.id) {
            return Err(StoreError::Conflict(format!(
                "catalog row '{}' already exists",
                record.id
            )));
        }
        records.insert(record.id, record.clone());
        Ok(())
    }

    async fn delete_catalog(&self, id: CatalogId) -> Result<(), StoreError> {
        if self.fail_on_delete.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("record store offline".to_string()));
        }

        self.records.lock().expect("lock poisoned").remove(&id);
        Ok(())
    }

    async fn get_catalog(&self, id: CatalogId) -> Result<Option<CatalogRecord>, StoreError> {
        Ok(self.records.lock().expect("lock poisoned").get(&id).cloned())
    }
}

/// In-memory document store with failure switches.
#[derive(Default)]
pub struct MockDocumentStore {
    documents: Mutex<HashMap<CatalogId, CatalogDocument>>,
    fail_on_upsert: AtomicBool,
    fail_on_remove: AtomicBool,
}

impl MockDocumentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_on_upsert(&self, fail: bool) {
        self.fail_on_upsert.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_on_remove(&self, fail: bool) {
        self.fail_on_remove.store(fail, Ordering::SeqCst);
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn contains(&self, id: CatalogId) -> bool {
        self.documents
            .lock()
            .expect("lock poisoned")
            .contains_key(&id)
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.lock().expect("lock poisoned").len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl DocumentStore for MockDocumentStore {
    async fn upsert_document(&self, document: &CatalogDocument) -> Result<(), StoreError> {
        if self.fail_on_upsert.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "document store offline".to_string(),
            ));
        }

        self.documents
            .lock()
            .expect("lock poisoned")
            .insert(document.id, document.clone());
        Ok(())
    }

    async fn remove_document(&self, id: CatalogId) -> Result<(), StoreError> {
        if self.fail_on_remove.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "document store offline".to_string(),
            ));
        }

        self.documents.lock().expect("lock poisoned").remove(&id);
        Ok(())
    }

    async fn get_document(&self, id: CatalogId) -> Result<Option<CatalogDocument>, StoreError> {
        Ok(self
            .documents
            .lock()
            .expect("lock poisoned")
            .get(&id)
            .cloned())
    }
}
