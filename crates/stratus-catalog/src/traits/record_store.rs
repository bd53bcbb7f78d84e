use async_trait::async_trait;

use crate::error::StoreError;
use crate::types::{CatalogId, CatalogRecord};

/// Relational metadata store holding one row per catalog.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if a row with the same id exists or the backend
    /// rejects the write.
    async fn insert_catalog(&self, record: &CatalogRecord) -> Result<(), StoreError>;

    /// Deleting a row that does not exist is a no-op.
    async fn delete_catalog(&self, id: CatalogId) -> Result<(), StoreError>;

    async fn get_catalog(&self, id: CatalogId) -> Result<Option<CatalogRecord>, StoreError>;
}
