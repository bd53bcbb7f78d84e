use async_trait::async_trait;

use crate::error::StoreError;
use crate::types::{CatalogDocument, CatalogId};

/// Document store holding the aggregated per-catalog view.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn upsert_document(&self, document: &CatalogDocument) -> Result<(), StoreError>;

    /// Removing a document that does not exist is a no-op.
    async fn remove_document(&self, id: CatalogId) -> Result<(), StoreError>;

    async fn get_document(&self, id: CatalogId) -> Result<Option<CatalogDocument>, StoreError>;
}
