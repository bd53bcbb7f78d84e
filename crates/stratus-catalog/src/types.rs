use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier shared by a catalog's directory, row and document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogId(Uuid);

impl CatalogId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CatalogId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Row stored for a catalog in the relational metadata store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub id: CatalogId,
    pub name: String,
    pub owner: String,
}

/// Aggregated view of a catalog kept in the document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub id: CatalogId,
    pub name: String,
    pub summary: serde_json::Value,
}
