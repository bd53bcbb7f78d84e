use std::sync::Arc;

use stratus_core::ResolveProvider;

use crate::providers::FileStore;
use crate::traits::{DocumentStore, RecordStore};

/// Registry of the configured backend providers.
///
/// Implements [`ResolveProvider`] once per backend, so the command factory
/// and the processor resolve handles through the type system rather than a
/// runtime type dictionary. An unconfigured backend resolves to `None` and
/// its commands become no-ops.
#[derive(Default)]
pub struct CatalogBackends {
    file_store: Option<Arc<FileStore>>,
    record_store: Option<Arc<dyn RecordStore>>,
    document_store: Option<Arc<dyn DocumentStore>>,
}

impl CatalogBackends {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_file_store(mut self, file_store: Arc<FileStore>) -> Self {
        self.file_store = Some(file_store);
        self
    }

    #[must_use]
    pub fn with_record_store(mut self, record_store: Arc<dyn RecordStore>) -> Self {
        self.record_store = Some(record_store);
        self
    }

    #[must_use]
    pub fn with_document_store(mut self, document_store: Arc<dyn DocumentStore>) -> Self {
        self.document_store = Some(document_store);
        self
    }
}

impl ResolveProvider<FileStore> for CatalogBackends {
    fn resolve(&self) -> Option<Arc<FileStore>> {
        self.file_store.clone()
    }
}

impl ResolveProvider<dyn RecordStore> for CatalogBackends {
    fn resolve(&self) -> Option<Arc<dyn RecordStore>> {
        self.record_store.clone()
    }
}

impl ResolveProvider<dyn DocumentStore> for CatalogBackends {
    fn resolve(&self) -> Option<Arc<dyn DocumentStore>> {
        self.document_store.clone()
    }
}
