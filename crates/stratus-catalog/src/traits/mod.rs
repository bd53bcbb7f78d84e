mod document_store;
mod record_store;

pub use document_store::DocumentStore;
pub use record_store::RecordStore;
