//! Core persistence logic for QuoteTrack.
//! This crate is the single source of truth for the quote collection's
//! consistency rules across its interchangeable backends.

pub mod backend;
pub mod logging;
pub mod model;
pub mod preview;
pub mod store;

pub use backend::file::FileBackend;
pub use backend::kv::{KvBackend, DEFAULT_QUOTES_KEY};
pub use backend::remote::{DocumentCollection, MemoryCollection, QuoteDocument};
pub use backend::{BackendError, BackendResult, SnapshotRead, SnapshotStore};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::quote::{QuoteId, QuoteRecord, QuoteValidationError};
pub use preview::{display_preview, DEFAULT_PREVIEW_CHARS};
pub use store::quote_store::{
    LoadReport, LoadWarning, QuoteStore, StoreBackend, StoreError, StoreResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
