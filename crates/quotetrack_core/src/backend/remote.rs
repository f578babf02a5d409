//! Remote document-collection contract and bundled in-memory implementation.
//!
//! # Responsibility
//! - Define the per-record contract a hosted document database must satisfy.
//! - Provide a vendor-free in-memory collection for tests and local runs.
//!
//! # Invariants
//! - The collection assigns document ids; callers never mint ids for remote
//!   records.
//! - The collection is the backend of record: per-record mutations are atomic
//!   on the server side, and a failed call leaves the collection unchanged.
//! - `list` returns documents in insertion order.

use crate::backend::{BackendError, BackendResult};
use crate::model::quote::{QuoteId, QuoteRecord};
use serde::{Deserialize, Serialize};

/// Wire shape of one remote document: a single `quote` field holding the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteDocument {
    pub quote: String,
}

impl QuoteDocument {
    pub fn new(text: impl Into<String>) -> Self {
        Self { quote: text.into() }
    }
}

/// Per-record contract for a hosted document collection.
///
/// Vendor adapters implement this trait; the store never sees transport
/// details. Unknown-id handling is the adapter's concern and surfaces as
/// `BackendError::Remote` — the store resolves `NotFound` against its own
/// mirror before calling the collection.
pub trait DocumentCollection {
    /// Lists all documents with their server-assigned ids, insertion order.
    fn list(&mut self) -> BackendResult<Vec<QuoteRecord>>;

    /// Inserts one document and returns the server-assigned id.
    fn insert(&mut self, document: &QuoteDocument) -> BackendResult<QuoteId>;

    /// Replaces the document stored under `id`.
    fn update(&mut self, id: &QuoteId, document: &QuoteDocument) -> BackendResult<()>;

    /// Removes the document stored under `id`.
    fn delete(&mut self, id: &QuoteId) -> BackendResult<()>;
}

/// In-memory reference implementation of [`DocumentCollection`].
///
/// Assigns monotonically increasing opaque ids, mirroring how a hosted
/// collection hands out identifiers the client cannot predict.
#[derive(Default)]
pub struct MemoryCollection {
    documents: Vec<(QuoteId, QuoteDocument)>,
    next_id: u64,
}

impl MemoryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, id: &QuoteId) -> BackendResult<usize> {
        self.documents
            .iter()
            .position(|(existing, _)| existing == id)
            .ok_or_else(|| BackendError::Remote {
                code: "document_missing".to_string(),
                message: format!("no document stored under id {id}"),
            })
    }
}

impl DocumentCollection for MemoryCollection {
    fn list(&mut self) -> BackendResult<Vec<QuoteRecord>> {
        Ok(self
            .documents
            .iter()
            .map(|(id, document)| QuoteRecord::with_id(id.clone(), document.quote.clone()))
            .collect())
    }

    fn insert(&mut self, document: &QuoteDocument) -> BackendResult<QuoteId> {
        self.next_id += 1;
        let id = QuoteId::new(format!("doc-{:06}", self.next_id));
        self.documents.push((id.clone(), document.clone()));
        Ok(id)
    }

    fn update(&mut self, id: &QuoteId, document: &QuoteDocument) -> BackendResult<()> {
        let index = self.position(id)?;
        self.documents[index].1 = document.clone();
        Ok(())
    }

    fn delete(&mut self, id: &QuoteId) -> BackendResult<()> {
        let index = self.position(id)?;
        self.documents.remove(index);
        Ok(())
    }
}
