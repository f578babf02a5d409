//! Snapshot wire format shared by the file and key-value backends.
//!
//! # Responsibility
//! - Encode the quote collection as one UTF-8 JSON document.
//! - Decode both the current record encoding and the legacy string encoding.
//!
//! # Invariants
//! - Encode-then-decode returns an equal collection, order preserved.
//! - Writes always produce the record encoding; the legacy bare array of
//!   strings is accepted on read only, with ids minted during decode.

use crate::backend::{BackendError, BackendResult};
use crate::model::quote::{QuoteId, QuoteRecord};
use serde::Deserialize;

/// Persisted document shape, covering both supported encodings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SnapshotDocument {
    /// Current encoding: `[{"id": ..., "text": ...}, ...]`.
    Records(Vec<QuoteRecord>),
    /// Legacy encoding: `["quote one", "quote two", ...]`.
    Texts(Vec<String>),
}

/// Encodes the collection as the current JSON record encoding.
pub fn encode_snapshot(quotes: &[QuoteRecord]) -> BackendResult<String> {
    serde_json::to_string(quotes)
        .map_err(|err| BackendError::Corrupt(format!("snapshot encode failed: {err}")))
}

/// Decodes a persisted snapshot document.
///
/// Legacy entries have no stored identity, so decode mints a fresh id per
/// entry; those ids are stable for the process lifetime and are persisted in
/// the record encoding on the next write.
///
/// # Errors
/// - `BackendError::Corrupt` when the payload is not valid JSON in either
///   supported encoding.
pub fn decode_snapshot(raw: &str) -> BackendResult<Vec<QuoteRecord>> {
    let document: SnapshotDocument = serde_json::from_str(raw)
        .map_err(|err| BackendError::Corrupt(format!("snapshot decode failed: {err}")))?;

    match document {
        SnapshotDocument::Records(records) => Ok(records),
        SnapshotDocument::Texts(texts) => Ok(texts
            .into_iter()
            .map(|text| QuoteRecord::with_id(QuoteId::generate(), text))
            .collect()),
    }
}
