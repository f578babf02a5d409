//! Quote domain model.
//!
//! # Responsibility
//! - Define the canonical record persisted by every backend.
//! - Validate quote text before a record can exist.
//!
//! # Invariants
//! - `id` is stable for the record's lifetime and never reused.
//! - `text` is trimmed and non-empty; whitespace-only input is rejected
//!   before any record is constructed.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for one quote record.
///
/// Locally created records carry a generated UUID; remote collections may
/// assign their own opaque identifier, so the id is kept as an opaque string
/// rather than a parsed UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuoteId(String);

impl QuoteId {
    /// Wraps an externally assigned identifier (remote collections).
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Mints a fresh UUIDv4-backed identifier for locally created records.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for QuoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation error for quote text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteValidationError {
    /// Input is empty or whitespace-only after trimming.
    EmptyText,
}

impl Display for QuoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "quote text is empty or whitespace-only"),
        }
    }
}

impl Error for QuoteValidationError {}

/// Trims input and rejects empty/whitespace-only text.
///
/// Returns the trimmed slice so callers persist exactly what was validated.
pub fn validate_text(text: &str) -> Result<&str, QuoteValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(QuoteValidationError::EmptyText);
    }
    Ok(trimmed)
}

/// One persisted quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRecord {
    /// Stable identifier, generated locally or assigned by a remote backend.
    pub id: QuoteId,
    /// Trimmed, non-empty quote text.
    pub text: String,
}

impl QuoteRecord {
    /// Creates a record with a generated id from raw input text.
    ///
    /// # Errors
    /// - `QuoteValidationError::EmptyText` when input trims to nothing.
    pub fn new(text: &str) -> Result<Self, QuoteValidationError> {
        Ok(Self::with_id(QuoteId::generate(), validate_text(text)?))
    }

    /// Creates a record with a caller-provided id.
    ///
    /// Used by load and remote-insert paths where identity already exists.
    /// The caller is responsible for passing already-validated text.
    pub fn with_id(id: QuoteId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}
