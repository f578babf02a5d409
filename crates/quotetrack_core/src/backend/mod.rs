//! Persistence backends for the quote store.
//!
//! # Responsibility
//! - Define the two backend contracts: whole-collection snapshot stores and
//!   per-record remote document collections.
//! - Isolate file/SQLite/remote transport details from store orchestration.
//!
//! # Invariants
//! - Snapshot backends rewrite the entire collection on every write; partial
//!   writes are never visible to a subsequent read.
//! - An absent store reads as `SnapshotRead::Absent`, never as an error.
//! - Unparseable persisted data surfaces as `BackendError::Corrupt` instead of
//!   being masked as an empty collection.

use crate::model::quote::QuoteRecord;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod file;
pub mod kv;
pub mod remote;
pub mod snapshot;

pub type BackendResult<T> = Result<T, BackendError>;

/// Transport-level error for backend read/write operations.
#[derive(Debug)]
pub enum BackendError {
    /// Filesystem failure (file backend).
    Io(std::io::Error),
    /// Persisted data exists but cannot be decoded.
    Corrupt(String),
    /// SQLite failure (key-value backend).
    Sqlite(rusqlite::Error),
    /// Remote collection failure with a vendor-neutral code.
    Remote { code: String, message: String },
}

impl Display for BackendError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "backend i/o failure: {err}"),
            Self::Corrupt(message) => write!(f, "corrupt persisted snapshot: {message}"),
            Self::Sqlite(err) => write!(f, "backend storage failure: {err}"),
            Self::Remote { code, message } => {
                write!(f, "remote collection failure ({code}): {message}")
            }
        }
    }
}

impl Error for BackendError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Sqlite(err) => Some(err),
            Self::Corrupt(_) | Self::Remote { .. } => None,
        }
    }
}

impl From<std::io::Error> for BackendError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<rusqlite::Error> for BackendError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Outcome of reading a snapshot backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotRead {
    /// No prior data exists; the store starts empty.
    Absent,
    /// A snapshot was decoded successfully.
    Loaded(Vec<QuoteRecord>),
}

/// Whole-collection persistence contract (file and key-value backends).
///
/// Every write replaces the full persisted collection. This keeps the write
/// path O(n) per mutation, which is the accepted cost of a snapshot store at
/// this scale.
pub trait SnapshotStore {
    /// Reads the persisted snapshot, distinguishing absent data from errors.
    fn read(&mut self) -> BackendResult<SnapshotRead>;

    /// Replaces the persisted snapshot with the given collection.
    fn write(&mut self, quotes: &[QuoteRecord]) -> BackendResult<()>;
}
