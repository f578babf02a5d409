//! Quote store: command surface and backend reconciliation.
//!
//! # Responsibility
//! - Apply add/update/delete commands to the in-memory mirror and the backend.
//! - Map backend transport failures and unknown ids to semantic errors.
//!
//! # Invariants
//! - Snapshot backends: a failed write rolls the mirror back to its pre-call
//!   state, so memory and durable state never silently diverge.
//! - Remote backend: the collection is the backend of record; the mirror is
//!   touched only after the server call succeeds, so no rollback is needed.
//! - `load` never fails: absent storage starts empty silently, unreadable or
//!   corrupt storage starts empty with a tagged warning.

use crate::backend::remote::{DocumentCollection, QuoteDocument};
use crate::backend::{BackendError, SnapshotRead, SnapshotStore};
use crate::model::quote::{validate_text, QuoteId, QuoteRecord, QuoteValidationError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Semantic error for store commands.
#[derive(Debug)]
pub enum StoreError {
    /// Input text is empty or whitespace-only.
    Validation(QuoteValidationError),
    /// The addressed record does not exist.
    NotFound(QuoteId),
    /// The backend write failed; the mirror was rolled back.
    Persistence(BackendError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "quote not found: {id}"),
            Self::Persistence(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Persistence(err) => Some(err),
        }
    }
}

impl From<QuoteValidationError> for StoreError {
    fn from(value: QuoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<BackendError> for StoreError {
    fn from(value: BackendError) -> Self {
        Self::Persistence(value)
    }
}

/// Recoverable condition observed while loading prior data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// Data exists but could not be decoded; the store started empty.
    CorruptSnapshot(String),
    /// The backend could not be reached or read; the store started empty.
    Unreachable(String),
}

impl Display for LoadWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CorruptSnapshot(message) => {
                write!(f, "persisted quotes were unreadable: {message}")
            }
            Self::Unreachable(message) => write!(f, "quote backend unreachable: {message}"),
        }
    }
}

/// Tagged result of the initial load.
///
/// Loading never fails the store: the warning tells callers whether an empty
/// start was expected (absent data, no warning) or a degraded recovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// The loaded collection, empty on absent or unreadable storage.
    pub quotes: Vec<QuoteRecord>,
    /// Present when prior data existed but could not be used.
    pub warning: Option<LoadWarning>,
}

/// Durable medium selected once at store construction.
pub enum StoreBackend {
    /// Whole-collection rewrite per mutation (file, key-value).
    Snapshot(Box<dyn SnapshotStore>),
    /// Per-record mutations against a hosted document collection.
    Collection(Box<dyn DocumentCollection>),
}

/// Ordered quote collection backed by one durable medium.
///
/// One logical caller per instance; commands take `&mut self`, so command
/// serialization is enforced by the borrow checker rather than by convention.
pub struct QuoteStore {
    backend: StoreBackend,
    quotes: Vec<QuoteRecord>,
}

impl QuoteStore {
    /// Creates an empty store over the given backend.
    ///
    /// The store starts empty; call [`QuoteStore::load`] once to populate it
    /// from prior data.
    pub fn new(backend: StoreBackend) -> Self {
        Self {
            backend,
            quotes: Vec::new(),
        }
    }

    /// Convenience constructor over a snapshot backend.
    pub fn with_snapshot(backend: impl SnapshotStore + 'static) -> Self {
        Self::new(StoreBackend::Snapshot(Box::new(backend)))
    }

    /// Convenience constructor over a remote document collection.
    pub fn with_collection(backend: impl DocumentCollection + 'static) -> Self {
        Self::new(StoreBackend::Collection(Box::new(backend)))
    }

    /// Populates the mirror from the backend.
    ///
    /// Never fails: absent data starts empty with no warning; unreadable or
    /// corrupt data starts empty and tags the report so callers can surface a
    /// recoverable warning instead of silently losing history.
    pub fn load(&mut self) -> LoadReport {
        let outcome = match &mut self.backend {
            StoreBackend::Snapshot(snapshot) => match snapshot.read() {
                Ok(SnapshotRead::Absent) => Ok(Vec::new()),
                Ok(SnapshotRead::Loaded(quotes)) => Ok(quotes),
                Err(err @ BackendError::Corrupt(_)) => {
                    Err(LoadWarning::CorruptSnapshot(err.to_string()))
                }
                Err(err) => Err(LoadWarning::Unreachable(err.to_string())),
            },
            StoreBackend::Collection(collection) => collection
                .list()
                .map_err(|err| LoadWarning::Unreachable(err.to_string())),
        };

        match outcome {
            Ok(quotes) => {
                info!(
                    "event=store_load module=store status=ok count={}",
                    quotes.len()
                );
                self.quotes = quotes;
                LoadReport {
                    quotes: self.quotes.clone(),
                    warning: None,
                }
            }
            Err(warning) => {
                warn!("event=store_load module=store status=degraded warning={warning}");
                self.quotes.clear();
                LoadReport {
                    quotes: Vec::new(),
                    warning: Some(warning),
                }
            }
        }
    }

    /// Appends a new quote and persists the collection.
    ///
    /// # Errors
    /// - `Validation` when `text` trims to nothing; no state change.
    /// - `Persistence` when the backend write fails; the mirror is rolled
    ///   back (snapshot) or untouched (remote).
    pub fn add(&mut self, text: &str) -> StoreResult<Vec<QuoteRecord>> {
        let trimmed = validate_text(text)?;

        match &mut self.backend {
            StoreBackend::Snapshot(snapshot) => {
                self.quotes
                    .push(QuoteRecord::with_id(QuoteId::generate(), trimmed));
                if let Err(err) = snapshot.write(&self.quotes) {
                    self.quotes.pop();
                    warn!("event=store_add module=store status=rolled_back error={err}");
                    return Err(err.into());
                }
            }
            StoreBackend::Collection(collection) => {
                let id = collection.insert(&QuoteDocument::new(trimmed))?;
                self.quotes.push(QuoteRecord::with_id(id, trimmed));
            }
        }

        info!(
            "event=store_add module=store status=ok count={}",
            self.quotes.len()
        );
        Ok(self.quotes.clone())
    }

    /// Replaces the text of an existing quote, preserving its position.
    ///
    /// # Errors
    /// - `Validation` when `text` trims to nothing; checked before lookup.
    /// - `NotFound` when `id` does not reference an existing record.
    /// - `Persistence` on backend write failure, with mirror rollback for
    ///   snapshot backends.
    pub fn update(&mut self, id: &QuoteId, text: &str) -> StoreResult<QuoteRecord> {
        let trimmed = validate_text(text)?;
        let index = self.position(id)?;

        match &mut self.backend {
            StoreBackend::Snapshot(snapshot) => {
                let previous = std::mem::replace(&mut self.quotes[index].text, trimmed.to_string());
                if let Err(err) = snapshot.write(&self.quotes) {
                    self.quotes[index].text = previous;
                    warn!("event=store_update module=store status=rolled_back id={id} error={err}");
                    return Err(err.into());
                }
            }
            StoreBackend::Collection(collection) => {
                collection.update(id, &QuoteDocument::new(trimmed))?;
                self.quotes[index].text = trimmed.to_string();
            }
        }

        info!("event=store_update module=store status=ok id={id}");
        Ok(self.quotes[index].clone())
    }

    /// Removes an existing quote, preserving the order of the rest.
    ///
    /// # Errors
    /// - `NotFound` when `id` does not reference an existing record.
    /// - `Persistence` on backend write failure; for snapshot backends the
    ///   record is restored at its original index.
    pub fn delete(&mut self, id: &QuoteId) -> StoreResult<Vec<QuoteRecord>> {
        let index = self.position(id)?;

        match &mut self.backend {
            StoreBackend::Snapshot(snapshot) => {
                let removed = self.quotes.remove(index);
                if let Err(err) = snapshot.write(&self.quotes) {
                    self.quotes.insert(index, removed);
                    warn!("event=store_delete module=store status=rolled_back id={id} error={err}");
                    return Err(err.into());
                }
            }
            StoreBackend::Collection(collection) => {
                collection.delete(id)?;
                self.quotes.remove(index);
            }
        }

        info!(
            "event=store_delete module=store status=ok id={id} count={}",
            self.quotes.len()
        );
        Ok(self.quotes.clone())
    }

    /// Returns the current collection in insertion order. Never fails.
    pub fn list(&self) -> &[QuoteRecord] {
        &self.quotes
    }

    fn position(&self, id: &QuoteId) -> StoreResult<usize> {
        self.quotes
            .iter()
            .position(|quote| &quote.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }
}
