//! Domain model for persisted quotes.
//!
//! # Responsibility
//! - Define the canonical quote record shared by every backend.
//! - Enforce text validation before any record exists.
//!
//! # Invariants
//! - Every record is identified by a stable `QuoteId`.
//! - Record text is trimmed and never empty.

pub mod quote;
