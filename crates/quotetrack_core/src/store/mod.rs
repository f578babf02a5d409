//! Quote store orchestration over interchangeable backends.
//!
//! # Responsibility
//! - Expose the uniform add/update/delete/list command surface.
//! - Keep the in-memory mirror and the durable backend reconciled after every
//!   command, including rollback on failed snapshot writes.
//!
//! # Invariants
//! - Validation runs before any state mutation (fail fast, no partial effect).
//! - After an error, the visible list equals the durable state.

pub mod quote_store;
