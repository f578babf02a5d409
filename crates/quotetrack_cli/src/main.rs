//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `quotetrack_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use quotetrack_core::{MemoryCollection, QuoteStore};

fn main() {
    println!("quotetrack_core version={}", quotetrack_core::core_version());

    // Exercise the command surface against the bundled in-memory collection.
    let mut store = QuoteStore::with_collection(MemoryCollection::new());
    let report = store.load();
    println!("loaded={} warning={:?}", report.quotes.len(), report.warning);

    match store.add("Be the change you wish to see in the world") {
        Ok(quotes) => println!("quotes={}", quotes.len()),
        Err(err) => eprintln!("add failed: {err}"),
    }
}
