//! List-rendering preview helper.
//!
//! # Responsibility
//! - Shorten long quote text for list display.
//!
//! # Invariants
//! - Pure and idempotent on already-short input; persisted data is never
//!   truncated.
//! - Truncation counts characters, not bytes, so multi-byte text stays valid.

/// Default display length, matching the list view the store was built for.
pub const DEFAULT_PREVIEW_CHARS: usize = 25;

/// Returns `text` shortened to `max_chars` characters with an ellipsis.
///
/// Text at or under the limit is returned unchanged.
pub fn display_preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut preview: String = text.chars().take(max_chars).collect();
    preview.push_str("...");
    preview
}
