//! Sanitizer warnings routed through the `log` facade.
//!
//! Provides deduplication so a page full of the same unsupported construct
//! produces one warning rather than thousands. Used by the HTML and style
//! sanitizers to report input they had to demote or discard.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Global set of warnings we've already logged (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Log a warning once per unique `(component, message)` pair.
///
/// Returns `true` if the warning was logged, `false` if it was a repeat.
///
/// # Example
/// ```ignore
/// warn_once("CSS", "style text rejected: url() is not permitted");
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let fresh = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if fresh {
        log::warn!(target: "scour", "[{component}] {message}");
    }
    fresh
}

/// Forget all recorded warnings (call between unrelated documents).
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

/// Number of distinct warnings recorded since the last [`clear_warnings`].
#[must_use]
pub fn warning_count() -> usize {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .map_or(0, HashSet::len)
}
