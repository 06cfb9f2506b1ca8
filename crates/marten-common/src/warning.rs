//! Parser warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the tokenizer and tree builder when issue logging is switched on.

use std::collections::HashSet;
use std::sync::Mutex;

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about a parse issue (prints once per unique message).
///
/// Returns `true` if the message was printed, `false` if it had already been
/// seen since the last [`clear_warnings`].
///
/// # Example
/// ```ignore
/// warn_once("HTML Tokenizer", "unexpected-null-character at 3:14");
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    // A poisoned lock only means another thread panicked mid-insert; the set
    // itself is still usable.
    let should_print = WARNED
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_print {
        eprintln!("{}", format!("[Marten {component}] ⚠ {message}").yellow());
    }
    should_print
}

/// Clear all recorded warnings (call before parsing a new document).
pub fn clear_warnings() {
    let mut guard = WARNED
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_messages_are_suppressed() {
        let message = "duplicate suppression probe";
        let _ = warn_once("Test", message);
        assert!(!warn_once("Test", message));
    }
}
