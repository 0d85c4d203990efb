//! Query-engine warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the tree, selector, and query components to report input that is
//! accepted but probably not what the test author meant.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Whether warnings are printed at all.
static ENABLED: AtomicBool = AtomicBool::new(true);

/// Warn about suspicious input (prints once per unique message)
///
/// Returns `true` if the warning was new. The message is recorded even when
/// printing is disabled, so re-enabling does not replay old warnings.
///
/// # Example
/// ```ignore
/// warn_once("Selector", "attribute `onPress` holds a handler");
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let is_new = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if is_new && ENABLED.load(Ordering::Relaxed) {
        eprintln!("{}", format!("[Canopy {component}] ⚠ {message}").yellow());
    }
    is_new
}

/// Clear all recorded warnings (call between independent test fixtures)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

/// Turn printing of warnings on or off (e.g. for `--quiet`).
pub fn set_warnings_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

#[cfg(test)]
mod tests {
    use super::*;

    // The warning set is global; tests that clear it must not interleave.
    static SERIAL: Mutex<()> = Mutex::new(());

    #[test]
    fn test_warn_once_deduplicates() {
        let _guard = SERIAL.lock().unwrap_or_else(PoisonError::into_inner);
        set_warnings_enabled(false);
        assert!(warn_once("Test", "dedup-unique-message"));
        assert!(!warn_once("Test", "dedup-unique-message"));
        // Same message under another component is a different warning
        assert!(warn_once("Other", "dedup-unique-message"));
    }

    #[test]
    fn test_clear_warnings_allows_repeat() {
        let _guard = SERIAL.lock().unwrap_or_else(PoisonError::into_inner);
        set_warnings_enabled(false);
        assert!(warn_once("Test", "clear-unique-message"));
        clear_warnings();
        assert!(warn_once("Test", "clear-unique-message"));
    }
}
