//! Integration tests for the deduplicated warning channel.

use scour_common::warning::{clear_warnings, warn_once, warning_count};

// One test, since the warning set is global to the process.
#[test]
fn test_clear_allows_warning_again() {
    assert!(warn_once("integration", "dropped <script>"));
    assert!(!warn_once("integration", "dropped <script>"));
    assert_eq!(warning_count(), 1);

    clear_warnings();
    assert_eq!(warning_count(), 0);
    assert!(warn_once("integration", "dropped <script>"));
    assert_eq!(warning_count(), 1);
}
