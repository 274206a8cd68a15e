//! Clock helpers.

use std::time::{SystemTime, UNIX_EPOCH};

/// Get current Unix timestamp.
pub(crate) fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
