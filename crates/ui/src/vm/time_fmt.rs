use chrono::{DateTime, Utc};

/// `"1m 05s"` style label for how long a quiz run took.
#[must_use]
pub fn format_elapsed(started_at: DateTime<Utc>, completed_at: DateTime<Utc>) -> String {
    let seconds = (completed_at - started_at).num_seconds().max(0);
    let minutes = seconds / 60;
    let remainder = seconds % 60;
    if minutes == 0 {
        format!("{remainder}s")
    } else {
        format!("{minutes}m {remainder:02}s")
    }
}
