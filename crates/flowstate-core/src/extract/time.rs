use crate::event::ActivityEvent;
use chrono::{DateTime, Utc};

/// Elapsed time since `event` in its coarsest whole unit.
///
/// Units floor: 47 hours renders as "1 day ago". Events in the future of
/// `now` render as "Just now". No event renders as the empty string.
#[must_use]
pub fn relative_time(event: Option<&ActivityEvent>, now: DateTime<Utc>) -> String {
    event.map_or_else(String::new, |e| relative_since(e.timestamp, now))
}

/// [`relative_time`] for a bare instant.
#[must_use]
pub fn relative_since(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(at);
    let (count, unit) = if elapsed.num_days() > 0 {
        (elapsed.num_days(), "day")
    } else if elapsed.num_hours() > 0 {
        (elapsed.num_hours(), "hour")
    } else if elapsed.num_minutes() > 0 {
        (elapsed.num_minutes(), "minute")
    } else {
        return "Just now".to_string();
    };
    let plural = if count == 1 { "" } else { "s" };
    format!("{count} {unit}{plural} ago")
}
