use crate::event::ActivityEvent;
use crate::order::Timeline;

/// Placeholder replaced by the issue key in an issue URL template.
pub const KEY_PLACEHOLDER: &str = "{key}";

/// Build the issue tracker URL for `key` from `template`.
///
/// An absent or blank key yields no link.
#[must_use]
pub fn issue_tracker_url(template: &str, key: Option<&str>) -> Option<String> {
    let key = key.map(str::trim).filter(|k| !k.is_empty())?;
    Some(template.replace(KEY_PLACEHOLDER, key))
}

/// The code review URL, taken verbatim from event data.
///
/// Returns the entity URL of the lowest-sequence pull request event that
/// carries one. Never synthesized.
#[must_use]
pub fn code_review_url<'a, I>(events: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a ActivityEvent>,
{
    Timeline::new(events)
        .chronological()
        .filter(|e| e.event_type.is_pull_request())
        .find_map(|e| e.entity.non_empty_url())
}
