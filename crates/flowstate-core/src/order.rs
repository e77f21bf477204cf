//! Sequence-ordered views over one workflow's events.
//!
//! Ordering always uses [`ActivityEvent::sequence`], never the timestamp.
//! Callers guarantee that every event shares one `workflow_id` and that
//! sequence values are unique. Duplicate sequences keep their input order.

use crate::event::{ActivityEvent, EventType};
use std::cmp::Reverse;

/// A workflow's events sorted newest first by sequence.
///
/// Borrowing view: the underlying events are never cloned or mutated. An
/// empty timeline is valid and means the workflow has no activity yet.
#[derive(Debug, Clone, Default)]
pub struct Timeline<'a> {
    newest_first: Vec<&'a ActivityEvent>,
}

impl<'a> Timeline<'a> {
    /// Build a timeline from events in any order.
    pub fn new<I>(events: I) -> Self
    where
        I: IntoIterator<Item = &'a ActivityEvent>,
    {
        let mut newest_first: Vec<&'a ActivityEvent> = events.into_iter().collect();
        newest_first.sort_by_key(|e| Reverse(e.sequence));
        Self { newest_first }
    }

    /// The event with the highest sequence.
    #[must_use]
    pub fn latest(&self) -> Option<&'a ActivityEvent> {
        self.newest_first.first().copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.newest_first.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.newest_first.len()
    }

    /// Descending by sequence.
    pub fn newest_first(&self) -> impl DoubleEndedIterator<Item = &'a ActivityEvent> + '_ {
        self.newest_first.iter().copied()
    }

    /// Ascending by sequence.
    pub fn chronological(&self) -> impl DoubleEndedIterator<Item = &'a ActivityEvent> + '_ {
        self.newest_first.iter().rev().copied()
    }

    /// Events strictly after `event` in sequence order, newest first.
    pub fn newer_than(
        &self,
        event: &ActivityEvent,
    ) -> impl Iterator<Item = &'a ActivityEvent> + '_ {
        let pivot = event.sequence;
        self.newest_first().take_while(move |e| e.sequence > pivot)
    }

    /// True if any event in the timeline satisfies `pred`.
    pub fn any(&self, pred: impl FnMut(&'a ActivityEvent) -> bool) -> bool {
        self.newest_first().any(pred)
    }

    /// The lowest-sequence event of the given type.
    #[must_use]
    pub fn earliest_of(&self, event_type: EventType) -> Option<&'a ActivityEvent> {
        self.chronological().find(|e| e.event_type == event_type)
    }

    /// True if any event has the given type.
    #[must_use]
    pub fn contains_type(&self, event_type: EventType) -> bool {
        self.newest_first.iter().any(|e| e.event_type == event_type)
    }
}
