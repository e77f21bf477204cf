//! The ordered rule table behind [`super::infer`].
//!
//! Each [`Rule`] is a named predicate-with-outcome. Rules are evaluated in
//! table order and the first one returning `Some` decides the state, so
//! precedence is the table order and nothing else.

use super::{ActiveShape, Inference, Reason, WorkflowState};
use crate::event::{ActivityEvent, EventType};
use crate::order::Timeline;
use chrono::{DateTime, Duration, Utc};

/// Silence after an active-work event before it counts as stalled.
///
/// Exclusive: exactly 48 hours is still active.
pub const STALL_THRESHOLD: Duration = Duration::hours(48);

/// Everything a rule may look at.
#[derive(Debug, Clone, Copy)]
pub struct RuleInput<'t, 'a> {
    pub timeline: &'t Timeline<'a>,
    pub now: DateTime<Utc>,
}

impl<'a> RuleInput<'_, 'a> {
    fn latest(&self) -> Option<&'a ActivityEvent> {
        self.timeline.latest()
    }
}

/// A named entry in the rule table.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub apply: fn(&RuleInput<'_, '_>) -> Option<Inference>,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// The rule table, highest precedence first. `default` always matches.
pub const RULES: [Rule; 7] = [
    Rule {
        name: "empty",
        apply: empty,
    },
    Rule {
        name: "completed",
        apply: completed,
    },
    Rule {
        name: "ready_for_review",
        apply: ready_for_review,
    },
    Rule {
        name: "review_status",
        apply: review_status,
    },
    Rule {
        name: "stalled",
        apply: stalled,
    },
    Rule {
        name: "active_shape",
        apply: active_shape,
    },
    Rule {
        name: "default",
        apply: default,
    },
];

/// Run `rules` in order and return the first match with its rule name.
#[must_use]
pub fn evaluate_with(
    rules: &[Rule],
    input: &RuleInput<'_, '_>,
) -> Option<(&'static str, Inference)> {
    rules
        .iter()
        .find_map(|rule| (rule.apply)(input).map(|inference| (rule.name, inference)))
}

/// True if a submitted review comes after `event` in sequence order.
#[must_use]
pub fn has_review_after(timeline: &Timeline<'_>, event: &ActivityEvent) -> bool {
    timeline
        .newer_than(event)
        .any(|e| e.event_type == EventType::PrReviewSubmitted)
}

fn is_done_status(status: &str) -> bool {
    status.to_lowercase() == "done"
}

fn is_review_status(status: &str) -> bool {
    status.to_lowercase().contains("review")
}

fn empty(input: &RuleInput<'_, '_>) -> Option<Inference> {
    input.timeline.is_empty().then_some(Inference::new(
        WorkflowState::AutomationWorking,
        Reason::StartingDevelopment,
    ))
}

/// History-wide: once done, later events do not reopen the workflow.
///
/// A pull request closed without merging only counts when the issue tracker
/// agrees the work is finished.
fn completed(input: &RuleInput<'_, '_>) -> Option<Inference> {
    let timeline = input.timeline;
    let merged = timeline.contains_type(EventType::PrMerged);
    let issue_closed = timeline.contains_type(EventType::IssueClosed);
    let status_done = timeline.any(|e| e.status_target().is_some_and(is_done_status));
    let tracker_terminal = issue_closed || status_done;
    let corroborated_close = timeline.contains_type(EventType::PrClosed) && tracker_terminal;

    (merged || tracker_terminal || corroborated_close)
        .then_some(Inference::new(WorkflowState::Completed, Reason::CompletedAndMerged))
}

fn ready_for_review(input: &RuleInput<'_, '_>) -> Option<Inference> {
    let latest = input.latest()?;
    matches!(
        latest.event_type,
        EventType::PrReadyForReview | EventType::PrReviewRequested
    )
    .then_some(Inference::new(WorkflowState::NeedsUserInput, Reason::ReadyForReview))
}

/// Latest event moved the issue into a review status and nobody has
/// reviewed since.
fn review_status(input: &RuleInput<'_, '_>) -> Option<Inference> {
    let latest = input.latest()?;
    let in_review = latest.status_target().is_some_and(is_review_status);
    (in_review && !has_review_after(input.timeline, latest)).then_some(Inference::new(
        WorkflowState::NeedsUserInput,
        Reason::AwaitingReviewFeedback,
    ))
}

fn stalled(input: &RuleInput<'_, '_>) -> Option<Inference> {
    let latest = input.latest()?;
    ActiveShape::of(latest)?;
    let elapsed = input.now.signed_duration_since(latest.timestamp);
    if elapsed <= STALL_THRESHOLD {
        return None;
    }
    let days = u64::try_from(elapsed.num_days()).unwrap_or_default();
    Some(Inference::new(WorkflowState::NeedsUserInput, Reason::Stalled { days }))
}

fn active_shape(input: &RuleInput<'_, '_>) -> Option<Inference> {
    let shape = ActiveShape::of(input.latest()?)?;
    Some(Inference::new(WorkflowState::AutomationWorking, shape.reason()))
}

const fn default(_input: &RuleInput<'_, '_>) -> Option<Inference> {
    Some(Inference::new(WorkflowState::AutomationWorking, Reason::ActiveDevelopment))
}
