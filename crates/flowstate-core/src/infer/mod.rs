//! Workflow state inference.
//!
//! Maps the events of one workflow to a [`WorkflowState`] and the [`Reason`]
//! that produced it. The mapping is an ordered rule table (see
//! [`rules::RULES`]) evaluated first-match-wins:
//!
//! 1. no events: automation working, "Starting development"
//! 2. completion anywhere in history: completed
//! 3. latest event asks for review: needs user input
//! 4. latest event is an active-work shape older than 48h: needs user input
//! 5. latest event is an active-work shape: automation working
//! 6. otherwise: automation working, "Active development"
//!
//! Completion is a history-wide predicate; everything else looks at the
//! latest event by sequence, plus the two look-behinds documented on the
//! individual rules.
//!
//! Inference is pure. The only time input is the `now` instant passed by the
//! caller, so results are reproducible under a fixed clock.

pub mod rules;
pub mod shape;

pub use rules::{RULES, Rule, RuleInput, STALL_THRESHOLD, evaluate_with, has_review_after};
pub use shape::ActiveShape;

use crate::event::ActivityEvent;
use crate::model::{ParseEnumError, normalize};
use crate::order::Timeline;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use tracing::trace;

/// The three computed workflow states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    /// The automated agent is expected to be making progress.
    AutomationWorking,
    /// A person needs to review, approve, or unblock.
    NeedsUserInput,
    /// Merged or closed in the issue tracker.
    Completed,
}

impl WorkflowState {
    /// All states in dashboard order.
    pub const ALL: [Self; 3] = [
        Self::NeedsUserInput,
        Self::AutomationWorking,
        Self::Completed,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AutomationWorking => "automation_working",
            Self::NeedsUserInput => "needs_user_input",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkflowState {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "automation_working" | "working" => Ok(Self::AutomationWorking),
            "needs_user_input" | "needs_input" => Ok(Self::NeedsUserInput),
            "completed" | "done" => Ok(Self::Completed),
            _ => Err(ParseEnumError {
                expected: "workflow state",
                got: s.to_string(),
            }),
        }
    }
}

/// Why a workflow is in its state. One variant per rule branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reason {
    StartingDevelopment,
    CompletedAndMerged,
    ReadyForReview,
    AwaitingReviewFeedback,
    /// An active-work shape with no newer event for more than 48 hours.
    Stalled { days: u64 },
    AddressingReviewFeedback,
    FixingTestFailures,
    RespondingToFeedback,
    PreparingForMerge,
    WorkInProgress,
    ActiveDevelopment,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartingDevelopment => f.write_str("Starting development"),
            Self::CompletedAndMerged => f.write_str("Workflow completed and merged"),
            Self::ReadyForReview => f.write_str("Ready for review"),
            Self::AwaitingReviewFeedback => f.write_str("In review status, awaiting feedback"),
            Self::Stalled { days } => {
                let unit = if *days == 1 { "day" } else { "days" };
                write!(f, "No progress for {days} {unit} - may need help")
            }
            Self::AddressingReviewFeedback => f.write_str("Addressing review feedback"),
            Self::FixingTestFailures => f.write_str("Fixing test failures"),
            Self::RespondingToFeedback => f.write_str("Responding to feedback"),
            Self::PreparingForMerge => f.write_str("Preparing for merge"),
            Self::WorkInProgress => f.write_str("Work in progress"),
            Self::ActiveDevelopment => f.write_str("Active development"),
        }
    }
}

impl Serialize for Reason {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A state together with the reason that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Inference {
    pub state: WorkflowState,
    pub reason: Reason,
}

impl Inference {
    #[must_use]
    pub const fn new(state: WorkflowState, reason: Reason) -> Self {
        Self { state, reason }
    }
}

/// Infer the state of one workflow from its events, in any order.
///
/// Total: every input, including an empty one, yields exactly one state.
#[must_use]
pub fn infer<'a, I>(events: I, now: DateTime<Utc>) -> Inference
where
    I: IntoIterator<Item = &'a ActivityEvent>,
{
    infer_timeline(&Timeline::new(events), now)
}

/// Infer from an already-built [`Timeline`].
#[must_use]
pub fn infer_timeline(timeline: &Timeline<'_>, now: DateTime<Utc>) -> Inference {
    let input = RuleInput { timeline, now };
    match evaluate_with(&RULES, &input) {
        Some((rule, inference)) => {
            trace!(
                rule,
                state = %inference.state,
                reason = %inference.reason,
                events = timeline.len(),
                "workflow state inferred"
            );
            inference
        }
        None => Inference::new(WorkflowState::AutomationWorking, Reason::ActiveDevelopment),
    }
}
