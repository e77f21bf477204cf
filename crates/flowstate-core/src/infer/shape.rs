use super::Reason;
use crate::event::{ActivityEvent, EventType, ReviewState};

/// Latest-event shapes that mean the agent is expected to be making progress.
///
/// The stall rule and the working rule both classify through [`ActiveShape::of`],
/// so the two can never disagree about which events count as active work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActiveShape {
    /// A review requested changes.
    ChangesRequested,
    /// A check run completed with a failure.
    CiFailure,
    /// A person commented on the pull request.
    HumanComment,
    /// A review approved the change.
    Approved,
    /// The pull request is still a draft.
    Draft,
}

impl ActiveShape {
    /// All shapes, in rule precedence order.
    pub const ALL: [Self; 5] = [
        Self::ChangesRequested,
        Self::CiFailure,
        Self::HumanComment,
        Self::Approved,
        Self::Draft,
    ];

    /// Classify one event, `None` if it implies no particular work.
    #[must_use]
    pub fn of(event: &ActivityEvent) -> Option<Self> {
        match event.event_type {
            EventType::PrReviewSubmitted => match event.review_state()? {
                ReviewState::ChangesRequested => Some(Self::ChangesRequested),
                ReviewState::Approved => Some(Self::Approved),
                ReviewState::Commented => None,
            },
            EventType::CiCheckRun if event.is_failed_check() => Some(Self::CiFailure),
            EventType::PrCommented if event.actor.is_human() => Some(Self::HumanComment),
            EventType::PrDraft => Some(Self::Draft),
            _ => None,
        }
    }

    /// The working-state reason for this shape.
    #[must_use]
    pub const fn reason(self) -> Reason {
        match self {
            Self::ChangesRequested => Reason::AddressingReviewFeedback,
            Self::CiFailure => Reason::FixingTestFailures,
            Self::HumanComment => Reason::RespondingToFeedback,
            Self::Approved => Reason::PreparingForMerge,
            Self::Draft => Reason::WorkInProgress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{CheckConclusion, CheckStatus};
    use crate::test_support::{by_human, check_run, event, review};
    use chrono::{TimeZone, Utc};

    fn ts() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 1, 12, 0, 0)
            .single()
            .expect("valid")
    }

    #[test]
    fn agent_comment_is_not_a_shape() {
        let e = event(1, EventType::PrCommented, ts());
        assert_eq!(ActiveShape::of(&e), None);
        assert_eq!(
            ActiveShape::of(&by_human(e)),
            Some(ActiveShape::HumanComment)
        );
    }

    #[test]
    fn issue_comment_by_human_is_not_a_shape() {
        let e = by_human(event(1, EventType::IssueCommented, ts()));
        assert_eq!(ActiveShape::of(&e), None);
    }

    #[test]
    fn only_completed_failures_count() {
        let running = check_run(1, CheckStatus::InProgress, None, ts());
        let passed = check_run(
            2,
            CheckStatus::Completed,
            Some(CheckConclusion::Success),
            ts(),
        );
        let failed = check_run(
            3,
            CheckStatus::Completed,
            Some(CheckConclusion::Failure),
            ts(),
        );
        assert_eq!(ActiveShape::of(&running), None);
        assert_eq!(ActiveShape::of(&passed), None);
        assert_eq!(ActiveShape::of(&failed), Some(ActiveShape::CiFailure));
    }

    #[test]
    fn commented_review_is_not_a_shape() {
        let e = review(1, ReviewState::Commented, ts());
        assert_eq!(ActiveShape::of(&e), None);
    }

    #[test]
    fn review_without_payload_is_not_a_shape() {
        let e = event(1, EventType::PrReviewSubmitted, ts());
        assert_eq!(ActiveShape::of(&e), None);
    }

    #[test]
    fn reasons_are_distinct() {
        let reasons: std::collections::HashSet<_> =
            ActiveShape::ALL.iter().map(|s| s.reason()).collect();
        assert_eq!(reasons.len(), ActiveShape::ALL.len());
    }
}
