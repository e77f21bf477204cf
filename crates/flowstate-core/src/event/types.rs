//! Event type enum covering all 20 unified activity event types.
//!
//! The string representation uses the dotted `<family>.<verb>` format of the
//! activity dataset: `issue.*` for the issue tracker, `pr.*` for the code
//! host, and `ci.check_run` for CI.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed catalog of activity event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventType {
    IssueCreated,
    IssueUpdated,
    IssueCommented,
    IssueLabeled,
    IssueAssigned,
    /// Issue moved between tracker statuses (e.g. "In Review" -> "Done").
    IssueStatusChanged,
    /// Issue linked to another system, e.g. a pull request.
    IssueLinked,
    IssueClosed,
    PrOpened,
    PrDraft,
    PrReadyForReview,
    PrUpdated,
    PrLabeled,
    PrReviewRequested,
    PrReviewSubmitted,
    PrCommented,
    PrCommitPushed,
    /// CI check run progress or completion.
    CiCheckRun,
    PrMerged,
    /// Pull request closed without merging.
    PrClosed,
}

/// Error returned when parsing an unknown event type string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEventType {
    /// The unrecognised input string.
    pub raw: String,
}

impl fmt::Display for UnknownEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown event type '{}': expected one of ", self.raw)?;
        for (i, et) in EventType::ALL.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(et.as_str())?;
        }
        Ok(())
    }
}

impl std::error::Error for UnknownEventType {}

impl EventType {
    /// All known event types in catalog order.
    pub const ALL: [Self; 20] = [
        Self::IssueCreated,
        Self::IssueUpdated,
        Self::IssueCommented,
        Self::IssueLabeled,
        Self::IssueAssigned,
        Self::IssueStatusChanged,
        Self::IssueLinked,
        Self::IssueClosed,
        Self::PrOpened,
        Self::PrDraft,
        Self::PrReadyForReview,
        Self::PrUpdated,
        Self::PrLabeled,
        Self::PrReviewRequested,
        Self::PrReviewSubmitted,
        Self::PrCommented,
        Self::PrCommitPushed,
        Self::CiCheckRun,
        Self::PrMerged,
        Self::PrClosed,
    ];

    /// Return the canonical dotted string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IssueCreated => "issue.created",
            Self::IssueUpdated => "issue.updated",
            Self::IssueCommented => "issue.commented",
            Self::IssueLabeled => "issue.labeled",
            Self::IssueAssigned => "issue.assigned",
            Self::IssueStatusChanged => "issue.status_changed",
            Self::IssueLinked => "issue.linked",
            Self::IssueClosed => "issue.closed",
            Self::PrOpened => "pr.opened",
            Self::PrDraft => "pr.draft",
            Self::PrReadyForReview => "pr.ready_for_review",
            Self::PrUpdated => "pr.updated",
            Self::PrLabeled => "pr.labeled",
            Self::PrReviewRequested => "pr.review_requested",
            Self::PrReviewSubmitted => "pr.review_submitted",
            Self::PrCommented => "pr.commented",
            Self::PrCommitPushed => "pr.commit_pushed",
            Self::CiCheckRun => "ci.check_run",
            Self::PrMerged => "pr.merged",
            Self::PrClosed => "pr.closed",
        }
    }

    /// True for every `pr.*` type, including merge and close.
    #[must_use]
    pub const fn is_pull_request(self) -> bool {
        matches!(
            self,
            Self::PrOpened
                | Self::PrDraft
                | Self::PrReadyForReview
                | Self::PrUpdated
                | Self::PrLabeled
                | Self::PrReviewRequested
                | Self::PrReviewSubmitted
                | Self::PrCommented
                | Self::PrCommitPushed
                | Self::PrMerged
                | Self::PrClosed
        )
    }

    /// True for every `issue.*` type.
    #[must_use]
    pub const fn is_issue(self) -> bool {
        matches!(
            self,
            Self::IssueCreated
                | Self::IssueUpdated
                | Self::IssueCommented
                | Self::IssueLabeled
                | Self::IssueAssigned
                | Self::IssueStatusChanged
                | Self::IssueLinked
                | Self::IssueClosed
        )
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = UnknownEventType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|et| et.as_str() == s)
            .ok_or_else(|| UnknownEventType { raw: s.to_string() })
    }
}

// Custom serde: serialize as the dotted string.
impl Serialize for EventType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn display_matches_catalog() {
        let expected = [
            (EventType::IssueCreated, "issue.created"),
            (EventType::IssueStatusChanged, "issue.status_changed"),
            (EventType::PrReadyForReview, "pr.ready_for_review"),
            (EventType::PrReviewSubmitted, "pr.review_submitted"),
            (EventType::CiCheckRun, "ci.check_run"),
            (EventType::PrMerged, "pr.merged"),
            (EventType::PrClosed, "pr.closed"),
        ];

        for (et, s) in expected {
            assert_eq!(et.to_string(), s);
            assert_eq!(et.as_str(), s);
        }
    }

    #[test]
    fn fromstr_all_types() {
        for et in EventType::ALL {
            let parsed: EventType = et.as_str().parse().expect("should parse");
            assert_eq!(parsed, et);
        }
    }

    #[test]
    fn string_forms_are_unique() {
        let seen: HashSet<_> = EventType::ALL.iter().map(|et| et.as_str()).collect();
        assert_eq!(seen.len(), EventType::ALL.len());
    }

    #[test]
    fn fromstr_rejects_unknown() {
        let err = "pr.reopened".parse::<EventType>().unwrap_err();
        assert_eq!(err.raw, "pr.reopened");
        assert!(err.to_string().contains("expected one of"));
    }

    #[test]
    fn fromstr_is_case_sensitive() {
        assert!("PR.MERGED".parse::<EventType>().is_err());
        assert!("merged".parse::<EventType>().is_err());
    }

    #[test]
    fn serde_uses_dotted_string() {
        let json = serde_json::to_string(&EventType::PrCommitPushed).expect("serialize");
        assert_eq!(json, "\"pr.commit_pushed\"");
        let back: EventType = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, EventType::PrCommitPushed);
        assert!(serde_json::from_str::<EventType>("\"ci.deploy\"").is_err());
    }

    #[test]
    fn families_partition_the_catalog() {
        for et in EventType::ALL {
            let families = [et.is_issue(), et.is_pull_request(), et == EventType::CiCheckRun];
            assert_eq!(
                families.iter().filter(|f| **f).count(),
                1,
                "{et} must be in exactly one family"
            );
        }
    }

    #[test]
    fn error_display_includes_valid_options() {
        let err = UnknownEventType { raw: "nope".into() };
        let msg = err.to_string();
        for et in EventType::ALL {
            assert!(msg.contains(et.as_str()), "missing {}", et.as_str());
        }
    }
}
