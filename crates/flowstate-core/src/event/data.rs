//! Typed payload data structs for each event type.
//!
//! The dataset ships one sparse bag of optional fields for every event. Here
//! that bag is split into one struct per payload shape, and [`EventData`]
//! pairs each [`EventType`] with exactly the shape it may carry. Unknown
//! fields are preserved via `#[serde(flatten)]` for forward compatibility.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::types::EventType;

// ---------------------------------------------------------------------------
// EventData: the unified payload enum
// ---------------------------------------------------------------------------

/// Typed payload for an event. The discriminant comes from [`EventType`],
/// not from the payload JSON itself (`type` is a sibling field of `payload`).
///
/// **Serde note:** `EventData` implements `Serialize` manually (dispatching
/// to the inner struct) but does **not** implement `Deserialize` directly.
/// Use [`EventData::deserialize_for`] with the known [`EventType`]. The
/// [`ActivityEvent`](super::ActivityEvent) struct does this in its custom
/// `Deserialize` impl.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventData {
    IssueCreated(NoteData),
    IssueUpdated(NoteData),
    IssueCommented(CommentData),
    IssueLabeled(LabelsData),
    IssueAssigned(AssigneesData),
    IssueStatusChanged(StatusData),
    IssueLinked(LinkData),
    IssueClosed(CloseData),
    PrOpened(PullRequestData),
    PrDraft(PullRequestData),
    PrReadyForReview(PullRequestData),
    PrUpdated(PullRequestData),
    PrLabeled(LabelsData),
    PrReviewRequested(ReviewersData),
    PrReviewSubmitted(ReviewData),
    PrCommented(CommentData),
    PrCommitPushed(CommitData),
    CiCheckRun(CheckRunData),
    PrMerged(CloseData),
    PrClosed(CloseData),
}

impl EventData {
    /// Deserialize a payload value into the variant for `event_type`.
    ///
    /// A missing payload should be passed as an empty object: every shape
    /// decodes from `{}` because each field is "not applicable" when absent.
    ///
    /// # Errors
    ///
    /// Returns a [`DataParseError`] if the payload does not match the schema
    /// for the given event type (wrong field types, unknown enum values).
    pub fn deserialize_for(
        event_type: EventType,
        payload: serde_json::Value,
    ) -> Result<Self, DataParseError> {
        use serde_json::from_value;

        let result = match event_type {
            EventType::IssueCreated => from_value(payload).map(Self::IssueCreated),
            EventType::IssueUpdated => from_value(payload).map(Self::IssueUpdated),
            EventType::IssueCommented => from_value(payload).map(Self::IssueCommented),
            EventType::IssueLabeled => from_value(payload).map(Self::IssueLabeled),
            EventType::IssueAssigned => from_value(payload).map(Self::IssueAssigned),
            EventType::IssueStatusChanged => {
                from_value(payload).map(Self::IssueStatusChanged)
            }
            EventType::IssueLinked => from_value(payload).map(Self::IssueLinked),
            EventType::IssueClosed => from_value(payload).map(Self::IssueClosed),
            EventType::PrOpened => from_value(payload).map(Self::PrOpened),
            EventType::PrDraft => from_value(payload).map(Self::PrDraft),
            EventType::PrReadyForReview => from_value(payload).map(Self::PrReadyForReview),
            EventType::PrUpdated => from_value(payload).map(Self::PrUpdated),
            EventType::PrLabeled => from_value(payload).map(Self::PrLabeled),
            EventType::PrReviewRequested => from_value(payload).map(Self::PrReviewRequested),
            EventType::PrReviewSubmitted => from_value(payload).map(Self::PrReviewSubmitted),
            EventType::PrCommented => from_value(payload).map(Self::PrCommented),
            EventType::PrCommitPushed => from_value(payload).map(Self::PrCommitPushed),
            EventType::CiCheckRun => from_value(payload).map(Self::CiCheckRun),
            EventType::PrMerged => from_value(payload).map(Self::PrMerged),
            EventType::PrClosed => from_value(payload).map(Self::PrClosed),
        };

        result.map_err(|source| DataParseError { event_type, source })
    }

    /// The event type this payload belongs to.
    #[must_use]
    pub const fn event_type(&self) -> EventType {
        match self {
            Self::IssueCreated(_) => EventType::IssueCreated,
            Self::IssueUpdated(_) => EventType::IssueUpdated,
            Self::IssueCommented(_) => EventType::IssueCommented,
            Self::IssueLabeled(_) => EventType::IssueLabeled,
            Self::IssueAssigned(_) => EventType::IssueAssigned,
            Self::IssueStatusChanged(_) => EventType::IssueStatusChanged,
            Self::IssueLinked(_) => EventType::IssueLinked,
            Self::IssueClosed(_) => EventType::IssueClosed,
            Self::PrOpened(_) => EventType::PrOpened,
            Self::PrDraft(_) => EventType::PrDraft,
            Self::PrReadyForReview(_) => EventType::PrReadyForReview,
            Self::PrUpdated(_) => EventType::PrUpdated,
            Self::PrLabeled(_) => EventType::PrLabeled,
            Self::PrReviewRequested(_) => EventType::PrReviewRequested,
            Self::PrReviewSubmitted(_) => EventType::PrReviewSubmitted,
            Self::PrCommented(_) => EventType::PrCommented,
            Self::PrCommitPushed(_) => EventType::PrCommitPushed,
            Self::CiCheckRun(_) => EventType::CiCheckRun,
            Self::PrMerged(_) => EventType::PrMerged,
            Self::PrClosed(_) => EventType::PrClosed,
        }
    }

    /// An empty payload of the right shape for `event_type`.
    #[must_use]
    pub fn empty(event_type: EventType) -> Self {
        match event_type {
            EventType::IssueCreated => Self::IssueCreated(NoteData::default()),
            EventType::IssueUpdated => Self::IssueUpdated(NoteData::default()),
            EventType::IssueCommented => Self::IssueCommented(CommentData::default()),
            EventType::IssueLabeled => Self::IssueLabeled(LabelsData::default()),
            EventType::IssueAssigned => Self::IssueAssigned(AssigneesData::default()),
            EventType::IssueStatusChanged => Self::IssueStatusChanged(StatusData::default()),
            EventType::IssueLinked => Self::IssueLinked(LinkData::default()),
            EventType::IssueClosed => Self::IssueClosed(CloseData::default()),
            EventType::PrOpened => Self::PrOpened(PullRequestData::default()),
            EventType::PrDraft => Self::PrDraft(PullRequestData::default()),
            EventType::PrReadyForReview => Self::PrReadyForReview(PullRequestData::default()),
            EventType::PrUpdated => Self::PrUpdated(PullRequestData::default()),
            EventType::PrLabeled => Self::PrLabeled(LabelsData::default()),
            EventType::PrReviewRequested => Self::PrReviewRequested(ReviewersData::default()),
            EventType::PrReviewSubmitted => Self::PrReviewSubmitted(ReviewData::default()),
            EventType::PrCommented => Self::PrCommented(CommentData::default()),
            EventType::PrCommitPushed => Self::PrCommitPushed(CommitData::default()),
            EventType::CiCheckRun => Self::CiCheckRun(CheckRunData::default()),
            EventType::PrMerged => Self::PrMerged(CloseData::default()),
            EventType::PrClosed => Self::PrClosed(CloseData::default()),
        }
    }

    /// Serialize the payload to a [`serde_json::Value`].
    ///
    /// # Errors
    ///
    /// Returns an error if the inner struct fails to serialize (should not
    /// happen with well-formed data).
    pub fn to_json_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

impl Serialize for EventData {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::IssueCreated(d) | Self::IssueUpdated(d) => d.serialize(serializer),
            Self::IssueCommented(d) | Self::PrCommented(d) => d.serialize(serializer),
            Self::IssueLabeled(d) | Self::PrLabeled(d) => d.serialize(serializer),
            Self::IssueAssigned(d) => d.serialize(serializer),
            Self::IssueStatusChanged(d) => d.serialize(serializer),
            Self::IssueLinked(d) => d.serialize(serializer),
            Self::IssueClosed(d) | Self::PrMerged(d) | Self::PrClosed(d) => {
                d.serialize(serializer)
            }
            Self::PrOpened(d)
            | Self::PrDraft(d)
            | Self::PrReadyForReview(d)
            | Self::PrUpdated(d) => d.serialize(serializer),
            Self::PrReviewRequested(d) => d.serialize(serializer),
            Self::PrReviewSubmitted(d) => d.serialize(serializer),
            Self::PrCommitPushed(d) => d.serialize(serializer),
            Self::CiCheckRun(d) => d.serialize(serializer),
        }
    }
}

// ---------------------------------------------------------------------------
// DataParseError
// ---------------------------------------------------------------------------

/// Error returned when deserializing an event's payload fails.
#[derive(Debug)]
pub struct DataParseError {
    /// The event type that was being deserialized.
    pub event_type: EventType,
    /// The underlying JSON error.
    pub source: serde_json::Error,
}

impl fmt::Display for DataParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {} payload: {}", self.event_type, self.source)
    }
}

impl std::error::Error for DataParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

// ---------------------------------------------------------------------------
// Nested value types
// ---------------------------------------------------------------------------

/// An issue-tracker status transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTransition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    pub to: String,
}

/// Verdict of a submitted review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewState {
    Approved,
    ChangesRequested,
    Commented,
}

impl ReviewState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::ChangesRequested => "changes_requested",
            Self::Commented => "commented",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub state: ReviewState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Queued,
    InProgress,
    Completed,
}

impl CheckStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckConclusion {
    Success,
    Failure,
    Neutral,
    Cancelled,
    TimedOut,
}

impl CheckConclusion {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Neutral => "neutral",
            Self::Cancelled => "cancelled",
            Self::TimedOut => "timed_out",
        }
    }
}

/// A CI check run report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRun {
    pub name: String,
    pub status: CheckStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<CheckConclusion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl CheckRun {
    /// Completed with a failing conclusion.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.status == CheckStatus::Completed
            && self.conclusion == Some(CheckConclusion::Failure)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitInfo {
    pub sha: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files_changed: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additions: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletions: Option<u32>,
}

/// Kind of cross-system link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrossLinkType {
    #[serde(rename = "github.pr")]
    GithubPr,
    #[serde(rename = "github.issue")]
    GithubIssue,
    #[serde(rename = "linear.issue")]
    LinearIssue,
}

/// A link between the issue tracker and the code host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossLink {
    #[serde(rename = "type")]
    pub link_type: CrossLinkType,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u64>,
}

// ---------------------------------------------------------------------------
// Payload structs, one per payload shape
// ---------------------------------------------------------------------------

/// Payload for `issue.created` and `issue.updated`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Payload for `issue.commented` and `pr.commented`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentData {
    /// Comment body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Payload for `issue.labeled` and `pr.labeled`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelsData {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels_added: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels_removed: Vec<String>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Payload for `issue.assigned`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssigneesData {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assignees_added: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assignees_removed: Vec<String>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Payload for `issue.status_changed`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusTransition>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Payload for `issue.linked`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<CrossLink>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Payload for `issue.closed`, `pr.merged` and `pr.closed`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseData {
    /// Closing rationale, e.g. "merged via PR #4321".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_reason: Option<String>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Payload for `pr.opened`, `pr.draft`, `pr.ready_for_review` and `pr.updated`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Payload for `pr.review_requested`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewersData {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reviewers_added: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reviewers_removed: Vec<String>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Payload for `pr.review_submitted`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<Review>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Payload for `pr.commit_pushed`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<CommitInfo>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Payload for `ci.check_run`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRunData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check: Option<CheckRun>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
