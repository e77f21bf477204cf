//! Event data model for the unified activity log.
//!
//! This module defines the core [`ActivityEvent`] struct, the [`EventType`]
//! enum covering all 20 event types, and typed payload data structs.
//!
//! # Wire format
//!
//! Events arrive as JSON objects inside an activity dataset:
//!
//! ```text
//! { "id", "ts", "provider", "type", "workflowId", "sequence",
//!   "actor", "entity", "payload"? }
//! ```
//!
//! `payload` is optional and sparse. Its shape is decided by `type`.

pub mod data;
pub mod types;

pub use data::{
    AssigneesData, CheckConclusion, CheckRun, CheckRunData, CheckStatus, CloseData, CommentData,
    CommitData, CommitInfo, CrossLink, CrossLinkType, DataParseError, EventData, LabelsData,
    LinkData, NoteData, PullRequestData, Review, ReviewData, ReviewState, ReviewersData,
    StatusData, StatusTransition,
};
pub use types::{EventType, UnknownEventType};

use crate::model::{Actor, EntityRef, Provider};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single immutable event in a workflow's lifecycle.
///
/// # Ordering
///
/// `sequence` is the authoritative ordering key within a workflow. It is
/// positive and unique per workflow; `timestamp` may be coarse or arrive out
/// of wall-clock order from upstream systems and is only used for elapsed
/// time computations.
///
/// # Serde
///
/// Custom `Deserialize` implementation uses `type` to drive typed
/// deserialization of the `payload` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEvent {
    /// Globally unique event id.
    pub id: String,

    /// UTC instant the event occurred.
    #[serde(rename = "ts")]
    pub timestamp: DateTime<Utc>,

    pub provider: Provider,

    #[serde(rename = "type")]
    pub event_type: EventType,

    /// Groups events across the issue tracker and the code host.
    pub workflow_id: String,

    /// 1..N within a workflow.
    pub sequence: u64,

    pub actor: Actor,

    /// The primary subject (issue, pull request, review, check, commit).
    pub entity: EntityRef,

    /// Typed payload specific to the event type.
    #[serde(rename = "payload")]
    pub data: EventData,
}

impl<'de> Deserialize<'de> for ActivityEvent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        /// Helper struct for two-pass deserialization: first get the `type`,
        /// then use it to deserialize the payload.
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct EventRaw {
            id: String,
            #[serde(alias = "timestamp")]
            ts: DateTime<Utc>,
            provider: Provider,
            #[serde(rename = "type")]
            event_type: EventType,
            workflow_id: String,
            sequence: u64,
            actor: Actor,
            entity: EntityRef,
            #[serde(default)]
            payload: Option<serde_json::Value>,
        }

        let raw = EventRaw::deserialize(deserializer)?;
        let payload = match raw.payload {
            Some(serde_json::Value::Null) | None => serde_json::Value::Object(Default::default()),
            Some(value) => value,
        };
        let data = EventData::deserialize_for(raw.event_type, payload)
            .map_err(serde::de::Error::custom)?;

        Ok(Self {
            id: raw.id,
            timestamp: raw.ts,
            provider: raw.provider,
            event_type: raw.event_type,
            workflow_id: raw.workflow_id,
            sequence: raw.sequence,
            actor: raw.actor,
            entity: raw.entity,
            data,
        })
    }
}

impl ActivityEvent {
    /// Target status of an `issue.status_changed` event.
    #[must_use]
    pub fn status_target(&self) -> Option<&str> {
        match &self.data {
            EventData::IssueStatusChanged(d) => d.status.as_ref().map(|s| s.to.as_str()),
            _ => None,
        }
    }

    /// Verdict of a `pr.review_submitted` event.
    #[must_use]
    pub fn review_state(&self) -> Option<ReviewState> {
        match &self.data {
            EventData::PrReviewSubmitted(d) => d.review.as_ref().map(|r| r.state),
            _ => None,
        }
    }

    /// A `ci.check_run` that completed with a failure.
    #[must_use]
    pub fn is_failed_check(&self) -> bool {
        match &self.data {
            EventData::CiCheckRun(d) => d.check.as_ref().is_some_and(CheckRun::is_failure),
            _ => false,
        }
    }

    /// Labels added by a labeling event; empty for every other type.
    #[must_use]
    pub fn labels_added(&self) -> &[String] {
        match &self.data {
            EventData::IssueLabeled(d) | EventData::PrLabeled(d) => &d.labels_added,
            _ => &[],
        }
    }

    fn summary(&self) -> String {
        fn preview(text: &str) -> String {
            if text.chars().count() > 40 {
                let cut: String = text.chars().take(40).collect();
                format!("{cut}...")
            } else {
                text.to_string()
            }
        }

        match &self.data {
            EventData::IssueStatusChanged(d) => match &d.status {
                Some(StatusTransition { from: Some(from), to }) => format!("{from} -> {to}"),
                Some(StatusTransition { from: None, to }) => format!("-> {to}"),
                None => String::new(),
            },
            EventData::IssueLabeled(d) | EventData::PrLabeled(d) => {
                format!("+{}", d.labels_added.join(",+"))
            }
            EventData::IssueCommented(d) | EventData::PrCommented(d) => {
                d.text.as_deref().map(preview).unwrap_or_default()
            }
            EventData::PrReviewSubmitted(d) => d
                .review
                .as_ref()
                .map(|r| r.state.as_str().to_string())
                .unwrap_or_default(),
            EventData::CiCheckRun(d) => d
                .check
                .as_ref()
                .map(|c| match c.conclusion {
                    Some(conclusion) => format!("{}: {}", c.name, conclusion.as_str()),
                    None => format!("{}: {}", c.name, c.status.as_str()),
                })
                .unwrap_or_default(),
            EventData::PrCommitPushed(d) => d
                .commit
                .as_ref()
                .map(|c| preview(&c.message))
                .unwrap_or_default(),
            EventData::IssueClosed(d) | EventData::PrMerged(d) | EventData::PrClosed(d) => {
                d.close_reason.clone().unwrap_or_default()
            }
            _ => self
                .entity
                .title
                .as_deref()
                .map(preview)
                .unwrap_or_default(),
        }
    }
}

impl std::fmt::Display for ActivityEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{:<4} {:<22} {:<16} {}",
            self.sequence,
            self.event_type.as_str(),
            self.actor.short_name(),
            self.summary()
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
