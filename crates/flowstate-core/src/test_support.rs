//! Event builders shared by unit tests.

use crate::event::{
    ActivityEvent, CheckConclusion, CheckRun, CheckRunData, CheckStatus, EventData, EventType,
    LabelsData, Review, ReviewData, ReviewState, StatusData, StatusTransition,
};
use crate::model::{Actor, ActorType, EntityKind, EntityRef, Provider};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

pub fn agent() -> Actor {
    Actor {
        id: "agent-1".into(),
        display_name: "Agent".into(),
        handle: Some("agent".into()),
        actor_type: ActorType::Agent,
    }
}

pub fn human() -> Actor {
    Actor {
        id: "human-1".into(),
        display_name: "Dana Reviewer".into(),
        handle: Some("dana".into()),
        actor_type: ActorType::Human,
    }
}

/// An event with an empty payload of the right shape, authored by the agent.
pub fn event(sequence: u64, event_type: EventType, ts: DateTime<Utc>) -> ActivityEvent {
    let (kind, provider) = if event_type.is_issue() {
        (EntityKind::Issue, Provider::Linear)
    } else if event_type == EventType::CiCheckRun {
        (EntityKind::CheckRun, Provider::Github)
    } else {
        (EntityKind::PullRequest, Provider::Github)
    };

    ActivityEvent {
        id: format!("evt-{sequence}"),
        timestamp: ts,
        provider,
        event_type,
        workflow_id: "WF-TEST".into(),
        sequence,
        actor: agent(),
        entity: EntityRef::new(kind, provider),
        data: EventData::empty(event_type),
    }
}

pub fn status_change(sequence: u64, to: &str, ts: DateTime<Utc>) -> ActivityEvent {
    let mut e = event(sequence, EventType::IssueStatusChanged, ts);
    e.data = EventData::IssueStatusChanged(StatusData {
        status: Some(StatusTransition {
            from: None,
            to: to.into(),
        }),
        extra: BTreeMap::new(),
    });
    e
}

pub fn review(sequence: u64, state: ReviewState, ts: DateTime<Utc>) -> ActivityEvent {
    let mut e = event(sequence, EventType::PrReviewSubmitted, ts);
    e.actor = human();
    e.data = EventData::PrReviewSubmitted(ReviewData {
        review: Some(Review { state, body: None }),
        extra: BTreeMap::new(),
    });
    e
}

pub fn check_run(
    sequence: u64,
    status: CheckStatus,
    conclusion: Option<CheckConclusion>,
    ts: DateTime<Utc>,
) -> ActivityEvent {
    let mut e = event(sequence, EventType::CiCheckRun, ts);
    e.data = EventData::CiCheckRun(CheckRunData {
        check: Some(CheckRun {
            name: "test".into(),
            status,
            conclusion,
            url: None,
        }),
        extra: BTreeMap::new(),
    });
    e
}

pub fn labeled(sequence: u64, labels: &[&str], ts: DateTime<Utc>) -> ActivityEvent {
    let mut e = event(sequence, EventType::IssueLabeled, ts);
    e.data = EventData::IssueLabeled(LabelsData {
        labels_added: labels.iter().map(|l| (*l).to_string()).collect(),
        labels_removed: Vec::new(),
        extra: BTreeMap::new(),
    });
    e
}

pub fn with_url(mut e: ActivityEvent, url: &str) -> ActivityEvent {
    e.entity.url = Some(url.into());
    e
}

pub fn by_human(mut e: ActivityEvent) -> ActivityEvent {
    e.actor = human();
    e
}
