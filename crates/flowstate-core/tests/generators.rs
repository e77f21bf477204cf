//! Event builders and proptest strategies shared by the integration tests.
//!
//! Included with `#[path]` from each test file, so not every helper is used
//! by every includer.
#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use flowstate_core::event::{
    ActivityEvent, CheckConclusion, CheckRun, CheckRunData, CheckStatus, EventData, EventType,
    LabelsData, Review, ReviewData, ReviewState, StatusData, StatusTransition,
};
use flowstate_core::model::{Actor, ActorType, EntityKind, EntityRef, Provider};
use proptest::prelude::*;

/// Fixed reference instant for every time-dependent assertion.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 1, 9, 0, 0)
        .single()
        .expect("valid instant")
}

pub fn actor(actor_type: ActorType) -> Actor {
    let (id, name) = match actor_type {
        ActorType::Human => ("u-ana", "Ana Reviewer"),
        ActorType::Agent => ("u-agent", "Agent"),
        ActorType::Bot => ("u-ci", "CI Bot"),
    };
    Actor {
        id: id.into(),
        display_name: name.into(),
        handle: None,
        actor_type,
    }
}

/// An agent-authored event with an empty payload.
pub fn ev(sequence: u64, event_type: EventType, ts: DateTime<Utc>) -> ActivityEvent {
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
        workflow_id: "WF-1".into(),
        sequence,
        actor: actor(ActorType::Agent),
        entity: EntityRef::new(kind, provider),
        data: EventData::empty(event_type),
    }
}

pub fn ago(hours: i64) -> DateTime<Utc> {
    now() - Duration::hours(hours)
}

pub fn review(sequence: u64, state: ReviewState, ts: DateTime<Utc>) -> ActivityEvent {
    let mut e = ev(sequence, EventType::PrReviewSubmitted, ts);
    e.actor = actor(ActorType::Human);
    e.data = EventData::PrReviewSubmitted(ReviewData {
        review: Some(Review { state, body: None }),
        ..ReviewData::default()
    });
    e
}

pub fn status(sequence: u64, to: &str, ts: DateTime<Utc>) -> ActivityEvent {
    let mut e = ev(sequence, EventType::IssueStatusChanged, ts);
    e.data = EventData::IssueStatusChanged(StatusData {
        status: Some(StatusTransition {
            from: Some("In Progress".into()),
            to: to.into(),
        }),
        ..StatusData::default()
    });
    e
}

pub fn check(
    sequence: u64,
    status: CheckStatus,
    conclusion: Option<CheckConclusion>,
    ts: DateTime<Utc>,
) -> ActivityEvent {
    let mut e = ev(sequence, EventType::CiCheckRun, ts);
    e.actor = actor(ActorType::Bot);
    e.data = EventData::CiCheckRun(CheckRunData {
        check: Some(CheckRun {
            name: "ci/test".into(),
            status,
            conclusion,
            url: None,
        }),
        ..CheckRunData::default()
    });
    e
}

pub fn labels(
    sequence: u64,
    event_type: EventType,
    added: &[&str],
    ts: DateTime<Utc>,
) -> ActivityEvent {
    let mut e = ev(sequence, event_type, ts);
    let data = LabelsData {
        labels_added: added.iter().map(ToString::to_string).collect(),
        ..LabelsData::default()
    };
    e.data = if event_type == EventType::PrLabeled {
        EventData::PrLabeled(data)
    } else {
        EventData::IssueLabeled(data)
    };
    e
}

pub fn human(mut e: ActivityEvent) -> ActivityEvent {
    e.actor = actor(ActorType::Human);
    e
}

pub fn url(mut e: ActivityEvent, url: &str) -> ActivityEvent {
    e.entity.url = Some(url.into());
    e
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

pub fn arb_event_type() -> impl Strategy<Value = EventType> + Clone {
    prop::sample::select(EventType::ALL.to_vec())
}

/// Any event type that does not complete a workflow on its own.
pub fn arb_non_terminal_type() -> impl Strategy<Value = EventType> + Clone {
    prop::sample::select(
        EventType::ALL
            .iter()
            .copied()
            .filter(|t| {
                !matches!(
                    t,
                    EventType::PrMerged | EventType::IssueClosed | EventType::IssueStatusChanged
                )
            })
            .collect::<Vec<_>>(),
    )
}

pub fn arb_actor_type() -> impl Strategy<Value = ActorType> + Clone {
    prop_oneof![
        Just(ActorType::Human),
        Just(ActorType::Agent),
        Just(ActorType::Bot)
    ]
}

pub fn arb_review_state() -> impl Strategy<Value = ReviewState> + Clone {
    prop_oneof![
        Just(ReviewState::Approved),
        Just(ReviewState::ChangesRequested),
        Just(ReviewState::Commented)
    ]
}

pub fn arb_status_name() -> impl Strategy<Value = String> + Clone {
    prop::sample::select(vec![
        "Todo",
        "In Progress",
        "In Review",
        "Done",
        "done",
        "Canceled",
    ])
    .prop_map(str::to_string)
}

/// An event of `event_type` with a plausible payload, before sequencing.
pub fn arb_shaped_event(event_type: EventType) -> BoxedStrategy<ActivityEvent> {
    let base = (arb_actor_type(), 0i64..400).prop_map(move |(who, hours)| {
        let mut e = ev(0, event_type, ago(hours));
        e.actor = actor(who);
        e
    });
    match event_type {
        EventType::PrReviewSubmitted => (base, arb_review_state())
            .prop_map(|(e, state)| {
                let mut r = review(0, state, e.timestamp);
                r.actor = e.actor;
                r
            })
            .boxed(),
        EventType::IssueStatusChanged => (base, arb_status_name())
            .prop_map(|(e, to)| status(0, &to, e.timestamp))
            .boxed(),
        EventType::CiCheckRun => (
            base,
            prop_oneof![
                Just((CheckStatus::Queued, None)),
                Just((CheckStatus::InProgress, None)),
                Just((CheckStatus::Completed, Some(CheckConclusion::Success))),
                Just((CheckStatus::Completed, Some(CheckConclusion::Failure))),
            ],
        )
            .prop_map(|(e, (s, c))| check(0, s, c, e.timestamp))
            .boxed(),
        _ => base.boxed(),
    }
}

/// Assign sequences 1..=n in list order.
pub fn sequenced(mut events: Vec<ActivityEvent>) -> Vec<ActivityEvent> {
    for (i, e) in events.iter_mut().enumerate() {
        let sequence = i as u64 + 1;
        e.sequence = sequence;
        e.id = format!("evt-{sequence}");
    }
    events
}

/// A well-formed single-workflow history of up to `max` events.
pub fn arb_history(max: usize) -> impl Strategy<Value = Vec<ActivityEvent>> {
    prop::collection::vec(arb_event_type().prop_flat_map(arb_shaped_event), 0..=max)
        .prop_map(sequenced)
}

/// Like [`arb_history`] but with no completion signal anywhere.
pub fn arb_open_history(max: usize) -> impl Strategy<Value = Vec<ActivityEvent>> {
    prop::collection::vec(
        arb_non_terminal_type().prop_flat_map(arb_shaped_event),
        1..=max,
    )
    .prop_map(sequenced)
}
