use flowstate_core::event::EventType;
use flowstate_core::extract::{Priority, priority_from_events};
use flowstate_core::infer::{ActiveShape, WorkflowState, infer};
use flowstate_core::order::Timeline;
use proptest::prelude::*;

#[path = "generators.rs"]
mod generators;
use generators::*;

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(2000))]

    #[test]
    fn infer_is_total(events in arb_history(30)) {
        let inference = infer(&events, now());
        prop_assert!(WorkflowState::ALL.contains(&inference.state));
        prop_assert!(!inference.reason.to_string().is_empty());
    }

    #[test]
    fn input_permutation_is_irrelevant(
        events in arb_history(20),
        seed in any::<u64>(),
    ) {
        let mut shuffled = events.clone();
        // Deterministic rotation plus reversal stands in for a shuffle.
        if !shuffled.is_empty() {
            let k = usize::try_from(seed % shuffled.len() as u64).unwrap_or(0);
            shuffled.rotate_left(k);
            if seed % 2 == 0 {
                shuffled.reverse();
            }
        }
        prop_assert_eq!(infer(&events, now()), infer(&shuffled, now()));
    }

    #[test]
    fn merge_dominates(mut events in arb_history(20), at in 0usize..21) {
        let position = at.min(events.len());
        events.insert(position, ev(0, EventType::PrMerged, ago(1)));
        let events = sequenced(events);
        prop_assert_eq!(infer(&events, now()).state, WorkflowState::Completed);
    }

    #[test]
    fn pr_closed_alone_never_completes(events in arb_open_history(20)) {
        prop_assert_ne!(infer(&events, now()).state, WorkflowState::Completed);
    }

    #[test]
    fn latest_ready_for_review_needs_input(events in arb_open_history(20)) {
        let mut events = events;
        events.push(ev(0, EventType::PrReadyForReview, ago(0)));
        let events = sequenced(events);
        let inference = infer(&events, now());
        prop_assert_eq!(inference.state, WorkflowState::NeedsUserInput);
        prop_assert_eq!(inference.reason.to_string(), "Ready for review");
    }

    #[test]
    fn stall_and_working_agree_on_shape(events in arb_open_history(20)) {
        let timeline = Timeline::new(&events);
        let latest = timeline.latest().expect("non-empty history");
        let inference = infer(&events, now());
        if let Some(shape) = ActiveShape::of(latest) {
            let stalled = now().signed_duration_since(latest.timestamp)
                > flowstate_core::infer::STALL_THRESHOLD;
            let asks_for_review = matches!(
                latest.event_type,
                EventType::PrReadyForReview | EventType::PrReviewRequested
            );
            if !asks_for_review {
                if stalled {
                    prop_assert_eq!(inference.state, WorkflowState::NeedsUserInput);
                } else {
                    prop_assert_eq!(inference.reason, shape.reason());
                }
            }
        }
    }

    #[test]
    fn first_priority_label_is_stable_under_later_labels(
        first in prop::sample::select(vec!["p1", "P2", "p3"]),
        later in prop::collection::vec(prop::sample::select(vec!["p1", "p2", "p3", "bug"]), 0..5),
    ) {
        let mut events = vec![labels(1, EventType::IssueLabeled, &[first], ago(10))];
        for (i, label) in later.iter().enumerate() {
            events.push(labels(i as u64 + 2, EventType::IssueLabeled, &[*label], ago(5)));
        }
        let expected = first.parse::<Priority>().ok();
        prop_assert_eq!(priority_from_events(&events), expected);
    }
}
