//! Per-workflow output records and the dashboard built from them.
//!
//! Summaries are recomputed from the dataset on every call and never cached.

use crate::config::LinksConfig;
use crate::dataset::ActivityDataset;
use crate::error::DatasetError;
use crate::event::{ActivityEvent, EventType};
use crate::extract::{
    DateRange, Priority, code_review_url, issue_tracker_url, priority_from_events, relative_time,
};
use crate::infer::{Reason, WorkflowState, infer_timeline};
use crate::model::{ParseEnumError, WorkflowRef, normalize};
use crate::order::Timeline;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Everything a consumer shows for one workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowSummary {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_key: Option<String>,
    pub state: WorkflowState,
    pub reason: Reason,
    pub priority: Option<Priority>,
    pub issue_url: Option<String>,
    pub code_review_url: Option<String>,
    /// Relative label for the latest event, empty when there is none.
    pub last_activity: String,
    pub last_event_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub in_range: bool,
    pub event_count: usize,
}

impl WorkflowSummary {
    /// Derive every attribute of `workflow` from its events.
    #[must_use]
    pub fn compute(
        workflow: &WorkflowRef,
        events: &[&ActivityEvent],
        links: &LinksConfig,
        range: DateRange,
        now: DateTime<Utc>,
    ) -> Self {
        let timeline = Timeline::new(events.iter().copied());
        let inference = infer_timeline(&timeline, now);
        let latest = timeline.latest();
        let created_at = timeline
            .earliest_of(EventType::IssueCreated)
            .map(|e| e.timestamp);

        Self {
            id: workflow.id.clone(),
            name: workflow.display_name().to_string(),
            issue_key: workflow.issue_key.clone(),
            state: inference.state,
            reason: inference.reason,
            priority: priority_from_events(events.iter().copied()),
            issue_url: issue_tracker_url(&links.issue_url_template, workflow.issue_key.as_deref()),
            code_review_url: code_review_url(events.iter().copied()).map(str::to_string),
            last_activity: relative_time(latest, now),
            last_event_at: latest.map(|e| e.timestamp),
            created_at,
            in_range: range.contains(created_at, now),
            event_count: timeline.len(),
        }
    }
}

/// Dashboard tab selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StateFilter {
    All,
    State(WorkflowState),
}

impl StateFilter {
    #[must_use]
    pub fn matches(self, state: WorkflowState) -> bool {
        match self {
            Self::All => true,
            Self::State(wanted) => wanted == state,
        }
    }
}

impl fmt::Display for StateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::State(state) => f.write_str(state.as_str()),
        }
    }
}

impl FromStr for StateFilter {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if normalize(s) == "all" {
            return Ok(Self::All);
        }
        s.parse().map(Self::State).map_err(|_| ParseEnumError {
            expected: "state filter",
            got: s.to_string(),
        })
    }
}

impl TryFrom<String> for StateFilter {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StateFilter> for String {
    fn from(filter: StateFilter) -> Self {
        filter.to_string()
    }
}

/// Per-state tallies for the dashboard tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StateCounts {
    pub all: usize,
    pub automation_working: usize,
    pub needs_user_input: usize,
    pub completed: usize,
}

impl StateCounts {
    #[must_use]
    pub fn tally<'a, I>(summaries: I) -> Self
    where
        I: IntoIterator<Item = &'a WorkflowSummary>,
    {
        summaries.into_iter().fold(Self::default(), |mut counts, s| {
            counts.all += 1;
            match s.state {
                WorkflowState::AutomationWorking => counts.automation_working += 1,
                WorkflowState::NeedsUserInput => counts.needs_user_input += 1,
                WorkflowState::Completed => counts.completed += 1,
            }
            counts
        })
    }

    #[must_use]
    pub const fn get(&self, filter: StateFilter) -> usize {
        match filter {
            StateFilter::All => self.all,
            StateFilter::State(WorkflowState::AutomationWorking) => self.automation_working,
            StateFilter::State(WorkflowState::NeedsUserInput) => self.needs_user_input,
            StateFilter::State(WorkflowState::Completed) => self.completed,
        }
    }
}

/// Summaries for every workflow in a dataset, in dataset order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub range: DateRange,
    pub now: DateTime<Utc>,
    pub summaries: Vec<WorkflowSummary>,
}

impl Dashboard {
    #[must_use]
    pub fn build(
        dataset: &ActivityDataset,
        links: &LinksConfig,
        range: DateRange,
        now: DateTime<Utc>,
    ) -> Self {
        let summaries = dataset
            .workflows
            .iter()
            .map(|workflow| {
                let events = dataset.events_for(&workflow.id);
                WorkflowSummary::compute(workflow, &events, links, range, now)
            })
            .collect();
        Self {
            range,
            now,
            summaries,
        }
    }

    /// In-range summaries matching `filter`.
    #[must_use]
    pub fn filtered(&self, filter: StateFilter) -> Vec<&WorkflowSummary> {
        self.summaries
            .iter()
            .filter(|s| s.in_range && filter.matches(s.state))
            .collect()
    }

    /// Counts over in-range summaries.
    #[must_use]
    pub fn counts(&self) -> StateCounts {
        StateCounts::tally(self.summaries.iter().filter(|s| s.in_range))
    }
}

/// A summary plus the full timeline, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowDetail {
    #[serde(flatten)]
    pub summary: WorkflowSummary,
    pub events: Vec<ActivityEvent>,
}

impl WorkflowDetail {
    /// # Errors
    ///
    /// [`DatasetError::WorkflowNotFound`] if `id` is not in the dataset.
    pub fn compute(
        dataset: &ActivityDataset,
        id: &str,
        links: &LinksConfig,
        now: DateTime<Utc>,
    ) -> Result<Self, DatasetError> {
        let workflow = dataset.workflow(id)?;
        let events = dataset.events_for(id);
        let summary = WorkflowSummary::compute(workflow, &events, links, DateRange::AllTime, now);
        let events = Timeline::new(events).chronological().cloned().collect();
        Ok(Self { summary, events })
    }
}
