//! The activity dataset: workflows plus their merged event stream.
//!
//! # Wire format
//!
//! ```json
//! { "schemaVersion": 1, "workflows": [WorkflowRef...], "events": [ActivityEvent...] }
//! ```
//!
//! Loading checks the schema version before decoding the rest, so a future
//! version reports as unsupported rather than as a parse failure. Sequence
//! well-formedness is a caller precondition; [`ActivityDataset::validate`]
//! reports violations but does not repair them.

use crate::error::DatasetError;
use crate::event::ActivityEvent;
use crate::model::WorkflowRef;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use tracing::{debug, warn};

/// The only schema version this crate reads.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDataset {
    pub schema_version: u32,
    #[serde(default)]
    pub workflows: Vec<WorkflowRef>,
    #[serde(default)]
    pub events: Vec<ActivityEvent>,
}

/// A well-formedness problem found by [`ActivityDataset::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetIssue {
    /// Sequences start at 1.
    ZeroSequence { event_id: String, workflow_id: String },
    DuplicateSequence { workflow_id: String, sequence: u64 },
    DuplicateEventId { event_id: String },
    /// The event names a workflow absent from `workflows`.
    UnknownWorkflow { event_id: String, workflow_id: String },
}

impl fmt::Display for DatasetIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroSequence {
                event_id,
                workflow_id,
            } => write!(f, "event {event_id} in {workflow_id} has sequence 0"),
            Self::DuplicateSequence {
                workflow_id,
                sequence,
            } => write!(
                f,
                "{workflow_id} has more than one event with sequence {sequence}"
            ),
            Self::DuplicateEventId { event_id } => write!(f, "event id {event_id} is not unique"),
            Self::UnknownWorkflow {
                event_id,
                workflow_id,
            } => write!(
                f,
                "event {event_id} references unknown workflow {workflow_id}"
            ),
        }
    }
}

impl ActivityDataset {
    /// Decode a dataset from JSON text.
    ///
    /// # Errors
    ///
    /// [`DatasetError::UnsupportedSchemaVersion`] for any version other than
    /// [`SCHEMA_VERSION`], [`DatasetError::Parse`] for malformed input.
    pub fn from_json_str(input: &str) -> Result<Self, DatasetError> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct SchemaHeader {
            schema_version: u32,
        }

        let value: serde_json::Value = serde_json::from_str(input)?;
        let header = SchemaHeader::deserialize(&value)?;
        if header.schema_version != SCHEMA_VERSION {
            return Err(DatasetError::UnsupportedSchemaVersion {
                found: header.schema_version,
                expected: SCHEMA_VERSION,
            });
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Read and decode a dataset file, logging any well-formedness issues.
    ///
    /// # Errors
    ///
    /// [`DatasetError::NotFound`] if `path` does not exist, otherwise as
    /// [`ActivityDataset::from_json_str`].
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        if !path.exists() {
            return Err(DatasetError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_json_str(&content)?;
        debug!(
            path = %path.display(),
            workflows = dataset.workflows.len(),
            events = dataset.events.len(),
            "dataset loaded"
        );
        for issue in dataset.validate() {
            warn!(path = %path.display(), "{issue}");
        }
        Ok(dataset)
    }

    /// Events belonging to `workflow_id`, in file order. Empty if none.
    #[must_use]
    pub fn events_for(&self, workflow_id: &str) -> Vec<&ActivityEvent> {
        self.events
            .iter()
            .filter(|e| e.workflow_id == workflow_id)
            .collect()
    }

    /// Look up a workflow by id.
    ///
    /// # Errors
    ///
    /// [`DatasetError::WorkflowNotFound`] if no workflow has this id.
    pub fn workflow(&self, id: &str) -> Result<&WorkflowRef, DatasetError> {
        self.workflows
            .iter()
            .find(|w| w.id == id)
            .ok_or_else(|| DatasetError::WorkflowNotFound { id: id.to_string() })
    }

    /// Report sequence, id and reference problems, in event order.
    #[must_use]
    pub fn validate(&self) -> Vec<DatasetIssue> {
        let known: HashSet<&str> = self.workflows.iter().map(|w| w.id.as_str()).collect();
        let mut seen_ids: HashSet<&str> = HashSet::new();
        let mut seen_sequences: HashSet<(&str, u64)> = HashSet::new();
        let mut issues = Vec::new();

        for event in &self.events {
            if !seen_ids.insert(event.id.as_str()) {
                issues.push(DatasetIssue::DuplicateEventId {
                    event_id: event.id.clone(),
                });
            }
            if !known.contains(event.workflow_id.as_str()) {
                issues.push(DatasetIssue::UnknownWorkflow {
                    event_id: event.id.clone(),
                    workflow_id: event.workflow_id.clone(),
                });
            }
            if event.sequence == 0 {
                issues.push(DatasetIssue::ZeroSequence {
                    event_id: event.id.clone(),
                    workflow_id: event.workflow_id.clone(),
                });
            } else if !seen_sequences.insert((event.workflow_id.as_str(), event.sequence)) {
                issues.push(DatasetIssue::DuplicateSequence {
                    workflow_id: event.workflow_id.clone(),
                    sequence: event.sequence,
                });
            }
        }
        issues
    }
}
