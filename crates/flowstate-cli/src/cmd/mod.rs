//! Subcommand handlers.
//!
//! Each handler takes its clap args plus a [`Context`] holding the resolved
//! output mode, project config, dataset path and reference instant.

pub mod completions;
pub mod list;
pub mod show;
pub mod status;

use crate::output::{CliError, OutputMode, fail};
use chrono::{DateTime, Utc};
use flowstate_core::config::ProjectConfig;
use flowstate_core::dataset::ActivityDataset;
use std::path::PathBuf;
use tracing::debug;

/// Everything a command needs besides its own arguments.
#[derive(Debug, Clone)]
pub struct Context {
    pub output: OutputMode,
    pub config: ProjectConfig,
    pub dataset_path: PathBuf,
    /// Reference instant for every time-dependent derivation.
    pub now: DateTime<Utc>,
}

impl Context {
    /// Load the dataset, rendering a structured error on failure.
    pub fn load_dataset(&self) -> anyhow::Result<ActivityDataset> {
        debug!(path = %self.dataset_path.display(), now = %self.now, "loading dataset");
        ActivityDataset::load(&self.dataset_path)
            .map_err(|err| fail(self.output, &CliError::from(&err)))
    }
}
