//! Project and user configuration.
//!
//! Project config lives at `.flowstate/config.toml` under the project root;
//! user config at `<config_dir>/flowstate/config.toml`. Both are optional and
//! every field has a default. The stall threshold is fixed and is not a
//! config key.

use crate::extract::DateRange;
use crate::summary::StateFilter;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Project config path relative to the project root.
pub const PROJECT_CONFIG_PATH: &str = ".flowstate/config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub links: LinksConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinksConfig {
    /// Issue URL with a `{key}` placeholder.
    #[serde(default = "default_issue_url_template")]
    pub issue_url_template: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            issue_url_template: default_issue_url_template(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Dataset path, relative to the project root unless absolute.
    #[serde(default = "default_dataset")]
    pub dataset: PathBuf,
    #[serde(default = "default_state")]
    pub default_state: StateFilter,
    #[serde(default)]
    pub default_range: DateRange,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset: default_dataset(),
            default_state: default_state(),
            default_range: DateRange::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub project: ProjectConfig,
    pub user: UserConfig,
    pub resolved_output: String,
    /// Dataset path joined onto the project root.
    pub dataset_path: PathBuf,
}

pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    let path = project_root.join(PROJECT_CONFIG_PATH);
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ProjectConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };
    load_user_config_from(&config_dir.join("flowstate/config.toml"))
}

fn load_user_config_from(path: &Path) -> Result<UserConfig> {
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load both config layers and resolve the output mode.
///
/// `cli_format` is the `--format` value, or `"json"` for `--json`.
pub fn resolve_config(
    project_root: &Path,
    cli_format: Option<&str>,
    is_tty: bool,
) -> Result<EffectiveConfig> {
    let project = load_project_config(project_root)?;
    let user = load_user_config()?;

    let env_format = env::var("FORMAT").ok();
    let resolved_output = resolve_output(
        cli_format,
        env_format.as_deref(),
        user.output.as_deref(),
        is_tty,
    )
    .to_string();
    let dataset_path = project_root.join(&project.dashboard.dataset);

    Ok(EffectiveConfig {
        project,
        user,
        resolved_output,
        dataset_path,
    })
}

/// Output mode precedence: flag, then `FORMAT`, then user config, then TTY.
///
/// Unrecognized values at any layer fall through to the next one.
#[must_use]
pub fn resolve_output(
    cli_format: Option<&str>,
    env_format: Option<&str>,
    user_output: Option<&str>,
    is_tty: bool,
) -> &'static str {
    fn normalize_output_mode(raw: &str) -> Option<&'static str> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pretty" | "human" => Some("pretty"),
            "text" | "table" => Some("text"),
            "json" => Some("json"),
            _ => None,
        }
    }

    [cli_format, env_format, user_output]
        .into_iter()
        .flatten()
        .find_map(normalize_output_mode)
        .unwrap_or(if is_tty { "pretty" } else { "text" })
}

fn default_issue_url_template() -> String {
    "https://linear.app/charlie-labs/issue/{key}".to_string()
}

fn default_dataset() -> PathBuf {
    PathBuf::from(".flowstate/activity.json")
}

const fn default_state() -> StateFilter {
    StateFilter::State(crate::infer::WorkflowState::NeedsUserInput)
}
