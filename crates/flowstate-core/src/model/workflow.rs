use serde::{Deserialize, Serialize};

/// Code-host coordinates pinned on a workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeHostRef {
    pub owner: String,
    pub repo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pr_number: Option<u64>,
}

/// A unit of work tracked across the issue tracker and the code host.
///
/// A workflow carries no state of its own; state is always computed from
/// the events whose `workflow_id` equals [`WorkflowRef::id`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRef {
    /// Stable cross-system identifier, e.g. `WF-BOT-5001`.
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Issue tracker key, e.g. `BOT-5001`.
    #[serde(
        default,
        rename = "linearIssueKey",
        alias = "issueKey",
        skip_serializing_if = "Option::is_none"
    )]
    pub issue_key: Option<String>,

    #[serde(
        default,
        rename = "github",
        alias = "codeHost",
        skip_serializing_if = "Option::is_none"
    )]
    pub code_host: Option<CodeHostRef>,
}

impl WorkflowRef {
    /// A workflow with only an id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            issue_key: None,
            code_host: None,
        }
    }

    /// Friendly name, or the id when no name is set.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}
