use std::{fmt, io, path::PathBuf};

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    DatasetNotFound,
    DatasetParseError,
    UnsupportedSchemaVersion,
    WorkflowNotFound,
    InvalidTimestamp,
    InternalUnexpected,
}

impl ErrorCode {
    pub const ALL: [Self; 7] = [
        Self::ConfigParseError,
        Self::DatasetNotFound,
        Self::DatasetParseError,
        Self::UnsupportedSchemaVersion,
        Self::WorkflowNotFound,
        Self::InvalidTimestamp,
        Self::InternalUnexpected,
    ];

    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1002",
            Self::DatasetNotFound => "E1004",
            Self::DatasetParseError => "E1005",
            Self::UnsupportedSchemaVersion => "E1006",
            Self::WorkflowNotFound => "E2001",
            Self::InvalidTimestamp => "E2006",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Snake-case kind used as the `error` field in JSON output.
    #[must_use]
    pub const fn kind(self) -> &'static str {
        match self {
            Self::ConfigParseError => "config_parse_error",
            Self::DatasetNotFound => "dataset_not_found",
            Self::DatasetParseError => "dataset_parse_error",
            Self::UnsupportedSchemaVersion => "unsupported_schema_version",
            Self::WorkflowNotFound => "workflow_not_found",
            Self::InvalidTimestamp => "invalid_timestamp",
            Self::InternalUnexpected => "internal_unexpected",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::DatasetNotFound => "Activity dataset not found",
            Self::DatasetParseError => "Activity dataset parse error",
            Self::UnsupportedSchemaVersion => "Unsupported dataset schema version",
            Self::WorkflowNotFound => "Workflow not found",
            Self::InvalidTimestamp => "Invalid timestamp",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in .flowstate/config.toml and retry."),
            Self::DatasetNotFound => {
                Some("Pass --data <path> or set [dashboard] dataset in .flowstate/config.toml.")
            }
            Self::DatasetParseError => {
                Some("Check the dataset is JSON with schemaVersion, workflows and events.")
            }
            Self::UnsupportedSchemaVersion => Some("Regenerate the dataset with schemaVersion 1."),
            Self::WorkflowNotFound => Some("Run `flow list --state all` to see workflow ids."),
            Self::InvalidTimestamp => Some("Use an RFC 3339 instant, e.g. 2025-09-01T09:00:00Z."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors from loading or querying an activity dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// The dataset file does not exist.
    #[error("dataset not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The dataset file exists but could not be read.
    #[error("failed to read dataset {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The dataset is not valid JSON or does not match the schema.
    #[error("invalid dataset: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unsupported dataset schema version {found} (expected {expected})")]
    UnsupportedSchemaVersion { found: u32, expected: u32 },

    /// A lookup for a workflow id that is not in the dataset.
    #[error("workflow not found: {id}")]
    WorkflowNotFound { id: String },
}

impl DatasetError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound { .. } => ErrorCode::DatasetNotFound,
            Self::Io { .. } => ErrorCode::InternalUnexpected,
            Self::Parse(_) => ErrorCode::DatasetParseError,
            Self::UnsupportedSchemaVersion { .. } => ErrorCode::UnsupportedSchemaVersion,
            Self::WorkflowNotFound { .. } => ErrorCode::WorkflowNotFound,
        }
    }
}
