use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::{ParseEnumError, normalize};

/// Who produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorType {
    /// A person.
    Human,
    /// The automated agent doing the development work.
    #[serde(
        alias = "automated_agent",
        alias = "automated-agent",
        alias = "charlie"
    )]
    Agent,
    /// Any other automation (CI, dependency bots, integrations).
    Bot,
}

impl ActorType {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Human => "human",
            Self::Agent => "agent",
            Self::Bot => "bot",
        }
    }
}

impl fmt::Display for ActorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActorType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "human" => Ok(Self::Human),
            "agent" | "automated_agent" | "charlie" => Ok(Self::Agent),
            "bot" => Ok(Self::Bot),
            _ => Err(ParseEnumError {
                expected: "actor type",
                got: s.to_string(),
            }),
        }
    }
}

/// Identity of the producer of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    /// Platform user id or stable pseudo id.
    pub id: String,

    pub display_name: String,

    /// Provider login, e.g. a GitHub handle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,

    #[serde(rename = "type")]
    pub actor_type: ActorType,
}

impl Actor {
    #[must_use]
    pub fn is_human(&self) -> bool {
        self.actor_type == ActorType::Human
    }

    /// Handle when present, display name otherwise.
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.handle.as_deref().unwrap_or(&self.display_name)
    }
}
