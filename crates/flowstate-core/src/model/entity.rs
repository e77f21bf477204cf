use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::{ParseEnumError, normalize};

/// Source system of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Code host (pull requests, reviews, CI).
    Github,
    /// Issue tracker.
    Linear,
}

impl Provider {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Github => "github",
            Self::Linear => "linear",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "github" => Ok(Self::Github),
            "linear" => Ok(Self::Linear),
            _ => Err(ParseEnumError {
                expected: "provider",
                got: s.to_string(),
            }),
        }
    }
}

/// What an event is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Issue,
    PullRequest,
    Review,
    CheckRun,
    Commit,
}

/// The subject of an event. Attached to exactly one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub provider: Provider,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Issue tracker key, e.g. `BOT-5001`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl EntityRef {
    /// A bare entity with only kind and provider set.
    #[must_use]
    pub const fn new(kind: EntityKind, provider: Provider) -> Self {
        Self {
            kind,
            provider,
            id: None,
            key: None,
            owner: None,
            repo: None,
            number: None,
            title: None,
            url: None,
        }
    }

    /// The entity URL, treating an empty or whitespace-only string as absent.
    #[must_use]
    pub fn non_empty_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_minimal_json() {
        let json = r#"{"kind":"pull_request","provider":"github"}"#;
        let entity: EntityRef = serde_json::from_str(json).expect("deserialize");
        assert_eq!(
            entity,
            EntityRef::new(EntityKind::PullRequest, Provider::Github)
        );
    }

    #[test]
    fn empty_url_is_absent() {
        let mut entity = EntityRef::new(EntityKind::PullRequest, Provider::Github);
        entity.url = Some("   ".into());
        assert!(entity.non_empty_url().is_none());

        entity.url = Some("https://github.com/acme/api/pull/7".into());
        assert_eq!(
            entity.non_empty_url(),
            Some("https://github.com/acme/api/pull/7")
        );
    }

    #[test]
    fn provider_fromstr() {
        assert_eq!("GitHub".parse::<Provider>(), Ok(Provider::Github));
        assert!("jira".parse::<Provider>().is_err());
    }
}
