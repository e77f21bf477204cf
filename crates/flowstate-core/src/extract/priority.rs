use crate::event::{ActivityEvent, EventType};
use crate::model::ParseEnumError;
use crate::order::Timeline;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Priority derived from issue labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    P1,
    P2,
    P3,
}

impl Priority {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::P1 => "p1",
            Self::P2 => "p2",
            Self::P3 => "p3",
        }
    }

    /// Upper-case badge text.
    #[must_use]
    pub const fn badge(self) -> &'static str {
        match self {
            Self::P1 => "P1",
            Self::P2 => "P2",
            Self::P3 => "P3",
        }
    }

    /// Match a whole label against `p1`..`p3`, case-insensitively.
    ///
    /// Surrounding text is not tolerated: `p1-urgent` and ` p1` are not
    /// priority labels.
    #[must_use]
    pub fn parse_label(label: &str) -> Option<Self> {
        match label.as_bytes() {
            [b'p' | b'P', b'1'] => Some(Self::P1),
            [b'p' | b'P', b'2'] => Some(Self::P2),
            [b'p' | b'P', b'3'] => Some(Self::P3),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_label(s.trim()).ok_or_else(|| ParseEnumError {
            expected: "priority",
            got: s.to_string(),
        })
    }
}

/// First priority label added to the issue, in sequence order.
///
/// Only `issue.labeled` events are consulted. A later label never overrides
/// an earlier one.
#[must_use]
pub fn priority_from_events<'a, I>(events: I) -> Option<Priority>
where
    I: IntoIterator<Item = &'a ActivityEvent>,
{
    Timeline::new(events)
        .chronological()
        .filter(|e| e.event_type == EventType::IssueLabeled)
        .flat_map(ActivityEvent::labels_added)
        .find_map(|label| Priority::parse_label(label))
}
