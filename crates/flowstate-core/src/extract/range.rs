use crate::event::{ActivityEvent, EventType};
use crate::model::{ParseEnumError, normalize};
use crate::order::Timeline;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Creation-date window for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateRange {
    #[serde(rename = "last-24h", alias = "24h")]
    Last24h,
    #[serde(rename = "last-7d", alias = "7d")]
    Last7d,
    #[serde(rename = "last-30d", alias = "30d")]
    Last30d,
    #[default]
    #[serde(rename = "all-time", alias = "all")]
    AllTime,
}

impl DateRange {
    pub const ALL: [Self; 4] = [Self::Last24h, Self::Last7d, Self::Last30d, Self::AllTime];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Last24h => "last-24h",
            Self::Last7d => "last-7d",
            Self::Last30d => "last-30d",
            Self::AllTime => "all-time",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Last24h => "Last 24 hours",
            Self::Last7d => "Last 7 days",
            Self::Last30d => "Last 30 days",
            Self::AllTime => "All time",
        }
    }

    /// Window length in whole days; `None` is unbounded.
    #[must_use]
    pub fn window(self) -> Option<Duration> {
        match self {
            Self::Last24h => Some(Duration::days(1)),
            Self::Last7d => Some(Duration::days(7)),
            Self::Last30d => Some(Duration::days(30)),
            Self::AllTime => None,
        }
    }

    /// Membership for a known or unknown creation instant.
    ///
    /// Inclusive at the window edge. An unknown creation date is always
    /// inside, so undated workflows are never hidden.
    #[must_use]
    pub fn contains(self, created: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        match (self.window(), created) {
            (Some(window), Some(created)) => now.signed_duration_since(created) <= window,
            _ => true,
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateRange {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "last_24h" | "24h" | "1d" => Ok(Self::Last24h),
            "last_7d" | "7d" => Ok(Self::Last7d),
            "last_30d" | "30d" => Ok(Self::Last30d),
            "all_time" | "all" => Ok(Self::AllTime),
            _ => Err(ParseEnumError {
                expected: "date range",
                got: s.to_string(),
            }),
        }
    }
}

/// Timestamp of the lowest-sequence `issue.created` event.
#[must_use]
pub fn creation_date<'a, I>(events: I) -> Option<DateTime<Utc>>
where
    I: IntoIterator<Item = &'a ActivityEvent>,
{
    Timeline::new(events)
        .earliest_of(EventType::IssueCreated)
        .map(|e| e.timestamp)
}

/// Whether a workflow created by `events` falls inside `range`.
#[must_use]
pub fn is_in_date_range<'a, I>(events: I, range: DateRange, now: DateTime<Utc>) -> bool
where
    I: IntoIterator<Item = &'a ActivityEvent>,
{
    if range == DateRange::AllTime {
        return true;
    }
    range.contains(creation_date(events), now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 1, 9, 0, 0)
            .single()
            .expect("valid")
    }

    #[test]
    fn parses_long_and_short_forms() {
        for range in DateRange::ALL {
            assert_eq!(range.as_str().parse::<DateRange>(), Ok(range));
        }
        assert_eq!("24h".parse::<DateRange>(), Ok(DateRange::Last24h));
        assert_eq!("7D".parse::<DateRange>(), Ok(DateRange::Last7d));
        assert_eq!("all".parse::<DateRange>(), Ok(DateRange::AllTime));
        assert!("last-month".parse::<DateRange>().is_err());
    }

    #[test]
    fn serde_uses_kebab_names() {
        let value = serde_json::to_value(DateRange::Last30d).expect("serialize");
        assert_eq!(value, serde_json::json!("last-30d"));
        let parsed: DateRange = serde_json::from_value(serde_json::json!("7d")).expect("alias");
        assert_eq!(parsed, DateRange::Last7d);
    }

    #[test]
    fn window_edge_is_inclusive() {
        let created = now() - Duration::days(7);
        assert!(DateRange::Last7d.contains(Some(created), now()));
        assert!(!DateRange::Last7d.contains(Some(created - Duration::seconds(1)), now()));
    }

    #[test]
    fn unknown_creation_is_inside() {
        for range in DateRange::ALL {
            assert!(range.contains(None, now()));
        }
    }

    #[test]
    fn default_is_all_time() {
        assert_eq!(DateRange::default(), DateRange::AllTime);
        assert_eq!(DateRange::AllTime.window(), None);
        assert_eq!(DateRange::Last24h.label(), "Last 24 hours");
    }
}
