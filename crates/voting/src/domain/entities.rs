//! Domain Entities

use chrono::{DateTime, Utc};
use kernel::id::{ContestantId, PollingId, VoteId};
use serde::{Deserialize, Serialize};

/// A time-boxed contest between two or more contestants
#[derive(Debug, Clone)]
pub struct Polling {
    pub id: PollingId,
    pub name: String,
    pub description: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub contestants: Vec<Contestant>,
}

impl Polling {
    /// A polling accepts votes while it is active and `now` falls
    /// inside the inclusive `[starts_at, ends_at]` window.
    pub fn is_open_at(&self, now: DateTime<Utc>) -> bool {
        self.active && now >= self.starts_at && now <= self.ends_at
    }
}

/// An entity within a polling that can receive votes
#[derive(Debug, Clone)]
pub struct Contestant {
    pub id: ContestantId,
    pub polling_id: PollingId,
    pub name: String,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single endorsement of one contestant in one polling
///
/// This struct is also the queue wire format: serialized as a
/// self-describing JSON object. Unknown fields are tolerated for
/// forward compatibility; missing required fields fail deserialization
/// and are fatal to the consumer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vote {
    pub id: VoteId,
    pub polling_id: PollingId,
    pub contestant_id: ContestantId,
    #[serde(default)]
    pub source_ip: String,
    #[serde(default)]
    pub user_agent: String,
    /// Set on acceptance by intake; `None` marks a payload that
    /// bypassed it.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Current count and share for one contestant of a polling
#[derive(Debug, Clone, PartialEq)]
pub struct TallyRow {
    pub polling_id: PollingId,
    pub contestant_id: ContestantId,
    pub count: i64,
    pub percent: f64,
}

/// Votes aggregated into one UTC hour bucket
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyCount {
    pub polling_id: PollingId,
    pub hour: DateTime<Utc>,
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};

    fn polling_between(starts_at: DateTime<Utc>, ends_at: DateTime<Utc>, active: bool) -> Polling {
        Polling {
            id: PollingId::from_string("01H0P"),
            name: "Finale".to_string(),
            description: String::new(),
            starts_at,
            ends_at,
            active,
            created_at: starts_at,
            updated_at: starts_at,
            contestants: Vec::new(),
        }
    }

    #[test]
    fn test_window_is_inclusive_on_both_ends() {
        let starts = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        let ends = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let polling = polling_between(starts, ends, true);

        assert!(polling.is_open_at(starts));
        assert!(polling.is_open_at(ends));
        assert!(polling.is_open_at(starts + TimeDelta::hours(1)));
        assert!(!polling.is_open_at(starts - TimeDelta::nanoseconds(1)));
        assert!(!polling.is_open_at(ends + TimeDelta::nanoseconds(1)));
    }

    #[test]
    fn test_inactive_polling_is_closed() {
        let starts = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        let ends = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let polling = polling_between(starts, ends, false);

        assert!(!polling.is_open_at(starts + TimeDelta::hours(1)));
    }
}
