//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::create_polling::{CreatePollingInput, NewContestant};
use crate::domain::entities::{Contestant, HourlyCount, Polling, TallyRow};

/// Request for POST /votes
#[derive(Debug, Clone, Deserialize)]
pub struct VoteRequest {
    pub polling_id: String,
    pub contestant_id: String,
}

/// Response for POST /votes
#[derive(Debug, Clone, Serialize)]
pub struct VoteAccepted {
    pub status: &'static str,
}

impl VoteAccepted {
    pub fn new() -> Self {
        Self { status: "accepted" }
    }
}

impl Default for VoteAccepted {
    fn default() -> Self {
        Self::new()
    }
}

/// Request for POST /pollings
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePollingRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: DateTime<Utc>,
    pub contestants: Vec<CreateContestantRequest>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateContestantRequest {
    pub name: String,
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl From<CreatePollingRequest> for CreatePollingInput {
    fn from(req: CreatePollingRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            starts_at: req.starts_at,
            ends_at: req.ends_at,
            contestants: req
                .contestants
                .into_iter()
                .map(|c| NewContestant {
                    name: c.name,
                    photo_url: c.photo_url,
                })
                .collect(),
        }
    }
}

/// Polling with contestants, for GET /pollings and POST /pollings
#[derive(Debug, Clone, Serialize)]
pub struct PollingResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub active: bool,
    pub contestants: Vec<ContestantResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContestantResponse {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl From<Polling> for PollingResponse {
    fn from(polling: Polling) -> Self {
        Self {
            id: polling.id.into_string(),
            name: polling.name,
            description: polling.description,
            starts_at: polling.starts_at,
            ends_at: polling.ends_at,
            active: polling.active,
            contestants: polling
                .contestants
                .into_iter()
                .map(ContestantResponse::from)
                .collect(),
        }
    }
}

impl From<Contestant> for ContestantResponse {
    fn from(contestant: Contestant) -> Self {
        Self {
            id: contestant.id.into_string(),
            name: contestant.name,
            photo_url: contestant.photo_url,
        }
    }
}

/// One row of GET /pollings/{id}/tally
#[derive(Debug, Clone, Serialize)]
pub struct TallyRowResponse {
    pub contestant_id: String,
    pub count: i64,
    pub percent: f64,
}

impl From<TallyRow> for TallyRowResponse {
    fn from(row: TallyRow) -> Self {
        Self {
            contestant_id: row.contestant_id.into_string(),
            count: row.count,
            percent: row.percent,
        }
    }
}

/// One row of GET /pollings/{id}/hourly
#[derive(Debug, Clone, Serialize)]
pub struct HourlyCountResponse {
    pub hour: DateTime<Utc>,
    pub count: i64,
}

impl From<HourlyCount> for HourlyCountResponse {
    fn from(row: HourlyCount) -> Self {
        Self {
            hour: row.hour,
            count: row.count,
        }
    }
}
