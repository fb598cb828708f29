//! Create Polling Use Case

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::clock::Clock;
use kernel::id::IdGenerator;

use crate::domain::entities::{Contestant, Polling};
use crate::domain::repository::{ContestantRepository, PollingRepository};
use crate::error::{VotingError, VotingResult};

/// Input DTO for polling creation
#[derive(Debug, Clone)]
pub struct CreatePollingInput {
    pub name: String,
    pub description: String,
    /// Defaults to `now` when absent
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: DateTime<Utc>,
    pub contestants: Vec<NewContestant>,
}

#[derive(Debug, Clone)]
pub struct NewContestant {
    pub name: String,
    pub photo_url: Option<String>,
}

/// Create Polling Use Case
///
/// Validates and persists a polling together with its contestants as
/// one logical transaction.
pub struct CreatePollingUseCase<P, C>
where
    P: PollingRepository,
    C: ContestantRepository,
{
    pollings: Arc<P>,
    contestants: Arc<C>,
    clock: Arc<dyn Clock>,
    ids: Arc<IdGenerator>,
}

impl<P, C> CreatePollingUseCase<P, C>
where
    P: PollingRepository,
    C: ContestantRepository,
{
    pub fn new(
        pollings: Arc<P>,
        contestants: Arc<C>,
        clock: Arc<dyn Clock>,
        ids: Arc<IdGenerator>,
    ) -> Self {
        Self {
            pollings,
            contestants,
            clock,
            ids,
        }
    }

    pub async fn execute(&self, input: CreatePollingInput) -> VotingResult<Polling> {
        if input.name.trim().is_empty() {
            return Err(VotingError::InvalidPolling("name is required".to_string()));
        }
        if input.contestants.len() < 2 {
            return Err(VotingError::InvalidPolling(
                "at least two contestants are required".to_string(),
            ));
        }
        if input.contestants.iter().any(|c| c.name.trim().is_empty()) {
            return Err(VotingError::InvalidPolling(
                "contestant name is required".to_string(),
            ));
        }

        let now = self.clock.now();
        let starts_at = input.starts_at.unwrap_or(now);
        if input.ends_at <= starts_at {
            return Err(VotingError::InvalidPolling(
                "ends_at must be after starts_at".to_string(),
            ));
        }

        let polling = Polling {
            id: self.ids.next(),
            name: input.name,
            description: input.description,
            starts_at,
            ends_at: input.ends_at,
            active: true,
            created_at: now,
            updated_at: now,
            contestants: Vec::new(),
        };

        let contestants: Vec<Contestant> = input
            .contestants
            .into_iter()
            .map(|new| Contestant {
                id: self.ids.next(),
                polling_id: polling.id.clone(),
                name: new.name,
                photo_url: new.photo_url,
                created_at: now,
                updated_at: now,
            })
            .collect();

        self.pollings.create(&polling).await?;
        self.contestants
            .bulk_create(&polling.id, &contestants)
            .await?;

        tracing::info!(
            polling_id = %polling.id,
            contestants = contestants.len(),
            "Polling created"
        );

        Ok(Polling {
            contestants,
            ..polling
        })
    }
}
