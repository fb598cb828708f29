//! List Active Pollings Use Case

use std::sync::Arc;

use crate::domain::entities::Polling;
use crate::domain::repository::{ContestantRepository, PollingRepository};
use crate::error::VotingResult;

/// List Active Pollings Use Case
pub struct ListActivePollingsUseCase<P, C>
where
    P: PollingRepository,
    C: ContestantRepository,
{
    pollings: Arc<P>,
    contestants: Arc<C>,
}

impl<P, C> ListActivePollingsUseCase<P, C>
where
    P: PollingRepository,
    C: ContestantRepository,
{
    pub fn new(pollings: Arc<P>, contestants: Arc<C>) -> Self {
        Self {
            pollings,
            contestants,
        }
    }

    /// Returns open pollings, each with its contestants loaded.
    pub async fn execute(&self) -> VotingResult<Vec<Polling>> {
        let mut pollings = self.pollings.list_active().await?;

        for polling in &mut pollings {
            polling.contestants = self.contestants.list_by_polling(&polling.id).await?;
        }

        Ok(pollings)
    }
}
