//! Hourly Tally Use Case

use std::sync::Arc;

use kernel::id::PollingId;

use crate::domain::entities::HourlyCount;
use crate::domain::repository::{PollingRepository, VoteRepository};
use crate::error::VotingResult;

/// Hourly Tally Use Case
pub struct HourlyTallyUseCase<R>
where
    R: PollingRepository + VoteRepository,
{
    repo: Arc<R>,
}

impl<R> HourlyTallyUseCase<R>
where
    R: PollingRepository + VoteRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// UTC hour buckets ordered ascending, straight from the tally store.
    pub async fn execute(&self, polling_id: &PollingId) -> VotingResult<Vec<HourlyCount>> {
        self.repo.find_by_id(polling_id).await?;
        self.repo.count_by_hour(polling_id).await
    }
}
