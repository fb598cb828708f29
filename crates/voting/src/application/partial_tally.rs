//! Partial Tally Use Case

use std::sync::Arc;

use kernel::id::PollingId;

use crate::domain::entities::TallyRow;
use crate::domain::repository::{ContestantRepository, PollingRepository, VoteRepository};
use crate::error::VotingResult;

/// Partial Tally Use Case
///
/// Reads aggregate the tally store, not the fast counters, so the
/// result always equals the persisted truth.
pub struct PartialTallyUseCase<R>
where
    R: PollingRepository + ContestantRepository + VoteRepository,
{
    repo: Arc<R>,
}

impl<R> PartialTallyUseCase<R>
where
    R: PollingRepository + ContestantRepository + VoteRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// One row per contestant, zero-vote contestants included.
    pub async fn execute(&self, polling_id: &PollingId) -> VotingResult<Vec<TallyRow>> {
        self.repo.find_by_id(polling_id).await?;

        let contestants = self.repo.list_by_polling(polling_id).await?;
        let totals = self.repo.count_by_contestant(polling_id).await?;
        let grand_total: i64 = totals.values().sum();

        let rows = contestants
            .into_iter()
            .map(|contestant| {
                let count = totals.get(&contestant.id).copied().unwrap_or(0);
                let percent = if grand_total > 0 {
                    (count as f64 / grand_total as f64) * 100.0
                } else {
                    0.0
                };
                TallyRow {
                    polling_id: polling_id.clone(),
                    contestant_id: contestant.id,
                    count,
                    percent,
                }
            })
            .collect();

        Ok(rows)
    }
}
