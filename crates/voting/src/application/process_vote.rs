//! Process Vote Use Case
//!
//! Worker-side handler for votes drained from the queue: durable
//! persistence first, then counter maintenance.

use std::sync::Arc;
use std::time::Instant;

use kernel::clock::Clock;
use platform::metrics;

use crate::application::counters;
use crate::domain::entities::Vote;
use crate::domain::repository::{CounterStore, VoteHandler, VoteRepository};
use crate::error::VotingResult;

/// Process Vote Use Case
pub struct ProcessVoteUseCase<R, C>
where
    R: VoteRepository,
    C: CounterStore,
{
    votes: Arc<R>,
    counters: Option<Arc<C>>,
    clock: Arc<dyn Clock>,
}

impl<R, C> ProcessVoteUseCase<R, C>
where
    R: VoteRepository,
    C: CounterStore,
{
    pub fn new(votes: Arc<R>, counters: Option<Arc<C>>, clock: Arc<dyn Clock>) -> Self {
        Self {
            votes,
            counters,
            clock,
        }
    }

    pub async fn execute(&self, mut vote: Vote) -> VotingResult<()> {
        let started = Instant::now();

        // Payloads that bypassed intake arrive without a timestamp.
        if vote.created_at.is_none() {
            vote.created_at = Some(self.clock.now());
        }

        self.votes.register(&vote).await?;

        if let Some(store) = &self.counters {
            store
                .increment(&counters::polling_total_key(&vote.polling_id), 1)
                .await?;
            store
                .increment(
                    &counters::contestant_key(&vote.polling_id, &vote.contestant_id),
                    1,
                )
                .await?;
        }

        metrics::inc_vote_processed();
        metrics::observe_processing_duration(started.elapsed().as_secs_f64());

        tracing::debug!(vote_id = %vote.id, polling_id = %vote.polling_id, "Vote processed");

        Ok(())
    }
}

impl<R, C> VoteHandler for ProcessVoteUseCase<R, C>
where
    R: VoteRepository + Sync,
    C: CounterStore + Sync,
{
    async fn handle(&self, vote: Vote) -> VotingResult<()> {
        self.execute(vote).await
    }
}
