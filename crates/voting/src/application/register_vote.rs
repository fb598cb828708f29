//! Register Vote Use Case
//!
//! The synchronous intake path: validation, window enforcement,
//! anti-fraud, then enqueue (or direct persistence when no queue is
//! wired in).

use std::sync::Arc;

use kernel::clock::Clock;
use kernel::id::{ContestantId, IdGenerator, PollingId, VoteId};

use crate::application::counters;
use crate::domain::entities::Vote;
use crate::domain::repository::{
    AntiFraud, ContestantRepository, CounterStore, PollingRepository, VoteQueue, VoteRepository,
};
use crate::error::{VotingError, VotingResult};

/// Input DTO for the intake path
#[derive(Debug, Clone)]
pub struct RegisterVoteInput {
    pub polling_id: PollingId,
    pub contestant_id: ContestantId,
    pub source_ip: String,
    pub user_agent: String,
}

/// Register Vote Use Case
pub struct RegisterVoteUseCase<R, Q, A, C>
where
    R: PollingRepository + ContestantRepository + VoteRepository,
    Q: VoteQueue,
    A: AntiFraud,
    C: CounterStore,
{
    repo: Arc<R>,
    queue: Option<Arc<Q>>,
    antifraud: Arc<A>,
    counters: Option<Arc<C>>,
    clock: Arc<dyn Clock>,
    ids: Arc<IdGenerator>,
}

impl<R, Q, A, C> RegisterVoteUseCase<R, Q, A, C>
where
    R: PollingRepository + ContestantRepository + VoteRepository,
    Q: VoteQueue,
    A: AntiFraud,
    C: CounterStore,
{
    pub fn new(
        repo: Arc<R>,
        queue: Option<Arc<Q>>,
        antifraud: Arc<A>,
        counters: Option<Arc<C>>,
        clock: Arc<dyn Clock>,
        ids: Arc<IdGenerator>,
    ) -> Self {
        Self {
            repo,
            queue,
            antifraud,
            counters,
            clock,
            ids,
        }
    }

    /// Returns the accepted vote with its assigned id and timestamp.
    pub async fn execute(&self, input: RegisterVoteInput) -> VotingResult<Vote> {
        if input.polling_id.is_empty() || input.contestant_id.is_empty() {
            return Err(VotingError::UnknownContestant);
        }

        let polling = self.repo.find_by_id(&input.polling_id).await?;

        let now = self.clock.now();
        if !polling.is_open_at(now) {
            return Err(VotingError::PollingClosed);
        }

        let contestants = self.repo.list_by_polling(&input.polling_id).await?;
        if !contestants.iter().any(|c| c.id == input.contestant_id) {
            return Err(VotingError::UnknownContestant);
        }

        let mut vote = Vote {
            id: VoteId::from_string(""),
            polling_id: input.polling_id,
            contestant_id: input.contestant_id,
            source_ip: input.source_ip,
            user_agent: input.user_agent,
            created_at: None,
        };

        self.antifraud.validate(&vote).await?;

        vote.id = self.ids.next();
        vote.created_at = Some(now);

        if let Some(queue) = &self.queue {
            // Asynchronous mode: publishing is enough, the worker owns
            // persistence and counters.
            queue.publish(&vote).await?;
            tracing::debug!(vote_id = %vote.id, polling_id = %vote.polling_id, "Vote enqueued");
            return Ok(vote);
        }

        self.repo.register(&vote).await?;

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

        Ok(vote)
    }
}
