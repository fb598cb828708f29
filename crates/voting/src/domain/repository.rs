//! Port Traits
//!
//! Interfaces the use cases depend on. Implementations live in the
//! infrastructure layer (Postgres, Redis) and in test doubles.

use std::collections::HashMap;

use kernel::id::{ContestantId, PollingId};
use tokio_util::sync::CancellationToken;

use crate::domain::entities::{Contestant, HourlyCount, Polling, Vote};
use crate::error::VotingResult;

/// Polling repository trait
#[trait_variant::make(PollingRepository: Send)]
pub trait LocalPollingRepository {
    /// Persist a new polling (without its contestants)
    async fn create(&self, polling: &Polling) -> VotingResult<()>;

    /// Update the mutable fields of a polling
    async fn update(&self, polling: &Polling) -> VotingResult<()>;

    /// Fetch one polling with contestants eagerly loaded.
    /// Signals `PollingNotFound` when absent.
    async fn find_by_id(&self, id: &PollingId) -> VotingResult<Polling>;

    /// Pollings that are active and inside their voting window, ordered
    /// by `starts_at` ascending. Contestants are not loaded.
    async fn list_active(&self) -> VotingResult<Vec<Polling>>;
}

/// Contestant repository trait
#[trait_variant::make(ContestantRepository: Send)]
pub trait LocalContestantRepository {
    /// Persist the contestants of one polling in a single statement
    async fn bulk_create(
        &self,
        polling_id: &PollingId,
        contestants: &[Contestant],
    ) -> VotingResult<()>;

    /// Contestants of one polling ordered by name ascending
    async fn list_by_polling(&self, polling_id: &PollingId) -> VotingResult<Vec<Contestant>>;
}

/// Vote repository trait (authoritative tally store)
#[trait_variant::make(VoteRepository: Send)]
pub trait LocalVoteRepository {
    /// Insert one vote. A replay of the same `vote.id` violates the
    /// primary key and surfaces as a database error.
    async fn register(&self, vote: &Vote) -> VotingResult<()>;

    /// Total persisted votes for one polling
    async fn count_by_polling(&self, polling_id: &PollingId) -> VotingResult<i64>;

    /// Persisted votes grouped by contestant
    async fn count_by_contestant(
        &self,
        polling_id: &PollingId,
    ) -> VotingResult<HashMap<ContestantId, i64>>;

    /// Vote counts per UTC hour bucket, ordered ascending
    async fn count_by_hour(&self, polling_id: &PollingId) -> VotingResult<Vec<HourlyCount>>;
}

/// Fast integer counter store
#[trait_variant::make(CounterStore: Send)]
pub trait LocalCounterStore {
    /// Atomic add; returns the new value
    async fn increment(&self, key: &str, delta: i64) -> VotingResult<i64>;

    /// Missing keys read as zero
    async fn get(&self, key: &str) -> VotingResult<i64>;

    /// Multi-get so a tally page renders in one round-trip
    async fn get_many(&self, keys: &[String]) -> VotingResult<HashMap<String, i64>>;
}

/// Per-vote callback driven by [`VoteQueue::consume`]
#[trait_variant::make(VoteHandler: Send)]
pub trait LocalVoteHandler {
    async fn handle(&self, vote: Vote) -> VotingResult<()>;
}

/// Durable FIFO of serialized votes
#[trait_variant::make(VoteQueue: Send)]
pub trait LocalVoteQueue {
    /// Append one vote to the FIFO. The vote is durable once this
    /// returns successfully.
    async fn publish(&self, vote: &Vote) -> VotingResult<()>;

    /// Block on the queue, handing votes to `handler` one at a time.
    /// Stops with `Cancelled` when the token fires, or with the first
    /// decode or handler error. The popped vote is already off the
    /// queue when the handler sees it.
    async fn consume<H>(&self, shutdown: CancellationToken, handler: &H) -> VotingResult<()>
    where
        H: VoteHandler + Sync;
}

/// Anti-fraud validation of one vote
#[trait_variant::make(AntiFraud: Send)]
pub trait LocalAntiFraud {
    /// `Ok` admits the vote; `RateLimited` rejects it; transport
    /// failures surface unchanged.
    async fn validate(&self, vote: &Vote) -> VotingResult<()>;
}
