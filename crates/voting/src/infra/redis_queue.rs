//! Redis Vote Queue
//!
//! FIFO of serialized votes on one Redis list: push at head, pop at
//! tail. Delivery is at-least-once; the pop removes the item before
//! the handler runs.

use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tokio_util::sync::CancellationToken;

use crate::domain::entities::Vote;
use crate::domain::repository::{VoteHandler, VoteQueue};
use crate::error::{VotingError, VotingResult};

/// Pop ceiling; keeps cancellation observable while the consumer blocks.
const POP_TIMEOUT_SECS: f64 = 5.0;

#[derive(Clone)]
pub struct RedisVoteQueue {
    conn: ConnectionManager,
    key: String,
}

impl RedisVoteQueue {
    pub fn new(conn: ConnectionManager, key: impl Into<String>) -> Self {
        Self {
            conn,
            key: key.into(),
        }
    }
}

impl VoteQueue for RedisVoteQueue {
    async fn publish(&self, vote: &Vote) -> VotingResult<()> {
        let payload = serde_json::to_string(vote).map_err(VotingError::MalformedPayload)?;

        let mut conn = self.conn.clone();
        let _: i64 = conn.lpush(&self.key, payload).await?;

        Ok(())
    }

    async fn consume<H>(&self, shutdown: CancellationToken, handler: &H) -> VotingResult<()>
    where
        H: VoteHandler + Sync,
    {
        let mut conn = self.conn.clone();

        loop {
            if shutdown.is_cancelled() {
                return Err(VotingError::Cancelled);
            }

            let popped: Option<(String, String)> = tokio::select! {
                _ = shutdown.cancelled() => return Err(VotingError::Cancelled),
                result = conn.brpop(&self.key, POP_TIMEOUT_SECS) => result?,
            };

            let Some((_, payload)) = popped else {
                // Timed-out pop; loop back so the token gets another look.
                continue;
            };

            let vote: Vote =
                serde_json::from_str(&payload).map_err(VotingError::MalformedPayload)?;

            // The vote is already off the queue here. A handler error
            // ends the loop and the item is gone unless the operator
            // re-publishes it.
            handler.handle(vote).await?;
        }
    }
}
