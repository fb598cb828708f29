//! Voting Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - entities, derived tally types, port traits
//! - `application/` - use cases for intake, tally reads and the worker
//! - `infra/` - Postgres and Redis implementations of the ports
//! - `presentation/` - HTTP handlers
//!
//! ## Consistency Model
//! - Postgres is the authoritative tally store; every tally read
//!   aggregates it
//! - Redis counters are advisory fast-path state maintained by the
//!   worker
//! - The queue is at-least-once: a vote is durable once publish returns

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::process_vote::ProcessVoteUseCase;
pub use application::register_vote::RegisterVoteUseCase;
pub use error::{VotingError, VotingResult};
pub use infra::postgres::PgVotingRepository;
pub use presentation::router::voting_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
