//! Infrastructure Layer
//!
//! Postgres and Redis implementations of the domain ports.

pub mod postgres;
pub mod redis_counter;
pub mod redis_limiter;
pub mod redis_queue;
