//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Environment configuration for both binaries
//! - Client identification (vote attribution)
//! - Hashing utilities (fingerprints, token comparison)
//! - Rate limiting configuration
//! - Prometheus instruments for the vote pipeline
//! - Store factories and readiness checks

pub mod client;
pub mod config;
pub mod crypto;
pub mod database;
pub mod health;
pub mod metrics;
pub mod rate_limit;
