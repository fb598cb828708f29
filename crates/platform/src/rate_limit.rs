//! Rate Limiting Configuration
//!
//! Settings for the fixed-window anti-fraud limiter.

use std::time::Duration;

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Master switch from configuration
    pub enabled: bool,
    /// Maximum votes allowed per fingerprint in the window
    pub max_votes: u32,
    /// Fixed window duration
    pub window: Duration,
    /// Prefix applied to rate-limit cells in the fast store
    pub key_prefix: String,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_votes: 30,
            window: Duration::from_secs(60),
            key_prefix: "ratelimit".to_string(),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_votes: u32, window_secs: u64) -> Self {
        Self {
            max_votes,
            window: Duration::from_secs(window_secs),
            ..Self::default()
        }
    }

    pub fn window_secs(&self) -> i64 {
        self.window.as_secs() as i64
    }

    /// A non-positive limit or window disables the limiter entirely.
    pub fn is_active(&self) -> bool {
        self.enabled && self.max_votes > 0 && !self.window.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RateLimitConfig::default();
        assert!(config.enabled);
        assert_eq!(config.max_votes, 30);
        assert_eq!(config.window, Duration::from_secs(60));
        assert_eq!(config.key_prefix, "ratelimit");
        assert!(config.is_active());
    }

    #[test]
    fn test_is_active_edge_cases() {
        let mut config = RateLimitConfig::new(2, 60);
        assert!(config.is_active());

        config.enabled = false;
        assert!(!config.is_active());

        config.enabled = true;
        config.max_votes = 0;
        assert!(!config.is_active());

        config.max_votes = 2;
        config.window = Duration::ZERO;
        assert!(!config.is_active());
    }

    #[test]
    fn test_window_secs() {
        let config = RateLimitConfig::new(5, 90);
        assert_eq!(config.window_secs(), 90);
    }
}
