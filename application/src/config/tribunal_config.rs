//! Tribunal behavior parameters.
//!
//! [`TribunalConfig`] groups the static parameters that control how
//! accusations run. These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Longest communication suspension the platform accepts (28 days)
pub const PLATFORM_MAX_TIMEOUT_MINUTES: u64 = 28 * 24 * 60;

/// [`PLATFORM_MAX_TIMEOUT_MINUTES`] as a duration
pub const PLATFORM_MAX_TIMEOUT: Duration = Duration::from_secs(PLATFORM_MAX_TIMEOUT_MINUTES * 60);

/// Accusation and enforcement parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TribunalConfig {
    /// Longest vote window an accuser may request, in minutes.
    ///
    /// The accused is suspended for the whole window, so this cannot exceed
    /// the platform's own timeout limit.
    pub max_duration_minutes: u64,
    /// Length of the suspension applied when `timeout` wins.
    pub penalty_timeout: Duration,
    /// Length of a knockout.
    pub knockout_timeout: Duration,
}

impl Default for TribunalConfig {
    fn default() -> Self {
        Self {
            max_duration_minutes: PLATFORM_MAX_TIMEOUT_MINUTES,
            penalty_timeout: Duration::from_secs(24 * 60 * 60),
            knockout_timeout: Duration::from_secs(24 * 60 * 60),
        }
    }
}

impl TribunalConfig {
    // ==================== Builder Methods ====================

    pub fn with_max_duration_minutes(mut self, minutes: u64) -> Self {
        self.max_duration_minutes = minutes.min(PLATFORM_MAX_TIMEOUT_MINUTES);
        self
    }

    pub fn with_penalty_timeout(mut self, timeout: Duration) -> Self {
        self.penalty_timeout = timeout.min(PLATFORM_MAX_TIMEOUT);
        self
    }

    pub fn with_knockout_timeout(mut self, timeout: Duration) -> Self {
        self.knockout_timeout = timeout.min(PLATFORM_MAX_TIMEOUT);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TribunalConfig::default();
        assert_eq!(config.max_duration_minutes, 40320);
        assert_eq!(config.penalty_timeout, Duration::from_secs(86400));
    }

    #[test]
    fn test_max_duration_capped_at_platform_limit() {
        let config = TribunalConfig::default().with_max_duration_minutes(1_000_000);
        assert_eq!(config.max_duration_minutes, PLATFORM_MAX_TIMEOUT_MINUTES);

        let config = TribunalConfig::default().with_max_duration_minutes(60);
        assert_eq!(config.max_duration_minutes, 60);
    }

    #[test]
    fn test_suspensions_capped_at_platform_limit() {
        let year = Duration::from_secs(365 * 24 * 60 * 60);
        let config = TribunalConfig::default()
            .with_penalty_timeout(year)
            .with_knockout_timeout(year);
        assert_eq!(config.penalty_timeout, PLATFORM_MAX_TIMEOUT);
        assert_eq!(config.knockout_timeout, PLATFORM_MAX_TIMEOUT);
    }
}
