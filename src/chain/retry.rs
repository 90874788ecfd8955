//! Retry policies for gateway HTTP requests.

use std::time::Duration;

/// Retry policy for a single gateway request.
#[derive(Debug, Clone, Default)]
pub enum RetryPolicy {
    /// No retries. The default, and the only safe choice for submissions.
    #[default]
    None,
    /// Retry transport failures and 429/502/503/504 with backoff.
    /// Used for reads (queries, account lookups, event pages, result polls).
    Idempotent,
    /// Caller-provided retry behavior.
    Custom(RetryConfig),
}

/// Backoff configuration.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retry attempts beyond the initial request.
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    /// Multiplier applied per attempt.
    pub backoff_factor: f64,
    /// Spread delays ±25% to avoid thundering herds.
    pub jitter: bool,
    /// HTTP status codes that trigger a retry.
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(10),
            backoff_factor: 2.0,
            jitter: true,
            retryable_statuses: vec![502, 503, 504],
        }
    }
}

impl RetryConfig {
    /// The config behind [`RetryPolicy::Idempotent`].
    pub fn idempotent() -> Self {
        Self {
            retryable_statuses: vec![429, 502, 503, 504],
            ..Self::default()
        }
    }

    /// Delay before retry number `attempt` (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base =
            self.initial_delay.as_millis() as f64 * self.backoff_factor.powi(attempt as i32);
        let capped = base.min(self.max_delay.as_millis() as f64);

        let final_ms = if self.jitter {
            let spread = capped * 0.25;
            let offset = (rand::random::<f64>() - 0.5) * 2.0 * spread;
            (capped + offset).max(0.0)
        } else {
            capped
        };

        Duration::from_millis(final_ms as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_none() {
        assert!(matches!(RetryPolicy::default(), RetryPolicy::None));
    }

    #[test]
    fn test_idempotent_retries_rate_limits() {
        let config = RetryConfig::idempotent();
        for status in [429, 502, 503, 504] {
            assert!(config.retryable_statuses.contains(&status));
        }
        assert!(!config.retryable_statuses.contains(&400));
    }

    #[test]
    fn test_delay_doubles_without_jitter() {
        let config = RetryConfig {
            jitter: false,
            initial_delay: Duration::from_millis(100),
            ..RetryConfig::default()
        };
        assert_eq!(config.delay_for_attempt(0).as_millis(), 100);
        assert_eq!(config.delay_for_attempt(1).as_millis(), 200);
        assert_eq!(config.delay_for_attempt(2).as_millis(), 400);
    }

    #[test]
    fn test_delay_caps_at_max() {
        let config = RetryConfig {
            jitter: false,
            initial_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(2000),
            backoff_factor: 10.0,
            ..RetryConfig::default()
        };
        assert_eq!(config.delay_for_attempt(3).as_millis(), 2000);
    }
}
