//! Configuration for the refresh engine.

use std::time::Duration;

/// Configuration shared by every repository of an engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Concurrent refreshes of the same scope share one remote call.
    pub coalesce_refreshes: bool,
    /// Ask the server for re-shares when listing shares of a file.
    pub fetch_reshares: bool,
    /// Ask the server for shares of items below a folder.
    pub fetch_subfiles: bool,
    /// Retry configuration for remote calls.
    pub retry: RetryConfig,
}

impl EngineConfig {
    /// Creates a configuration with defaults.
    pub fn new() -> Self {
        Self {
            coalesce_refreshes: true,
            fetch_reshares: true,
            fetch_subfiles: false,
            retry: RetryConfig::no_retry(),
        }
    }

    /// Enables or disables refresh coalescing.
    pub fn with_coalesce_refreshes(mut self, coalesce: bool) -> Self {
        self.coalesce_refreshes = coalesce;
        self
    }

    /// Sets whether re-shares are listed.
    pub fn with_fetch_reshares(mut self, reshares: bool) -> Self {
        self.fetch_reshares = reshares;
        self
    }

    /// Sets whether shares of sub-items are listed.
    pub fn with_fetch_subfiles(mut self, subfiles: bool) -> Self {
        self.fetch_subfiles = subfiles;
        self
    }

    /// Sets the retry configuration.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for retry behavior.
///
/// Only failures the remote error reports as retryable are retried.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts, the first one included.
    pub max_attempts: u32,
    /// Initial delay between retries.
    pub initial_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
    /// Multiplier for exponential backoff.
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    /// Creates a new retry configuration.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
        }
    }

    /// Creates a configuration with no retries.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            backoff_multiplier: 1.0,
        }
    }

    /// Sets the initial delay.
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Sets the maximum delay.
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Sets the backoff multiplier. Values below 1.0, and NaN, become 1.0.
    pub fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier.max(1.0);
        self
    }

    /// Calculates the delay before a given attempt (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let base_delay = self.initial_delay.as_secs_f64()
            * self.backoff_multiplier.powi(attempt.saturating_sub(1) as i32);

        Duration::try_from_secs_f64(base_delay.min(self.max_delay.as_secs_f64()))
            .unwrap_or(self.max_delay)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::no_retry()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_config_builder() {
        let config = EngineConfig::new()
            .with_coalesce_refreshes(false)
            .with_fetch_subfiles(true)
            .with_retry(RetryConfig::new(3));

        assert!(!config.coalesce_refreshes);
        assert!(config.fetch_reshares);
        assert!(config.fetch_subfiles);
        assert_eq!(config.retry.max_attempts, 3);
    }

    #[test]
    fn default_does_not_retry() {
        let config = EngineConfig::default();
        assert!(config.coalesce_refreshes);
        assert_eq!(config.retry.max_attempts, 1);
        assert_eq!(RetryConfig::new(0).max_attempts, 1);
    }

    #[test]
    fn retry_delay_calculation() {
        let config = RetryConfig::new(5)
            .with_initial_delay(Duration::from_millis(100))
            .with_backoff_multiplier(2.0);

        assert_eq!(config.delay_for_attempt(0), Duration::ZERO);
        assert_eq!(config.delay_for_attempt(1), Duration::from_millis(100));
        assert_eq!(config.delay_for_attempt(2), Duration::from_millis(200));
        assert_eq!(config.delay_for_attempt(3), Duration::from_millis(400));
    }

    #[test]
    fn retry_delay_respects_max() {
        let config = RetryConfig::new(10)
            .with_initial_delay(Duration::from_secs(1))
            .with_max_delay(Duration::from_secs(5))
            .with_backoff_multiplier(10.0);

        assert_eq!(config.delay_for_attempt(5), Duration::from_secs(5));
    }

    #[test]
    fn invalid_multiplier_does_not_panic() {
        let config = RetryConfig::new(3)
            .with_initial_delay(Duration::from_millis(100))
            .with_backoff_multiplier(-2.0);
        assert_eq!(config.backoff_multiplier, 1.0);
        assert_eq!(config.delay_for_attempt(2), Duration::from_millis(100));

        let config = RetryConfig::new(3).with_backoff_multiplier(f64::NAN);
        assert_eq!(config.backoff_multiplier, 1.0);

        // Fields are public; a bad value set directly still yields a delay.
        let mut config = RetryConfig::new(3).with_max_delay(Duration::from_secs(2));
        config.backoff_multiplier = f64::NAN;
        assert_eq!(config.delay_for_attempt(2), Duration::from_secs(2));
    }
}
