//! Timing policy of the status polling loop.

use std::time::Duration;

/// Delay between status checks, and an optional budget.
///
/// The default is the fixed three second cadence with no budget. A backoff
/// policy doubles the delay after every check up to `max_delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Delay before the first status check.
    pub initial_delay: Duration,
    /// Upper bound on any delay.
    pub max_delay: Duration,
    /// Growth factor applied per check. `1` keeps the delay fixed.
    pub multiplier: u32,
    /// Maximum number of status checks. `None` polls until the job ends.
    pub max_attempts: Option<u32>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::fixed(Duration::from_millis(3000))
    }
}

impl PollPolicy {
    /// Same delay before every check.
    pub fn fixed(delay: Duration) -> Self {
        Self {
            initial_delay: delay,
            max_delay: delay,
            multiplier: 1,
            max_attempts: None,
        }
    }

    /// Exponential backoff from `initial` doubling up to `max`.
    pub fn backoff(initial: Duration, max: Duration) -> Self {
        Self {
            initial_delay: initial,
            max_delay: max.max(initial),
            multiplier: 2,
            max_attempts: None,
        }
    }

    /// Limit the number of status checks.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Delay to wait before status check `attempt` (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        let factor = self.multiplier.max(1).saturating_pow(exponent);
        self.initial_delay
            .saturating_mul(factor)
            .min(self.max_delay)
    }

    /// Whether status check `attempt` (1-based) may be issued.
    pub fn allows(&self, attempt: u32) -> bool {
        self.max_attempts.map_or(true, |max| attempt <= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_fixed_three_seconds_unbounded() {
        let policy = PollPolicy::default();
        assert_eq!(policy.delay_for(1), Duration::from_millis(3000));
        assert_eq!(policy.delay_for(100), Duration::from_millis(3000));
        assert!(policy.allows(u32::MAX));
    }

    #[test]
    fn test_backoff_is_capped() {
        let policy = PollPolicy::backoff(Duration::from_secs(1), Duration::from_secs(10));
        let delays: Vec<u64> = (1..=6).map(|a| policy.delay_for(a).as_secs()).collect();
        assert_eq!(delays, vec![1, 2, 4, 8, 10, 10]);
        assert_eq!(policy.delay_for(u32::MAX), Duration::from_secs(10));
    }

    #[test]
    fn test_attempt_budget() {
        let policy = PollPolicy::default().with_max_attempts(3);
        assert!(policy.allows(1));
        assert!(policy.allows(3));
        assert!(!policy.allows(4));
    }
}
