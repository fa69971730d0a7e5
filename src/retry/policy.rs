use super::classify::ErrorKind;
use std::time::Duration;

/// Decision returned by the retry policy after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Do not try again.
    NoRetry,
    /// Try again after the given pause.
    RetryAfter(Duration),
}

/// Fixed-backoff retry policy.
///
/// `max_attempts` counts the first attempt, so a policy of 3 makes at most
/// two retries with `backoff` between consecutive attempts.
#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
    /// Decides whether a classified failure may be retried at all.
    pub retryable: fn(ErrorKind) -> bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::short()
    }
}

impl RetryPolicy {
    /// Policy for short JSON requests: 3 attempts, 2 s apart.
    pub fn short() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_secs(2),
            retryable: ErrorKind::is_transient,
        }
    }

    /// Policy for video uploads: 3 attempts, 3 s apart.
    pub fn upload() -> Self {
        Self {
            backoff: Duration::from_secs(3),
            ..Self::short()
        }
    }

    /// A single attempt, never retried.
    pub fn once() -> Self {
        Self {
            max_attempts: 1,
            backoff: Duration::ZERO,
            retryable: ErrorKind::is_transient,
        }
    }

    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn is_retryable(&self, kind: ErrorKind) -> bool {
        (self.retryable)(kind)
    }

    /// `attempt` is 1-based (1 = first attempt).
    pub fn decide(&self, attempt: u32, kind: ErrorKind) -> RetryDecision {
        if !self.is_retryable(kind) || attempt >= self.max_attempts {
            return RetryDecision::NoRetry;
        }
        RetryDecision::RetryAfter(self.backoff)
    }
}
