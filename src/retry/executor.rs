//! Retry loop: run an operation until it succeeds or the policy says stop.

use super::classify::{classify, ErrorKind};
use super::outcome::{Failure, Outcome};
use super::policy::{RetryDecision, RetryPolicy};
use super::wording::{self, Wording};
use crate::error::{Error, Result};
use log::{debug, info, warn};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Callback told about each upcoming retry. Runs inline, so it must not block.
pub type Notifier = Arc<dyn Fn(&RetryNotice) + Send + Sync>;

/// Sent to the caller before each retry.
#[derive(Debug, Clone)]
pub struct RetryNotice {
    /// Number of attempts that have failed so far.
    pub attempt: u32,
    pub max_attempts: u32,
    pub kind: ErrorKind,
    pub backoff: Duration,
    /// e.g. "Connection timeout. Retrying... (1/3)"
    pub message: String,
}

impl RetryNotice {
    pub fn remaining(&self) -> u32 {
        self.max_attempts.saturating_sub(self.attempt)
    }
}

/// Runs one network operation under a [`RetryPolicy`].
///
/// Attempts are strictly sequential. There is no state shared between
/// calls to [`Executor::run`].
#[derive(Clone)]
pub struct Executor {
    policy: RetryPolicy,
    wording: &'static Wording,
    notifier: Option<Notifier>,
}

impl Executor {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            wording: &wording::GENERIC,
            notifier: None,
        }
    }

    pub fn wording(mut self, wording: &'static Wording) -> Self {
        self.wording = wording;
        self
    }

    pub fn notifier(mut self, notifier: Option<Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn on_retry<F>(self, f: F) -> Self
    where
        F: Fn(&RetryNotice) + Send + Sync + 'static,
    {
        self.notifier(Some(Arc::new(f)))
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Run `operation` until it yields a terminal outcome.
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Outcome<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 1u32;
        loop {
            let error = match operation().await {
                Ok(value) => {
                    debug!("attempt {} succeeded", attempt);
                    return Outcome::Success(value);
                }
                Err(e) => e,
            };

            let kind = classify(&error);
            debug!("attempt {} failed ({:?}): {}", attempt, kind, error);
            match kind {
                ErrorKind::Declined => return Outcome::Rejected(self.decline_reason(&error)),
                ErrorKind::Status(status) => {
                    return Outcome::Rejected(self.wording.status_message(status))
                }
                ErrorKind::Invalid => return Outcome::Rejected(error.to_string()),
                _ if self.policy.is_retryable(kind) => match self.policy.decide(attempt, kind) {
                    RetryDecision::RetryAfter(backoff) => {
                        self.notify(kind, attempt, backoff);
                        tokio::time::sleep(backoff).await;
                        attempt += 1;
                    }
                    RetryDecision::NoRetry => {
                        warn!("giving up after {} attempts: {}", attempt, error);
                        return Outcome::Exhausted(Failure {
                            message: self.wording.exhausted(kind).to_string(),
                            cause: error,
                            attempts: attempt,
                        });
                    }
                },
                _ => {
                    warn!("attempt {} failed terminally: {}", attempt, error);
                    return Outcome::TerminalFailure(Failure {
                        message: self.wording.terminal(kind, &error),
                        cause: error,
                        attempts: attempt,
                    });
                }
            }
        }
    }

    fn decline_reason(&self, error: &Error) -> String {
        match error {
            Error::Declined(Some(message)) if !message.is_empty() => message.clone(),
            _ => self.wording.declined.to_string(),
        }
    }

    fn notify(&self, kind: ErrorKind, attempt: u32, backoff: Duration) {
        let notice = RetryNotice {
            attempt,
            max_attempts: self.policy.max_attempts,
            kind,
            backoff,
            message: self
                .wording
                .retry_notice(kind, attempt, self.policy.max_attempts),
        };
        info!("{} (next attempt in {:?})", notice.message, backoff);
        if let Some(notifier) = &self.notifier {
            notifier(&notice);
        }
    }
}
