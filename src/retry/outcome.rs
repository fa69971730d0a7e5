use crate::error::Error;

/// A failure that ended a retry sequence.
#[derive(Debug)]
pub struct Failure {
    /// Message suitable for showing to the user.
    pub message: String,
    /// The error from the last attempt.
    pub cause: Error,
    /// Number of attempts made, including the failed one.
    pub attempts: u32,
}

/// The single terminal result of a user-initiated operation.
#[derive(Debug)]
pub enum Outcome<T> {
    /// The operation completed with its typed payload.
    Success(T),
    /// The server processed the request and declined it. Never retried.
    Rejected(String),
    /// A failure that is not worth retrying.
    TerminalFailure(Failure),
    /// Transient failures persisted past the retry budget.
    Exhausted(Failure),
}

/// What the calling screen should do once an outcome is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    Leave,
    Stay,
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn success(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_success(&self) -> Option<&T> {
        match self {
            Outcome::Success(value) => Some(value),
            _ => None,
        }
    }

    /// The failure message, if the operation did not succeed.
    pub fn message(&self) -> Option<&str> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Rejected(reason) => Some(reason),
            Outcome::TerminalFailure(f) | Outcome::Exhausted(f) => Some(&f.message),
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Outcome::TerminalFailure(f) | Outcome::Exhausted(f) => Some(f),
            _ => None,
        }
    }

    pub fn next_step(&self) -> NextStep {
        if self.is_success() {
            NextStep::Leave
        } else {
            NextStep::Stay
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::Rejected(reason) => Outcome::Rejected(reason),
            Outcome::TerminalFailure(failure) => Outcome::TerminalFailure(failure),
            Outcome::Exhausted(failure) => Outcome::Exhausted(failure),
        }
    }
}
