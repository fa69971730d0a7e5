//! Bounded retry for single network operations.
//!
//! Every user-initiated call (login, registration, action submission, video
//! upload) runs through one [`Executor`]. Each failed attempt is classified;
//! declines and HTTP statuses end the sequence at once, timeouts and
//! interrupted connections are retried up to the policy limit, and anything
//! else is reported immediately. Exactly one [`Outcome`] comes out.

mod classify;
mod executor;
mod outcome;
mod policy;
pub mod wording;

pub use classify::{classify, classify_io, classify_reqwest, is_interrupted, ErrorKind};
pub use executor::{Executor, Notifier, RetryNotice};
pub use outcome::{Failure, NextStep, Outcome};
pub use policy::{RetryDecision, RetryPolicy};
pub use wording::Wording;
