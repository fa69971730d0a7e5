//! Classify failed attempts into retry policy error kinds.

use crate::error::Error;
use reqwest::StatusCode;
use std::error::Error as StdError;
use std::io;

/// High-level classification of a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Connect or read timeout.
    Timeout,
    /// Connection reset, stream cut short or network unreachable.
    Interrupted,
    /// The server processed the request and answered `success: false`.
    Declined,
    /// The server answered with a non-2xx status.
    Status(StatusCode),
    /// Refused locally before anything was sent.
    Invalid,
    /// Any other I/O or transport failure.
    Io,
    Other,
}

impl ErrorKind {
    /// Timeouts and interrupted connections are the only retryable kinds.
    pub fn is_transient(self) -> bool {
        matches!(self, ErrorKind::Timeout | ErrorKind::Interrupted)
    }

    /// The request reached a verdict that retrying cannot change.
    pub fn is_rejection(self) -> bool {
        matches!(
            self,
            ErrorKind::Declined | ErrorKind::Status(_) | ErrorKind::Invalid
        )
    }
}

// Matched against the whole error chain. Message matching is locale and
// library dependent; swap for a structured check once the backend exposes one.
const INTERRUPTED_MARKERS: &[&str] = &[
    "unexpected end of stream",
    "Connection reset",
    "Network is unreachable",
    "connection closed before message completed",
    "end of file before message length reached",
];

/// Whether an I/O failure message describes an interrupted connection.
pub fn is_interrupted(message: &str) -> bool {
    INTERRUPTED_MARKERS.iter().any(|m| message.contains(m))
}

fn chain_message(error: &(dyn StdError + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}

// A body cut short of its Content-Length surfaces as an UnexpectedEof
// somewhere below the transport error.
fn ends_early(error: &(dyn StdError + 'static)) -> bool {
    let mut source = Some(error);
    while let Some(inner) = source {
        if let Some(io) = inner.downcast_ref::<io::Error>() {
            if io.kind() == io::ErrorKind::UnexpectedEof {
                return true;
            }
            if let Some(wrapped) = io.get_ref() {
                source = Some(wrapped as &(dyn StdError + 'static));
                continue;
            }
        }
        source = inner.source();
    }
    false
}

/// Classify a reqwest failure.
pub fn classify_reqwest(e: &reqwest::Error) -> ErrorKind {
    if e.is_timeout() {
        return ErrorKind::Timeout;
    }
    if let Some(status) = e.status() {
        return ErrorKind::Status(status);
    }
    if ends_early(e) || is_interrupted(&chain_message(e)) {
        return ErrorKind::Interrupted;
    }
    if e.is_builder() || e.is_decode() {
        return ErrorKind::Other;
    }
    ErrorKind::Io
}

/// Classify a local I/O failure.
pub fn classify_io(e: &io::Error) -> ErrorKind {
    if e.kind() == io::ErrorKind::TimedOut {
        return ErrorKind::Timeout;
    }
    if ends_early(e) || is_interrupted(&chain_message(e)) {
        return ErrorKind::Interrupted;
    }
    ErrorKind::Io
}

/// Classify any crate error into an ErrorKind.
pub fn classify(e: &Error) -> ErrorKind {
    match e {
        Error::Declined(_) => ErrorKind::Declined,
        Error::ClientError(status, _) | Error::ServerError(status, _) => ErrorKind::Status(*status),
        Error::Validation(_) => ErrorKind::Invalid,
        Error::Reqwest(e) => classify_reqwest(e),
        Error::Io(e) => classify_io(e),
        Error::Serde { .. } | Error::Config(_) => ErrorKind::Other,
    }
}
