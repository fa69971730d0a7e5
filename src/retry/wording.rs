//! User-facing messages for each call site.

use super::classify::ErrorKind;
use crate::error::Error;
use reqwest::StatusCode;

/// The messages a call site shows for every way an operation can end.
#[derive(Debug)]
pub struct Wording {
    /// Shown when the server declines without giving a reason.
    pub declined: &'static str,
    /// Maps a non-2xx status to a message.
    pub status: fn(StatusCode) -> String,
    pub timeout_retry: &'static str,
    pub interrupted_retry: &'static str,
    pub timeout_exhausted: &'static str,
    pub interrupted_exhausted: &'static str,
    /// Prefix for non-retryable I/O failures.
    pub io_error: &'static str,
    /// Prefix for everything else.
    pub other_error: &'static str,
}

impl Wording {
    pub fn status_message(&self, status: StatusCode) -> String {
        (self.status)(status)
    }

    /// "Connection timeout. Retrying... (1/3)"
    pub fn retry_notice(&self, kind: ErrorKind, attempt: u32, max_attempts: u32) -> String {
        let lead = match kind {
            ErrorKind::Timeout => self.timeout_retry,
            _ => self.interrupted_retry,
        };
        format!("{} ({}/{})", lead, attempt, max_attempts)
    }

    pub fn exhausted(&self, kind: ErrorKind) -> &'static str {
        match kind {
            ErrorKind::Timeout => self.timeout_exhausted,
            _ => self.interrupted_exhausted,
        }
    }

    pub fn terminal(&self, kind: ErrorKind, error: &Error) -> String {
        let lead = match kind {
            ErrorKind::Io => self.io_error,
            _ => self.other_error,
        };
        let cause = match error {
            Error::Reqwest(e) => e.to_string(),
            other => other.to_string(),
        };
        format!("{}: {}", lead, cause)
    }
}

fn server_error(status: StatusCode) -> String {
    format!(
        "Server error ({}). Please try again later.",
        status.as_u16()
    )
}

fn login_status(status: StatusCode) -> String {
    match status {
        StatusCode::UNAUTHORIZED => "Invalid email or password. Please try again.".into(),
        StatusCode::BAD_REQUEST => "Invalid input format. Please check your data.".into(),
        _ => server_error(status),
    }
}

fn register_status(status: StatusCode) -> String {
    match status {
        StatusCode::BAD_REQUEST => "Invalid registration data. Please check all fields.".into(),
        StatusCode::CONFLICT => "Email already exists. Please use a different email.".into(),
        _ => server_error(status),
    }
}

fn upload_status(status: StatusCode) -> String {
    match status {
        StatusCode::BAD_REQUEST => "Invalid video format or missing data".into(),
        StatusCode::UNAUTHORIZED => "Authentication failed. Please log in again.".into(),
        StatusCode::PAYLOAD_TOO_LARGE => "Video file too large. Please use a smaller video.".into(),
        _ => format!("Upload failed with error {}", status.as_u16()),
    }
}

const BASE: Wording = Wording {
    declined: "Request failed",
    status: server_error,
    timeout_retry: "Connection timeout. Retrying...",
    interrupted_retry: "Connection interrupted. Retrying...",
    timeout_exhausted: "Connection timeout. Please check your internet connection.",
    interrupted_exhausted: "Connection failed. Please check your internet connection.",
    io_error: "Network error",
    other_error: "Error",
};

pub static GENERIC: Wording = BASE;

pub static LOGIN: Wording = Wording {
    declined: "Login failed",
    status: login_status,
    other_error: "Login error",
    ..BASE
};

pub static REGISTER: Wording = Wording {
    declined: "Registration failed",
    status: register_status,
    other_error: "Registration error",
    ..BASE
};

pub static SUBMIT_ACTION: Wording = Wording {
    declined: "Action not approved",
    ..BASE
};

pub static UPLOAD: Wording = Wording {
    declined: "Video analysis failed",
    status: upload_status,
    timeout_retry: "Upload timeout. Retrying...",
    interrupted_retry: "Connection interrupted. Retrying upload...",
    timeout_exhausted: "Upload timeout. Please check your internet connection.",
    interrupted_exhausted: "Upload failed. Please check your internet connection.",
    io_error: "Upload error",
    other_error: "Upload failed",
};
