//! trackeco is a strongly typed client for the TrackEco environmental-action backend.
//!
//! Every user-initiated call (login, registration, action submission, video upload) runs
//! through a single bounded-retry executor that classifies failures, tells the caller about
//! upcoming retries and always produces exactly one [`Outcome`].
mod client;
pub mod api;
pub mod config;
mod error;
mod request;
pub mod retry;
mod session;
pub mod upload;

pub use client::Client;
pub use config::{ClientConfig, Environment};
pub use error::{Error, Result};
pub use request::*;
pub use reqwest::header;
pub use reqwest::Method;
pub use reqwest::StatusCode;
pub use retry::{Outcome, RetryNotice, RetryPolicy};
pub use session::Session;
pub use upload::{JobState, UploadJob};
