//! Upload of a recorded video, from local copy to server verdict.

use crate::api::{Location, UploadVideo, VideoResult};
use crate::client::Client;
use crate::error::{Error, Result};
use crate::retry::{classify, wording, Failure, Outcome, RetryPolicy};
use log::{debug, warn};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Lifecycle of an [`UploadJob`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Recorded,
    Uploading,
    Accepted,
    Rejected,
    Failed,
}

/// Private copy of recorded media.
///
/// The file is removed by [`TempMedia::release`], or on drop if the upload
/// is abandoned first.
pub struct TempMedia {
    file: NamedTempFile,
    size: u64,
}

impl TempMedia {
    /// Copy `source` into a fresh temporary file under `dir`.
    pub async fn acquire(source: &Path, dir: &Path) -> Result<Self> {
        let file = tempfile::Builder::new()
            .prefix("video")
            .suffix(".mp4")
            .tempfile_in(dir)?;
        let size = tokio::fs::copy(source, file.path()).await?;
        debug!(
            "copied {} ({} bytes) to {}",
            source.display(),
            size,
            file.path().display()
        );
        Ok(Self { file, size })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Size of the copy in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn file_name(&self) -> String {
        self.path()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "video.mp4".to_string())
    }

    /// Delete the copy.
    pub fn release(self) {
        let path = self.path().to_path_buf();
        match self.file.close() {
            Ok(()) => debug!("removed {}", path.display()),
            Err(e) => warn!("failed to remove {}: {}", path.display(), e),
        }
    }
}

/// A locally recorded video on its way to the server.
pub struct UploadJob {
    source: PathBuf,
    user_id: String,
    location: Option<Location>,
    policy: RetryPolicy,
    temp_dir: PathBuf,
    state: JobState,
}

impl UploadJob {
    pub fn new<P: Into<PathBuf>, S: ToString>(source: P, user_id: S) -> Self {
        Self {
            source: source.into(),
            user_id: user_id.to_string(),
            location: None,
            policy: RetryPolicy::upload(),
            temp_dir: std::env::temp_dir(),
            state: JobState::Recorded,
        }
    }

    pub fn location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Where the private copy is made. Defaults to the system temp dir.
    pub fn temp_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.temp_dir = dir.into();
        self
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    /// Copy, upload and clean up. The copy is gone when this returns,
    /// whatever the outcome.
    pub async fn run(&mut self, client: &Client) -> Outcome<VideoResult> {
        self.state = JobState::Uploading;
        let outcome = match TempMedia::acquire(&self.source, &self.temp_dir).await {
            Ok(media) => {
                let outcome = self.upload(client, &media).await;
                media.release();
                outcome
            }
            Err(error) => {
                warn!("could not copy {}: {}", self.source.display(), error);
                terminal(error, 0)
            }
        };
        self.state = match outcome {
            Outcome::Success(_) => JobState::Accepted,
            Outcome::Rejected(_) => JobState::Rejected,
            Outcome::TerminalFailure(_) | Outcome::Exhausted(_) => JobState::Failed,
        };
        outcome
    }

    async fn upload(&self, client: &Client, media: &TempMedia) -> Outcome<VideoResult> {
        let request = UploadVideo {
            user_id: self.user_id.clone(),
            location: self.location,
            file_name: media.file_name(),
            video: media.path().to_path_buf(),
            length: media.size(),
        };
        client.execute_with(&request, self.policy).await
    }
}

fn terminal(error: Error, attempts: u32) -> Outcome<VideoResult> {
    Outcome::TerminalFailure(Failure {
        message: wording::UPLOAD.terminal(classify(&error), &error),
        cause: error,
        attempts,
    })
}
