use super::Location;
use crate::error::{Error, Result};
use crate::request::{Request, RequestData};
use crate::retry::{wording, RetryPolicy, Wording};
use futures::{stream, TryStreamExt};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Method};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::PathBuf;
use tokio_util::io::ReaderStream;

const VIDEO_MIME: &str = "video/mp4";

/// A text description of an environmental action.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitAction {
    pub user_id: String,
    pub description: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl SubmitAction {
    pub fn new<S: ToString>(user_id: S, description: S) -> Result<Self> {
        let description = description.to_string();
        if description.trim().is_empty() {
            return Err(Error::Validation("Please describe your action".into()));
        }
        Ok(Self {
            user_id: user_id.to_string(),
            description,
            latitude: None,
            longitude: None,
        })
    }

    pub fn location(mut self, location: Location) -> Self {
        self.latitude = Some(location.latitude);
        self.longitude = Some(location.longitude);
        self
    }
}

impl Request for SubmitAction {
    type Data = Self;
    type Response = ActionResult;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<str> {
        "/api/waste/dispose".into()
    }

    fn data(&self) -> RequestData<&Self> {
        RequestData::Json(self)
    }

    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::short()
    }

    fn wording(&self) -> &'static Wording {
        &wording::SUBMIT_ACTION
    }
}

/// Server verdict on a submitted action.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ActionResult {
    pub points_earned: i64,
    #[serde(default)]
    pub xp_earned: i64,
    pub object_type: Option<String>,
    #[serde(default)]
    pub message: String,
    pub ai_reasoning: Option<String>,
    pub new_total_points: Option<i64>,
    pub new_total_xp: Option<i64>,
    pub new_streak: Option<i64>,
    pub eco_rank: Option<String>,
}

impl ActionResult {
    pub fn summary(&self) -> String {
        format!("Action recorded! +{} points", self.points_earned)
    }
}

/// Multipart upload of a recorded video.
///
/// The video is streamed from `video` on every attempt, never held in memory.
#[derive(Debug, Clone)]
pub struct UploadVideo {
    pub user_id: String,
    pub location: Option<Location>,
    pub file_name: String,
    pub video: PathBuf,
    /// Size of the file at `video` in bytes.
    pub length: u64,
}

impl UploadVideo {
    fn form(&self) -> Form {
        let mut form = Form::new().text("user_id", self.user_id.clone());
        if let Some(location) = self.location {
            form = form
                .text("latitude", location.latitude.to_string())
                .text("longitude", location.longitude.to_string());
        }
        form.part("video", self.video_part())
    }

    fn video_part(&self) -> Part {
        // Opened lazily so each attempt reads the file from the start.
        let chunks = stream::once(tokio::fs::File::open(self.video.clone()))
            .map_ok(ReaderStream::new)
            .try_flatten();
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(VIDEO_MIME));
        Part::stream_with_length(Body::wrap_stream(chunks), self.length)
            .file_name(self.file_name.clone())
            .headers(headers)
    }
}

impl Request for UploadVideo {
    type Data = ();
    type Response = VideoResult;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<str> {
        "/api/video/upload".into()
    }

    fn data(&self) -> RequestData<&()> {
        RequestData::Multipart(self.form())
    }

    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::upload()
    }

    fn wording(&self) -> &'static Wording {
        &wording::UPLOAD
    }
}

/// Result of server-side video analysis.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VideoResult {
    pub points_earned: i64,
    pub object_type: Option<String>,
    pub message: Option<String>,
}

impl VideoResult {
    pub fn summary(&self) -> String {
        format!(
            "Video analyzed! +{} points for {}",
            self.points_earned,
            self.object_type.as_deref().unwrap_or("unknown")
        )
    }
}
