use crate::utils::matchers::MultipartField;
use crate::utils::{client, fast_upload_policy, request_count, BACKOFF};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::TempDir;
use trackeco::api::Location;
use trackeco::retry::NextStep;
use trackeco::{Error, JobState, Outcome, UploadJob};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Recording {
    _dir: TempDir,
    source: PathBuf,
    scratch: TempDir,
}

impl Recording {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("recording.mp4");
        std::fs::write(&source, b"\x00\x00\x00\x18ftypmp42").unwrap();
        Self {
            _dir: dir,
            source,
            scratch: tempfile::tempdir().unwrap(),
        }
    }

    fn job(&self) -> UploadJob {
        UploadJob::new(&self.source, "u-42")
            .temp_dir(self.scratch.path())
            .policy(fast_upload_policy())
    }

    fn scratch_is_empty(&self) -> bool {
        is_empty(self.scratch.path())
    }
}

fn is_empty(dir: &Path) -> bool {
    std::fs::read_dir(dir).unwrap().next().is_none()
}

fn accepted() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "success": true,
        "points_earned": 25,
        "object_type": "plastic_bottle",
        "message": "Bottle recycled"
    }))
}

#[tokio::test]
async fn upload_accepted() {
    let _ = env_logger::try_init();
    let server = MockServer::start().await;
    let client = client(&server);
    let recording = Recording::new();

    Mock::given(method("POST"))
        .and(path("/api/video/upload"))
        .and(MultipartField::new("user_id", "u-42"))
        .and(MultipartField::new("latitude", "40.7128"))
        .and(MultipartField::new("longitude", "-74.006"))
        .respond_with(accepted())
        .expect(1)
        .mount(&server)
        .await;

    let mut job = recording.job().location(Location::new(40.7128, -74.006));
    let outcome = job.run(&client).await;

    assert_eq!(outcome.next_step(), NextStep::Leave);
    assert_eq!(
        outcome.as_success().unwrap().summary(),
        "Video analyzed! +25 points for plastic_bottle"
    );
    assert_eq!(job.state(), JobState::Accepted);
    assert!(recording.scratch_is_empty());
    assert!(recording.source.exists());

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"video\"; filename=\"video"));
    assert!(body.contains("content-type: video/mp4"));
    assert!(body.contains("ftypmp42"));
}

#[tokio::test]
async fn upload_recovers_after_two_timeouts() {
    let _ = env_logger::try_init();
    let server = MockServer::start().await;
    let client = client(&server);
    let recording = Recording::new();

    Mock::given(method("POST"))
        .and(path("/api/video/upload"))
        .respond_with(accepted().set_delay(Duration::from_secs(2)))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/video/upload"))
        .respond_with(accepted())
        .mount(&server)
        .await;

    let start = Instant::now();
    let mut job = recording.job();
    let outcome = job.run(&client).await;

    assert!(outcome.is_success());
    assert_eq!(request_count(&server).await, 3);
    assert!(start.elapsed() >= BACKOFF * 2);
    for request in server.received_requests().await.unwrap() {
        assert!(String::from_utf8_lossy(&request.body).contains("ftypmp42"));
    }
    assert_eq!(job.state(), JobState::Accepted);
    assert!(recording.scratch_is_empty());
}

#[tokio::test]
async fn upload_too_large() {
    let server = MockServer::start().await;
    let client = client(&server);
    let recording = Recording::new();

    Mock::given(method("POST"))
        .and(path("/api/video/upload"))
        .respond_with(ResponseTemplate::new(413))
        .mount(&server)
        .await;

    let mut job = recording.job();
    let outcome = job.run(&client).await;

    assert!(matches!(
        outcome,
        Outcome::Rejected(ref r) if r == "Video file too large. Please use a smaller video."
    ));
    assert_eq!(outcome.next_step(), NextStep::Stay);
    assert_eq!(request_count(&server).await, 1);
    assert_eq!(job.state(), JobState::Rejected);
    assert!(recording.scratch_is_empty());
}

#[tokio::test]
async fn upload_analysis_declined() {
    let server = MockServer::start().await;
    let client = client(&server);
    let recording = Recording::new();

    Mock::given(method("POST"))
        .and(path("/api/video/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .mount(&server)
        .await;

    let mut job = recording.job();
    let outcome = job.run(&client).await;

    assert_eq!(outcome.message(), Some("Video analysis failed"));
    assert_eq!(job.state(), JobState::Rejected);
    assert!(recording.scratch_is_empty());
}

#[tokio::test]
async fn upload_malformed_response() {
    let server = MockServer::start().await;
    let client = client(&server);
    let recording = Recording::new();

    Mock::given(method("POST"))
        .and(path("/api/video/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"success\": true, \"points"))
        .mount(&server)
        .await;

    let mut job = recording.job();
    match job.run(&client).await {
        Outcome::TerminalFailure(failure) => {
            assert_eq!(failure.attempts, 1);
            assert!(failure.message.starts_with("Upload failed: "));
            assert!(matches!(failure.cause, Error::Serde { .. }));
        }
        other => panic!("expected terminal failure, got {:?}", other),
    }
    assert_eq!(request_count(&server).await, 1);
    assert_eq!(job.state(), JobState::Failed);
    assert!(recording.scratch_is_empty());
}

#[tokio::test]
async fn upload_exhausted() {
    let server = MockServer::start().await;
    let client = client(&server);
    let recording = Recording::new();

    Mock::given(method("POST"))
        .and(path("/api/video/upload"))
        .respond_with(accepted().set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let mut job = recording.job();
    match job.run(&client).await {
        Outcome::Exhausted(failure) => {
            assert_eq!(failure.attempts, 3);
            assert_eq!(
                failure.message,
                "Upload timeout. Please check your internet connection."
            );
        }
        other => panic!("expected exhausted, got {:?}", other),
    }
    assert_eq!(request_count(&server).await, 3);
    assert_eq!(job.state(), JobState::Failed);
    assert!(recording.scratch_is_empty());
}
