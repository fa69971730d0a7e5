use crate::utils::{client, request_count};
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use trackeco::api::{Location, SubmitAction};
use trackeco::{Outcome, RetryPolicy};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn action() -> SubmitAction {
    SubmitAction::new("u-42", "Dropped two cans at the recycling bin")
        .unwrap()
        .location(Location::new(40.7128, -74.006))
}

#[tokio::test]
async fn submit_action() {
    let _ = env_logger::try_init();
    let server = MockServer::start().await;
    let client = client(&server);

    Mock::given(method("POST"))
        .and(path("/api/waste/dispose"))
        .and(body_json(json!({
            "user_id": "u-42",
            "description": "Dropped two cans at the recycling bin",
            "latitude": 40.7128,
            "longitude": -74.006
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "points_earned": 20,
            "xp_earned": 40,
            "object_type": "aluminum_can",
            "message": "Great job!",
            "ai_reasoning": "Two cans recycled",
            "new_total_points": 140,
            "new_total_xp": 400,
            "new_streak": 3,
            "eco_rank": "Sprout"
        })))
        .mount(&server)
        .await;

    let outcome = client.execute(&action()).await;
    let result = outcome.as_success().unwrap();
    assert_eq!(result.summary(), "Action recorded! +20 points");
    assert_eq!(result.object_type.as_deref(), Some("aluminum_can"));
    assert_eq!(result.new_total_points, Some(140));
}

#[tokio::test]
async fn action_not_approved() {
    let server = MockServer::start().await;
    let client = client(&server);

    Mock::given(method("POST"))
        .and(path("/api/waste/dispose"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .mount(&server)
        .await;

    let outcome = client.execute(&action()).await;
    assert!(matches!(outcome, Outcome::Rejected(ref r) if r == "Action not approved"));
}

#[tokio::test]
async fn timeouts_are_retried_then_exhausted() {
    let _ = env_logger::try_init();
    let server = MockServer::start().await;
    let notices = Arc::new(Mutex::new(Vec::new()));
    let seen = notices.clone();
    let client = client(&server).on_retry(move |n| seen.lock().unwrap().push(n.message.clone()));

    Mock::given(method("POST"))
        .and(path("/api/waste/dispose"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let policy = RetryPolicy::short().with_backoff(Duration::from_millis(20));
    match client.execute_with(&action(), policy).await {
        Outcome::Exhausted(failure) => {
            assert_eq!(failure.attempts, 3);
            assert_eq!(
                failure.message,
                "Connection timeout. Please check your internet connection."
            );
        }
        other => panic!("expected exhausted, got {:?}", other),
    }
    assert_eq!(request_count(&server).await, 3);
    assert_eq!(
        *notices.lock().unwrap(),
        vec![
            "Connection timeout. Retrying... (1/3)".to_string(),
            "Connection timeout. Retrying... (2/3)".to_string(),
        ]
    );
}
