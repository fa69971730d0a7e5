use crate::utils::matchers::MissingHeader;
use crate::utils::{auth_body, client};
use serde_json::json;
use trackeco::api::{GetLeaderboard, Login};
use trackeco::{Client, Session};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn leaderboard() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "leaderboard": [
            {"rank": 1, "username": "ada", "points": 120, "tier": "SEEDLING"}
        ]
    }))
}

#[tokio::test]
async fn no_bearer_before_login() {
    let server = MockServer::start().await;
    let client = client(&server);

    Mock::given(method("GET"))
        .and(path("/api/leaderboard"))
        .and(MissingHeader::new("authorization"))
        .respond_with(leaderboard())
        .expect(1)
        .mount(&server)
        .await;

    client.send(&GetLeaderboard).await.unwrap();
}

#[tokio::test]
async fn login_token_authorizes_next_call() {
    let _ = env_logger::try_init();
    let server = MockServer::start().await;
    let client = client(&server);

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_body("tok-123")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/leaderboard"))
        .and(header("Authorization", "Bearer tok-123"))
        .respond_with(leaderboard())
        .expect(1)
        .mount(&server)
        .await;

    assert!(client
        .login(&Login::new("ada@example.com", "secret1"))
        .await
        .is_success());
    let board = client.send(&GetLeaderboard).await.unwrap();
    assert_eq!(board.leaderboard[0].username, "ada");
}

#[tokio::test]
async fn shared_session_and_logout() {
    let server = MockServer::start().await;
    let session = Session::new();
    session.set("PASSWORD");
    let client = Client::new(server.uri())
        .unwrap()
        .with_session(session.clone());

    Mock::given(method("GET"))
        .and(path("/api/leaderboard"))
        .and(header("Authorization", "Bearer PASSWORD"))
        .respond_with(leaderboard())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/leaderboard"))
        .and(MissingHeader::new("authorization"))
        .respond_with(leaderboard())
        .expect(1)
        .mount(&server)
        .await;

    client.send(&GetLeaderboard).await.unwrap();
    client.logout();
    assert!(!session.is_authenticated());
    client.send(&GetLeaderboard).await.unwrap();
}
