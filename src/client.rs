use crate::api::{AuthResponse, Login, Register};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::request::{Request, RequestBuilderExt};
use crate::retry::{Executor, Notifier, Outcome, RetryNotice, RetryPolicy};
use crate::session::Session;
use futures::prelude::*;
use log::{info, warn};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CACHE_CONTROL, CONTENT_TYPE};
use reqwest::{Client as ReqwestClient, Method};
use serde::Deserialize;
use std::sync::Arc;

const JSON_UTF8: &str = "application/json; charset=utf-8";

/// Envelope fields the backend adds to most replies.
#[derive(Deserialize)]
struct Acknowledgement {
    success: Option<bool>,
    message: Option<String>,
}

/// The main client used for making requests.
///
/// `Client` stores an async Reqwest client as well as the associated
/// base url and the session whose token authorizes requests.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ReqwestClient>,
    base_url: String,
    session: Session,
    notifier: Option<Notifier>,
}

impl Client {
    /// Create a new `Client` with default timeouts.
    pub fn new<S: ToString>(base_url: S) -> Result<Self> {
        Self::from_config(&ClientConfig::new(base_url))
    }

    /// Create a new `Client` from a configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        let inner = ReqwestClient::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.clone())
            .connect_timeout(config.connect_timeout())
            .timeout(config.read_timeout())
            .build()?;

        Ok(Self {
            inner: Arc::new(inner),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session: Session::new(),
            notifier: None,
        })
    }

    /// Share an existing session with this client
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    /// Be told about every retry, e.g. to show "Retrying... (1/3)"
    pub fn on_retry<F>(mut self, f: F) -> Self
    where
        F: Fn(&RetryNotice) + Send + Sync + 'static,
    {
        self.notifier = Some(Arc::new(f));
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn format_request<R: Request>(&self, request: &R) -> Result<reqwest::Request> {
        let endpoint = request.endpoint();
        let endpoint = endpoint.trim_matches('/');
        let url = format!("{}/{}", self.base_url, endpoint);

        let headers = request.headers();
        let data = request.data();
        let wants_json = (R::METHOD == Method::POST || R::METHOD == Method::PUT)
            && !data.has_own_content_type()
            && !headers.contains_key(CONTENT_TYPE);

        let req = self.inner.request(R::METHOD, &url).headers(headers);
        let req = if wants_json {
            req.header(CONTENT_TYPE, JSON_UTF8)
        } else {
            req
        };
        let req = req.request_data(data);

        let req = match self.session.token() {
            None => req,
            Some(token) => req.bearer_auth(token),
        };
        req.build().map_err(From::from)
    }

    fn send_raw<R>(&self, req: reqwest::Request) -> impl Future<Output = Result<R>>
    where
        R: for<'de> serde::Deserialize<'de>,
    {
        let target = format!("{} {}", req.method(), req.url());
        let failed = target.clone();
        self.inner
            .execute(req)
            .map_err(move |e| {
                warn!("network error - {}: {}", failed, e);
                Error::from(e)
            })
            .and_then(|res| async move {
                let status = res.status();
                if status.is_success() {
                    match res.text().await {
                        Ok(body) => decode(&body),
                        Err(e) => Err(Error::from(e)),
                    }
                } else {
                    warn!("request failed - {}: {}", target, status);
                    let body = res.text().await.unwrap_or_default();
                    if status.is_client_error() {
                        Err(Error::ClientError(status, body))
                    } else {
                        Err(Error::ServerError(status, body))
                    }
                }
            })
    }

    /// Send a single `Request` once
    pub async fn send<R: Request>(&self, request: &R) -> Result<R::Response> {
        let req = self.format_request(request)?;
        self.send_raw(req).await
    }

    /// Send a `Request` under its own retry policy
    pub async fn execute<R: Request>(&self, request: &R) -> Outcome<R::Response> {
        self.execute_with(request, request.retry_policy()).await
    }

    /// Send a `Request` under the given retry policy
    pub async fn execute_with<R: Request>(
        &self,
        request: &R,
        policy: RetryPolicy,
    ) -> Outcome<R::Response> {
        Executor::new(policy)
            .wording(request.wording())
            .notifier(self.notifier.clone())
            .run(|| self.send(request))
            .await
    }

    /// Log in; on success the returned token authorizes later requests.
    pub async fn login(&self, request: &Login) -> Outcome<AuthResponse> {
        let outcome = self.execute(request).await;
        self.adopt(&outcome);
        outcome
    }

    /// Register; on success the new account is signed in.
    pub async fn register(&self, request: &Register) -> Outcome<AuthResponse> {
        let outcome = self.execute(request).await;
        self.adopt(&outcome);
        outcome
    }

    pub fn logout(&self) {
        self.session.clear();
        info!("signed out");
    }

    fn adopt(&self, outcome: &Outcome<AuthResponse>) {
        if let Outcome::Success(auth) = outcome {
            self.session.set(&auth.token);
            info!("signed in as {}", auth.user.username);
        }
    }
}

fn decode<R>(body: &str) -> Result<R>
where
    R: for<'de> serde::Deserialize<'de>,
{
    if let Ok(Acknowledgement {
        success: Some(false),
        message,
    }) = serde_json::from_str::<Acknowledgement>(body)
    {
        return Err(Error::Declined(message));
    }
    serde_json::from_str(body).map_err(|error| Error::Serde {
        error,
        msg: body.to_string(),
    })
}
