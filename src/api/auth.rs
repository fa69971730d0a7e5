use crate::error::{Error, Result};
use crate::request::{Request, RequestData};
use crate::retry::{wording, RetryPolicy, Wording};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Serialize)]
pub struct Login {
    pub email: String,
    pub password: String,
}

impl Login {
    pub fn new<S: ToString>(email: S, password: S) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
        }
    }
}

impl Request for Login {
    type Data = Self;
    type Response = AuthResponse;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<str> {
        "/api/auth/login".into()
    }

    fn data(&self) -> RequestData<&Self> {
        RequestData::Json(self)
    }

    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::short()
    }

    fn wording(&self) -> &'static Wording {
        &wording::LOGIN
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Register {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl Register {
    /// Check the form locally before anything is sent.
    pub fn new<S: ToString>(username: S, email: S, password: S, confirm_password: S) -> Result<Self> {
        let username = username.to_string();
        let email = email.to_string();
        let password = password.to_string();

        let problem = if username.trim().is_empty() {
            Some("Please enter a username")
        } else if email.trim().is_empty() {
            Some("Please enter an email")
        } else if password.trim().is_empty() {
            Some("Please enter a password")
        } else if password != confirm_password.to_string() {
            Some("Passwords don't match")
        } else if password.chars().count() < MIN_PASSWORD_LEN {
            Some("Password must be at least 6 characters")
        } else {
            None
        };
        if let Some(problem) = problem {
            return Err(Error::Validation(problem.into()));
        }

        Ok(Self {
            username,
            email,
            password,
        })
    }
}

impl Request for Register {
    type Data = Self;
    type Response = AuthResponse;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<str> {
        "/api/auth/register".into()
    }

    fn data(&self) -> RequestData<&Self> {
        RequestData::Json(self)
    }

    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::short()
    }

    fn wording(&self) -> &'static Wording {
        &wording::REGISTER
    }
}

/// Successful login or registration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub message: String,
    pub token: String,
    pub user: AuthUser,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthUser {
    pub user_id: String,
    pub username: String,
    pub points: i64,
    pub tier: String,
}
