use crate::retry::{wording, RetryPolicy, Wording};
use reqwest::multipart::Form;
use reqwest::{header::HeaderMap, Method, RequestBuilder};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Additional data to be sent along with the request.
pub enum RequestData<T> {
    /// No additional data.
    Empty,
    /// HTTP form data.
    Form(T),
    /// JSON data.
    Json(T),
    /// Query data.
    Query(T),
    /// Multipart form. Built afresh for every attempt since a `Form` is consumed on send.
    Multipart(Form),
}

impl<T> Default for RequestData<T> {
    fn default() -> Self {
        RequestData::Empty
    }
}

impl<T> RequestData<T> {
    pub fn is_multipart(&self) -> bool {
        matches!(self, RequestData::Multipart(_))
    }

    /// Whether encoding the body sets its own content type.
    pub fn has_own_content_type(&self) -> bool {
        matches!(self, RequestData::Form(_) | RequestData::Multipart(_))
    }
}

/// The base-trait for requests sent by the client. The trait specifies the full life-cycle of the
/// request, including the endpoint, headers, data, method, eventual response and how failures are
/// retried and worded.
pub trait Request {
    /// The type of additional data sent with the request. Usually, this will be `()` or `Self`.
    type Data: Serialize;
    /// The type of the response from the server.
    type Response: for<'de> Deserialize<'de> + Unpin;
    /// The HTTP method for the request.
    const METHOD: Method = Method::GET;

    /// The endpoint to which the request will be sent. The base url is set in the client, and the
    /// endpoint method returns the specific resource endpoint.
    fn endpoint(&self) -> Cow<str>;

    /// Any additional headers that should be sent with the request. Note that common headers such
    /// as authorization headers are set by the client.
    fn headers(&self) -> HeaderMap {
        Default::default()
    }

    /// The formatted request data.
    fn data(&self) -> RequestData<&Self::Data> {
        Default::default()
    }

    /// How failures of this request are retried. Defaults to a single attempt.
    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::once()
    }

    /// Messages shown to the user when this request fails.
    fn wording(&self) -> &'static Wording {
        &wording::GENERIC
    }
}

pub(crate) trait RequestBuilderExt: Sized {
    fn request_data<T: Serialize>(self, body: RequestData<T>) -> Self;
}

impl RequestBuilderExt for RequestBuilder {
    fn request_data<T: Serialize>(self, body: RequestData<T>) -> Self {
        match body {
            RequestData::Empty => self,
            RequestData::Form(value) => self.form(&value),
            RequestData::Json(value) => self.json(&value),
            RequestData::Query(value) => self.query(&value),
            RequestData::Multipart(form) => self.multipart(form),
        }
    }
}
