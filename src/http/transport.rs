//! Transport
//!
//! The seam between the request pipeline and the network. Generated actions
//! hand a fully built [`Request`] to a [`Transport`] and get back a buffered
//! [`Response`]; everything protocol-specific lives behind that trait.

use super::HttpMethod;
use crate::error::{ClientError, Result};
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Request headers, keyed by lowercase header name
pub type Headers = BTreeMap<String, String>;

/// Options forwarded verbatim to the transport on every call
pub type FetchOptions = Map<String, Value>;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

const USER_AGENT: &str = concat!("restmint/", env!("CARGO_PKG_VERSION"));

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
fn sanitize_for_log(body: &str) -> String {
    let total = body.chars().count();
    let truncated = if total > MAX_LOG_BODY_LENGTH {
        let head: String = body.chars().take(MAX_LOG_BODY_LENGTH).collect();
        format!("{}... [truncated, {} bytes total]", head, body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// A fully resolved outgoing request
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Headers,
    pub body: Option<Value>,
    pub options: FetchOptions,
}

/// A buffered response from the transport
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl Response {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Build a response whose body is the given JSON value
    pub fn json_body(status: StatusCode, body: &Value) -> Self {
        Self::new(status, body.to_string())
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Canonical reason phrase of the status ("Unauthorized" for 401)
    pub fn status_text(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or("")
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decode the body as JSON
    pub fn json(&self) -> Result<Value> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// Something that can carry a [`Request`] to a server
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: Request) -> Result<Response>;
}

/// Default transport backed by reqwest
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with default client settings
    pub fn new() -> Result<Self> {
        Self::from_options(&FetchOptions::new())
    }

    /// Create a transport honoring the client-level fetch options
    ///
    /// `credentials: "include"` keeps a cookie store across calls and
    /// `redirect: "manual"` stops redirects from being followed.
    pub fn from_options(options: &FetchOptions) -> Result<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);

        if options.get("credentials").and_then(Value::as_str) == Some("include") {
            builder = builder.cookie_store(true);
        }

        if options.get("redirect").and_then(Value::as_str) == Some("manual") {
            builder = builder.redirect(reqwest::redirect::Policy::none());
        }

        let client = builder.build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: Request) -> Result<Response> {
        tracing::debug!("{} {}", request.method, request.url);

        let mut builder = self.client.request(request.method.into(), &request.url);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(ClientError::transport)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(ClientError::transport)?
            .to_vec();

        if !status.is_success() {
            // Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::warn!(
                "API error: {} - {}",
                status,
                sanitize_for_log(&String::from_utf8_lossy(&body))
            );
        }

        Ok(Response {
            status,
            headers,
            body,
        })
    }
}
