//! HTTP transport for query requests.
//!
//! The transport is deliberately thin: it posts one JSON document and reports
//! the raw response. Classifying statuses and decoding bodies is the
//! dispatcher's job, which keeps the seam narrow enough to replace with
//! [`MockTransport`] in tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::error::{ClientError, ClientResult};
use crate::query::wire::QueryRequest;

/// Raw response from the query endpoint before classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl ProxyResponse {
    pub fn new(status: u16, status_text: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            body: body.into(),
        }
    }
}

/// Failure to complete the HTTP exchange at all.
///
/// Covers DNS failures, refused connections and the like; responses that
/// arrived with an error status are not transport errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError::new(err.to_string())
    }
}

/// Carrier of query requests to the proxy
#[async_trait]
pub trait QueryTransport: Send + Sync {
    /// Post one query document, attaching a bearer token when one is given
    async fn post_query(
        &self,
        url: &str,
        bearer: Option<&str>,
        body: &QueryRequest,
    ) -> Result<ProxyResponse, TransportError>;
}

/// reqwest-backed transport used by default
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> ClientResult<Self> {
        let client = Client::builder().build().map_err(|e| {
            ClientError::configuration(format!("Failed to create HTTP client: {}", e))
        })?;
        Ok(Self { client })
    }

    fn build_headers(bearer: Option<&str>) -> Result<HeaderMap, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = bearer {
            let auth_header = format!("Bearer {}", token);
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&auth_header)
                    .map_err(|e| TransportError::new(format!("Invalid session token: {}", e)))?,
            );
        }
        Ok(headers)
    }
}

#[async_trait]
impl QueryTransport for HttpTransport {
    async fn post_query(
        &self,
        url: &str,
        bearer: Option<&str>,
        body: &QueryRequest,
    ) -> Result<ProxyResponse, TransportError> {
        let headers = Self::build_headers(bearer)?;

        let response = self
            .client
            .post(url)
            .headers(headers)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let status_text = status
            .canonical_reason()
            .unwrap_or("Unknown Status")
            .to_string();
        let body = response.text().await?;

        debug!("Query proxy answered {} for {}", status, url);
        Ok(ProxyResponse::new(status.as_u16(), status_text, body))
    }
}

/// Request as seen by [`MockTransport`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub url: String,
    pub bearer: Option<String>,
    pub body: Value,
}

/// Scripted transport double for tests.
///
/// Responses are handed out in the order they were queued; once the queue is
/// empty every call answers `200 OK` with an empty row set. Each call is
/// recorded so tests can assert on the exact documents that went out.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<ProxyResponse, TransportError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a canned response
    pub fn with_response(
        self,
        status: u16,
        status_text: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(ProxyResponse::new(status, status_text, body)));
        self
    }

    /// Queue a transport failure
    pub fn with_failure(self, cause: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(TransportError::new(cause)));
        self
    }

    /// Requests recorded so far, oldest first
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of calls made against this transport
    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl QueryTransport for MockTransport {
    async fn post_query(
        &self,
        url: &str,
        bearer: Option<&str>,
        body: &QueryRequest,
    ) -> Result<ProxyResponse, TransportError> {
        let body = serde_json::to_value(body)
            .map_err(|e| TransportError::new(format!("Unserializable request: {}", e)))?;
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_string(),
            bearer: bearer.map(str::to_string),
            body,
        });

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ProxyResponse::new(200, "OK", r#"{"rows":[]}"#)))
    }
}
