//! Query dispatch.
//!
//! A builder can be run two ways: explicitly through [`QueryBuilder::execute`]
//! or by awaiting the builder itself. Both funnel into one private dispatch
//! path, so a builder performs at most one request however it is run.

use std::future::{Future, IntoFuture};
use std::pin::Pin;

use serde_json::Value;
use tracing::{debug, error, warn};

use crate::error::{ClientError, ClientResult, CONNECTIVITY_MESSAGE};
use crate::query::builder::QueryBuilder;
use crate::session::InvalidationReason;
use crate::transport::ProxyResponse;

impl QueryBuilder {
    /// Send the query and return the decoded response document
    pub async fn execute(self) -> ClientResult<Value> {
        self.dispatch().await
    }

    async fn dispatch(self) -> ClientResult<Value> {
        let url = self.ctx.config.query_endpoint()?;
        let request = self.to_request();
        let token = self.ctx.session.access_token();

        debug!(
            "Dispatching {} on '{}' to {}",
            request.body.operation(),
            request.collection,
            url
        );

        let response = self
            .ctx
            .transport
            .post_query(&url, token.as_deref(), &request)
            .await;

        match response {
            Ok(response) => self.classify_response(response).await,
            Err(cause) => {
                warn!(
                    "Unable to reach the query proxy at {} ({} on '{}'): {}; possible causes include DNS failure, a refused connection or a cross-origin rejection",
                    url,
                    request.body.operation(),
                    request.collection,
                    cause
                );
                Err(ClientError::network(CONNECTIVITY_MESSAGE))
            }
        }
    }

    async fn classify_response(&self, response: ProxyResponse) -> ClientResult<Value> {
        let ProxyResponse {
            status,
            status_text,
            body,
        } = response;

        if (200..300).contains(&status) {
            return serde_json::from_str(&body).map_err(|e| {
                ClientError::decode(format!("Unparseable response body: {}", e))
            });
        }

        if status == 401 || status == 403 {
            warn!(
                "Query on '{}' rejected with {}; discarding the stored session",
                self.collection, status
            );
            self.ctx
                .session
                .invalidate(InvalidationReason::Rejected { status })
                .await;
            return Err(ClientError::SessionExpired);
        }

        let message = extract_error_message(&body)
            .unwrap_or_else(|| format!("HTTP {}: {}", status, status_text));

        if status >= 500 {
            error!("Query proxy failed on '{}': {}", self.collection, message);
            Err(ClientError::server_query(status, message))
        } else {
            warn!("Query on '{}' rejected: {}", self.collection, message);
            Err(ClientError::client_query(status, message))
        }
    }
}

/// Pull a human-readable message out of an error body, when the proxy sent one
fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    for key in ["message", "error"] {
        if let Some(message) = value.get(key).and_then(Value::as_str) {
            return Some(message.to_string());
        }
    }
    None
}

impl IntoFuture for QueryBuilder {
    type Output = ClientResult<Value>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.dispatch())
    }
}
