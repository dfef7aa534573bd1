use std::sync::Arc;

use bytes::Bytes;
use http::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{Instrument, debug, info_span, warn};

use crate::{
    config::ClientConfig,
    http_client::{http_client::HttpClient, request::Request, response::Response},
    json_client::{client_error::ClientError, json_request::JsonRequest},
    request_id::{X_REQUEST_ID, new_request_id},
};

/// JSON-in/JSON-out client bounded by a wall-clock deadline.
///
/// Holds only immutable configuration and a shared transport, so one instance
/// can serve any number of concurrent calls. Each `send` performs exactly one
/// network attempt.
#[derive(Clone)]
pub struct TimedJsonClient {
    http_client: Arc<dyn HttpClient>,
    config: ClientConfig,
}

impl TimedJsonClient {
    pub fn new(http_client: Arc<dyn HttpClient>, config: ClientConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Sends `request` and resolves with the decoded payload or a single
    /// `ClientError`.
    ///
    /// The network call races the configured timeout. When the deadline wins
    /// the transport future is dropped, which aborts the underlying
    /// connection; when the call wins the timer is dropped with it.
    pub async fn send(&self, request: JsonRequest) -> Result<Value, ClientError> {
        let request_id = new_request_id();
        let span = info_span!(
            "json_request",
            method = %request.method,
            path = %request.path,
            request_id = %request_id,
        );

        async move {
            let http_request = self.build_request(request, &request_id);

            let outcome = tokio::time::timeout(
                self.config.timeout(),
                self.http_client.execute(http_request),
            )
            .await;

            let response = match outcome {
                Err(_) => {
                    warn!("Deadline of {:?} elapsed, request aborted", self.config.timeout());
                    return Err(ClientError::Timeout);
                }
                Ok(Err(err)) => {
                    warn!("Transport failed: {err}");
                    return Err(ClientError::from(err));
                }
                Ok(Ok(response)) => response,
            };

            debug!("Response status {}", response.status);
            decode_response(response)
        }
        .instrument(span)
        .await
    }

    /// Like `send`, then decodes the payload into `T`. A payload of the wrong
    /// shape is reported as `DecodeFailure`.
    pub async fn send_as<T: DeserializeOwned>(&self, request: JsonRequest) -> Result<T, ClientError> {
        let payload = self.send(request).await?;
        serde_json::from_value(payload).map_err(|e| ClientError::DecodeFailure(e.to_string()))
    }

    fn build_request(&self, request: JsonRequest, request_id: &str) -> Request {
        let mut headers = self.config.headers();
        headers.set(X_REQUEST_ID.as_str(), request_id);
        headers.merge(&request.headers);

        let body = request
            .body
            .map(|value| Bytes::from(value.to_string()))
            .unwrap_or_default();

        Request {
            method: request.method,
            url: self.config.url_for(&request.path),
            headers,
            body,
        }
    }
}

/// Maps a completed exchange onto a payload or an error.
pub(crate) fn decode_response(response: Response) -> Result<Value, ClientError> {
    if !response.is_success() {
        let message = server_message(&response.body)
            .unwrap_or_else(|| synthesized_message(response.status));
        warn!("Server answered {}: {}", response.status, message);
        return Err(ClientError::HttpError {
            status: response.status,
            message,
        });
    }

    if response.status == StatusCode::NO_CONTENT.as_u16()
        && response.body.iter().all(u8::is_ascii_whitespace)
    {
        return Ok(Value::Null);
    }

    serde_json::from_slice(&response.body).map_err(|e| {
        warn!("Response body is not valid JSON: {e}");
        ClientError::DecodeFailure(e.to_string())
    })
}

/// The `error` field of a JSON error body, falling back to `message`. Chat
/// completion providers nest theirs as `error.message`.
fn server_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;

    let candidates = [
        value.get("error"),
        value.get("error").and_then(|error| error.get("message")),
        value.get("message"),
    ];

    candidates.into_iter().flatten().find_map(|candidate| {
        candidate
            .as_str()
            .map(str::trim)
            .filter(|message| !message.is_empty())
            .map(str::to_string)
    })
}

fn synthesized_message(status: u16) -> String {
    let reason = StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("Unknown Status");
    format!("Error {status}: {reason}")
}
