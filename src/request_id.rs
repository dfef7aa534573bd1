use http::HeaderName;
use uuid::Uuid;

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Fresh id attached to every outbound call so backend logs can be correlated
/// with the client's tracing spans.
pub fn new_request_id() -> String {
    Uuid::new_v4().to_string()
}
