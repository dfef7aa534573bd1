/// Failure of one raw exchange, before any status or body is looked at.
///
/// `TimedJsonClient` folds these into `ClientError`: `Timeout` stays a
/// timeout, the other two become a network failure carrying the cause.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No connection, DNS failure, reset or a body cut off mid-read.
    #[error("Network error: {0}")]
    Network(String),

    /// The request could not be built or sent as given.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The transport's own timer fired. The request deadline is enforced
    /// above the transport, so this only shows up with a custom client.
    #[error("Transport timed out")]
    Timeout,
}

/// What the transport needs to know about a backend library's error to
/// classify it.
#[cfg_attr(test, mockall::automock)]
pub trait HttpClientErrorChecker {
    fn is_timeout(&self) -> bool;
    fn is_connect(&self) -> bool;
    fn is_request(&self) -> bool;
    fn error_string(&self) -> String;
}

#[cfg(test)]
mod tests {
    use crate::http_client::error::Error;

    #[test]
    fn messages_keep_the_underlying_cause() {
        assert_eq!(
            Error::Network("connection refused".to_string()).to_string(),
            "Network error: connection refused"
        );
        assert_eq!(
            Error::InvalidRequest("builder error".to_string()).to_string(),
            "Invalid request: builder error"
        );
        assert_eq!(Error::Timeout.to_string(), "Transport timed out");
    }
}
