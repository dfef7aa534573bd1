use crate::http_client::error::Error;

/// Every way a `TimedJsonClient::send` call can fail. The variants are
/// mutually exclusive; callers decide how to present each one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    #[error("The request took too long")]
    Timeout,

    #[error("Network failure: {0}")]
    NetworkFailure(String),

    #[error("{message}")]
    HttpError { status: u16, message: String },

    #[error("Invalid JSON in response: {0}")]
    DecodeFailure(String),
}

impl From<Error> for ClientError {
    fn from(err: Error) -> Self {
        match err {
            Error::Timeout => ClientError::Timeout,
            Error::Network(cause) | Error::InvalidRequest(cause) => {
                ClientError::NetworkFailure(cause)
            }
        }
    }
}
