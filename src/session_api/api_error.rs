use crate::json_client::ClientError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Request(#[from] ClientError),

    #[error("Could not encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ApiError {
    /// The client error behind this failure, if the request was sent at all.
    pub fn client_error(&self) -> Option<&ClientError> {
        match self {
            ApiError::Request(err) => Some(err),
            ApiError::Encode(_) => None,
        }
    }
}
