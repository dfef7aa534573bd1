use crate::json_client::ClientError;

#[derive(Debug, thiserror::Error)]
pub enum ConsultationError {
    #[error(transparent)]
    Request(#[from] ClientError),

    #[error("Could not encode the completion request: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("The model returned no content")]
    EmptyReply,
}
