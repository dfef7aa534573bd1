pub mod client_error;
pub mod json_request;
pub mod timed_json_client;

pub use client_error::ClientError;
pub use json_request::JsonRequest;
pub use timed_json_client::TimedJsonClient;
