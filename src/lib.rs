pub mod analytics;
pub mod config;
pub mod consultation;
pub mod http_client;
pub mod json_client;
pub mod request_id;
pub mod session;
pub mod session_api;
