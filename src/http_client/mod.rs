pub mod error;
#[allow(clippy::module_inception)]
pub mod http_client;
pub mod reqwest_http_client;
pub mod request;
pub mod response;
