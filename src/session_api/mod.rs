pub mod api_error;
pub mod clinic_api;
pub mod hosted_session_store;
pub mod rest_session_store;
pub mod session_store;

use tracing::warn;

pub use api_error::ApiError;
pub use clinic_api::ClinicApi;
pub use hosted_session_store::HostedSessionStore;
pub use rest_session_store::RestSessionStore;
pub use session_store::SessionStore;

use crate::session::{Session, sample::sample_sessions};

/// Sessions from `store`, or the built-in samples when it cannot answer.
/// The second value tells the caller which one it got.
pub async fn sessions_or_sample(store: &dyn SessionStore) -> (Vec<Session>, bool) {
    match store.list_sessions().await {
        Ok(sessions) => (sessions, false),
        Err(err) => {
            warn!("Could not load sessions ({err}), using sample data");
            (sample_sessions(), true)
        }
    }
}
