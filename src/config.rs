//! Process-wide client configuration.
//!
//! Built once at startup (see `cli_arguments`) and handed to every
//! `TimedJsonClient`; nothing inside the client reads the environment.

use std::time::Duration;

use crate::http_client::request::RequestHeaders;

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_RETRIES: u32 = 3;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Base URL is empty")]
    EmptyBaseUrl,

    #[error("Base URL {0} must start with http:// or https://")]
    MissingScheme(String),

    #[error("Timeout must be greater than zero")]
    ZeroTimeout,

    #[error("The hosted backend requires an API key")]
    MissingHostedKey,
}

/// Header scheme of the backend the client talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendProfile {
    /// Custom REST backend. JSON content type only.
    Rest,
    /// Database-as-a-service REST endpoint keyed by an anonymous API key.
    Hosted { api_key: String },
}

impl BackendProfile {
    pub fn headers(&self) -> RequestHeaders {
        let mut headers = RequestHeaders::default();
        headers.set("content-type", "application/json");

        if let BackendProfile::Hosted { api_key } = self {
            headers.set("apikey", api_key);
            headers.set("authorization", &format!("Bearer {api_key}"));
            headers.set("prefer", "return=representation");
        }

        headers
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: String,
    timeout: Duration,
    profile: BackendProfile,
    default_headers: RequestHeaders,
    /// Accepted for compatibility with existing deployments. No code path
    /// reads it: every call is attempted exactly once.
    max_retries: u32,
}

impl ClientConfig {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ConfigError> {
        let base_url = base_url.trim().trim_end_matches('/');

        if base_url.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }

        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::MissingScheme(base_url.to_string()));
        }

        if timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(Self {
            base_url: base_url.to_string(),
            timeout,
            profile: BackendProfile::Rest,
            default_headers: RequestHeaders::default(),
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    pub fn with_profile(mut self, profile: BackendProfile) -> Result<Self, ConfigError> {
        if let BackendProfile::Hosted { api_key } = &profile {
            if api_key.trim().is_empty() {
                return Err(ConfigError::MissingHostedKey);
            }
        }
        self.profile = profile;
        Ok(self)
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.default_headers.set(name, value);
        self
    }

    pub fn with_bearer_token(self, token: &str) -> Self {
        self.with_header("authorization", &format!("Bearer {token}"))
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn profile(&self) -> &BackendProfile {
        &self.profile
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Joins `path` onto the base URL with exactly one separating slash.
    pub fn url_for(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Profile headers, then configured defaults. Per-request overrides are
    /// layered on top by the client.
    pub fn headers(&self) -> RequestHeaders {
        let mut headers = self.profile.headers();
        headers.merge(&self.default_headers);
        headers
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::config::{BackendProfile, ClientConfig, ConfigError, DEFAULT_MAX_RETRIES};

    fn config(base_url: &str) -> ClientConfig {
        ClientConfig::new(base_url, Duration::from_millis(1000)).unwrap()
    }

    #[test]
    fn trims_trailing_slashes_from_the_base_url() {
        assert_eq!(config("http://api.test/x/").base_url(), "http://api.test/x");
        assert_eq!(config("  https://api.test//  ").base_url(), "https://api.test");
    }

    #[test]
    fn rejects_invalid_configuration() {
        assert_eq!(
            ClientConfig::new("", Duration::from_secs(1)).unwrap_err(),
            ConfigError::EmptyBaseUrl
        );
        assert_eq!(
            ClientConfig::new("backend.up.railway.app", Duration::from_secs(1)).unwrap_err(),
            ConfigError::MissingScheme("backend.up.railway.app".to_string())
        );
        assert_eq!(
            ClientConfig::new("http://api.test", Duration::ZERO).unwrap_err(),
            ConfigError::ZeroTimeout
        );
        assert_eq!(
            config("http://api.test")
                .with_profile(BackendProfile::Hosted {
                    api_key: " ".to_string()
                })
                .unwrap_err(),
            ConfigError::MissingHostedKey
        );
    }

    #[test]
    fn joins_paths_with_a_single_slash() {
        let config = config("http://api.test/x");

        assert_eq!(config.url_for("/sessions"), "http://api.test/x/sessions");
        assert_eq!(config.url_for("sessions/7"), "http://api.test/x/sessions/7");
        assert_eq!(
            config.url_for("/rest/v1/sessions?id=eq.7"),
            "http://api.test/x/rest/v1/sessions?id=eq.7"
        );
        assert_eq!(config.url_for(""), "http://api.test/x");
    }

    #[test]
    fn rest_profile_only_sends_json_content_type() {
        let headers = config("http://api.test").headers();

        assert_eq!(headers.len(), 1);
        assert_eq!(
            headers.get("content-type"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn hosted_profile_sends_key_headers() {
        let headers = config("http://db.test")
            .with_profile(BackendProfile::Hosted {
                api_key: "anon".to_string(),
            })
            .unwrap()
            .headers();

        assert_eq!(headers.get("apikey"), Some(&"anon".to_string()));
        assert_eq!(headers.get("authorization"), Some(&"Bearer anon".to_string()));
        assert_eq!(
            headers.get("prefer"),
            Some(&"return=representation".to_string())
        );
    }

    #[test]
    fn default_headers_override_profile_headers() {
        let headers = config("http://api.test")
            .with_header("Content-Type", "application/vnd.api+json")
            .with_bearer_token("secret")
            .headers();

        assert_eq!(
            headers.get("content-type"),
            Some(&"application/vnd.api+json".to_string())
        );
        assert_eq!(
            headers.get("authorization"),
            Some(&"Bearer secret".to_string())
        );
    }

    #[test]
    fn max_retries_is_carried_but_defaults_to_three() {
        let config = config("http://api.test");
        assert_eq!(config.max_retries(), DEFAULT_MAX_RETRIES);
        assert_eq!(config.with_max_retries(0).max_retries(), 0);
    }
}
