use std::{path::PathBuf, time::Duration};

use inv_client::ClientConfig;
use serde::Deserialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Admin panel settings, read from `INV_*` environment variables
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// `INV_API_BASE_URL`
    pub api_base_url: String,
    /// `INV_ENV`: `development` or `production`
    pub env: Environment,
    /// `INV_SESSION_COOKIE`: raw `Cookie` header of a signed-in session
    pub session_cookie: Option<String>,
    /// `INV_REQUEST_TIMEOUT_SECS`; unset means no timeout
    pub request_timeout_secs: Option<u64>,
    /// `INV_DASHBOARD_REFRESH_SECS`
    pub dashboard_refresh_secs: u64,
    /// `INV_SUCCESS_MESSAGE_MS`
    pub success_message_ms: u64,
    /// `INV_LOG_DIR`: also write JSON logs to a daily file here
    pub log_dir: Option<PathBuf>,
}

impl AdminConfig {
    pub const ENV_PREFIX: &'static str = "INV_";

    pub fn from_env() -> Result<Self, envy::Error> {
        envy::prefixed(Self::ENV_PREFIX).from_env()
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api_base_url.clone(),
            session_cookie: self.session_cookie.clone(),
            timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn dashboard_refresh(&self) -> Duration {
        Duration::from_secs(self.dashboard_refresh_secs)
    }

    pub fn success_message_ttl(&self) -> Duration {
        Duration::from_millis(self.success_message_ms)
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".to_string(),
            env: Environment::Development,
            session_cookie: None,
            request_timeout_secs: None,
            dashboard_refresh_secs: 300,
            success_message_ms: 3000,
            log_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<AdminConfig, envy::Error> {
        envy::prefixed(AdminConfig::ENV_PREFIX).from_iter(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = from_pairs(&[]).unwrap();
        assert_eq!(config, AdminConfig::default());
        assert_eq!(config.dashboard_refresh(), Duration::from_secs(300));
        assert_eq!(config.success_message_ttl(), Duration::from_millis(3000));
        assert!(config.client_config().timeout.is_none());
    }

    #[test]
    fn test_prefixed_overrides() {
        let config = from_pairs(&[
            ("INV_API_BASE_URL", "http://inventory.local:9000"),
            ("INV_ENV", "production"),
            ("INV_SESSION_COOKIE", "JSESSIONID=abc"),
            ("INV_REQUEST_TIMEOUT_SECS", "15"),
            ("INV_DASHBOARD_REFRESH_SECS", "60"),
            ("UNRELATED", "ignored"),
        ])
        .unwrap();

        assert_eq!(config.env, Environment::Production);
        assert!(!config.env.is_development());
        assert_eq!(config.dashboard_refresh(), Duration::from_secs(60));

        let client = config.client_config();
        assert_eq!(client.base_url, "http://inventory.local:9000");
        assert_eq!(client.session_cookie.as_deref(), Some("JSESSIONID=abc"));
        assert_eq!(client.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        assert!(from_pairs(&[("INV_DASHBOARD_REFRESH_SECS", "soon")]).is_err());
    }
}
