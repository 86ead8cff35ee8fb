use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::env;

pub const DEFAULT_BASE_URL: &str = "https://vip-reseller.co.id/api/";
pub const DEFAULT_COMMAND_PREFIX: &str = "VIPaymentLibs";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = "vipayment-rs/0.1";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_id: Option<Secret<String>>,
    pub api_key: Option<Secret<String>>,
    pub base_url: Option<String>,
    pub timeout_seconds: u64,
    pub user_agent: String,
    pub command_prefix: String,
    pub max_in_flight: Option<usize>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_id: None,
            api_key: None,
            base_url: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            command_prefix: DEFAULT_COMMAND_PREFIX.to_string(),
            max_in_flight: None,
        }
    }
}

// Custom Serialize implementation - never expose secrets in serialization
impl Serialize for ClientConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let redact = |secret: &Option<Secret<String>>| secret.as_ref().map(|_| "[REDACTED]");

        let mut state = serializer.serialize_struct("ClientConfig", 7)?;
        state.serialize_field("api_id", &redact(&self.api_id))?;
        state.serialize_field("api_key", &redact(&self.api_key))?;
        state.serialize_field("base_url", &self.base_url)?;
        state.serialize_field("timeout_seconds", &self.timeout_seconds)?;
        state.serialize_field("user_agent", &self.user_agent)?;
        state.serialize_field("command_prefix", &self.command_prefix)?;
        state.serialize_field("max_in_flight", &self.max_in_flight)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for ClientConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct ClientConfigHelper {
            api_id: Option<String>,
            api_key: Option<String>,
            base_url: Option<String>,
            timeout_seconds: Option<u64>,
            user_agent: Option<String>,
            command_prefix: Option<String>,
            max_in_flight: Option<usize>,
        }

        let helper = ClientConfigHelper::deserialize(deserializer)?;
        let defaults = Self::default();
        Ok(Self {
            api_id: helper.api_id.map(Secret::new),
            api_key: helper.api_key.map(Secret::new),
            base_url: helper.base_url,
            timeout_seconds: helper.timeout_seconds.unwrap_or(defaults.timeout_seconds),
            user_agent: helper.user_agent.unwrap_or(defaults.user_agent),
            command_prefix: helper.command_prefix.unwrap_or(defaults.command_prefix),
            max_in_flight: helper.max_in_flight,
        })
    }
}

impl ClientConfig {
    /// Create a configuration with both API credentials set
    #[must_use]
    pub fn new(api_id: String, api_key: String) -> Self {
        Self {
            api_id: Some(Secret::new(api_id)),
            api_key: Some(Secret::new(api_key)),
            ..Self::default()
        }
    }

    /// Configuration without credentials. Requests are still signed, the
    /// remote service rejects them.
    #[must_use]
    pub fn unauthenticated() -> Self {
        Self::default()
    }

    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `{PREFIX}_API_ID` (optional)
    /// - `{PREFIX}_API_KEY` (optional)
    /// - `{PREFIX}_BASE_URL` (optional)
    /// - `{PREFIX}_TIMEOUT_SECONDS` (optional, defaults to 30)
    pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
        let prefix = prefix.to_uppercase();
        let api_id = env::var(format!("{}_API_ID", prefix)).ok();
        let api_key = env::var(format!("{}_API_KEY", prefix)).ok();
        let base_url = env::var(format!("{}_BASE_URL", prefix)).ok();

        let timeout_var = format!("{}_TIMEOUT_SECONDS", prefix);
        let timeout_seconds = match env::var(&timeout_var) {
            Ok(raw) => raw.parse::<u64>().map_err(|e| {
                ConfigError::InvalidConfiguration(format!("{}='{}': {}", timeout_var, raw, e))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECONDS,
        };

        Ok(Self {
            api_id: api_id.map(Secret::new),
            api_key: api_key.map(Secret::new),
            base_url,
            timeout_seconds,
            ..Self::default()
        })
    }

    /// Create configuration from .env file and environment variables
    ///
    /// **Security Warning**: Never commit .env files to version control!
    #[cfg(feature = "env-file")]
    pub fn from_env_file(prefix: &str) -> Result<Self, ConfigError> {
        Self::from_env_file_with_path(prefix, ".env")
    }

    /// Create configuration from a specific .env file path
    #[cfg(feature = "env-file")]
    pub fn from_env_file_with_path(prefix: &str, env_file_path: &str) -> Result<Self, ConfigError> {
        load_env_file(env_file_path)?;
        Self::from_env(prefix)
    }

    /// Load configuration with automatic .env file detection
    ///
    /// Tries `.env.local`, then `.env.{ENVIRONMENT}`, then `.env`, and loads
    /// only the first one found. Falls back to system environment variables.
    #[cfg(feature = "env-file")]
    pub fn from_env_auto(prefix: &str) -> Result<Self, ConfigError> {
        let env_files = [
            ".env.local".to_string(),
            format!(
                ".env.{}",
                env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string())
            ),
            ".env".to_string(),
        ];

        for env_file in &env_files {
            if load_env_file(env_file)? {
                break;
            }
        }

        Self::from_env(prefix)
    }

    /// Check if both credentials are present and non-empty
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        let present = |secret: &Option<Secret<String>>| {
            secret
                .as_ref()
                .is_some_and(|s| !s.expose_secret().is_empty())
        };
        present(&self.api_id) && present(&self.api_key)
    }

    #[must_use]
    pub fn base_url(mut self, base_url: String) -> Self {
        self.base_url = Some(base_url);
        self
    }

    #[must_use]
    pub const fn timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    #[must_use]
    pub fn command_prefix(mut self, prefix: String) -> Self {
        self.command_prefix = prefix;
        self
    }

    /// Bound the number of requests allowed on the wire at once
    #[must_use]
    pub const fn max_in_flight(mut self, limit: usize) -> Self {
        self.max_in_flight = Some(limit);
        self
    }

    /// Base URL with a guaranteed trailing slash
    pub fn resolved_base_url(&self) -> String {
        let base = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{}/", base)
        }
    }

    /// Get API ID (use carefully - exposes secret)
    pub fn api_id(&self) -> Option<&str> {
        self.api_id.as_ref().map(|s| s.expose_secret().as_str())
    }

    /// Get API key (use carefully - exposes secret)
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|s| s.expose_secret().as_str())
    }
}

/// Returns `Ok(false)` when the file does not exist
#[cfg(feature = "env-file")]
fn load_env_file(path: &str) -> Result<bool, ConfigError> {
    match dotenv::from_path(path) {
        Ok(()) => Ok(true),
        Err(dotenv::Error::Io(io_err)) if io_err.kind() == std::io::ErrorKind::NotFound => {
            Ok(false)
        }
        Err(e) => Err(ConfigError::InvalidConfiguration(format!(
            "Failed to load .env file '{}': {}",
            path, e
        ))),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("No Tokio runtime available: {0}")]
    MissingRuntime(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_redacts_secrets() {
        let config = ClientConfig::new("123".to_string(), "abc".to_string());
        let json = serde_json::to_string(&config).unwrap();

        assert!(json.contains("[REDACTED]"));
        assert!(!json.contains("\"abc\""));
        assert!(!json.contains("\"123\""));
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"api_id":"123","api_key":"abc"}"#).unwrap();

        assert_eq!(config.api_id(), Some("123"));
        assert_eq!(config.api_key(), Some("abc"));
        assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
        assert_eq!(config.command_prefix, DEFAULT_COMMAND_PREFIX);
    }

    #[test]
    fn test_has_credentials() {
        assert!(ClientConfig::new("id".to_string(), "key".to_string()).has_credentials());
        assert!(!ClientConfig::new("id".to_string(), String::new()).has_credentials());
        assert!(!ClientConfig::unauthenticated().has_credentials());
    }

    #[test]
    fn test_resolved_base_url_adds_trailing_slash() {
        let config = ClientConfig::default().base_url("http://localhost:8080/api".to_string());
        assert_eq!(config.resolved_base_url(), "http://localhost:8080/api/");
        assert_eq!(ClientConfig::default().resolved_base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_from_env_reads_prefixed_variables() {
        env::set_var("VIPTESTCFG_API_ID", "env-id");
        env::set_var("VIPTESTCFG_API_KEY", "env-key");
        env::set_var("VIPTESTCFG_TIMEOUT_SECONDS", "12");

        let config = ClientConfig::from_env("viptestcfg").unwrap();
        assert_eq!(config.api_id(), Some("env-id"));
        assert_eq!(config.api_key(), Some("env-key"));
        assert_eq!(config.timeout_seconds, 12);

        env::set_var("VIPTESTCFG_TIMEOUT_SECONDS", "soon");
        assert!(ClientConfig::from_env("viptestcfg").is_err());
    }

    #[test]
    fn test_from_env_without_variables_is_unauthenticated() {
        let config = ClientConfig::from_env("viptestunset").unwrap();
        assert!(config.api_id().is_none());
        assert!(config.api_key().is_none());
        assert!(!config.has_credentials());
        assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
    }

    #[test]
    fn test_invalid_timeout_is_invalid_configuration() {
        env::set_var("VIPTESTBAD_TIMEOUT_SECONDS", "-1");
        let err = ClientConfig::from_env("viptestbad").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfiguration(_)));
    }
}
