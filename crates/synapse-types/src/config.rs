//! Global configuration types for Synapse.
//!
//! `AppConfig` represents the top-level `config.toml` that controls the
//! API bind port and the completion service endpoint.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the Synapse engine.
///
/// Loaded from `~/.synapse/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Port the API server binds to.
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// Base URL of the completion service.
    #[serde(default = "default_completion_base_url")]
    pub completion_base_url: String,

    /// Timeout for a single completion request, in seconds.
    #[serde(default = "default_completion_timeout_secs")]
    pub completion_timeout_secs: u64,
}

fn default_bind_port() -> u16 {
    8080
}

fn default_completion_base_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_completion_timeout_secs() -> u64 {
    300
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_port: default_bind_port(),
            completion_base_url: default_completion_base_url(),
            completion_timeout_secs: default_completion_timeout_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default_values() {
        let config = AppConfig::default();
        assert_eq!(config.bind_port, 8080);
        assert_eq!(config.completion_base_url, "http://localhost:3001");
        assert_eq!(config.completion_timeout_secs, 300);
    }

    #[test]
    fn test_app_config_deserialize_empty() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.bind_port, 8080);
    }

    #[test]
    fn test_app_config_deserialize_partial() {
        let toml_str = r#"
completion_base_url = "https://synapse-api.example.com"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.completion_base_url, "https://synapse-api.example.com");
        assert_eq!(config.bind_port, 8080);
        assert_eq!(config.completion_timeout_secs, 300);
    }

    #[test]
    fn test_app_config_serde_roundtrip() {
        let config = AppConfig {
            bind_port: 9090,
            completion_base_url: "http://127.0.0.1:3001".to_string(),
            completion_timeout_secs: 60,
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.bind_port, 9090);
        assert_eq!(parsed.completion_timeout_secs, 60);
    }
}
