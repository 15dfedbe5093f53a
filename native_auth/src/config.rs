//! Central configuration for the native-auth crate

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Endpoint and tenant settings shared by every state of a flow.
///
/// The configuration is injected once when a flow is started and carried,
/// read-only, by each state the flow produces. It also travels inside a
/// parked state as an opaque serialized blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthFlowConfig {
    /// Base url of the identity service tenant.
    pub authority: Url,
    /// Client identifier registered with the service.
    pub client_id: String,
    /// Challenge types this client is able to satisfy, in preference order.
    pub challenge_types: Vec<String>,
}

#[derive(Debug, Error, Clone)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid authority url: {0}")]
    InvalidAuthority(String),
}

impl AuthFlowConfig {
    pub fn new(authority: Url, client_id: impl Into<String>, challenge_types: Vec<String>) -> Self {
        Self {
            authority,
            client_id: client_id.into(),
            challenge_types,
        }
    }

    /// Build a configuration from the environment.
    ///
    /// Reads `AUTH_FLOW_AUTHORITY`, `AUTH_FLOW_CLIENT_ID` and the optional
    /// comma-separated `AUTH_FLOW_CHALLENGE_TYPES` (default: "oob,password").
    /// A `.env` file is honored when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let authority = std::env::var("AUTH_FLOW_AUTHORITY")
            .map_err(|_| ConfigError::MissingVar("AUTH_FLOW_AUTHORITY"))?;
        let authority =
            Url::parse(&authority).map_err(|e| ConfigError::InvalidAuthority(e.to_string()))?;

        let client_id = std::env::var("AUTH_FLOW_CLIENT_ID")
            .map_err(|_| ConfigError::MissingVar("AUTH_FLOW_CLIENT_ID"))?;

        let challenge_types = std::env::var("AUTH_FLOW_CHALLENGE_TYPES")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_else(|_| vec!["oob".to_string(), "password".to_string()]);

        Ok(Self {
            authority,
            client_id,
            challenge_types,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new() {
        let config = AuthFlowConfig::new(
            Url::parse("https://login.example.com/tenant").unwrap(),
            "client-123",
            vec!["oob".to_string()],
        );

        assert_eq!(config.authority.as_str(), "https://login.example.com/tenant");
        assert_eq!(config.client_id, "client-123");
        assert_eq!(config.challenge_types, vec!["oob".to_string()]);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = AuthFlowConfig::new(
            Url::parse("https://login.example.com/tenant").unwrap(),
            "client-123",
            vec!["oob".to_string(), "password".to_string()],
        );

        let serialized = serde_json::to_string(&config).expect("Failed to serialize");
        let deserialized: AuthFlowConfig =
            serde_json::from_str(&serialized).expect("Failed to deserialize");

        assert_eq!(deserialized.authority, config.authority);
        assert_eq!(deserialized.client_id, config.client_id);
        assert_eq!(deserialized.challenge_types, config.challenge_types);
    }

    #[test]
    fn test_challenge_type_parsing() {
        // Same splitting logic from_env uses for AUTH_FLOW_CHALLENGE_TYPES
        let raw = "oob, password, ,redirect";
        let parsed: Vec<String> = raw
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        assert_eq!(parsed, vec!["oob", "password", "redirect"]);
    }
}
