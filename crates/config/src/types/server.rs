//! `server` section: bind address, cookie settings, and the agent.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use super::secret::{option_secret_string, secret_string};
use crate::constants::{DEFAULT_AGENT_CACHE_PATH, DEFAULT_AGENT_TTL_MS};

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// IP address to bind to.
    pub host: String,
    pub port: u16,
    /// Session cookie signing secret (exactly 32 characters).
    ///
    /// Populated either inline or by resolving `cookie_secret_path`.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "option_secret_string"
    )]
    pub cookie_secret: Option<SecretString>,
    /// File holding the cookie secret. Cleared once the secret is resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie_secret_path: Option<String>,
    /// Whether cookies carry the `Secure` attribute.
    pub cookie_secure: bool,
    #[serde(default)]
    pub agent: AgentConfig,
}

/// Settings for the Headplane agent that runs inside the tailnet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Pre-auth key the agent registers with. Empty disables the agent.
    #[serde(with = "secret_string")]
    pub authkey: SecretString,
    /// How long cached node data stays fresh, in milliseconds.
    pub ttl: u64,
    pub cache_path: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            authkey: SecretString::new(String::new().into()),
            ttl: DEFAULT_AGENT_TTL_MS,
            cache_path: DEFAULT_AGENT_CACHE_PATH.to_string(),
        }
    }
}
