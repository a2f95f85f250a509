//! Configuration type definitions for Headplane.
//!
//! Responsibilities:
//! - Define the typed configuration document (`Config`) and its sections.
//! - Provide serialization helpers for secret values.
//! - Render a redacted view of the configuration for logs and `--print`.
//!
//! Does NOT handle:
//! - Validation or coercion of raw input (see `schema` module).
//! - Loading from files or environment variables (see `loader` module).
//!
//! Invariants:
//! - All secret values use `secrecy::SecretString` to prevent accidental logging.
//! - A `Config` only ever comes out of `schema::validate_config`, so the field
//!   constraints (ports, URLs, secret pairs) hold for every instance.

mod headscale;
mod integration;
mod oidc;
pub(crate) mod secret;
mod server;

pub use headscale::HeadscaleConfig;
pub use integration::{
    DockerIntegration, IntegrationConfig, KubernetesIntegration, ProcIntegration,
};
pub use oidc::{OidcConfig, TokenEndpointAuthMethod};
pub use server::{AgentConfig, ServerConfig};

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::constants::SECRET_MASK;

/// Field paths holding secret values, masked by [`Config::to_redacted_yaml`].
const SECRET_VALUE_PATHS: [&[&str]; 4] = [
    &["server", "cookie_secret"],
    &["server", "agent", "authkey"],
    &["oidc", "client_secret"],
    &["oidc", "headscale_api_key"],
];

/// The validated Headplane configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Mirrors the logging subsystem's debug state; never read from the file.
    pub debug: bool,
    pub server: ServerConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oidc: Option<OidcConfig>,
    pub headscale: HeadscaleConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration: Option<IntegrationConfig>,
}

impl Config {
    /// Render the configuration as YAML with every secret value masked.
    pub fn to_redacted_yaml(&self) -> Result<String, serde_yaml::Error> {
        let mut tree = serde_yaml::to_value(self)?;
        for path in SECRET_VALUE_PATHS {
            mask_path(&mut tree, path);
        }
        serde_yaml::to_string(&tree)
    }
}

fn mask_path(tree: &mut Value, path: &[&str]) {
    let Some((leaf, parents)) = path.split_last() else {
        return;
    };
    let mut node = tree;
    for segment in parents {
        match node.get_mut(*segment) {
            Some(next) => node = next,
            None => return,
        }
    }
    if let Some(value) = node.get_mut(*leaf) {
        if value.as_str().is_some_and(|s| !s.is_empty()) {
            *value = Value::String(SECRET_MASK.to_string());
        }
    }
}
