//! Configuration management for Headplane.
//!
//! This crate loads the Headplane YAML configuration file, validates it,
//! resolves file-based secrets, and applies `HEADPLANE_*` environment
//! overrides, producing a single typed [`Config`].

pub mod constants;
mod loader;
pub mod schema;
pub mod secret;
pub mod types;

pub use loader::{
    ConfigError, ConfigLoader, apply_overrides, collect_overrides, deep_merge, env_var_or_none,
    override_path, process_env,
};
pub use schema::{FieldError, SchemaErrors};
pub use secret::{SecretError, resolve_secret};
pub use types::{
    AgentConfig, Config, DockerIntegration, HeadscaleConfig, IntegrationConfig,
    KubernetesIntegration, OidcConfig, ProcIntegration, ServerConfig, TokenEndpointAuthMethod,
};
