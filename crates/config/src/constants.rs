//! Centralized constants for the Headplane configuration loader.
//!
//! Default values, environment variable names, and fixed limits live here so
//! the schema, the loader, and the CLI agree on them.

// =============================================================================
// Environment Variables
// =============================================================================

/// Prefix shared by every environment variable the loader looks at.
pub const ENV_PREFIX: &str = "HEADPLANE_";

/// Delimiter separating nested field names in an override variable
/// (`HEADPLANE_OIDC__CLIENT_ID` -> `oidc.client_id`).
pub const ENV_NESTING_DELIMITER: &str = "__";

/// Path of the YAML configuration file.
pub const ENV_CONFIG_PATH: &str = "HEADPLANE_CONFIG_PATH";

/// Toggle for `.env` loading and `HEADPLANE_*` override coalescing.
pub const ENV_LOAD_ENV_OVERRIDES: &str = "HEADPLANE_LOAD_ENV_OVERRIDES";

/// Toggle for debug logging; also injected as `Config::debug`.
pub const ENV_DEBUG_LOG: &str = "HEADPLANE_DEBUG_LOG";

/// Variables consumed by the loader itself and never treated as overrides.
pub const ROOT_ENV_VARS: [&str; 3] = [ENV_CONFIG_PATH, ENV_LOAD_ENV_OVERRIDES, ENV_DEBUG_LOG];

/// Set to `1` or `true` to skip `.env` loading entirely.
pub const ENV_DOTENV_DISABLED: &str = "DOTENV_DISABLED";

// =============================================================================
// File Locations
// =============================================================================

/// Configuration file used when no path is supplied.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/headplane/config.yaml";

/// Default location of the agent's node cache.
pub const DEFAULT_AGENT_CACHE_PATH: &str = "/var/lib/headplane/agent_cache.json";

/// Default location of the OIDC user store.
pub const DEFAULT_USER_STORAGE_FILE: &str = "/var/lib/headplane/users.json";

/// Default Docker daemon socket.
pub const DEFAULT_DOCKER_SOCKET: &str = "unix:///var/run/docker.sock";

// =============================================================================
// Field Defaults & Limits
// =============================================================================

/// Default agent cache TTL in milliseconds (3 minutes).
pub const DEFAULT_AGENT_TTL_MS: u64 = 180_000;

/// Default for `oidc.strict_validation`.
pub const DEFAULT_OIDC_STRICT_VALIDATION: bool = true;

/// Required length of an inline or resolved cookie secret.
pub const COOKIE_SECRET_LENGTH: usize = 32;

/// Placeholder printed in place of any secret value.
pub const SECRET_MASK: &str = "********";
