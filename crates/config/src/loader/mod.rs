//! Configuration loader for the YAML file, secret files, and environment.
//!
//! Responsibilities:
//! - Sequence the load: path check, YAML parse, schema validation, secret
//!   resolution, optional `.env` + `HEADPLANE_*` overrides.
//! - Report each failure as a typed `ConfigError`.
//!
//! Does NOT handle:
//! - Process exit or logging setup (see the `headplane` binary).
//! - Watching the file for changes; the config is loaded once.
//!
//! Invariants / Assumptions:
//! - Environment overrides take precedence over file values.
//! - Overrides are only read when explicitly enabled on the loader.

mod builder;
mod env;
mod error;
mod merge;

pub use builder::ConfigLoader;
pub use env::{apply_overrides, collect_overrides, env_var_or_none, override_path, process_env};
pub use error::ConfigError;
pub use merge::deep_merge;

#[cfg(test)]
mod tests;
