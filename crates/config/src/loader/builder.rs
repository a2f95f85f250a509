//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` describing one load.
//! - Run the load stages in order: check the path, parse the YAML, validate
//!   it, resolve secret files, then (optionally) load `.env` and apply
//!   `HEADPLANE_*` overrides.
//!
//! Does NOT handle:
//! - Field-level validation rules (delegated to `schema`).
//! - Override decoding and merging (delegated to env.rs).
//! - Exiting the process; every failure is returned to the caller.
//!
//! Invariants / Assumptions:
//! - `.env` is only loaded when environment overrides are enabled.
//! - `.env` values replace existing process variables of the same name.
//! - The `DOTENV_DISABLED` variable is checked before `.env` is read.
//! - `Config::debug` always comes from the builder, never from the file.

use serde_yaml::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::env::{apply_overrides, env_var_or_none, process_env};
use super::error::ConfigError;
use crate::constants::{
    COOKIE_SECRET_LENGTH, DEFAULT_CONFIG_PATH, ENV_CONFIG_PATH, ENV_DEBUG_LOG,
    ENV_DOTENV_DISABLED, ENV_LOAD_ENV_OVERRIDES,
};
use crate::schema::{self, parse_bool};
use crate::secret::{SecretError, resolve_secret};
use crate::types::Config;

/// Loads and validates the Headplane configuration file.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_path: PathBuf,
    debug: bool,
    env_overrides: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_PATH)
    }
}

impl ConfigLoader {
    /// Create a loader for the file at `config_path`, with debug off and
    /// environment overrides disabled.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            debug: false,
            env_overrides: false,
        }
    }

    /// Create a loader from the root environment variables
    /// (`HEADPLANE_CONFIG_PATH`, `HEADPLANE_LOAD_ENV_OVERRIDES`,
    /// `HEADPLANE_DEBUG_LOG`).
    pub fn from_env() -> Self {
        let config_path =
            env_var_or_none(ENV_CONFIG_PATH).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
        Self::new(config_path)
            .with_env_overrides(env_flag(ENV_LOAD_ENV_OVERRIDES))
            .with_debug(env_flag(ENV_DEBUG_LOG))
    }

    /// Override the config file path.
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = path.into();
        self
    }

    /// Set the debug state injected into `Config::debug`.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Enable `.env` loading and `HEADPLANE_*` override coalescing.
    pub fn with_env_overrides(mut self, enabled: bool) -> Self {
        self.env_overrides = enabled;
        self
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn env_overrides(&self) -> bool {
        self.env_overrides
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var(ENV_DOTENV_DISABLED).ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from `.env` in the working directory, if present.
    ///
    /// Values from the file replace process variables of the same name. If
    /// `DOTENV_DISABLED` is set to "true" or "1", nothing is loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The `.env` file exists but has invalid syntax (`ConfigError::DotenvParse`)
    /// - The `.env` file exists but cannot be read due to I/O errors (`ConfigError::DotenvIo`)
    ///
    /// Missing `.env` files are silently ignored.
    ///
    /// SAFETY: Error messages never include raw .env line contents to prevent secret leakage.
    pub fn load_dotenv(&self) -> Result<(), ConfigError> {
        if Self::dotenv_disabled() {
            tracing::debug!("Skipping .env loading because DOTENV_DISABLED is set");
            return Ok(());
        }

        match dotenvy::dotenv_override() {
            Ok(path) => {
                tracing::info!(path = %path.display(), "Loaded .env file");
                Ok(())
            }
            Err(e) if Self::is_not_found(&e) => {
                tracing::debug!("No .env file found");
                Ok(())
            }
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    /// Check if a dotenv error indicates the file was not found.
    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == ErrorKind::NotFound
        )
    }

    /// Run every load stage and return the final configuration.
    pub fn load(self) -> Result<Config, ConfigError> {
        tracing::info!(path = %self.config_path.display(), "Loading configuration");

        self.validate_path()?;
        let document = self.read_document()?;
        let mut config = self.validate_document(document)?;
        resolve_secrets(&mut config)?;

        if self.env_overrides {
            self.load_dotenv()?;
            config = apply_overrides(config, process_env())?;
        } else {
            tracing::debug!("Environment overrides disabled, skipping .env and HEADPLANE_* variables");
        }

        tracing::debug!(debug = config.debug, "Configuration validated");
        Ok(config)
    }

    fn unreadable(&self, source: std::io::Error) -> ConfigError {
        ConfigError::PathUnreadable {
            path: self.config_path.clone(),
            source,
        }
    }

    /// Confirm the config path names a readable regular file.
    fn validate_path(&self) -> Result<(), ConfigError> {
        let metadata = std::fs::metadata(&self.config_path).map_err(|e| self.unreadable(e))?;
        if metadata.is_dir() {
            return Err(self.unreadable(std::io::Error::new(
                ErrorKind::InvalidInput,
                "path is a directory",
            )));
        }
        std::fs::File::open(&self.config_path).map_err(|e| self.unreadable(e))?;
        tracing::debug!(path = %self.config_path.display(), "Config file is readable");
        Ok(())
    }

    /// Read and parse the config file as a YAML tree.
    fn read_document(&self) -> Result<Value, ConfigError> {
        let contents =
            std::fs::read_to_string(&self.config_path).map_err(|e| self.unreadable(e))?;

        let document: Value = serde_yaml::from_str(&contents).map_err(|e| {
            let location = e.location();
            ConfigError::Parse {
                path: self.config_path.clone(),
                message: e.to_string(),
                line: location.as_ref().map(|l| l.line()),
                column: location.as_ref().map(|l| l.column()),
            }
        })?;

        if document.get("debug").is_some() {
            tracing::warn!(
                "Ignoring `debug` in the config file; it follows the logging debug state"
            );
        }
        Ok(document)
    }

    /// Run the full schema, logging each field error before failing.
    fn validate_document(&self, document: Value) -> Result<Config, ConfigError> {
        schema::validate_config(document, self.debug).map_err(|errors| {
            for error in errors.errors() {
                tracing::error!(field = %error.path, "{}", error.message);
            }
            ConfigError::SchemaValidation {
                path: self.config_path.clone(),
                errors,
            }
        })
    }
}

/// Interpret a root toggle variable. Unparseable values count as `false`.
fn env_flag(key: &str) -> bool {
    match env_var_or_none(key) {
        None => false,
        Some(raw) => parse_bool(&raw).unwrap_or_else(|| {
            tracing::warn!(var = key, value = %raw, "Expected a boolean, treating as false");
            false
        }),
    }
}

/// Replace every `*_path` secret in `config` with the contents of its file.
///
/// The path field is cleared once its secret has been read.
pub(crate) fn resolve_secrets(config: &mut Config) -> Result<(), SecretError> {
    if let Some(path) = config.server.cookie_secret_path.take() {
        config.server.cookie_secret = Some(resolve_secret(
            &path,
            "server.cookie_secret_path",
            Some(COOKIE_SECRET_LENGTH),
        )?);
        tracing::info!(field = "server.cookie_secret", "Resolved secret from file");
    }

    if let Some(oidc) = config.oidc.as_mut() {
        if let Some(path) = oidc.client_secret_path.take() {
            oidc.client_secret = Some(resolve_secret(&path, "oidc.client_secret_path", None)?);
            tracing::info!(field = "oidc.client_secret", "Resolved secret from file");
        }
        if let Some(path) = oidc.headscale_api_key_path.take() {
            oidc.headscale_api_key =
                Some(resolve_secret(&path, "oidc.headscale_api_key_path", None)?);
            tracing::info!(field = "oidc.headscale_api_key", "Resolved secret from file");
        }
    }

    Ok(())
}
