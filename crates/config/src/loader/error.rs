//! Error types for configuration loading.
//!
//! Responsibilities:
//! - Define one error variant per failing load stage.
//! - Carry enough context (paths, field errors, line numbers) to diagnose the
//!   failure from a single log line.
//!
//! Does NOT handle:
//! - Deciding what to do on failure. The binary logs and exits; tests inspect.
//!
//! Invariants:
//! - Variants never include secret values or raw `.env` line contents.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

use crate::schema::SchemaErrors;
use crate::secret::SecretError;

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file does not exist or cannot be opened.
    #[error("Config file at {path} is not readable: {source}")]
    PathUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid YAML.
    #[error("Failed to parse config file at {path}: {message}")]
    Parse {
        path: PathBuf,
        message: String,
        line: Option<usize>,
        column: Option<usize>,
    },

    /// The parsed document does not satisfy the schema.
    #[error("Config file at {path} is invalid: {errors}")]
    SchemaValidation { path: PathBuf, errors: SchemaErrors },

    /// A `*_path` secret could not be resolved.
    #[error("Failed to resolve secret: {0}")]
    Secret(#[from] SecretError),

    /// `HEADPLANE_*` environment overrides are malformed, or produce an
    /// invalid document once merged.
    #[error("Invalid environment overrides: {0}")]
    OverrideValidation(SchemaErrors),

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error.
    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}

impl ConfigError {
    /// Field errors carried by this error, if it is a validation failure.
    pub fn field_errors(&self) -> Option<&SchemaErrors> {
        match self {
            ConfigError::SchemaValidation { errors, .. } => Some(errors),
            ConfigError::OverrideValidation(errors) => Some(errors),
            _ => None,
        }
    }
}
