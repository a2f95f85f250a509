//! File-based secret resolution.
//!
//! Responsibilities:
//! - Expand `${NAME}` markers in a secret's file path from the environment.
//! - Read the file, trim it, and check it against an optional exact length.
//!
//! Does NOT handle:
//! - Deciding which fields are secrets (see `loader`).
//! - Retrying: a secret that cannot be read at startup is a fatal error.
//!
//! Invariants:
//! - No file is read when any interpolation variable is missing.
//! - Error messages carry labels, paths and lengths, never secret contents.

mod interpolate;

pub use interpolate::{interpolate_env, interpolate_with};

use secrecy::SecretString;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while resolving a secret from a file.
#[derive(Error, Debug)]
pub enum SecretError {
    #[error("{label}: environment variable {variable} referenced in the secret path is not set")]
    MissingInterpolationVariable { variable: String, label: String },

    #[error("{label}: malformed ${{...}} marker in secret path {path:?}")]
    MalformedInterpolation { label: String, path: String },

    #[error("{label}: failed to read secret file {path:?} (resolved to {resolved:?}): {source}")]
    SecretFileUnreadable {
        label: String,
        path: String,
        resolved: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{label}: secret file {path:?} is empty")]
    EmptySecret { label: String, path: String },

    #[error("{label}: secret must be exactly {expected} characters long, got {actual}")]
    SecretLengthMismatch {
        label: String,
        expected: usize,
        actual: usize,
    },
}

/// Read a secret from the file at `path`.
///
/// `label` names the config field the path came from and appears in every
/// error and log line.
pub fn resolve_secret(
    path: &str,
    label: &str,
    required_length: Option<usize>,
) -> Result<SecretString, SecretError> {
    let resolved = PathBuf::from(interpolate_env(path, label)?);
    tracing::debug!(label, path = %resolved.display(), "Reading secret file");

    let contents =
        std::fs::read_to_string(&resolved).map_err(|source| SecretError::SecretFileUnreadable {
            label: label.to_string(),
            path: path.to_string(),
            resolved: resolved.clone(),
            source,
        })?;

    let secret = contents.trim();
    if secret.is_empty() {
        return Err(SecretError::EmptySecret {
            label: label.to_string(),
            path: path.to_string(),
        });
    }

    if let Some(expected) = required_length {
        let actual = secret.chars().count();
        if actual != expected {
            return Err(SecretError::SecretLengthMismatch {
                label: label.to_string(),
                expected,
                actual,
            });
        }
    }

    Ok(SecretString::new(secret.to_string().into()))
}
