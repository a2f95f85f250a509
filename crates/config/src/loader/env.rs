//! Environment variable overrides for configuration.
//!
//! Responsibilities:
//! - Decode `HEADPLANE_<SECTION>__<FIELD>` variables into a nested override tree.
//! - Validate the tree against the partial schema.
//! - Resolve secret paths supplied as overrides.
//! - Deep-merge the overrides onto the loaded config and re-validate the result.
//!
//! Does NOT handle:
//! - `.env` file loading (handled by `ConfigLoader::load_dotenv`).
//! - The root variables (`HEADPLANE_CONFIG_PATH` etc.), which configure the
//!   loader itself and are never treated as overrides.
//!
//! Invariants:
//! - Variables are processed in sorted key order, so the result does not
//!   depend on the platform's environment enumeration order.
//! - Empty or whitespace-only values are treated as unset.
//! - A malformed override set is rejected as a whole; nothing is applied.

use secrecy::ExposeSecret;
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;

use super::error::ConfigError;
use super::merge::deep_merge;
use crate::constants::{ENV_NESTING_DELIMITER, ENV_PREFIX, ROOT_ENV_VARS};
use crate::schema::{self, FieldError, SECRET_PAIRS, SchemaErrors};
use crate::secret::resolve_secret;
use crate::types::Config;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Snapshot of the process environment, skipping entries that are not UTF-8.
pub fn process_env() -> Vec<(String, String)> {
    std::env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .collect()
}

/// Decode an override variable name into its field path.
///
/// Returns `None` for variables without the prefix and for root variables.
/// `HEADPLANE_OIDC__CLIENT_ID` decodes to `["oidc", "client_id"]`.
pub fn override_path(key: &str) -> Option<Vec<String>> {
    if ROOT_ENV_VARS.contains(&key) {
        return None;
    }
    let rest = key.strip_prefix(ENV_PREFIX)?;
    Some(
        rest.to_lowercase()
            .split(ENV_NESTING_DELIMITER)
            .map(str::to_string)
            .collect(),
    )
}

/// Build the sparse override tree from `vars`. Values stay raw strings; the
/// partial schema coerces them.
pub fn collect_overrides<I>(vars: I) -> Value
where
    I: IntoIterator<Item = (String, String)>,
{
    let sorted: BTreeMap<String, String> = vars
        .into_iter()
        .filter(|(key, value)| key.starts_with(ENV_PREFIX) && !value.trim().is_empty())
        .collect();

    let mut tree = Mapping::new();
    for (key, value) in sorted {
        let Some(segments) = override_path(&key) else {
            continue;
        };
        if segments.iter().any(String::is_empty) {
            tracing::warn!(var = %key, "Skipping environment override with an empty path segment");
            continue;
        }
        insert_path(&mut tree, &segments, Value::String(value), &key);
    }
    Value::Mapping(tree)
}

fn insert_path(tree: &mut Mapping, segments: &[String], value: Value, var: &str) {
    let Some((leaf, parents)) = segments.split_last() else {
        return;
    };

    let mut node = tree;
    for segment in parents {
        let entry = node
            .entry(Value::String(segment.clone()))
            .or_insert(Value::Mapping(Mapping::new()));
        if !entry.is_mapping() {
            tracing::warn!(
                var,
                field = %segment,
                "Environment override replaces a value set by another variable"
            );
            *entry = Value::Mapping(Mapping::new());
        }
        let Value::Mapping(next) = entry else {
            return;
        };
        node = next;
    }

    if node
        .insert(Value::String(leaf.clone()), value)
        .is_some()
    {
        tracing::warn!(
            var,
            field = %segments.join("."),
            "Environment override replaces a value set by another variable"
        );
    }
}

/// Dotted paths of every leaf in an override tree, for logging.
fn leaf_paths(tree: &Value, prefix: &str, out: &mut Vec<String>) {
    if let Value::Mapping(map) = tree {
        for (key, value) in map {
            let name = key.as_str().unwrap_or("?");
            let path = if prefix.is_empty() {
                name.to_string()
            } else {
                format!("{prefix}.{name}")
            };
            if value.is_mapping() {
                leaf_paths(value, &path, out);
            } else {
                out.push(path);
            }
        }
    }
}

/// Replace `*_path` secrets in the override tree by their resolved values.
fn resolve_override_secrets(overrides: &mut Value) -> Result<(), ConfigError> {
    for pair in SECRET_PAIRS {
        let Some(section) = overrides
            .get_mut(pair.section)
            .and_then(Value::as_mapping_mut)
        else {
            continue;
        };
        let Some(path) = section.remove(pair.path) else {
            continue;
        };
        if section.contains_key(pair.inline) {
            return Err(ConfigError::OverrideValidation(SchemaErrors::single(
                FieldError::new(
                    pair.inline_path(),
                    format!("cannot be set together with {}", pair.file_path()),
                ),
            )));
        }

        let Some(path) = path.as_str() else {
            continue;
        };
        let label = pair.file_path();
        let secret = resolve_secret(path, &label, pair.required_length)?;
        tracing::info!(field = %label, "Resolved secret from environment override path");
        section.insert(
            Value::String(pair.inline.to_string()),
            Value::String(secret.expose_secret().to_string()),
        );
    }
    Ok(())
}

/// Apply `HEADPLANE_*` overrides from `vars` on top of `config`.
pub fn apply_overrides<I>(config: Config, vars: I) -> Result<Config, ConfigError>
where
    I: IntoIterator<Item = (String, String)>,
{
    let overrides = collect_overrides(vars);
    if overrides.as_mapping().is_none_or(Mapping::is_empty) {
        tracing::debug!("No environment overrides found");
        return Ok(config);
    }

    let mut overrides =
        schema::validate_overrides(overrides).map_err(ConfigError::OverrideValidation)?;
    let mut fields = Vec::new();
    leaf_paths(&overrides, "", &mut fields);
    if fields.is_empty() {
        tracing::debug!("Environment overrides only named unknown keys");
        return Ok(config);
    }

    resolve_override_secrets(&mut overrides)?;

    let debug = config.debug;
    let mut merged = serde_yaml::to_value(&config).map_err(|e| {
        ConfigError::OverrideValidation(SchemaErrors::single(FieldError::new(
            "<root>",
            format!("failed to serialize config for merging: {e}"),
        )))
    })?;
    deep_merge(&mut merged, overrides);

    let config =
        schema::validate_config(merged, debug).map_err(ConfigError::OverrideValidation)?;
    tracing::info!(fields = ?fields, "Applied environment overrides");
    Ok(config)
}
