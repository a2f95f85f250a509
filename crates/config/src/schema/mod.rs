//! Schema validation for the Headplane configuration document.
//!
//! Responsibilities:
//! - Validate a parsed YAML tree field by field, collecting every error.
//! - Apply coercions (string-or-boolean, string-or-integer, URL normalization).
//! - Apply defaults and enforce cross-field invariants in full mode.
//! - Validate the shape of override fragments in partial mode.
//!
//! Does NOT handle:
//! - Reading files or environment variables (see `loader`).
//! - Resolving secret files (see `secret`).
//!
//! Invariants:
//! - Both modes share one field declaration per section (`sections.rs`), so
//!   the partial schema can never drift from the full one.
//! - Partial mode never applies defaults; an override must not reset fields
//!   it does not mention.
//! - Secret pair exclusivity is only checked in full mode: an override may
//!   legitimately touch one side of a pair.

mod coerce;
mod error;
mod invariants;
mod section;
mod sections;

pub use coerce::{parse_bool, strip_trailing_slash};
pub use error::{FieldError, SchemaErrors};
pub use invariants::check_secret_pairs;
pub(crate) use invariants::{SECRET_PAIRS, SecretPair};

use serde_yaml::Value;

use crate::types::Config;
use section::{ROOT_PATH, Section, UnknownKeys};

/// Which variant of the schema to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Every required field present, defaults applied, invariants checked.
    Full,
    /// Every field optional, no defaults, no cross-field checks.
    Partial,
}

/// Validate `tree` and return the normalized tree.
pub fn validate_tree(tree: Value, mode: Mode) -> Result<Value, SchemaErrors> {
    let mut errors = Vec::new();
    if mode == Mode::Full {
        errors.extend(check_secret_pairs(&tree));
    }

    let normalized = Section::open(String::new(), tree, mode, &mut errors).map(|mut doc| {
        sections::root(&mut doc);
        doc.finish(UnknownKeys::Drop)
    });

    match (SchemaErrors::from_vec(errors), normalized) {
        (Some(errors), _) => Err(errors),
        (None, Some(mapping)) => Ok(Value::Mapping(mapping)),
        // `open` always records an error before returning `None`.
        (None, None) => Err(SchemaErrors::single(FieldError::new(
            ROOT_PATH,
            "must be a mapping",
        ))),
    }
}

/// Run the full schema over a parsed document and build the typed config.
///
/// `debug` replaces whatever `debug` value the document carries.
pub fn validate_config(mut tree: Value, debug: bool) -> Result<Config, SchemaErrors> {
    if let Value::Mapping(root) = &mut tree {
        root.insert(Value::String("debug".to_string()), Value::Bool(debug));
    }

    let normalized = validate_tree(tree, Mode::Full)?;
    serde_yaml::from_value(normalized).map_err(|e| {
        SchemaErrors::single(FieldError::new(
            ROOT_PATH,
            format!("validated document does not match the config model: {e}"),
        ))
    })
}

/// Run the partial schema over an override fragment.
pub fn validate_overrides(tree: Value) -> Result<Value, SchemaErrors> {
    validate_tree(tree, Mode::Partial)
}
