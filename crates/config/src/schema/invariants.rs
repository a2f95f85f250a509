//! Cross-field checks run after field validation in full mode.

use serde_yaml::Value;

use super::error::FieldError;
use crate::constants::COOKIE_SECRET_LENGTH;

/// A secret that may be given inline or as a path to a file, but not both.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SecretPair {
    pub section: &'static str,
    pub inline: &'static str,
    pub path: &'static str,
    /// Exact length the resolved secret must have, if any.
    pub required_length: Option<usize>,
}

impl SecretPair {
    pub(crate) fn inline_path(&self) -> String {
        format!("{}.{}", self.section, self.inline)
    }

    pub(crate) fn file_path(&self) -> String {
        format!("{}.{}", self.section, self.path)
    }
}

pub(crate) const SECRET_PAIRS: [SecretPair; 3] = [
    SecretPair {
        section: "server",
        inline: "cookie_secret",
        path: "cookie_secret_path",
        required_length: Some(COOKIE_SECRET_LENGTH),
    },
    SecretPair {
        section: "oidc",
        inline: "client_secret",
        path: "client_secret_path",
        required_length: None,
    },
    SecretPair {
        section: "oidc",
        inline: "headscale_api_key",
        path: "headscale_api_key_path",
        required_length: None,
    },
];

fn is_set(section: &Value, key: &str) -> bool {
    section.get(key).is_some_and(|value| !value.is_null())
}

/// Check that each secret pair present in `tree` has exactly one side set.
///
/// Sections that are absent or not mappings are skipped; field validation
/// reports those.
pub fn check_secret_pairs(tree: &Value) -> Vec<FieldError> {
    let mut errors = Vec::new();
    for pair in SECRET_PAIRS {
        let Some(section) = tree.get(pair.section).filter(|s| s.is_mapping()) else {
            continue;
        };
        match (is_set(section, pair.inline), is_set(section, pair.path)) {
            (true, true) => errors.push(FieldError::new(
                pair.inline_path(),
                format!("cannot be set together with {}", pair.file_path()),
            )),
            (false, false) => errors.push(FieldError::new(
                pair.inline_path(),
                format!("either {} or {} must be set", pair.inline_path(), pair.file_path()),
            )),
            _ => {}
        }
    }
    errors
}
