//! Environment override tests for the configuration loader.
//!
//! Responsibilities:
//! - Test that `HEADPLANE_*` variables overlay file values when enabled.
//! - Test that malformed overrides abort the load.
//! - Test that the merged document is validated against the full schema.

use secrecy::ExposeSecret;
use serial_test::serial;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use super::{COOKIE_SECRET, env_lock, minimal_yaml, write_config};
use crate::loader::builder::ConfigLoader;
use crate::loader::error::ConfigError;
use crate::types::Config;

const OTHER_SECRET: &str = "fedcba9876543210fedcba9876543210";

fn load_with_overrides(path: &Path) -> Result<Config, ConfigError> {
    ConfigLoader::new(path).with_env_overrides(true).load()
}

#[test]
#[serial]
fn test_env_override_keeps_sibling_fields() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(temp_dir.path(), &minimal_yaml());

    temp_env::with_vars(
        [
            ("DOTENV_DISABLED", Some("1")),
            ("HEADPLANE_SERVER__PORT", Some("9000")),
        ],
        || {
            let config = load_with_overrides(&path).unwrap();
            assert_eq!(config.server.port, 9000);
            assert_eq!(config.server.host, "0.0.0.0");
            assert_eq!(
                config.server.cookie_secret.unwrap().expose_secret(),
                COOKIE_SECRET
            );
        },
    );
}

#[test]
#[serial]
fn test_env_override_coerces_and_normalizes() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(temp_dir.path(), &minimal_yaml());

    temp_env::with_vars(
        [
            ("DOTENV_DISABLED", Some("1")),
            ("HEADPLANE_HEADSCALE__CONFIG_STRICT", Some("false")),
            ("HEADPLANE_HEADSCALE__URL", Some("http://headscale:8080/")),
            ("HEADPLANE_SERVER__AGENT__TTL", Some("60000")),
        ],
        || {
            let config = load_with_overrides(&path).unwrap();
            assert!(!config.headscale.config_strict);
            assert_eq!(config.headscale.url, "http://headscale:8080");
            assert_eq!(config.server.agent.ttl, 60_000);
            assert_eq!(
                config.server.agent.cache_path,
                "/var/lib/headplane/agent_cache.json"
            );
        },
    );
}

#[test]
#[serial]
fn test_root_variables_are_not_overrides() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(temp_dir.path(), &minimal_yaml());

    temp_env::with_vars(
        [
            ("DOTENV_DISABLED", Some("1")),
            ("HEADPLANE_CONFIG_PATH", Some("/somewhere/else.yaml")),
            ("HEADPLANE_DEBUG_LOG", Some("true")),
        ],
        || {
            let config = load_with_overrides(&path).unwrap();
            assert!(!config.debug);
        },
    );
}

#[test]
#[serial]
fn test_malformed_override_aborts_load() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(temp_dir.path(), &minimal_yaml());

    temp_env::with_vars(
        [
            ("DOTENV_DISABLED", Some("1")),
            ("HEADPLANE_SERVER__PORT", Some("not-a-port")),
            ("HEADPLANE_SERVER__HOST", Some("127.0.0.1")),
        ],
        || match load_with_overrides(&path) {
            Err(ConfigError::OverrideValidation(errors)) => {
                assert!(errors.contains_path("server.port"));
                assert_eq!(errors.len(), 1);
            }
            other => panic!("Expected OverrideValidation, got {:?}", other),
        },
    );
}

#[test]
#[serial]
fn test_unknown_nested_override_key_is_rejected() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(temp_dir.path(), &minimal_yaml());

    temp_env::with_vars(
        [
            ("DOTENV_DISABLED", Some("1")),
            ("HEADPLANE_HEADSCALE__COLOUR", Some("blue")),
        ],
        || {
            let err = load_with_overrides(&path).unwrap_err();
            let errors = err.field_errors().expect("validation error");
            assert!(errors.contains_path("headscale.colour"));
        },
    );
}

#[test]
#[serial]
fn test_override_that_breaks_full_schema_is_rejected() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(temp_dir.path(), &minimal_yaml());

    // A lone client id creates an `oidc` section missing its required fields.
    temp_env::with_vars(
        [
            ("DOTENV_DISABLED", Some("1")),
            ("HEADPLANE_OIDC__CLIENT_ID", Some("abc")),
        ],
        || match load_with_overrides(&path) {
            Err(ConfigError::OverrideValidation(errors)) => {
                assert!(errors.contains_path("oidc.issuer"));
                assert!(errors.contains_path("oidc.client_secret"));
            }
            other => panic!("Expected OverrideValidation, got {:?}", other),
        },
    );
}

#[test]
#[serial]
fn test_inline_secret_override_replaces_file_value() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(temp_dir.path(), &minimal_yaml());

    temp_env::with_vars(
        [
            ("DOTENV_DISABLED", Some("1")),
            ("HEADPLANE_SERVER__COOKIE_SECRET", Some(OTHER_SECRET)),
        ],
        || {
            let config = load_with_overrides(&path).unwrap();
            assert_eq!(
                config.server.cookie_secret.unwrap().expose_secret(),
                OTHER_SECRET
            );
        },
    );
}

#[test]
#[serial]
fn test_inline_secret_override_length_is_checked() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(temp_dir.path(), &minimal_yaml());

    temp_env::with_vars(
        [
            ("DOTENV_DISABLED", Some("1")),
            ("HEADPLANE_SERVER__COOKIE_SECRET", Some("too-short")),
        ],
        || {
            let err = load_with_overrides(&path).unwrap_err();
            assert!(matches!(err, ConfigError::OverrideValidation(_)));
        },
    );
}

#[test]
#[serial]
fn test_secret_path_override_is_resolved() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(temp_dir.path(), &minimal_yaml());
    let secret_path = temp_dir.path().join("cookie");
    fs::write(&secret_path, OTHER_SECRET).unwrap();

    temp_env::with_vars(
        [
            ("DOTENV_DISABLED", Some("1")),
            (
                "HEADPLANE_SERVER__COOKIE_SECRET_PATH",
                Some(secret_path.to_str().unwrap()),
            ),
        ],
        || {
            let config = load_with_overrides(&path).unwrap();
            assert_eq!(
                config.server.cookie_secret.unwrap().expose_secret(),
                OTHER_SECRET
            );
            assert!(config.server.cookie_secret_path.is_none());
        },
    );
}

#[test]
#[serial]
fn test_both_sides_of_secret_pair_in_overrides_rejected() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(temp_dir.path(), &minimal_yaml());

    temp_env::with_vars(
        [
            ("DOTENV_DISABLED", Some("1")),
            ("HEADPLANE_SERVER__COOKIE_SECRET", Some(OTHER_SECRET)),
            ("HEADPLANE_SERVER__COOKIE_SECRET_PATH", Some("/run/secrets/cookie")),
        ],
        || match load_with_overrides(&path) {
            Err(ConfigError::OverrideValidation(errors)) => {
                assert!(errors.contains_path("server.cookie_secret"));
            }
            other => panic!("Expected OverrideValidation, got {:?}", other),
        },
    );
}

#[test]
#[serial]
fn test_debug_override_is_ignored() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(temp_dir.path(), &minimal_yaml());

    temp_env::with_vars(
        [
            ("DOTENV_DISABLED", Some("1")),
            ("HEADPLANE_DEBUG", Some("true")),
        ],
        || {
            let config = load_with_overrides(&path).unwrap();
            assert!(!config.debug);
        },
    );
}

#[test]
#[serial]
fn test_loader_from_env_reads_root_variables() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_vars(
        [
            ("HEADPLANE_CONFIG_PATH", Some("/tmp/headplane-test.yaml")),
            ("HEADPLANE_LOAD_ENV_OVERRIDES", Some("true")),
            ("HEADPLANE_DEBUG_LOG", Some("not-a-bool")),
        ],
        || {
            let loader = ConfigLoader::from_env();
            assert_eq!(
                loader.config_path(),
                std::path::Path::new("/tmp/headplane-test.yaml")
            );
            assert!(loader.env_overrides());
            assert!(!loader.debug());
        },
    );

    temp_env::with_vars_unset(
        [
            "HEADPLANE_CONFIG_PATH",
            "HEADPLANE_LOAD_ENV_OVERRIDES",
            "HEADPLANE_DEBUG_LOG",
        ],
        || {
            let loader = ConfigLoader::from_env();
            assert_eq!(
                loader.config_path(),
                std::path::Path::new("/etc/headplane/config.yaml")
            );
            assert!(!loader.env_overrides());
        },
    );
}
