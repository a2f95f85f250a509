//! Tests for the configuration loader.
//!
//! Responsibilities:
//! - Test each load stage end to end through `ConfigLoader::load`.
//! - Test secret file resolution, `.env` loading, and environment overrides.
//!
//! Does NOT handle:
//! - Field-by-field schema rules (tested in `schema`).
//! - Override decoding in isolation (tested in env.rs).
//!
//! Invariants:
//! - Tests that touch the environment or cwd use `serial_test` and `env_lock()`.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub mod env_tests;

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

pub const COOKIE_SECRET: &str = "0123456789abcdef0123456789abcdef";

/// The smallest document that passes full validation.
pub fn minimal_yaml() -> String {
    format!(
        "server:\n  host: 0.0.0.0\n  port: 3000\n  cookie_secret: {COOKIE_SECRET}\n  cookie_secure: false\n\
         headscale:\n  url: https://headscale.example.com/\n  config_strict: true\n"
    )
}

/// Write `contents` to `config.yaml` under `dir` and return its path.
pub fn write_config(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("config.yaml");
    fs::write(&path, contents).expect("Failed to write test config");
    path
}
