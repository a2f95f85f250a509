//! Shared test utilities for `headplane` integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Provide a config file fixture that passes full validation.
//!
//! Invariants / Assumptions:
//! - All integration tests using this helper are hermetic by default.
//! - No `HEADPLANE_*` variable leaks in from the host environment.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};

#[allow(dead_code)]
pub const COOKIE_SECRET: &str = "0123456789abcdef0123456789abcdef";

/// Returns a hermetic `headplane` command for integration testing.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - Every `HEADPLANE_*` variable of the host is cleared.
/// - `RUST_LOG` is cleared so the debug flag controls verbosity.
pub fn headplane_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("headplane");

    cmd.env("DOTENV_DISABLED", "1");
    cmd.env_remove("RUST_LOG");
    for (key, _) in std::env::vars() {
        if key.starts_with("HEADPLANE_") {
            cmd.env_remove(&key);
        }
    }

    cmd
}

/// Write a minimal valid configuration into `dir` and return its path.
#[allow(dead_code)]
pub fn write_minimal_config(dir: &Path) -> PathBuf {
    write_config(
        dir,
        &format!(
            "server:\n  host: 127.0.0.1\n  port: 3000\n  cookie_secret: {COOKIE_SECRET}\n  cookie_secure: true\n\
             headscale:\n  url: https://headscale.example.com/\n  config_strict: false\n"
        ),
    )
}

/// Write `contents` to `config.yaml` under `dir` and return its path.
pub fn write_config(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("config.yaml");
    fs::write(&path, contents).expect("Failed to write test config");
    path
}
