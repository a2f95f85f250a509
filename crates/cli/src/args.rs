//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Read the root `HEADPLANE_*` variables through clap's `env` support.
//!
//! Non-responsibilities:
//! - Does not load the configuration (see `main`).
//! - Does not decode `HEADPLANE_<SECTION>__<FIELD>` overrides; the loader
//!   does that after the file has been validated.

use clap::{ArgAction, Parser};
use headplane_config::constants::{
    DEFAULT_CONFIG_PATH, ENV_CONFIG_PATH, ENV_DEBUG_LOG, ENV_LOAD_ENV_OVERRIDES,
};
use headplane_config::schema::parse_bool;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "headplane")]
#[command(about = "Load and validate the Headplane configuration", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  headplane --config ./config.yaml\n  headplane --load-env-overrides true --print\n  HEADPLANE_SERVER__PORT=8080 headplane --load-env-overrides true --print\n"
)]
pub struct Cli {
    /// Path to the YAML configuration file.
    #[arg(
        short,
        long = "config",
        env = ENV_CONFIG_PATH,
        value_name = "FILE",
        default_value = DEFAULT_CONFIG_PATH
    )]
    pub config_path: PathBuf,

    /// Apply `HEADPLANE_<SECTION>__<FIELD>` environment overrides (and load `.env`).
    #[arg(
        long,
        env = ENV_LOAD_ENV_OVERRIDES,
        value_name = "BOOL",
        default_value = "false",
        value_parser = parse_flag,
        action = ArgAction::Set
    )]
    pub load_env_overrides: bool,

    /// Enable debug logging.
    #[arg(
        long,
        env = ENV_DEBUG_LOG,
        value_name = "BOOL",
        default_value = "false",
        value_parser = parse_flag,
        action = ArgAction::Set
    )]
    pub debug: bool,

    /// Print the loaded configuration as YAML with secrets masked.
    #[arg(long)]
    pub print: bool,
}

/// Accept the same boolean spellings as the configuration file.
fn parse_flag(raw: &str) -> Result<bool, String> {
    parse_bool(raw).ok_or_else(|| format!("expected a boolean, got '{raw}'"))
}
