//! Headplane - load and validate the Headplane configuration.
//!
//! Responsibilities:
//! - Parse command-line arguments and the root `HEADPLANE_*` variables.
//! - Initialise logging before anything else runs.
//! - Run the configuration loader and report the outcome.
//!
//! Does NOT handle:
//! - Any part of the load sequence itself (see `headplane-config`).
//!
//! Invariants:
//! - Logs go to stderr so `--print` output on stdout stays clean.
//! - Every load failure is logged once and exits with code 1.
//! - Secret values are never written in clear text.

mod args;
mod error;

use anyhow::Context;
use args::Cli;
use clap::Parser;
use error::ExitCode;
use headplane_config::{Config, ConfigLoader};
use std::io::Write;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let result = run(&cli);
    if let Err(e) = &result {
        tracing::error!("{:#}", e);
    }

    std::process::exit(ExitCode::from(&result).as_i32());
}

/// Install the `tracing` subscriber. `RUST_LOG` wins over the debug flag.
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    if cli.debug {
        tracing::debug!("Debug logging enabled");
    }

    let config = ConfigLoader::new(&cli.config_path)
        .with_debug(cli.debug)
        .with_env_overrides(cli.load_env_overrides)
        .load()
        .with_context(|| {
            format!(
                "Failed to load configuration from {}",
                cli.config_path.display()
            )
        })?;

    log_summary(&config);

    if cli.print {
        let rendered = config
            .to_redacted_yaml()
            .context("Failed to render configuration")?;
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(rendered.as_bytes())
            .context("Failed to write configuration to stdout")?;
        stdout.flush().context("Failed to flush stdout")?;
    }

    Ok(())
}

fn log_summary(config: &Config) {
    let integrations = config
        .integration
        .as_ref()
        .map(|integration| integration.enabled())
        .unwrap_or_default();

    tracing::info!(
        headscale = %config.headscale.url,
        host = %config.server.host,
        port = config.server.port,
        oidc = config.oidc.is_some(),
        integrations = ?integrations,
        "Configuration loaded"
    );
}
