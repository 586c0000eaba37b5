//! homecheck - scheduled property availability checker.
//!
//! One process run is one invocation: query the listing site, alert when
//! properties are available, print the result JSON and exit.

mod cli;
mod logging;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info, warn};

use homecheck_checker::AvailabilityChecker;
use homecheck_config::{ConfigLoader, ConfigValidator, CredentialSource, HomecheckConfig};
use homecheck_notify::{LogNotifier, Notifier, TelegramNotifier};

use crate::cli::Cli;
use crate::logging::init_tracing;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    let log_format = cli.log_format.unwrap_or(config.logging.format);
    init_tracing(&config.logging.level, log_format)?;

    let validation = ConfigValidator::validate(&config);
    for warning in &validation.warnings {
        warn!(path = %warning.path, "{}", warning.message);
    }
    if !validation.is_valid() {
        for err in &validation.errors {
            error!("Invalid configuration: {}", err);
        }
        anyhow::bail!(
            "configuration has {} error(s), see log for details",
            validation.errors.len()
        );
    }

    let request = cli.invocation_request()?;

    let notifier: Arc<dyn Notifier> = if cli.dry_run {
        Arc::new(LogNotifier)
    } else {
        Arc::new(TelegramNotifier::new(&config.telegram, CredentialSource::Environment)?)
    };
    info!(
        version = env!("CARGO_PKG_VERSION"),
        notifier = notifier.name(),
        "Starting homecheck"
    );

    let checker = AvailabilityChecker::new(&config.listing, notifier)?;
    let result = checker
        .run(request.as_ref())
        .await
        .context("availability check failed")?;

    println!("{}", serde_json::to_string(&result)?);

    Ok(if result.ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Load the config file when one is given, defaults otherwise.
fn load_config(path: Option<&Path>) -> anyhow::Result<HomecheckConfig> {
    let Some(path) = path else {
        return Ok(HomecheckConfig::default());
    };

    let expanded = PathBuf::from(ConfigLoader::expand_path(&path.to_string_lossy()));
    ConfigLoader::load(&expanded)
        .with_context(|| format!("failed to load config from {}", expanded.display()))
}
