//! CLI definitions for homecheck.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde_json::Value;

use homecheck_checker::InvocationRequest;
use homecheck_config::LogFormat;

/// homecheck CLI.
///
/// Runs a single availability check and prints the result as JSON.
/// Intended to be invoked by cron or another external scheduler.
#[derive(Debug, Parser)]
#[command(name = "homecheck")]
#[command(about = "Check ShareToBuy for available First Home properties and alert via Telegram")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (built-in defaults when omitted)
    #[arg(short, long, env = "HOMECHECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Run the notifier self-test when the value is "true" (any case)
    #[arg(long, value_name = "VALUE")]
    pub test_notify: Option<String>,

    /// Invocation request as a JSON object, e.g. '{"test_notify": "true"}'
    #[arg(long, value_name = "JSON")]
    pub request: Option<String>,

    /// Log notifications instead of sending them to Telegram
    #[arg(long)]
    pub dry_run: bool,

    /// Log output format (text, json); overrides the config file
    #[arg(long, value_name = "FORMAT")]
    pub log_format: Option<LogFormat>,
}

impl Cli {
    /// Build the invocation request from `--request` and `--test-notify`.
    /// `--test-notify` wins over a `test_notify` key in the JSON.
    pub(crate) fn invocation_request(&self) -> anyhow::Result<Option<InvocationRequest>> {
        let mut request = match self.request.as_deref() {
            Some(raw) => {
                let value: Value =
                    serde_json::from_str(raw).context("--request is not valid JSON")?;
                match value {
                    Value::Null => None,
                    Value::Object(_) => Some(
                        serde_json::from_value::<InvocationRequest>(value)
                            .context("--request could not be decoded")?,
                    ),
                    _ => anyhow::bail!("--request must be a JSON object"),
                }
            }
            None => None,
        };

        if let Some(flag) = &self.test_notify {
            request.get_or_insert_with(InvocationRequest::default).test_notify =
                Some(Value::String(flag.clone()));
        }

        Ok(request)
    }
}
