//! Availability checker.

#[cfg(test)]
#[path = "checker_tests.rs"]
mod tests;

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use homecheck_config::ListingConfig;
use homecheck_notify::Notifier;

use crate::count::extract_count;
use crate::error::CheckError;
use crate::filter::SearchFilter;
use crate::request::InvocationRequest;
use crate::result::CheckResult;

/// Message sent by the notifier self-test.
pub const TEST_MESSAGE: &str = "Test message from ShareToBuy monitor.";

/// Alert text for `count` available properties.
pub fn alert_message(count: u64) -> String {
    format!(
        "\u{1f3e0} First Home Scheme Alert!\n\n{} properties available in London.\n\nCheck ShareToBuy: https://www.sharetobuy.com/",
        count
    )
}

/// Runs one availability check per [`AvailabilityChecker::run`] call.
pub struct AvailabilityChecker {
    query_url: Url,
    client: reqwest::Client,
    notifier: Arc<dyn Notifier>,
}

impl AvailabilityChecker {
    /// Create a checker for the fixed London filter.
    pub fn new(config: &ListingConfig, notifier: Arc<dyn Notifier>) -> Result<Self, CheckError> {
        Self::with_filter(config, &SearchFilter::london(), notifier)
    }

    pub fn with_filter(
        config: &ListingConfig,
        filter: &SearchFilter,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, CheckError> {
        let query_url = filter.query_url(&config.base_url)?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("homecheck/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CheckError::Client(e.to_string()))?;

        Ok(Self {
            query_url,
            client,
            notifier,
        })
    }

    /// Run one invocation.
    ///
    /// Only a malformed 2xx availability body produces `Err`. Query
    /// transport failures count as zero properties, and notifier failures
    /// only surface in self-test mode.
    pub async fn run(&self, request: Option<&InvocationRequest>) -> Result<CheckResult, CheckError> {
        if request.is_some_and(InvocationRequest::is_test_notify) {
            return Ok(self.self_test().await);
        }
        self.check().await
    }

    async fn self_test(&self) -> CheckResult {
        info!(notifier = self.notifier.name(), "Running notifier self-test");
        match self.notifier.notify(TEST_MESSAGE).await {
            Ok(delivery) => {
                info!(message_id = ?delivery.message_id, "Self-test notification sent");
                CheckResult::test_passed()
            }
            Err(e) => {
                warn!("Self-test notification failed: {}", e);
                CheckResult::test_failed(e.to_string())
            }
        }
    }

    async fn check(&self) -> Result<CheckResult, CheckError> {
        info!(url = %self.query_url, "Querying property count");

        let mut count = 0;
        let mut duration = 0.0;

        let start = Instant::now();
        match self.client.get(self.query_url.clone()).send().await {
            Ok(response) => {
                let status = response.status();
                match response.text().await {
                    Ok(body) => {
                        duration = start.elapsed().as_secs_f64();
                        info!(status = status.as_u16(), body = %body, "Availability response received");
                        if status.is_success() {
                            count = parse_body(&body)?;
                        } else {
                            warn!(status = status.as_u16(), "Availability query returned error status");
                        }
                    }
                    Err(e) => {
                        warn!(status = status.as_u16(), "Failed to read availability response: {}", e);
                    }
                }
            }
            Err(e) => {
                warn!("Availability query failed: {}", e);
                info!("No HTTP response received");
            }
        }

        info!("Number of properties available: {}", count);
        info!("Request duration: {:.2}s", duration);

        if count > 0 {
            info!(count, "Properties available");
            match self.notifier.notify(&alert_message(count)).await {
                Ok(delivery) => debug!(message_id = ?delivery.message_id, "Alert sent"),
                Err(e) => warn!(notifier = self.notifier.name(), "Notify failed: {}", e),
            }
        }

        Ok(CheckResult::checked(count, duration))
    }
}

/// A body that is not JSON at all is treated like a transport failure.
/// JSON without a usable `data.count` is not.
fn parse_body(body: &str) -> Result<u64, CheckError> {
    match serde_json::from_str::<Value>(body) {
        Ok(json) => extract_count(&json),
        Err(e) => {
            warn!("Availability response is not JSON: {}", e);
            Ok(0)
        }
    }
}
