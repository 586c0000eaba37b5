//! Notification errors.

use homecheck_config::ConfigError;
use thiserror::Error;

/// Notification error types.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Credentials missing. Raised before any network call.
    #[error("Notifier not configured: {0}")]
    Configuration(#[from] ConfigError),

    /// Transport failure: connect error, timeout, unreadable body.
    #[error("Notification request failed: {0}")]
    Request(String),

    /// The bot API answered, but did not accept the message.
    #[error("Telegram API error (status {status}): {body}")]
    Delivery { status: u16, body: String },
}

impl NotifyError {
    /// Whether the failure happened before anything was sent.
    pub fn is_configuration(&self) -> bool {
        matches!(self, NotifyError::Configuration(_))
    }
}
