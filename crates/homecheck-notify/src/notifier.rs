//! Notifier trait and the log-only implementation.

use async_trait::async_trait;
use tracing::info;

use crate::error::NotifyError;

/// Outcome of a successful delivery.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Delivery {
    /// Platform message id, when the API reports one.
    pub message_id: Option<i64>,
}

/// Sends a text message to a fixed destination.
///
/// A single attempt is made. Callers decide whether a failure is swallowed
/// or surfaced.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Notifier name, used in logs.
    fn name(&self) -> &str;

    /// Deliver one message.
    async fn notify(&self, message: &str) -> Result<Delivery, NotifyError>;
}

/// Notifier that only writes to the log.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    fn name(&self) -> &str {
        "log"
    }

    async fn notify(&self, message: &str) -> Result<Delivery, NotifyError> {
        info!(notifier = "log", "[NOTIFY] {}", message);
        Ok(Delivery::default())
    }
}
