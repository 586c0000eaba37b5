//! Telegram bot API notifier.

#[cfg(test)]
#[path = "telegram_tests.rs"]
mod tests;

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use homecheck_config::{CredentialSource, TelegramConfig};

use crate::error::NotifyError;
use crate::notifier::{Delivery, Notifier};

/// Sends messages through `POST {api_base}/bot{token}/sendMessage`.
pub struct TelegramNotifier {
    api_base: String,
    credentials: CredentialSource,
    client: reqwest::Client,
}

impl TelegramNotifier {
    /// Create a notifier. No credentials are checked here; they are
    /// resolved on every [`Notifier::notify`] call.
    pub fn new(config: &TelegramConfig, credentials: CredentialSource) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("homecheck/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| NotifyError::Request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_base: config.api_base.trim_end_matches('/').to_string(),
            credentials,
            client,
        })
    }

    fn send_message_url(&self, bot_token: &str) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, bot_token)
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn notify(&self, message: &str) -> Result<Delivery, NotifyError> {
        let credentials = self.credentials.resolve()?;

        let payload = serde_json::json!({
            "chat_id": credentials.chat_id(),
            "text": message,
        });

        // Error messages must not echo the URL, it embeds the token.
        let response = self
            .client
            .post(self.send_message_url(credentials.bot_token()))
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                warn!("Failed to send Telegram message: {}", e);
                NotifyError::Request(e.to_string())
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            let e = e.without_url();
            warn!(status = status.as_u16(), "Failed to read Telegram response: {}", e);
            NotifyError::Request(e.to_string())
        })?;

        let accepted = serde_json::from_str::<Value>(&body)
            .ok()
            .filter(|data| status.is_success() && is_truthy(data.get("ok")));

        match accepted {
            Some(data) => {
                let message_id = data
                    .get("result")
                    .and_then(|r| r.get("message_id"))
                    .and_then(|m| m.as_i64());
                debug!(?message_id, "Telegram message sent");
                Ok(Delivery { message_id })
            }
            None => {
                warn!(
                    status = status.as_u16(),
                    body = %body,
                    "Telegram API rejected message"
                );
                Err(NotifyError::Delivery {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }
}

/// Truthiness of an optional JSON field: `false`, `null`, `0`, `""`, empty
/// containers and absence are all false.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}
