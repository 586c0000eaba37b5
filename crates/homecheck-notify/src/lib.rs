//! # Homecheck Notify
//!
//! Delivers a single text message to a fixed chat.
//!
//! - [`Notifier`] - the seam the checker talks to
//! - [`TelegramNotifier`] - Telegram bot API implementation
//! - [`LogNotifier`] - writes to the log only, for dry runs

mod error;
mod notifier;
mod telegram;

pub use error::NotifyError;
pub use notifier::{Delivery, LogNotifier, Notifier};
pub use telegram::TelegramNotifier;
