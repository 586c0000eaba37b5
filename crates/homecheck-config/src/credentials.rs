//! Bot credentials.
//!
//! Credentials never live in the config file. They are resolved from the
//! process environment, or injected by the caller as an explicit value.

use std::fmt;

use crate::error::ConfigError;

/// Environment variable holding the bot API token.
pub const BOT_TOKEN_VAR: &str = "BOT_TOKEN";

/// Environment variable holding the destination chat identifier.
pub const CHAT_ID_VAR: &str = "CHAT_ID";

/// Bot token and chat identifier. Both are guaranteed non-empty.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    bot_token: String,
    chat_id: String,
}

impl Credentials {
    /// Build credentials from explicit values.
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Result<Self, ConfigError> {
        let bot_token = non_empty(BOT_TOKEN_VAR, Some(bot_token.into()))?;
        let chat_id = non_empty(CHAT_ID_VAR, Some(chat_id.into()))?;
        Ok(Self { bot_token, chat_id })
    }

    /// Read `BOT_TOKEN` and `CHAT_ID` from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve credentials through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bot_token = non_empty(BOT_TOKEN_VAR, lookup(BOT_TOKEN_VAR))?;
        let chat_id = non_empty(CHAT_ID_VAR, lookup(CHAT_ID_VAR))?;
        Ok(Self { bot_token, chat_id })
    }

    pub fn bot_token(&self) -> &str {
        &self.bot_token
    }

    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

fn non_empty(name: &str, value: Option<String>) -> Result<String, ConfigError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingCredential(name.to_string())),
    }
}

/// Where a notifier obtains its credentials.
#[derive(Debug, Clone)]
pub enum CredentialSource {
    /// Re-read the process environment on every resolution.
    Environment,
    /// A value constructed up front by the caller.
    Fixed(Credentials),
}

impl CredentialSource {
    pub fn resolve(&self) -> Result<Credentials, ConfigError> {
        match self {
            CredentialSource::Environment => Credentials::from_env(),
            CredentialSource::Fixed(credentials) => Ok(credentials.clone()),
        }
    }
}
