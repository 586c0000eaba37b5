//! # Homecheck Config
//!
//! Configuration management for the homecheck availability checker.
//!
//! Only the transport side is configurable (hosts, timeouts, logging).
//! The search filter is fixed in `homecheck-checker`, and bot credentials
//! come from the process environment via [`Credentials`].

mod credentials;
mod error;
mod loader;
mod schema;
mod validator;

pub use credentials::{CredentialSource, Credentials, BOT_TOKEN_VAR, CHAT_ID_VAR};
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
