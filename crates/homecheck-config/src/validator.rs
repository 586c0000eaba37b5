//! Configuration validation.

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;

use crate::schema::HomecheckConfig;

const KNOWN_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Timeouts above this many seconds are suspicious for a scheduled checker.
const LONG_TIMEOUT_SECS: u64 = 60;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &HomecheckConfig) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_endpoint(
            "listing",
            &config.listing.base_url,
            config.listing.timeout_secs,
            &mut result,
        );
        Self::validate_endpoint(
            "telegram",
            &config.telegram.api_base,
            config.telegram.timeout_secs,
            &mut result,
        );
        Self::validate_logging(config, &mut result);

        result
    }

    fn validate_endpoint(section: &str, base: &str, timeout_secs: u64, result: &mut ValidationResult) {
        match url::Url::parse(base) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {
                if url.scheme() == "http" {
                    result.add_warning(ValidationWarning::new(
                        format!("{}.base", section),
                        "plain http endpoint, traffic is unencrypted",
                    ));
                }
            }
            Ok(url) => result.add_error(ValidationError::new(
                format!("{}.base", section),
                format!("unsupported scheme '{}'", url.scheme()),
            )),
            Err(e) => result.add_error(ValidationError::new(
                format!("{}.base", section),
                format!("invalid URL '{}': {}", base, e),
            )),
        }

        if timeout_secs == 0 {
            result.add_error(ValidationError::new(
                format!("{}.timeout_secs", section),
                "timeout_secs must be greater than 0",
            ));
        } else if timeout_secs > LONG_TIMEOUT_SECS {
            result.add_warning(ValidationWarning::new(
                format!("{}.timeout_secs", section),
                format!(
                    "timeout of {}s may exceed the scheduler's own invocation limit",
                    timeout_secs
                ),
            ));
        }
    }

    fn validate_logging(config: &HomecheckConfig, result: &mut ValidationResult) {
        let level = config.logging.level.to_ascii_lowercase();
        if !KNOWN_LEVELS.contains(&level.as_str()) {
            result.add_error(ValidationError::new(
                "logging.level",
                format!("unknown level '{}'", config.logging.level),
            ));
        }
    }
}
