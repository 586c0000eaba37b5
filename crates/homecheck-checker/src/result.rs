//! Invocation result.

use serde::{Deserialize, Serialize};

/// Mode tag reported by the self-test path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckMode {
    Test,
}

/// Outcome of one invocation. Absent fields are omitted when serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub ok: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<CheckMode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count_of_properties_available: Option<u64>,

    /// Seconds spent on the availability query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckResult {
    pub fn test_passed() -> Self {
        Self {
            ok: true,
            mode: Some(CheckMode::Test),
            count_of_properties_available: None,
            duration: None,
            error: None,
        }
    }

    pub fn test_failed(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            mode: Some(CheckMode::Test),
            count_of_properties_available: None,
            duration: None,
            error: Some(error.into()),
        }
    }

    /// Normal-mode result. Always `ok`, even when the query failed.
    pub fn checked(count: u64, duration: f64) -> Self {
        Self {
            ok: true,
            mode: None,
            count_of_properties_available: Some(count),
            duration: Some(duration),
            error: None,
        }
    }
}
