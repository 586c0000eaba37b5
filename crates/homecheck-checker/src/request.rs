//! Invocation request.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Arguments a scheduler passes to one invocation.
///
/// Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvocationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_notify: Option<Value>,
}

impl InvocationRequest {
    /// Request the notifier self-test with the given flag value.
    pub fn test_notify(value: impl Into<String>) -> Self {
        Self {
            test_notify: Some(Value::String(value.into())),
        }
    }

    /// True when the flag's textual form is `"true"`, ignoring case.
    /// Booleans count by their textual form; numbers and null never match.
    pub fn is_test_notify(&self) -> bool {
        match &self.test_notify {
            Some(Value::String(s)) => s.to_lowercase() == "true",
            Some(Value::Bool(b)) => *b,
            _ => false,
        }
    }
}
