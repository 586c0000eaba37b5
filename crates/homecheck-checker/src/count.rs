//! Count extraction from the availability response.

use serde_json::Value;

use crate::error::CheckError;

/// Extract `data.count` from a decoded response body.
///
/// Integers, floats (truncated toward zero) and numeric strings are
/// accepted. A missing field, a negative value or any other JSON type is
/// a [`CheckError::MalformedResponse`].
pub fn extract_count(body: &Value) -> Result<u64, CheckError> {
    let count = body
        .get("data")
        .and_then(|data| data.get("count"))
        .ok_or_else(|| CheckError::MalformedResponse("missing field data.count".to_string()))?;

    match count {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                Ok(v)
            } else if n.is_i64() {
                Err(negative(n))
            } else {
                match n.as_f64().map(f64::trunc) {
                    Some(f) if f.is_finite() && f >= 0.0 && f < u64::MAX as f64 => Ok(f as u64),
                    Some(f) if f >= 0.0 => Err(CheckError::MalformedResponse(format!(
                        "data.count is out of range: {}",
                        n
                    ))),
                    _ => Err(negative(n)),
                }
            }
        }
        Value::String(s) => match s.trim().parse::<i64>() {
            Ok(v) if v >= 0 => Ok(v as u64),
            Ok(v) => Err(negative(v)),
            Err(_) => Err(CheckError::MalformedResponse(format!(
                "data.count is not an integer: {:?}",
                s
            ))),
        },
        other => Err(CheckError::MalformedResponse(format!(
            "data.count has unexpected type: {}",
            other
        ))),
    }
}

fn negative(v: impl std::fmt::Display) -> CheckError {
    CheckError::MalformedResponse(format!("data.count is negative: {}", v))
}
