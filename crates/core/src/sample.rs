use crate::error::{GraxxError, Result};
use serde::{Deserialize, Serialize};

/// One item of a bulk-load sequence.
///
/// Integers are taken as-is, floats are truncated toward zero and text is
/// trimmed then parsed. Every variant must end up as a non-negative integer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Sample {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Sample {
    /// Coerce to a non-negative integer, failing on anything that isn't one.
    pub fn to_count(&self) -> Result<u64> {
        match self {
            Sample::Int(v) => non_negative(*v, self),
            Sample::Float(v) => {
                if !v.is_finite() {
                    return Err(coercion(self, "not a finite number"));
                }
                let truncated = v.trunc();
                if truncated < 0.0 {
                    return Err(coercion(self, "negative value"));
                }
                if truncated > u64::MAX as f64 {
                    return Err(coercion(self, "value too large"));
                }
                Ok(truncated as u64)
            }
            Sample::Text(s) => {
                let parsed = s
                    .trim()
                    .parse::<i64>()
                    .map_err(|e| coercion(self, &e.to_string()))?;
                non_negative(parsed, self)
            }
        }
    }
}

fn non_negative(v: i64, sample: &Sample) -> Result<u64> {
    u64::try_from(v).map_err(|_| coercion(sample, "negative value"))
}

fn coercion(sample: &Sample, reason: &str) -> GraxxError {
    let value = match sample {
        Sample::Int(v) => v.to_string(),
        Sample::Float(v) => v.to_string(),
        Sample::Text(s) => s.clone(),
    };
    GraxxError::Coercion {
        value,
        reason: reason.to_string(),
    }
}

impl From<i64> for Sample {
    fn from(v: i64) -> Self {
        Sample::Int(v)
    }
}

impl From<i32> for Sample {
    fn from(v: i32) -> Self {
        Sample::Int(v.into())
    }
}

impl From<u32> for Sample {
    fn from(v: u32) -> Self {
        Sample::Int(v.into())
    }
}

impl From<f64> for Sample {
    fn from(v: f64) -> Self {
        Sample::Float(v)
    }
}

impl From<&str> for Sample {
    fn from(v: &str) -> Self {
        Sample::Text(v.to_string())
    }
}

impl From<String> for Sample {
    fn from(v: String) -> Self {
        Sample::Text(v)
    }
}
