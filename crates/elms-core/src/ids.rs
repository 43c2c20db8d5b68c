//! Identifier generation for the work record.
//!
//! Identifiers only need to be unique within a demo session, so they are drawn
//! straight from OS randomness without any registry or collision check.

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::value::Value;

/// Upper bound (inclusive) for numeric identifiers.
pub const NUMERIC_ID_MAX: u32 = 1_000_000;

/// How a fresh identifier is shaped, chosen from the field's declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    /// 36-character GUID in the version-4 layout.
    Guid,
    /// Positive integer in `1..=NUMERIC_ID_MAX`.
    Numeric,
}

impl IdStrategy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Guid => "guid",
            Self::Numeric => "numeric",
        }
    }

    /// Produce a new identifier value for this strategy.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Entropy` if the OS random source fails.
    pub fn generate(self) -> Result<Value, CoreError> {
        match self {
            Self::Guid => guid().map(Value::Text),
            Self::Numeric => numeric_id().map(Value::Integer),
        }
    }
}

/// Random GUID formatted as `xxxxxxxx-xxxx-4xxx-yxxx-xxxxxxxxxxxx`, lowercase.
///
/// # Errors
///
/// Returns `CoreError::Entropy` if the OS random source fails.
pub fn guid() -> Result<String, CoreError> {
    let mut bytes = [0u8; 16];
    getrandom::fill(&mut bytes).map_err(|e| CoreError::Entropy(e.to_string()))?;
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    Ok(format!(
        "{}-{}-{}-{}-{}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    ))
}

/// Random integer in `1..=NUMERIC_ID_MAX`.
///
/// # Errors
///
/// Returns `CoreError::Entropy` if the OS random source fails.
pub fn numeric_id() -> Result<i64, CoreError> {
    let raw = getrandom::u32().map_err(|e| CoreError::Entropy(e.to_string()))?;
    Ok(i64::from(raw % NUMERIC_ID_MAX) + 1)
}
