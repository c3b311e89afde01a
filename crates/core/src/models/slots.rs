use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{SlotError, SlotResult};
use crate::models::day_slots::DaySlots;

/// Query string of `GET /api/slots`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlotsQuery {
    pub date: Option<String>,
}

impl SlotsQuery {
    /// The requested date, rejecting a missing or empty parameter.
    pub fn date(&self) -> SlotResult<&str> {
        match self.date.as_deref() {
            Some(date) if !date.is_empty() => Ok(date),
            _ => Err(SlotError::Validation("Missing date".to_string())),
        }
    }
}

/// Body of `POST /api/slots` as received on the wire.
///
/// Fields stay untyped until [`SetSlotRequest::validate`] so that a value of
/// the wrong JSON type is reported as a validation failure instead of a
/// deserialization rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetSlotRequest {
    #[serde(default)]
    pub date: Option<Value>,
    #[serde(default)]
    pub time: Option<Value>,
    #[serde(default)]
    pub available: Option<Value>,
}

/// A validated single-slot write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotUpdate {
    pub date: String,
    pub time: String,
    pub available: bool,
}

impl SetSlotRequest {
    pub fn validate(self) -> SlotResult<SlotUpdate> {
        let date = non_empty_string(self.date, "date")?;
        let time = non_empty_string(self.time, "time")?;
        let available = match self.available {
            Some(Value::Bool(available)) => available,
            _ => {
                return Err(SlotError::Validation(
                    "available must be a boolean".to_string(),
                ));
            }
        };

        Ok(SlotUpdate {
            date,
            time,
            available,
        })
    }
}

fn non_empty_string(value: Option<Value>, field: &str) -> SlotResult<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Ok(s),
        _ => Err(SlotError::Validation(format!(
            "{field} must be a non-empty string"
        ))),
    }
}

/// Response of `POST /api/slots`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetSlotResponse {
    pub success: bool,
    pub slots: DaySlots,
}
