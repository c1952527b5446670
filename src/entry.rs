use crate::level::Level;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::BTreeMap;

/// Arbitrary structured fields attached to an entry.
pub type Fields = BTreeMap<String, Value>;

/// JSON value for a float. NaN and infinities have no JSON number form,
/// so they are kept as their text (`NaN`, `inf`, `-inf`) instead of `null`.
pub fn float_value(value: f64) -> Value {
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(value.to_string()))
}

/// A log entry as handed to a hook by the logging framework.
///
/// Hooks only read entries; they never modify them.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub level: Level,
    pub message: String,
    pub time: DateTime<Utc>,
    pub data: Fields,
}

impl Entry {
    /// Create an entry stamped with the current time and no fields.
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            time: Utc::now(),
            data: Fields::new(),
        }
    }

    pub fn at(mut self, time: DateTime<Utc>) -> Self {
        self.time = time;
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Like [`Entry::with_field`], but keeps NaN and infinities as text.
    pub fn with_float(self, key: impl Into<String>, value: f64) -> Self {
        self.with_field(key, float_value(value))
    }
}
