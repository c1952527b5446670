use crate::entry::Fields;
use crate::level::Level;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Category the record is converted under before it reaches a recorder.
/// Unrelated to the routing tag.
pub const TAG_NAME: &str = "fluent";
pub const MESSAGE_FIELD: &str = "message";
pub const LEVEL_FIELD: &str = "level";

/// Flat string map sent to the collector for a single entry.
///
/// Built fresh on every fire and never reused.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Record(BTreeMap<String, String>);

impl Record {
    /// Stringify every field of an entry's data.
    pub fn from_fields(fields: &Fields) -> Self {
        Record(
            fields
                .iter()
                .map(|(k, v)| (k.clone(), render_value(v)))
                .collect(),
        )
    }

    pub fn set_level(&mut self, level: Level) {
        self.0.insert(LEVEL_FIELD.to_string(), level.to_string());
    }

    /// Fill in `message` unless the caller already supplied one.
    pub fn set_default_message(&mut self, message: &str) {
        self.0
            .entry(MESSAGE_FIELD.to_string())
            .or_insert_with(|| message.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Default text form of an arbitrary field value.
///
/// Strings are taken as-is; everything else (numbers, bools, null, arrays,
/// objects) uses its JSON text.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A record in the form handed to a [`Recorder`](crate::recorder::Recorder).
///
/// Serialises as a flat object of the record's fields; the category is
/// carried alongside for recorders that key their encoding on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payload {
    #[serde(skip)]
    category: &'static str,
    #[serde(flatten)]
    record: Record,
}

impl Payload {
    pub fn category(&self) -> &'static str {
        self.category
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn into_record(self) -> Record {
        self.record
    }
}

/// Convert a record into the recorder-facing value under `category`.
pub fn convert_to_value(record: Record, category: &'static str) -> Payload {
    Payload { category, record }
}
