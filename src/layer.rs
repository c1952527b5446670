use crate::entry::{float_value, Entry, Fields};
use crate::hook::Hook;
use crate::level::Level;
use crate::record::MESSAGE_FIELD;
use chrono::Utc;
use serde_json::Value;
use std::fmt::Display;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

/// `tracing_subscriber` layer that turns events into [`Entry`]s and fires
/// them through a [`Hook`].
///
/// Events at levels the hook is not enabled for are skipped. Firing runs on
/// the thread that emitted the event and blocks it for the duration of the
/// hook's I/O. Fire errors can't be logged through the subscriber that
/// produced them, so they go to stderr.
pub struct FluentLayer<H> {
    hook: Arc<H>,
    /// Total events seen by the layer (before filtering by level).
    pub total_events: Arc<AtomicU64>,
    /// Events the hook accepted.
    pub fired_events: Arc<AtomicU64>,
    /// Events the hook returned an error for.
    pub failed_events: Arc<AtomicU64>,
}

impl<H: Hook> FluentLayer<H> {
    pub fn new(hook: Arc<H>) -> Self {
        Self {
            hook,
            total_events: Arc::new(AtomicU64::new(0)),
            fired_events: Arc::new(AtomicU64::new(0)),
            failed_events: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn hook(&self) -> &Arc<H> {
        &self.hook
    }
}

impl<S, H> Layer<S> for FluentLayer<H>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
    H: Hook + 'static,
    H::Error: Display,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        self.total_events.fetch_add(1, Ordering::Relaxed);

        let level = Level::from(*event.metadata().level());
        if !self.hook.is_enabled(level) {
            return;
        }

        let mut data = Fields::new();
        let mut message = String::new();
        let mut visitor = FieldVisitor {
            fields: &mut data,
            message: &mut message,
        };
        event.record(&mut visitor);

        let entry = Entry {
            level,
            message,
            time: Utc::now(),
            data,
        };

        match self.hook.fire(&entry) {
            Ok(()) => {
                self.fired_events.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                self.failed_events.fetch_add(1, Ordering::Relaxed);
                eprintln!("{} hook failed to fire log entry: {}", self.hook.name(), e);
            }
        }
    }
}

/// Collects an event's fields; `message` becomes the entry message.
pub struct FieldVisitor<'a> {
    pub fields: &'a mut Fields,
    pub message: &'a mut String,
}

impl<'a> FieldVisitor<'a> {
    fn insert(&mut self, field: &Field, value: Value) {
        self.fields.insert(field.name().to_string(), value);
    }
}

impl<'a> Visit for FieldVisitor<'a> {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == MESSAGE_FIELD {
            *self.message = value.to_string();
        } else {
            self.insert(field, Value::String(value.to_string()));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, float_value(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, Value::from(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == MESSAGE_FIELD {
            *self.message = format!("{:?}", value);
        } else {
            self.insert(field, Value::String(format!("{:?}", value)));
        }
    }
}
