use crate::config::FluentConfig;
use crate::record::Payload;
use crate::recorder::Recorder;
use chrono::{DateTime, Utc};
use std::convert::Infallible;

/// A recorder that accepts and drops every record.
///
/// Useful for measuring the overhead of the hook itself without any
/// network I/O, and for wiring tests that don't care about delivery.
#[derive(Clone, Debug, Default)]
pub struct NoopRecorder;

impl Recorder for NoopRecorder {
    type Config = FluentConfig;
    type Error = Infallible;

    fn connect(_config: &FluentConfig) -> Result<Self, Infallible> {
        Ok(NoopRecorder)
    }

    fn post_with_time(
        &mut self,
        _tag: &str,
        _time: DateTime<Utc>,
        _payload: &Payload,
    ) -> Result<(), Infallible> {
        Ok(())
    }

    fn is_closed(&self) -> Option<bool> {
        Some(false)
    }
}
