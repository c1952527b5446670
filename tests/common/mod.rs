//! Stub recorder shared by the integration tests.

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use tracing_fluent_hook::{Payload, Recorder};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StubError {
    #[error("connection refused")]
    Refused,
    #[error("broken pipe")]
    BrokenPipe,
    #[error("recorder is closed")]
    Closed,
}

#[derive(Debug, Clone)]
pub struct Posted {
    pub tag: String,
    pub time: DateTime<Utc>,
    pub category: &'static str,
    pub fields: serde_json::Value,
}

impl Posted {
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(|v| v.as_str())
    }
}

/// Knobs and observations shared between a test and every recorder the
/// hook builds from the same config.
#[derive(Debug, Default)]
pub struct StubState {
    pub connects: AtomicUsize,
    pub posts: Mutex<Vec<Posted>>,
    pub refuse_connect: AtomicBool,
    pub fail_next_post: AtomicBool,
    pub panic_next_post: AtomicBool,
    /// Whether recorders answer the liveness probe.
    pub reports_liveness: AtomicBool,
    /// Keep the handle open after a failed post (a transient error).
    pub survives_failure: AtomicBool,
    pub connect_delay_ms: AtomicUsize,
}

impl StubState {
    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn posts(&self) -> Vec<Posted> {
        self.posts.lock().unwrap().clone()
    }
}

#[derive(Debug, Clone, Default)]
pub struct StubConfig {
    pub state: Arc<StubState>,
}

impl StubConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_liveness(self) -> Self {
        self.state.reports_liveness.store(true, Ordering::SeqCst);
        self
    }

    pub fn with_connect_delay(self, delay: Duration) -> Self {
        self.state
            .connect_delay_ms
            .store(delay.as_millis() as usize, Ordering::SeqCst);
        self
    }
}

/// Recorder that records posts in memory. After a failed post it marks
/// itself closed, like a client that shuts down on transport errors.
pub struct StubRecorder {
    state: Arc<StubState>,
    closed: bool,
}

impl Recorder for StubRecorder {
    type Config = StubConfig;
    type Error = StubError;

    fn connect(config: &StubConfig) -> Result<Self, StubError> {
        let state = Arc::clone(&config.state);
        state.connects.fetch_add(1, Ordering::SeqCst);
        let delay = state.connect_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            thread::sleep(Duration::from_millis(delay as u64));
        }
        if state.refuse_connect.load(Ordering::SeqCst) {
            return Err(StubError::Refused);
        }
        Ok(StubRecorder {
            state,
            closed: false,
        })
    }

    fn post_with_time(
        &mut self,
        tag: &str,
        time: DateTime<Utc>,
        payload: &Payload,
    ) -> Result<(), StubError> {
        if self.closed {
            return Err(StubError::Closed);
        }
        if self.state.panic_next_post.swap(false, Ordering::SeqCst) {
            panic!("recorder blew up");
        }
        if self.state.fail_next_post.swap(false, Ordering::SeqCst) {
            if !self.state.survives_failure.load(Ordering::SeqCst) {
                self.closed = true;
            }
            return Err(StubError::BrokenPipe);
        }
        let fields = serde_json::to_value(payload).expect("payload serialises");
        self.state.posts.lock().unwrap().push(Posted {
            tag: tag.to_string(),
            time,
            category: payload.category(),
            fields,
        });
        Ok(())
    }

    fn is_closed(&self) -> Option<bool> {
        if self.state.reports_liveness.load(Ordering::SeqCst) {
            Some(self.closed)
        } else {
            None
        }
    }
}
