use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing_fluent_hook::{Entry, FluentHook, Hook, Level, Payload, Recorder};

/// Demonstrates the connection lifecycle: a recorder that drops its
/// connection every third post. The failed record is lost and the next
/// entry reconnects.
struct FlakyRecorder {
    id: usize,
    posts: usize,
    closed: bool,
}

#[derive(Debug, thiserror::Error)]
#[error("connection {0} reset by peer")]
struct ConnectionReset(usize);

struct FlakyConfig {
    connections: AtomicUsize,
}

impl Recorder for FlakyRecorder {
    type Config = FlakyConfig;
    type Error = ConnectionReset;

    fn connect(config: &FlakyConfig) -> Result<Self, ConnectionReset> {
        let id = config.connections.fetch_add(1, Ordering::SeqCst) + 1;
        println!("opened connection {}", id);
        Ok(FlakyRecorder { id, posts: 0, closed: false })
    }

    fn post_with_time(
        &mut self,
        tag: &str,
        _time: DateTime<Utc>,
        payload: &Payload,
    ) -> Result<(), ConnectionReset> {
        self.posts += 1;
        if self.posts % 3 == 0 {
            self.closed = true;
            return Err(ConnectionReset(self.id));
        }
        println!("conn {} <- [{}] {} fields", self.id, tag, payload.record().len());
        Ok(())
    }

    fn is_closed(&self) -> Option<bool> {
        Some(self.closed)
    }
}

fn main() {
    let hook = Arc::new(FluentHook::<FlakyRecorder>::new(FlakyConfig {
        connections: AtomicUsize::new(0),
    }));

    for i in 0..8 {
        let entry = Entry::new(Level::Error, "job failed").with_field("job", i);
        if let Err(e) = hook.fire(&entry) {
            println!("entry {} lost: {}", i, e);
        }
    }
}
