use crate::entry::Entry;
use crate::level::{Level, DEFAULT_LEVELS};
use crate::record::{convert_to_value, Record, TAG_NAME};
use crate::recorder::Recorder;
use parking_lot::{Mutex, RwLock};

/// A logging-framework hook: something that is handed every entry at one of
/// its levels and may fail to process it.
///
/// Level filtering is the caller's job; [`Hook::fire`] assumes the entry
/// already qualifies.
pub trait Hook: Send + Sync {
    type Error;

    /// Human-readable identifier of the hook.
    fn name(&self) -> &'static str;

    /// Levels the hook wants to see.
    fn levels(&self) -> Vec<Level>;

    fn is_enabled(&self, level: Level) -> bool {
        self.levels().contains(&level)
    }

    /// Process a single entry synchronously on the caller's thread.
    fn fire(&self, entry: &Entry) -> Result<(), Self::Error>;
}

/// Hook that forwards entries to a collector through a lazily connected
/// [`Recorder`].
///
/// The recorder handle is created on the first fire, reused while it stays
/// usable and replaced on the fire after it goes stale. Connecting and
/// posting happen under one lock, so concurrent fires are fully serialised
/// and at most one connection attempt is ever in flight.
pub struct FluentHook<R: Recorder> {
    config: R::Config,
    levels: RwLock<Vec<Level>>,
    tag: RwLock<Option<String>>,
    connection: Mutex<Option<Connection<R>>>,
}

struct Connection<R> {
    recorder: R,
    last_post_failed: bool,
}

impl<R: Recorder> Connection<R> {
    /// A handle is stale if it says it closed itself, or, when it can't
    /// tell, if its last post failed.
    fn is_stale(&self) -> bool {
        match self.recorder.is_closed() {
            Some(closed) => closed,
            None => self.last_post_failed,
        }
    }
}

impl<R: Recorder> FluentHook<R> {
    /// Create a hook with the default levels and no tag override. No
    /// connection is made until the first entry arrives.
    pub fn new(config: R::Config) -> Self {
        Self {
            config,
            levels: RwLock::new(DEFAULT_LEVELS.to_vec()),
            tag: RwLock::new(None),
            connection: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &R::Config {
        &self.config
    }

    /// Replace the enabled levels. Contents are not validated.
    pub fn set_levels(&self, levels: impl Into<Vec<Level>>) {
        *self.levels.write() = levels.into();
    }

    /// The override tag, `None` until [`FluentHook::set_tag`] is called.
    pub fn tag(&self) -> Option<String> {
        self.tag.read().clone()
    }

    /// Route every subsequent entry under `tag` instead of its message.
    pub fn set_tag(&self, tag: impl Into<String>) {
        *self.tag.write() = Some(tag.into());
    }

    /// Whether a recorder handle is currently held, stale or not.
    pub fn is_connected(&self) -> bool {
        self.connection.lock().is_some()
    }
}

impl<R: Recorder> Hook for FluentHook<R> {
    type Error = R::Error;

    fn name(&self) -> &'static str {
        "Fluent"
    }

    fn levels(&self) -> Vec<Level> {
        self.levels.read().clone()
    }

    fn is_enabled(&self, level: Level) -> bool {
        self.levels.read().contains(&level)
    }

    fn fire(&self, entry: &Entry) -> Result<(), R::Error> {
        let mut record = Record::from_fields(&entry.data);
        record.set_level(entry.level);

        // An override equal to the message already carries it.
        let override_tag = self.tag();
        if override_tag.as_deref() != Some(entry.message.as_str()) {
            record.set_default_message(&entry.message);
        }
        let tag = override_tag.unwrap_or_else(|| entry.message.clone());

        let payload = convert_to_value(record, TAG_NAME);

        let mut guard = self.connection.lock();
        let connection = match guard.take().filter(|c| !c.is_stale()) {
            Some(connection) => connection,
            None => Connection {
                recorder: R::connect(&self.config)?,
                last_post_failed: false,
            },
        };
        let connection = guard.insert(connection);

        let result = connection
            .recorder
            .post_with_time(&tag, entry.time, &payload);
        connection.last_post_failed = result.is_err();
        result
    }
}
