use crate::record::Payload;
use chrono::{DateTime, Utc};

/// Client handle for a log collector.
///
/// A hook owns at most one recorder at a time. It creates one with
/// [`Recorder::connect`] on demand and keeps it until it becomes unusable;
/// the hook never closes it explicitly, it only drops a stale handle.
/// Implementations own the wire protocol and any timeouts.
pub trait Recorder: Send + Sized {
    /// Connection settings, passed to [`Recorder::connect`] unchanged.
    type Config: Send + Sync;

    /// Connection and send failures, surfaced by the hook verbatim.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Open a connection to the collector.
    ///
    /// **Returns**
    /// - `Ok(recorder)` ready to post.
    /// - `Err(..)` if the collector could not be reached. The hook keeps no
    ///   handle and tries again on the next entry.
    fn connect(config: &Self::Config) -> Result<Self, Self::Error>;

    /// Send one record routed under `tag`, stamped with `time`.
    ///
    /// A failed post loses the record; the hook does not retry it.
    fn post_with_time(
        &mut self,
        tag: &str,
        time: DateTime<Utc>,
        payload: &Payload,
    ) -> Result<(), Self::Error>;

    /// Liveness probe.
    ///
    /// **Returns**
    /// - `Some(true)` if the handle has shut itself down and must be replaced.
    /// - `Some(false)` if it is still usable.
    /// - `None` if the recorder cannot tell. The hook then reconnects only
    ///   after a post on this handle has failed.
    ///
    /// Default implementation reports `None`.
    fn is_closed(&self) -> Option<bool> {
        None
    }
}
