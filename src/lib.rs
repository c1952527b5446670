//! Forward structured log entries to a fluentd-style collector.
//!
//! [`FluentHook`] turns each [`Entry`] into a flat string [`Record`], tags
//! it and posts it through a [`Recorder`] it connects lazily and keeps until
//! the handle goes stale. [`FluentLayer`] plugs the hook into `tracing`.

pub mod config;
pub mod entry;
pub mod env;
pub mod hook;
pub mod init;
pub mod layer;
pub mod level;
pub mod noop_recorder;
pub mod record;
pub mod recorder;

pub use config::{ConfigError, FluentConfig, Network};
pub use entry::{Entry, Fields};
pub use hook::{FluentHook, Hook};
pub use layer::FluentLayer;
pub use level::{Level, DEFAULT_LEVELS};
pub use record::{Payload, Record};
pub use recorder::Recorder;
