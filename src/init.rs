use crate::hook::Hook;
use crate::layer::FluentLayer;
use std::fmt::Display;
use std::sync::Arc;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

/// Subscriber options for [`init_tracing_with_config`].
///
/// **Fields**
/// - `enable_stdout`: if `true`, a `tracing_subscriber::fmt::Layer` is
///   stacked on top of [`FluentLayer`] so events are also printed locally.
#[derive(Clone, Debug)]
pub struct LayerConfig {
    pub enable_stdout: bool,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            enable_stdout: true,
        }
    }
}

/// Install a global `tracing` subscriber that forwards events through
/// `hook`.
///
/// **Parameters**
/// - `hook`: shared hook; keep a clone to adjust its levels or tag later.
/// - `config`: [`LayerConfig`] controlling the extra stdout layer.
///
/// **Returns**
/// - `Err(..)` if a global default subscriber was already set.
pub fn init_tracing_with_config<H>(
    hook: Arc<H>,
    config: LayerConfig,
) -> Result<(), SetGlobalDefaultError>
where
    H: Hook + 'static,
    H::Error: Display,
{
    let layer = FluentLayer::new(hook);

    // The two subscriber shapes have different types, hence two branches.
    if config.enable_stdout {
        let fmt_layer = tracing_subscriber::fmt::layer();
        let subscriber = Registry::default().with(layer).with(fmt_layer);
        tracing::subscriber::set_global_default(subscriber)
    } else {
        let subscriber = Registry::default().with(layer);
        tracing::subscriber::set_global_default(subscriber)
    }
}

/// Initialize tracing with [`LayerConfig::default`].
pub fn init_tracing<H>(hook: Arc<H>) -> Result<(), SetGlobalDefaultError>
where
    H: Hook + 'static,
    H::Error: Display,
{
    init_tracing_with_config(hook, LayerConfig::default())
}
