mod common;

use common::{StubConfig, StubRecorder};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing_fluent_hook::{FluentHook, FluentLayer, Level};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

fn with_layer<F: FnOnce()>(layer: FluentLayer<FluentHook<StubRecorder>>, f: F) {
    let subscriber = Registry::default().with(layer);
    tracing::subscriber::with_default(subscriber, f);
}

#[test]
fn forwards_events_as_entries() {
    let hook = Arc::new(FluentHook::<StubRecorder>::new(StubConfig::new()));
    let layer = FluentLayer::new(Arc::clone(&hook));
    let fired = Arc::clone(&layer.fired_events);

    with_layer(layer, || {
        tracing::error!(code = 42, path = "/var", retry = false, "disk full");
    });

    assert_eq!(fired.load(Ordering::Relaxed), 1);
    let posts = hook.config().state.posts();
    let posted = &posts[0];
    assert_eq!(posted.tag, "disk full");
    assert_eq!(posted.field("level"), Some("error"));
    assert_eq!(posted.field("message"), Some("disk full"));
    assert_eq!(posted.field("code"), Some("42"));
    assert_eq!(posted.field("path"), Some("/var"));
    assert_eq!(posted.field("retry"), Some("false"));
}

#[test]
fn skips_levels_the_hook_is_not_enabled_for() {
    let hook = Arc::new(FluentHook::<StubRecorder>::new(StubConfig::new()));
    let layer = FluentLayer::new(Arc::clone(&hook));
    let total = Arc::clone(&layer.total_events);

    with_layer(layer, || {
        tracing::debug!("too chatty");
        tracing::trace!("even more");
        tracing::warn!("kept");
    });

    assert_eq!(total.load(Ordering::Relaxed), 3);
    let posts = hook.config().state.posts();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].field("level"), Some("warning"));
}

#[test]
fn level_changes_apply_to_later_events() {
    let hook = Arc::new(FluentHook::<StubRecorder>::new(StubConfig::new()));
    let layer = FluentLayer::new(Arc::clone(&hook));

    with_layer(layer, || {
        tracing::debug!("dropped");
        hook.set_levels([Level::Debug]);
        tracing::debug!("kept");
        tracing::error!("dropped too");
    });

    let tags: Vec<_> = hook
        .config()
        .state
        .posts()
        .into_iter()
        .map(|p| p.tag)
        .collect();
    assert_eq!(tags, vec!["kept"]);
}

#[test]
fn fire_errors_are_counted_not_propagated() {
    let hook = Arc::new(FluentHook::<StubRecorder>::new(StubConfig::new()));
    hook.config().state.refuse_connect.store(true, Ordering::SeqCst);
    let layer = FluentLayer::new(Arc::clone(&hook));
    let failed = Arc::clone(&layer.failed_events);
    let fired = Arc::clone(&layer.fired_events);

    with_layer(layer, || {
        tracing::error!("unreachable collector");
        tracing::info!("still unreachable");
    });

    assert_eq!(failed.load(Ordering::Relaxed), 2);
    assert_eq!(fired.load(Ordering::Relaxed), 0);
    assert_eq!(hook.config().state.connects(), 2);
}

#[test]
fn override_tag_applies_to_layer_events() {
    let hook = Arc::new(FluentHook::<StubRecorder>::new(StubConfig::new()));
    hook.set_tag("app.audit");
    let layer = FluentLayer::new(Arc::clone(&hook));

    with_layer(layer, || {
        tracing::info!(user = "ada", "login");
    });

    let posted = &hook.config().state.posts()[0];
    assert_eq!(posted.tag, "app.audit");
    assert_eq!(posted.field("message"), Some("login"));
    assert_eq!(posted.field("user"), Some("ada"));
}

#[test]
fn non_finite_floats_are_posted_as_text() {
    let hook = Arc::new(FluentHook::<StubRecorder>::new(StubConfig::new()));
    let layer = FluentLayer::new(Arc::clone(&hook));

    with_layer(layer, || {
        tracing::error!(ratio = f64::NAN, inf = f64::INFINITY, load = 0.25, "bad gauge");
    });

    let posted = &hook.config().state.posts()[0];
    assert_eq!(posted.field("ratio"), Some("NaN"));
    assert_eq!(posted.field("inf"), Some("inf"));
    assert_eq!(posted.field("load"), Some("0.25"));
}
