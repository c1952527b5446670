use std::convert::Infallible;
use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};
use serde::Serialize;
use tracing::{error, info, warn};
use tracing_fluent_hook::{
    env::{env_or, FLUENT_TAG_PREFIX_ENV},
    init::{init_tracing_with_config, LayerConfig},
    FluentConfig, FluentHook, Payload, Recorder,
};

/// Example of plugging in a custom collector client by implementing the
/// `Recorder` trait. This one prints each record as a JSON line instead of
/// talking to a real daemon, e.g. for piping into `fluent-bit -i stdin`.
struct StdoutRecorder {
    prefix: Option<String>,
    sub_second_precision: bool,
}

#[derive(Serialize)]
struct Line<'a> {
    tag: String,
    time: DateTime<Utc>,
    record: &'a Payload,
}

impl Recorder for StdoutRecorder {
    type Config = FluentConfig;
    type Error = Infallible;

    fn connect(config: &FluentConfig) -> Result<Self, Infallible> {
        println!(
            "[stdout-recorder] connected (pretending) to {} within {:?}",
            config.address(),
            config.timeout
        );
        Ok(StdoutRecorder {
            prefix: config.tag_prefix.clone(),
            sub_second_precision: config.sub_second_precision,
        })
    }

    fn post_with_time(
        &mut self,
        tag: &str,
        time: DateTime<Utc>,
        payload: &Payload,
    ) -> Result<(), Infallible> {
        let tag = match &self.prefix {
            Some(prefix) => format!("{}.{}", prefix, tag),
            None => tag.to_string(),
        };
        let time = if self.sub_second_precision {
            time
        } else {
            time.trunc_subsecs(0)
        };
        let line = Line { tag, time, record: payload };
        match serde_json::to_string(&line) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("[stdout-recorder] could not encode record: {}", e),
        }
        Ok(())
    }
}

fn main() {
    let mut config = FluentConfig::from_env().unwrap_or_default();
    config.tag_prefix = Some(env_or(FLUENT_TAG_PREFIX_ENV, "demo"));

    let hook = Arc::new(FluentHook::<StdoutRecorder>::new(config));
    init_tracing_with_config(Arc::clone(&hook), LayerConfig { enable_stdout: false })
        .expect("set global subscriber");

    info!(user = "ada", "user logged in");
    hook.set_tag("billing");
    warn!(invoice = 1042, amount = 99.5, "invoice overdue");
    error!(code = 42, "disk full");
}
