// PlantCare - util/logging.rs
//
// tracing-subscriber setup. The level comes from, in order:
//   RUST_LOG, then --debug, then [logging] level in config.toml, then "info".
//
// Output goes to stderr, or to [logging] file when it can be opened.
// Image bytes and article text are never logged, only their sizes.

use super::constants::{APP_NAME, APP_VERSION, DEFAULT_LOG_LEVEL};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Call once, before anything logs.
pub fn init(debug_flag: bool, config_level: Option<&str>, log_file: Option<&str>) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(_) => EnvFilter::from_default_env(),
        Err(_) => {
            let directive = match (debug_flag, config_level) {
                (true, _) => "debug",
                (false, Some(level)) => level,
                (false, None) => DEFAULT_LOG_LEVEL,
            };
            EnvFilter::new(directive)
        }
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(true)
        .with_line_number(true)
        .compact();

    let sink = log_file.and_then(|path| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| eprintln!("{APP_NAME}: log file '{path}' unavailable ({e}), using stderr"))
            .ok()
    });
    let to_file = sink.is_some();

    match sink {
        Some(file) => builder.with_ansi(false).with_writer(Mutex::new(file)).init(),
        None => builder.init(),
    }

    tracing::debug!(version = APP_VERSION, to_file, "Logging ready");
}
