//! Logging Infrastructure
//!
//! Tracing goes to the in-screen log pane (tui-logger) and, when a log
//! directory is configured and exists, to a daily rolling file.

use std::path::Path;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// File name prefix of rolling log files
const LOG_FILE_PREFIX: &str = "cardapio";

/// Initialize the logger
///
/// `RUST_LOG` wins over `log_level` when set.
pub fn init_logger(log_level: &str, log_dir: Option<&str>) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let file_dir = log_dir.map(Path::new).filter(|path| path.is_dir());
    let file_layer = file_dir.map(|path| {
        let file_appender = tracing_appender::rolling::daily(path, LOG_FILE_PREFIX);
        tracing_subscriber::fmt::layer()
            .with_writer(file_appender)
            .with_ansi(false)
            .with_target(false)
            .boxed()
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tui_logger::tracing_subscriber_layer())
        .with(file_layer)
        .init();

    // Dependencies logging through the `log` crate
    let level = parse_level_filter(log_level);
    tui_logger::init_logger(level).ok();
    tui_logger::set_default_level(level);

    if log_dir.is_some() && file_dir.is_none() {
        tracing::warn!(log_dir = ?log_dir, "Log directory missing, file logging disabled");
    }
}

/// Map a level name to a `log` filter, falling back to Info
fn parse_level_filter(level: &str) -> log::LevelFilter {
    level.parse().unwrap_or(log::LevelFilter::Info)
}
