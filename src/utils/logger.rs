// Logger initialization
//
// The server logs to stdout. The terminal client owns stdout, so it logs to a
// daily-rotated file instead.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "jobtrack=debug,tower_http=debug,axum=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into())
}

pub fn init_logger() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Log to `<dir>/jobtrack.log.<date>`. Keep the guard alive until exit.
pub fn init_file_logger(dir: &Path) -> WorkerGuard {
    let appender = tracing_appender::rolling::daily(dir, "jobtrack.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(false))
        .init();

    guard
}
