/// Logger module for the homework status bot.
///
/// Log lines go to stdout and to a file, each carrying timestamp, level,
/// message, target, file and line number. Level control via `RUST_LOG`.
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const LOG_FILE: &str = "hwbot.log";

/// Installs the global tracing subscriber.
///
/// Returns the file appender's guard; it must stay alive for the process
/// lifetime or buffered lines are lost.
pub fn init() -> WorkerGuard {
    let appender = tracing_appender::rolling::never(".", LOG_FILE);
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stdout_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_writer(file_writer);

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    guard
}
