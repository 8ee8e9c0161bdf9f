//! Logging setup: colored stderr, plus a JSON daily-rolling log file when
//! `LOG_FILE_PATH` is set.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

fn filter(env_var: &str, default: LevelFilter) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(default.into())
        .with_env_var(env_var)
        .from_env_lossy()
}

/// Splits a log file path into the directory and file name prefix used by
/// the rolling appender. Blank values disable file logging.
fn log_file_target(log_file_path: Option<&str>) -> Option<(PathBuf, OsString)> {
    let path = Path::new(log_file_path.filter(|p| !p.trim().is_empty())?);
    let file_name = path.file_name()?.to_os_string();
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
        .to_path_buf();
    Some((dir, file_name))
}

/// Installs the global subscriber.
///
/// The stderr layer honours `RUST_LOG` (default `info`). The JSON file layer
/// is only installed when `LOG_FILE_PATH` names a file; it honours
/// `RUST_LOG_JSON` (default `debug`). Keep the returned guard alive for the
/// life of the process so buffered file output is flushed.
pub fn init() -> Option<WorkerGuard> {
    let log_file_path = std::env::var("LOG_FILE_PATH").ok();

    let (json_layer, guard) = match log_file_target(log_file_path.as_deref()) {
        Some((dir, file_name)) => {
            let file_appender = tracing_appender::rolling::daily(dir, file_name);
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_writer(non_blocking_file)
                .with_filter(filter("RUST_LOG_JSON", LevelFilter::DEBUG));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(filter("RUST_LOG", LevelFilter::INFO));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    guard
}
