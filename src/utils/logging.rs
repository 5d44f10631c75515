use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

/// Installs the global subscriber: stdout plus a daily rolling file under `config.log_dir`.
///
/// The returned guard flushes the file writer on drop; keep it alive for the whole run.
pub fn init_tracing(config: &Config, file_name: &str) -> WorkerGuard {
    let file_appender = tracing_appender::rolling::daily(&config.log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    guard
}
