use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming a log file prefix.
pub const LOG_FILE_ENV: &str = "FOODHUB_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Initialize tracing.
///
/// Logs go to stderr unless `FOODHUB_LOG` is set, in which case they go to
/// `{path}.{timestamp}.{pid}` so concurrent runs never share a file.
/// `RUST_LOG` overrides the default `warn` filter.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let Some(log_path) = std::env::var(LOG_FILE_ENV).ok().filter(|p| !p.is_empty()) else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_timer(UtcTime::rfc_3339())
            .init();
        return;
    };

    let unique_path = unique_log_path(&log_path);
    let Ok(file) = std::fs::File::create(&unique_path) else {
        eprintln!("Warning: Failed to create log file: {}", unique_path);
        return;
    };

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_timer(UtcTime::rfc_3339());

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();
}

fn unique_log_path(prefix: &str) -> String {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("{}.{}.{}", prefix, timestamp, std::process::id())
}
