use anyhow::{Context, Result, anyhow};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::uptime;

/// Environment variable holding a tracing filter, e.g. `debug` or `git_merge_pr=trace`
pub const LOG_ENV: &str = "GIT_MERGE_PR_LOG";

fn build_filter(spec: Option<&str>, verbose: bool) -> Result<EnvFilter> {
    match spec.map(str::trim).filter(|s| !s.is_empty()) {
        Some(spec) => EnvFilter::try_new(spec)
            .with_context(|| format!("Invalid {} filter '{}'", LOG_ENV, spec)),
        None => Ok(EnvFilter::new(if verbose { "debug" } else { "warn" })),
    }
}

/// Install the global subscriber. Logs go to stderr, never to a file.
///
/// Keep the returned guard alive until exit so buffered lines are flushed.
pub fn init(verbose: bool) -> Result<WorkerGuard> {
    let spec = std::env::var(LOG_ENV).ok();
    let filter = build_filter(spec.as_deref(), verbose)?;
    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_timer(uptime())
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    Ok(guard)
}
