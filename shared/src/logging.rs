//! Shared logging setup for consistent tracing across processes

use tracing_subscriber::EnvFilter;

/// Initialize the stdout tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the given base level is applied to
/// the workspace crates while HTTP plumbing stays at `warn`.
pub fn init_tracing(log_level: Option<&str>) {
    let base_level = log_level.unwrap_or("info");
    let default_filter = format!(
        "leads={base_level},shared={base_level},webserver={base_level},tower_http=warn,axum=warn"
    );

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}
