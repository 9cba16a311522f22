// src/utils/logging.rs
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is not set. The PDF parsing crates are chatty about
/// malformed objects that extraction recovers from anyway.
const DEFAULT_DIRECTIVES: &str = "info,pdf_extract=warn,lopdf=warn";

/// Sets up the logging framework using tracing_subscriber.
/// Reads log level filters from the `RUST_LOG` environment variable, falling back to
/// [`DEFAULT_DIRECTIVES`]. `debug` raises this crate to debug level unless `RUST_LOG` is set.
/// Logs go to stderr so they never mix with anything written to stdout.
pub fn setup_logging(debug: bool) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(env.as_deref(), debug);

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Logging setup complete.");
}

fn build_filter(env: Option<&str>, debug: bool) -> EnvFilter {
    let mut filter = env
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES));

    if debug && env.is_none() {
        if let Ok(directive) = format!("{}=debug", env!("CARGO_CRATE_NAME")).parse() {
            filter = filter.add_directive(directive);
        }
    }
    filter
}
