use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines for an operator watching the terminal.
    Console,
    /// One JSON object per event, for kiosks whose output is collected.
    Json,
}

/// Filter used when `RUST_LOG` is unset. HTTP client internals stay at warn
/// so a verbose run shows the reader loop, not connection pooling.
pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "badge_reader=debug,hyper_util=warn,reqwest=warn,info"
    } else {
        "badge_reader=info,warn"
    }
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

/// Installs the global subscriber. Diagnostics go to stderr; stdout is left
/// to the per-card result lines.
pub fn init(format: LogFormat, verbose: bool) {
    let registry = tracing_subscriber::registry().with(env_filter(verbose));
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(false)
        .with_line_number(false);

    match format {
        LogFormat::Console => registry.with(layer.compact()).init(),
        LogFormat::Json => registry.with(layer.json().with_current_span(false)).init(),
    }
}
