use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// RUST_LOG wins over the built-in directives
fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

// Covers the library and every binary target.
fn cli_directives(verbose: bool) -> &'static str {
    if verbose {
        "news_analyzer=debug,news_dashboard=debug,news_api=debug,info"
    } else {
        "news_analyzer=info,news_dashboard=info,news_api=info,warn"
    }
}

/// Human-readable logs for the CLI and dashboard.
pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(cli_directives(verbose)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// One JSON object per line. `level` (e.g. "debug") overrides the crate's
/// default of `info`.
pub fn init_server_logger(level: Option<&str>) {
    let directives = format!(
        "news_analyzer={lvl},news_api={lvl}",
        lvl = level.unwrap_or("info")
    );

    tracing_subscriber::registry()
        .with(env_filter(&directives))
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_target(true),
        )
        .init();
}
