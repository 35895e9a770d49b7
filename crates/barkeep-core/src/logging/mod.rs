use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging with optional quiet mode.
///
/// When `quiet` is true, only error-level events are emitted.
/// When `quiet` is false, info-level and above events are emitted.
/// `RUST_LOG` directives are honored on top of the default.
pub fn init_logging(quiet: bool) {
    let filter = EnvFilter::from_default_env().add_directive(default_directive(quiet));

    // try_init: the CLI and integration tests may both attempt installation.
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(filter)
        .try_init();
}

/// Directive scoping the default level to barkeep's own crates.
fn default_directive(quiet: bool) -> Directive {
    let level = if quiet {
        LevelFilter::ERROR
    } else {
        LevelFilter::INFO
    };
    format!("barkeep={}", level)
        .parse()
        .unwrap_or_else(|_| level.into())
}
