//! Diagnostic output for the binary. This is separate from the persisted
//! error log, which stores are responsible for.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

const APP_TARGET: &str = env!("CARGO_CRATE_NAME");

/// Quiet unless asked; store failures already land in the error log.
fn app_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::OFF
    }
}

fn app_targets(verbose: bool) -> Targets {
    Targets::new().with_target(APP_TARGET, app_level(verbose))
}

/// `RUST_LOG` wins over the `--verbose` flag.
fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(app_level(verbose).to_string()))
}

pub fn init_logging(verbose: bool) {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(app_targets(verbose))
        .with(env_filter(verbose))
        .init();
}
