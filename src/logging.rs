//! Tracing setup.
//!
//! Logs go to stderr so stdout carries only the report.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber. `RUST_LOG` (also read from `.env`) wins over `verbose`.
pub fn init(verbose: bool) {
    dotenvy::dotenv().ok();

    let default = if verbose { "tensile_curves=debug" } else { "tensile_curves=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into());

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
