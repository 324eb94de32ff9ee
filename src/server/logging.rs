//! Tracing subscriber setup.
//!
//! Console output is human readable in development and test, JSON in production.
//! `RUST_LOG` overrides the per-environment default filter.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::server::config::Environment;

/// Installs the global tracing subscriber.
///
/// Safe to call more than once; later calls leave the existing subscriber in place.
pub fn init(environment: Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(environment.default_log_filter()));

    let layer = match environment {
        Environment::Production => fmt::layer()
            .with_target(true)
            .json()
            .with_filter(filter)
            .boxed(),
        Environment::Development | Environment::Test => fmt::layer()
            .with_target(true)
            .with_ansi(true)
            .with_filter(filter)
            .boxed(),
    };

    if tracing_subscriber::registry().with(layer).try_init().is_err() {
        tracing::debug!("Global tracing subscriber already initialized");
    }
}
