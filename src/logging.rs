//! Tracing initialization for embedders.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LOG_ENV_VAR;

/// Initialize tracing with the `GLANCE_LOG` environment variable.
///
/// Defaults to "info" level if `GLANCE_LOG` is not set. Call at most once
/// per process; embedders with their own subscriber should skip this and
/// let engine spans flow into it.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env(LOG_ENV_VAR)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
