//! Retry utilities: backoff builders and retryable error classification.
//!
//! Uses `backon` for exponential backoff with jitter around insight loads.

use std::time::Duration;

use backon::ExponentialBuilder;

use crate::config::LoaderConfig;
use crate::interfaces::LoadError;

/// Backoff for insight load retries, shaped by the loader configuration.
///
/// Jitter is always enabled.
pub fn loader_backoff(config: &LoaderConfig) -> ExponentialBuilder {
    ExponentialBuilder::default()
        .with_min_delay(Duration::from_millis(config.retry_min_delay_ms))
        .with_max_delay(Duration::from_millis(config.retry_max_delay_ms))
        .with_max_times(config.retry_max_attempts)
        .with_jitter()
}

/// Determines if a load error is retryable (backend faults only).
///
/// Non-retryable:
/// - `NotFound`: the referenced insight does not exist and a retry will
///   never produce it; this surfaces to callers as an invalid-arguments
///   failure.
pub fn is_retryable_load_error(error: &LoadError) -> bool {
    error.is_retryable()
}
