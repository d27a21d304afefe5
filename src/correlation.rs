//! Correlation identifiers.
//!
//! Every command carries a correlation id; the terminal event for a command
//! carries the same id so callers can match responses to requests
//! asynchronously. Callers may supply their own id (validated here) or let
//! the engine generate one.

use std::sync::LazyLock;

use crate::error::EngineError;

/// Length limits for validated fields.
pub mod limits {
    /// Maximum correlation ID length.
    pub const MAX_CORRELATION_ID_LENGTH: usize = 128;
}

/// Error constants for validation failures.
pub mod errmsg {
    pub const CORRELATION_ID_EMPTY: &str = "correlation_id cannot be empty";
    pub const CORRELATION_ID_TOO_LONG: &str = "correlation_id exceeds maximum length";
    pub const CORRELATION_ID_INVALID_CHARS: &str =
        "correlation_id contains invalid characters (allowed: a-zA-Z0-9_-)";
}

/// Glance UUID namespace derived from DNS-based UUIDv5.
///
/// Used for deterministic correlation id derivation.
pub static GLANCE_UUID_NAMESPACE: LazyLock<uuid::Uuid> =
    LazyLock::new(|| uuid::Uuid::new_v5(&uuid::Uuid::NAMESPACE_DNS, b"glance.dev"));

/// Generate a fresh random correlation id.
pub fn fresh_correlation_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Derive a deterministic correlation id from opaque bytes.
///
/// The same input always yields the same id, which lets idempotent callers
/// correlate retries of the same logical command.
pub fn deterministic_correlation_id(input: &[u8]) -> String {
    uuid::Uuid::new_v5(&GLANCE_UUID_NAMESPACE, input).to_string()
}

/// Validate a caller-supplied correlation ID.
///
/// Rules:
/// - Must not be empty
/// - Maximum 128 characters
/// - May contain: letters (a-zA-Z), digits (0-9), underscore (_), hyphen (-)
pub fn validate_correlation_id(id: &str) -> Result<(), EngineError> {
    if id.is_empty() {
        return Err(EngineError::invalid_arguments(errmsg::CORRELATION_ID_EMPTY));
    }
    if id.len() > limits::MAX_CORRELATION_ID_LENGTH {
        return Err(EngineError::invalid_arguments(format!(
            "{} (max: {}, got: {})",
            errmsg::CORRELATION_ID_TOO_LONG,
            limits::MAX_CORRELATION_ID_LENGTH,
            id.len()
        )));
    }

    for ch in id.chars() {
        if !matches!(ch, 'a'..='z' | 'A'..='Z' | '0'..='9' | '_' | '-') {
            return Err(EngineError::invalid_arguments(
                errmsg::CORRELATION_ID_INVALID_CHARS,
            ));
        }
    }

    Ok(())
}
