//! Error types for the whiteboard core.

use thiserror::Error;

/// Errors raised by the core.
///
/// Hit-test misses, history bounds and zero-extent strokes are not errors;
/// they are represented as `None`, no-ops and clamped scales respectively.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A shape kind or tool name outside the known set.
    #[error("Invalid kind: {0}")]
    InvalidKind(String),
    /// Configuration could not be parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
    /// Configuration parsed but holds values the camera or hit-tester cannot use.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
