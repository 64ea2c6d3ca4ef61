//! Error types for convergeviz
//!
//! Every failure in the crate is local and synchronous; nothing here is
//! retried automatically.

use thiserror::Error;

/// Main error type for the timeline, scene and CLI layers
#[derive(Error, Debug)]
pub enum VizError {
    /// Bad setup parameters (non-positive bound, invalid series, bad axes)
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// `advance()` called after the timeline reached its bound
    #[error("Timeline exhausted: index already at max_index {max_index}")]
    TimelineExhausted { max_index: u64 },

    /// State machine transition errors
    #[error("Invalid phase transition from {from} on {event}")]
    InvalidTransition { from: String, event: String },

    /// Configuration file errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Rendering collaborator errors
    #[error("Render error: {0}")]
    RenderError(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Generic errors with context
    #[error("Error: {0}")]
    Generic(String),
}

impl VizError {
    /// Shorthand for an `InvalidConfiguration` error
    pub fn invalid(reason: impl Into<String>) -> Self {
        VizError::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    /// Terminal, non-retryable conditions
    pub fn is_exhausted(&self) -> bool {
        matches!(self, VizError::TimelineExhausted { .. })
    }
}

/// Result type alias for convergeviz operations
pub type Result<T> = std::result::Result<T, VizError>;

/// Convert anyhow errors to VizError
impl From<anyhow::Error> for VizError {
    fn from(err: anyhow::Error) -> Self {
        VizError::Generic(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VizError::TimelineExhausted { max_index: 10 };
        assert!(err.to_string().contains("10"));
        assert!(err.is_exhausted());
    }

    #[test]
    fn test_invalid_configuration_error() {
        let err = VizError::invalid("max_index must be at least 1");
        assert!(err.to_string().contains("max_index"));
        assert!(!err.is_exhausted());
    }

    #[test]
    fn test_from_anyhow() {
        let err: VizError = anyhow::anyhow!("boom").into();
        assert!(matches!(err, VizError::Generic(_)));
    }
}
