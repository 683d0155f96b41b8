//! Error types for the tracking core
use thiserror::Error;

/// Tracking core errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// No lane matches the given name or index
    #[error("Unknown lane: {0}")]
    UnknownLane(String),
}

/// Result type for tracking core operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::UnknownLane("dist3".to_string());
        assert_eq!(err.to_string(), "Unknown lane: dist3");

        let err = CoreError::InvalidConfig("no lanes".to_string());
        assert!(err.to_string().contains("no lanes"));
    }
}
