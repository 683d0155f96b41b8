//! Error types for the control side
use dmxtrack_core::CoreError;
use thiserror::Error;

/// Control errors
#[derive(Error, Debug)]
pub enum ControlError {
    /// The DMX transport failed to send a break or a frame
    #[error("Transport error: {0}")]
    Transport(String),

    /// Serial port error
    #[error("Serial port error: {0}")]
    #[cfg(feature = "serial")]
    SerialPort(#[from] serialport::Error),

    /// OSC decoding error
    #[error("OSC error: {0}")]
    Osc(String),

    /// Invalid message format
    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    /// Tracking core error
    #[error(transparent)]
    Core(#[from] CoreError),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ControlError {
    /// Create a transport error from anything printable
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }

    /// Whether the error came from the DMX transport
    pub fn is_transport(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            #[cfg(feature = "serial")]
            Self::SerialPort(_) => true,
            _ => false,
        }
    }
}

/// Result type for control operations
pub type Result<T> = std::result::Result<T, ControlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ControlError::transport("port closed");
        assert_eq!(err.to_string(), "Transport error: port closed");
        assert!(err.is_transport());
    }

    #[test]
    fn test_core_error_is_transparent() {
        let err: ControlError = CoreError::UnknownLane("dist9".to_string()).into();
        assert_eq!(err.to_string(), "Unknown lane: dist9");
        assert!(!err.is_transport());
    }
}
