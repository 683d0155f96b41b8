//! DMX transports
//!
//! A transport puts a frame on the wire. Every frame is preceded by a break
//! (the DMX reset that marks the start of a packet):
//! - [`SerialTransport`]: RS-485 line at 250 kbaud, 8N2 (feature `serial`)
//! - [`ArtNetTransport`]: ArtDmx over UDP, one packet per frame
//! - [`NullTransport`]: drops frames, for dry runs
//!
//! Failures surface as [`ControlError::Transport`](crate::ControlError::Transport)
//! (or `SerialPort` for port-level errors) and are never swallowed.

use std::time::Duration;

use crate::Result;

pub mod artnet;
#[cfg(feature = "serial")]
pub mod serial;

pub use artnet::ArtNetTransport;
#[cfg(feature = "serial")]
pub use serial::SerialTransport;

/// Output side of the control loop
///
/// Both calls are blocking and run on the control loop's task: `send_break`
/// holds the line for the whole `duration` and `write_frame` returns once the
/// frame has left the host. Keep them to roughly one frame time on the wire.
pub trait DmxTransport {
    /// Signal the start of a new packet
    fn send_break(&mut self, duration: Duration) -> Result<()>;

    /// Send a complete frame, start code included
    fn write_frame(&mut self, frame: &[u8]) -> Result<()>;
}

impl<T: DmxTransport + ?Sized> DmxTransport for Box<T> {
    fn send_break(&mut self, duration: Duration) -> Result<()> {
        (**self).send_break(duration)
    }

    fn write_frame(&mut self, frame: &[u8]) -> Result<()> {
        (**self).write_frame(frame)
    }
}

/// Transport that discards every frame
#[derive(Debug, Default)]
pub struct NullTransport {
    frames: u64,
}

impl NullTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames accepted so far
    pub fn frames_sent(&self) -> u64 {
        self.frames
    }
}

impl DmxTransport for NullTransport {
    fn send_break(&mut self, _duration: Duration) -> Result<()> {
        Ok(())
    }

    fn write_frame(&mut self, frame: &[u8]) -> Result<()> {
        self.frames += 1;
        tracing::trace!("Dropped DMX frame {} ({:?})", self.frames, frame);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_transport_counts() {
        let mut boxed = Box::new(NullTransport::new());
        assert!(DmxTransport::send_break(&mut boxed, Duration::from_millis(1)).is_ok());
        assert!(DmxTransport::write_frame(&mut boxed, &[0u8; 21]).is_ok());
        assert!(DmxTransport::write_frame(&mut boxed, &[0u8; 21]).is_ok());
        assert_eq!(boxed.frames_sent(), 2);

        let mut null = NullTransport::new();
        null.write_frame(&[0u8; 3]).unwrap();
        assert_eq!(null.frames_sent(), 1);
    }
}
