//! RS-485 serial output
//!
//! DMX512 runs at 250 kbaud with 8 data bits, no parity and 2 stop bits. The
//! break is produced by holding the line low for the requested duration.

use std::io::Write;
use std::time::Duration;

use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};

use super::DmxTransport;
use crate::{error::ControlError, Result};

/// DMX512 line rate
pub const DMX_BAUD_RATE: u32 = 250_000;

/// Serial DMX sender
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
    path: String,
}

impl SerialTransport {
    /// Open and configure the serial device at `path`
    pub fn open(path: &str) -> Result<Self> {
        let port = serialport::new(path, DMX_BAUD_RATE)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::Two)
            .flow_control(FlowControl::None)
            .timeout(Duration::from_millis(100))
            .open()?;

        tracing::info!("Serial DMX output opened on {} (250000 8N2)", path);

        Ok(Self {
            port,
            path: path.to_string(),
        })
    }

    /// Device path
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl DmxTransport for SerialTransport {
    fn send_break(&mut self, duration: Duration) -> Result<()> {
        self.port.set_break()?;
        std::thread::sleep(duration);
        self.port.clear_break()?;
        Ok(())
    }

    fn write_frame(&mut self, frame: &[u8]) -> Result<()> {
        self.port.write_all(frame).map_err(|e| {
            ControlError::Transport(format!("write to {} failed: {}", self.path, e))
        })?;
        self.port.flush().map_err(|e| {
            ControlError::Transport(format!("flush of {} failed: {}", self.path, e))
        })?;
        Ok(())
    }
}
