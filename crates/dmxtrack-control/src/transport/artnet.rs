//! Art-Net output (ArtDmx)
//!
//! Sends each frame as one ArtDmx packet. Art-Net has no break on the wire;
//! the receiving node generates it when it replays the packet on its DMX port.

use std::net::{SocketAddr, UdpSocket};
use std::time::Duration;

use super::DmxTransport;
use crate::{error::ControlError, Result};

/// Default Art-Net UDP port
pub const ARTNET_PORT: u16 = 6454;

const HEADER_LEN: usize = 18;
const MAX_CHANNELS: usize = 512;

/// Art-Net sender for the tracker frame
pub struct ArtNetTransport {
    socket: UdpSocket,
    target: SocketAddr,
    universe: u16,
    sequence: u8,
}

impl ArtNetTransport {
    /// Create a new Art-Net sender
    ///
    /// # Arguments
    /// * `universe` - Art-Net port-address (0-32767)
    /// * `target` - Node or broadcast address, e.g. "255.255.255.255:6454"
    pub fn new(universe: u16, target: &str) -> Result<Self> {
        let target: SocketAddr = target.parse().map_err(|e| {
            ControlError::Transport(format!("Invalid Art-Net target address '{}': {}", target, e))
        })?;

        let socket = UdpSocket::bind("0.0.0.0:0").map_err(ControlError::transport)?;
        socket.set_broadcast(true).map_err(ControlError::transport)?;

        tracing::info!("Art-Net sender created for universe {} -> {}", universe, target);

        Ok(Self {
            socket,
            target,
            universe,
            sequence: 1,
        })
    }

    /// Get the current universe
    pub fn universe(&self) -> u16 {
        self.universe
    }

    /// Build an ArtDmx packet from a frame (start code first)
    fn build_packet(&self, frame: &[u8]) -> Result<Vec<u8>> {
        let channels = frame.get(1..).unwrap_or_default();
        if channels.len() > MAX_CHANNELS {
            return Err(ControlError::Transport(format!(
                "Frame has {} channels, Art-Net carries at most {}",
                channels.len(),
                MAX_CHANNELS
            )));
        }

        // Length must be even and at least 2
        let length = (channels.len() + channels.len() % 2).max(2);
        let mut packet = vec![0u8; HEADER_LEN + length];

        // Header: "Art-Net\0"
        packet[0..8].copy_from_slice(b"Art-Net\0");

        // OpCode: OpDmx (0x5000)
        packet[8..10].copy_from_slice(&0x5000u16.to_le_bytes());

        // Protocol version (14)
        packet[10..12].copy_from_slice(&14u16.to_be_bytes());

        packet[12] = self.sequence;

        // Physical (0)
        packet[13] = 0;

        // Universe (Port-Address)
        packet[14..16].copy_from_slice(&self.universe.to_le_bytes());

        // Length (big-endian)
        packet[16..18].copy_from_slice(&(length as u16).to_be_bytes());

        packet[HEADER_LEN..HEADER_LEN + channels.len()].copy_from_slice(channels);

        Ok(packet)
    }
}

impl DmxTransport for ArtNetTransport {
    fn send_break(&mut self, _duration: Duration) -> Result<()> {
        Ok(())
    }

    fn write_frame(&mut self, frame: &[u8]) -> Result<()> {
        let packet = self.build_packet(frame)?;
        self.socket
            .send_to(&packet, self.target)
            .map_err(ControlError::transport)?;

        // Sequence 0 means "disabled", so skip it on wrap
        self.sequence = self.sequence.wrapping_add(1).max(1);

        tracing::trace!("Sent Art-Net DMX packet for universe {}", self.universe);
        Ok(())
    }
}
