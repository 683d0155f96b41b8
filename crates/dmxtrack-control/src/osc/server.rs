//! OSC sensor listener
//!
//! Receives distance samples over UDP and pushes them into the lanes. Bad
//! packets are logged and dropped; only a socket failure ends the listener.

use std::net::SocketAddr;

use dmxtrack_core::LaneSet;
use rosc::{OscMessage, OscPacket};
use tokio::net::UdpSocket;

use super::{address::parse_osc_address, types::osc_to_distance};
use crate::{error::ControlError, Result};

/// Largest datagram accepted
const MAX_PACKET_SIZE: usize = 4096;

/// UDP listener feeding lane samples
pub struct OscSensorServer {
    socket: UdpSocket,
    lanes: LaneSet,
}

impl OscSensorServer {
    /// Bind the listener to `addr`
    pub async fn bind(addr: &str, lanes: LaneSet) -> Result<Self> {
        let socket = UdpSocket::bind(addr).await?;
        tracing::info!(
            "OSC sensor input listening on {} for {} lanes",
            socket.local_addr()?,
            lanes.len()
        );
        Ok(Self { socket, lanes })
    }

    /// Address the listener is bound to
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Receive and apply samples until the socket fails
    pub async fn run(self) -> Result<()> {
        let mut buf = vec![0u8; MAX_PACKET_SIZE];
        loop {
            let (len, from) = self.socket.recv_from(&mut buf).await?;
            if let Err(e) = handle_datagram(&self.lanes, &buf[..len]) {
                tracing::warn!("Dropped OSC packet from {}: {}", from, e);
            }
        }
    }
}

/// Decode one datagram and apply every sample it carries
///
/// Returns the number of samples applied.
pub fn handle_datagram(lanes: &LaneSet, datagram: &[u8]) -> Result<usize> {
    let (_, packet) =
        rosc::decoder::decode_udp(datagram).map_err(|e| ControlError::Osc(e.to_string()))?;
    apply_packet(lanes, &packet)
}

/// Apply the samples in a decoded packet, unpacking bundles
pub fn apply_packet(lanes: &LaneSet, packet: &OscPacket) -> Result<usize> {
    match packet {
        OscPacket::Message(message) => {
            apply_message(lanes, message)?;
            Ok(1)
        }
        OscPacket::Bundle(bundle) => {
            let mut applied = 0;
            for inner in &bundle.content {
                match apply_packet(lanes, inner) {
                    Ok(count) => applied += count,
                    Err(e) => tracing::warn!("Skipped bundle element: {}", e),
                }
            }
            Ok(applied)
        }
    }
}

fn apply_message(lanes: &LaneSet, message: &OscMessage) -> Result<()> {
    let key = parse_osc_address(&message.addr)?;
    let distance = osc_to_distance(&message.args)?;
    lanes.find(key)?.submit(distance);
    Ok(())
}
