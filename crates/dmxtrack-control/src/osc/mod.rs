//! OSC sensor input
//!
//! Distance sensors (or the hub they hang off) report each reading as an OSC
//! message:
//!
//! ```text
//! /dmxtrack/lane/{lane}/distance  <int|float millimeters>
//! ```
//!
//! `{lane}` is the lane name or its 1-based position. Bundles are unpacked.
//! Samples for the same lane are applied in arrival order; the listener is a
//! single task so no two samples for a lane ever overlap.

pub mod address;
pub mod server;
pub mod types;

pub use address::{lane_distance_address, parse_osc_address};
pub use server::{apply_packet, handle_datagram, OscSensorServer};
pub use types::osc_to_distance;
