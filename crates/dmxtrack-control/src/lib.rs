//! DmxTrack Control - Fixture Output and Sensor Input
//!
//! This crate connects the tracking core to the outside world:
//! - **DMX**: frame layout and hue wheel for the moving head
//! - **Transports**: RS-485 serial, Art-Net, dry run
//! - **OSC**: distance samples pushed in over UDP
//! - **Control loop**: fixed-rate arbitration, aiming and output
//!
//! ## Feature Flags
//!
//! - `serial`: RS-485 output through `serialport` (default)
//!
//! ## Quick Start
//!
//! ```rust
//! use dmxtrack_control::{ControlLoop, NullTransport};
//! use dmxtrack_core::{LaneSet, TrackerConfig};
//!
//! # fn main() -> dmxtrack_control::Result<()> {
//! let config = TrackerConfig::default();
//! let lanes = LaneSet::new(&config.lanes);
//! let mut tracker = ControlLoop::new(config, lanes.clone(), NullTransport::new())?;
//!
//! lanes.find("dist1")?.submit(7000);
//! let report = tracker.cycle()?;
//! assert_eq!(report.selected, Some(0));
//! assert_eq!(report.aim.pan, 32700);
//! # Ok(())
//! # }
//! ```

#![allow(missing_docs)]

/// DMX frame and fixture profile
pub mod dmx;
/// Error types
pub mod error;
/// OSC sensor input
pub mod osc;
/// Terminal status readout
pub mod status;
/// Control loop
pub mod tracker;
/// DMX transports
pub mod transport;

pub use dmx::{DmxFrame, FixtureProfile};
pub use error::{ControlError, Result};
pub use osc::OscSensorServer;
pub use status::StatusLine;
pub use tracker::{ControlLoop, CycleReport};
pub use transport::{ArtNetTransport, DmxTransport, NullTransport};

#[cfg(feature = "serial")]
pub use transport::SerialTransport;
