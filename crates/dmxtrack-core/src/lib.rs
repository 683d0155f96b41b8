//! DmxTrack Core - Lane Tracking and Aiming
//!
//! This crate contains the hardware-independent part of the tracker:
//! - Per-lane motion state from raw distance samples
//! - Arbitration between lanes that see a target
//! - Pan/tilt geometry for a fixture mounted beside the lanes
//! - Runtime configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use dmxtrack_core::{arbiter, LaneSet, TrackerConfig};
//!
//! let config = TrackerConfig::default();
//! let lanes = LaneSet::new(&config.lanes);
//!
//! lanes.find("dist2")?.submit(4000);
//!
//! let states = lanes.snapshot();
//! let selected = arbiter::select(&states);
//! assert_eq!(selected, Some(1));
//!
//! let aim = config.fixture.point_to(selected.map(|i| &states[i]));
//! assert!(aim.pan >= 21800);
//! # Ok::<(), dmxtrack_core::CoreError>(())
//! ```

#![warn(missing_docs)]

pub mod arbiter;
pub mod config;
pub mod error;
pub mod geometry;
pub mod lane;

pub use config::{LaneConfig, TrackerConfig, DEFAULT_TRACKING_HUE};
pub use error::{CoreError, Result};
pub use geometry::{FixtureGeometry, PanTilt};
pub use lane::{Lane, LaneSet, LaneState};
