//! DMX output
//!
//! This module builds the DMX512 frame that steers the moving head.
//!
//! ## Frame
//!
//! The frame starts from the fixture profile defaults and only pan, tilt and
//! the color block change while tracking:
//! - Pan and tilt are 16-bit values split into coarse and fine channels
//! - Color comes from a 256-step hue wheel, three phase-shifted ramps
//! - No hue means the color block is zeroed (light off)
//!
//! ## Example Usage
//!
//! ```rust
//! use dmxtrack_control::dmx::{DmxFrame, FixtureProfile};
//!
//! let mut frame = DmxFrame::from_profile(&FixtureProfile::tmh46_18ch());
//! frame.encode(32700, 26056, Some(270));
//!
//! assert_eq!(frame.pan(), 32700);
//! assert_eq!(frame.rgb(), [255, 84, 1]);
//! ```

pub mod fixtures;
pub mod frame;

pub use fixtures::{ChannelType, FixtureChannel, FixtureProfile};
pub use frame::{hue2rgb, DmxFrame, FRAME_LEN};
