//! DMX512 frame for the followed moving head
//!
//! The frame is the start code followed by the fixture channels, written out
//! after every break. Layout (byte offsets, 0 is the start code):
//!
//! | Offset | Content                                |
//! |--------|----------------------------------------|
//! | 1, 2   | pan, high byte then low byte           |
//! | 3, 4   | tilt, high byte then low byte          |
//! | 8..=10 | red, green, blue                       |
//! | 11     | color mode (64 while lit)              |
//! | 12, 13 | color aux, always 0                    |
//!
//! Every other byte keeps the profile default set at construction.

use dmxtrack_core::PanTilt;

use super::fixtures::FixtureProfile;

/// Bytes per frame, start code included
pub const FRAME_LEN: usize = 21;

const PAN: usize = 1;
const TILT: usize = 3;
const COLOR: usize = 8;
const COLOR_BLOCK_LEN: usize = 6;

/// Color mode byte while the head is lit
pub const COLOR_MODE_LIT: u8 = 64;

/// One universe worth of channel data for the fixture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DmxFrame {
    data: [u8; FRAME_LEN],
}

impl Default for DmxFrame {
    fn default() -> Self {
        Self::from_profile(&FixtureProfile::tmh46_18ch())
    }
}

impl DmxFrame {
    /// Lay out the profile defaults after a zero start code
    pub fn from_profile(profile: &FixtureProfile) -> Self {
        let mut data = [0u8; FRAME_LEN];
        for (slot, value) in data[1..].iter_mut().zip(profile.default_values()) {
            *slot = value;
        }
        Self { data }
    }

    /// Write pan, tilt and color
    ///
    /// `hue` of `None` blacks out the color block. Hues wrap modulo 256.
    pub fn encode(&mut self, pan: i32, tilt: i32, hue: Option<u16>) {
        write_coarse_fine(&mut self.data[PAN..PAN + 2], pan);
        write_coarse_fine(&mut self.data[TILT..TILT + 2], tilt);

        let color = &mut self.data[COLOR..COLOR + COLOR_BLOCK_LEN];
        match hue {
            None => color.fill(0),
            Some(hue) => {
                let hue = u32::from(hue);
                color.copy_from_slice(&[
                    hue2rgb(hue + 85),
                    hue2rgb(hue),
                    hue2rgb(hue + 170),
                    COLOR_MODE_LIT,
                    0,
                    0,
                ]);
            }
        }
    }

    /// Write an aim and color
    pub fn encode_aim(&mut self, aim: PanTilt, hue: Option<u16>) {
        self.encode(aim.pan, aim.tilt, hue);
    }

    /// Park the head with the light off
    pub fn blackout(&mut self, parked: PanTilt) {
        self.encode_aim(parked, None);
    }

    /// Bytes to put on the wire
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Channel values without the start code
    pub fn channels(&self) -> &[u8] {
        &self.data[1..]
    }

    pub fn pan(&self) -> u16 {
        u16::from_be_bytes([self.data[PAN], self.data[PAN + 1]])
    }

    pub fn tilt(&self) -> u16 {
        u16::from_be_bytes([self.data[TILT], self.data[TILT + 1]])
    }

    /// Red, green and blue bytes
    pub fn rgb(&self) -> [u8; 3] {
        [self.data[COLOR], self.data[COLOR + 1], self.data[COLOR + 2]]
    }
}

fn write_coarse_fine(slot: &mut [u8], value: i32) {
    slot[0] = ((value >> 8) & 0xFF) as u8;
    slot[1] = (value & 0xFF) as u8;
}

/// One color channel of the hue wheel
///
/// A triangular wave over the 256-step wheel: 1 for the lower third, a ramp
/// up, a plateau at 255, a ramp down. The floor is 1 rather than 0 because the
/// fixture treats 0 as "channel off".
pub fn hue2rgb(h: u32) -> u8 {
    let mut h = h & 0xFF;
    if h >= 170 {
        return 1;
    }
    if h > 42 {
        if h <= 127 {
            return 255;
        }
        h = 170 - h;
    }
    (254 * 6 * h / 255 + 1) as u8
}
