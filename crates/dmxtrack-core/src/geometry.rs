//! Pan/tilt geometry
//!
//! Converts a lane target into fixture-native pan and tilt values.
//!
//! ## Coordinate frame
//!
//! The fixture hangs `height` mm above the plane holding the lanes, `standoff`
//! mm along the lanes from the sensors. Sensors measure the distance of the
//! target from their own end of the lane, so the target sits
//! `standoff - distance` mm in front of the fixture (negative once it has
//! passed underneath) and `lateral_offset` mm to the side.
//!
//! ## Units
//!
//! - Pan: [`PAN_HALF_TURN`] units per half turn, centered on [`PAN_HALF_TURN`].
//!   Values below the center are moved forward by a full turn
//!   ([`PAN_WRAP`]) so the head stays in its forward-facing range. A value of
//!   exactly [`PAN_HALF_TURN`] is left as is.
//! - Tilt: [`TILT_FULL_SCALE`] units per half turn.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::lane::LaneState;

/// Pan units per half turn (also the pan center)
pub const PAN_HALF_TURN: i32 = 21800;

/// Added to pan values below the center
pub const PAN_WRAP: i32 = 2 * PAN_HALF_TURN;

/// Tilt units per half turn
pub const TILT_FULL_SCALE: f64 = 65535.0;

/// Pan and tilt in fixture units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PanTilt {
    /// Horizontal axis
    pub pan: i32,
    /// Vertical axis
    pub tilt: i32,
}

/// Mounting position of the fixture relative to the lanes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureGeometry {
    /// Height (mm) above the lane plane
    pub height: i32,
    /// Distance (mm) from the sensors along the lanes
    pub standoff: i32,
}

impl Default for FixtureGeometry {
    fn default() -> Self {
        Self {
            height: 2700,
            standoff: 7000,
        }
    }
}

impl FixtureGeometry {
    /// Create a fixture mounting
    pub fn new(height: i32, standoff: i32) -> Self {
        Self { height, standoff }
    }

    /// Aim at the target of `lane`, or park when there is none
    pub fn point_to(&self, lane: Option<&LaneState>) -> PanTilt {
        let aim = lane.and_then(|lane| {
            lane.last_distance
                .map(|distance| self.aim(lane.lateral_offset, distance))
        });
        let PanTilt { mut pan, tilt } = aim.unwrap_or_default();

        if pan < PAN_HALF_TURN {
            pan += PAN_WRAP;
        }
        PanTilt { pan, tilt }
    }

    /// Raw angles before the forward wrap
    fn aim(&self, lateral_offset: i32, distance: i32) -> PanTilt {
        let shift = f64::from(lateral_offset);
        let dist = f64::from(self.standoff) - f64::from(distance);
        let height = f64::from(self.height);

        let hypotenuse = (shift * shift + dist * dist + height * height).sqrt();
        let half_turn = f64::from(PAN_HALF_TURN);
        let pan = shift.atan2(dist) * half_turn / PI + half_turn;
        let tilt = if hypotenuse > 0.0 {
            (height / hypotenuse).asin() * TILT_FULL_SCALE / PI
        } else {
            0.0
        };

        PanTilt {
            pan: pan.round() as i32,
            tilt: tilt.round() as i32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lane_at(lateral_offset: i32, distance: i32) -> LaneState {
        LaneState {
            lateral_offset,
            max_range: 13300,
            last_distance: Some(distance),
            velocity: 0,
        }
    }

    #[test]
    fn test_neutral_pose() {
        let geometry = FixtureGeometry::default();
        assert_eq!(
            geometry.point_to(None),
            PanTilt {
                pan: PAN_WRAP,
                tilt: 0
            }
        );
    }

    #[test]
    fn test_absent_lane_parks() {
        let geometry = FixtureGeometry::default();
        let lane = LaneState::new(900, 13300);
        assert_eq!(geometry.point_to(Some(&lane)), geometry.point_to(None));
    }

    #[test]
    fn test_target_abreast_of_fixture() {
        let geometry = FixtureGeometry::new(2700, 7000);
        let aim = geometry.point_to(Some(&lane_at(900, 7000)));
        assert_eq!(aim.pan, 32700);
        assert_eq!(aim.tilt, 26056);
    }

    #[test]
    fn test_centerline_does_not_wrap() {
        let geometry = FixtureGeometry::new(2700, 7000);
        let aim = geometry.point_to(Some(&lane_at(0, 4000)));
        assert_eq!(aim.pan, PAN_HALF_TURN);
    }

    #[test]
    fn test_negative_offset_wraps() {
        let geometry = FixtureGeometry::new(2700, 7000);
        let aim = geometry.point_to(Some(&lane_at(-800, 4000)));
        assert_eq!(aim.pan, 19992 + PAN_WRAP);
        assert_eq!(aim.tilt, 14931);
    }

    #[test]
    fn test_degenerate_geometry() {
        let geometry = FixtureGeometry::new(0, 7000);
        let aim = geometry.point_to(Some(&lane_at(0, 7000)));
        assert_eq!(aim.tilt, 0);
    }
}
