//! Lane arbitration
//!
//! Picks the one lane the fixture follows this cycle. Among lanes that see a
//! target the fastest-moving one wins; on equal speed the earlier lane keeps
//! priority. A target that just appeared reports [`APPEARED_VELOCITY`] and
//! therefore wins over tracked targets in other lanes until its second sample.
//!
//! [`APPEARED_VELOCITY`]: crate::lane::APPEARED_VELOCITY

use crate::lane::LaneState;

/// Select the lane to follow, as a 0-based index into `lanes`
///
/// Returns `None` when no lane sees a target.
pub fn select(lanes: &[LaneState]) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;

    for (index, lane) in lanes.iter().enumerate() {
        let Some(speed) = lane.speed() else {
            continue;
        };
        match best {
            Some((_, best_speed)) if best_speed >= speed => {}
            _ => best = Some((index, speed)),
        }
    }

    best.map(|(index, _)| index)
}
