//! Per-lane motion tracking
//!
//! Each lane follows one distance sensor. Samples are pushed in whenever the
//! sensor reports, independently of the control loop, and the loop reads a
//! copy of the state once per cycle.
//!
//! ## Motion state
//!
//! A lane only remembers the two most recent valid samples:
//! - `last_distance` is the latest valid reading, `None` while nothing is seen
//! - `velocity` is the difference between the two latest valid readings
//!
//! The first valid reading after an absence reports [`APPEARED_VELOCITY`], so
//! a target that just showed up outranks every tracked one until its second
//! sample.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::config::LaneConfig;
use crate::error::{CoreError, Result};

/// Readings below this distance (mm) are sensor noise
pub const MIN_VALID_DISTANCE: i32 = 50;

/// Velocity reported by a target on its first valid reading
pub const APPEARED_VELOCITY: i32 = 99999;

/// Motion state of a single lane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneState {
    /// Signed distance (mm) of the lane from the fixture centerline
    pub lateral_offset: i32,
    /// Readings beyond this distance (mm) mean "no target"
    pub max_range: i32,
    /// Latest valid reading (mm)
    pub last_distance: Option<i32>,
    /// Delta (mm per sample) between the two latest valid readings
    pub velocity: i32,
}

impl LaneState {
    /// Create an empty lane
    pub fn new(lateral_offset: i32, max_range: i32) -> Self {
        Self {
            lateral_offset,
            max_range,
            last_distance: None,
            velocity: 0,
        }
    }

    /// Apply one raw distance sample
    ///
    /// Returns `true` when the sample was accepted as a detection.
    pub fn on_sample(&mut self, raw_distance: i32) -> bool {
        if raw_distance < MIN_VALID_DISTANCE || raw_distance > self.max_range {
            self.clear();
            return false;
        }

        self.velocity = match self.last_distance {
            None => APPEARED_VELOCITY,
            Some(previous) => raw_distance - previous,
        };
        self.last_distance = Some(raw_distance);
        true
    }

    /// Forget the current target
    pub fn clear(&mut self) {
        self.last_distance = None;
        self.velocity = 0;
    }

    /// Whether a target is currently seen
    pub fn is_present(&self) -> bool {
        self.last_distance.is_some()
    }

    /// Absolute velocity, `None` while absent
    pub fn speed(&self) -> Option<u32> {
        self.last_distance.map(|_| self.velocity.unsigned_abs())
    }
}

#[derive(Debug)]
struct Tracked {
    state: LaneState,
    updated_at: Option<Instant>,
}

/// Thread-safe handle to one lane
///
/// Clones share the same state. Sensor sources call [`Lane::submit`] and the
/// control loop reads with [`Lane::snapshot`].
#[derive(Debug, Clone)]
pub struct Lane {
    name: Arc<str>,
    inner: Arc<Mutex<Tracked>>,
}

impl Lane {
    /// Create a lane from its configuration
    pub fn new(config: &LaneConfig) -> Self {
        Self {
            name: Arc::from(config.name.as_str()),
            inner: Arc::new(Mutex::new(Tracked {
                state: LaneState::new(config.lateral_offset, config.max_range),
                updated_at: None,
            })),
        }
    }

    /// Lane name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Submit a raw distance sample
    pub fn submit(&self, raw_distance: i32) {
        self.submit_at(raw_distance, Instant::now());
    }

    /// Submit a raw distance sample received at `now`
    pub fn submit_at(&self, raw_distance: i32, now: Instant) {
        let mut tracked = self.inner.lock();
        let was_present = tracked.state.is_present();
        let detected = tracked.state.on_sample(raw_distance);
        tracked.updated_at = Some(now);

        match (was_present, detected) {
            (false, true) => {
                tracing::debug!("Lane {}: target appeared at {} mm", self.name, raw_distance)
            }
            (true, false) => {
                tracing::debug!("Lane {}: target lost ({} mm)", self.name, raw_distance)
            }
            _ => tracing::trace!("Lane {}: sample {} mm", self.name, raw_distance),
        }
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> LaneState {
        self.inner.lock().state
    }

    /// Drop the target if no sample arrived within `timeout`
    ///
    /// Returns `true` if the lane was expired.
    pub fn expire_if_stale(&self, now: Instant, timeout: Duration) -> bool {
        let mut tracked = self.inner.lock();
        if !tracked.state.is_present() {
            return false;
        }
        let stale = match tracked.updated_at {
            Some(at) => now.saturating_duration_since(at) > timeout,
            None => true,
        };
        if stale {
            tracked.state.clear();
            tracing::debug!(
                "Lane {}: no sample for {:?}, target expired",
                self.name,
                timeout
            );
        }
        stale
    }
}

/// Ordered collection of lanes
#[derive(Debug, Clone, Default)]
pub struct LaneSet {
    lanes: Vec<Lane>,
}

impl LaneSet {
    /// Build lanes from their configurations, in order
    pub fn new(configs: &[LaneConfig]) -> Self {
        Self {
            lanes: configs.iter().map(Lane::new).collect(),
        }
    }

    /// Resolve a lane by name, or by 1-based position
    pub fn find(&self, key: &str) -> Result<&Lane> {
        if let Some(lane) = self.lanes.iter().find(|lane| lane.name() == key) {
            return Ok(lane);
        }
        key.parse::<usize>()
            .ok()
            .and_then(|index| index.checked_sub(1))
            .and_then(|index| self.lanes.get(index))
            .ok_or_else(|| CoreError::UnknownLane(key.to_string()))
    }

    /// Lane at a 0-based position
    pub fn get(&self, index: usize) -> Option<&Lane> {
        self.lanes.get(index)
    }

    /// Copy of every lane state, in order
    pub fn snapshot(&self) -> Vec<LaneState> {
        self.lanes.iter().map(Lane::snapshot).collect()
    }

    /// Expire every lane that went silent for longer than `timeout`
    pub fn expire_stale(&self, now: Instant, timeout: Duration) {
        for lane in &self.lanes {
            lane.expire_if_stale(now, timeout);
        }
    }

    /// Iterate over the lanes
    pub fn iter(&self) -> impl Iterator<Item = &Lane> {
        self.lanes.iter()
    }

    /// Number of lanes
    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    /// Check if there are no lanes
    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lane_config(name: &str) -> LaneConfig {
        LaneConfig::new(name, 900, 13300)
    }

    #[test]
    fn test_first_sample_reports_appeared_velocity() {
        let mut state = LaneState::new(900, 13300);
        assert!(state.on_sample(5000));
        assert_eq!(state.last_distance, Some(5000));
        assert_eq!(state.velocity, APPEARED_VELOCITY);
    }

    #[test]
    fn test_velocity_between_samples() {
        let mut state = LaneState::new(900, 13300);
        state.on_sample(5000);
        state.on_sample(4800);
        assert_eq!(state.velocity, -200);
        assert_eq!(state.speed(), Some(200));
    }

    #[test]
    fn test_out_of_range_clears() {
        let mut state = LaneState::new(900, 13300);
        state.on_sample(5000);
        assert!(!state.on_sample(49));
        assert!(!state.is_present());
        assert_eq!(state.speed(), None);

        state.on_sample(5000);
        assert!(!state.on_sample(13301));
        assert!(!state.is_present());
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let mut state = LaneState::new(0, 13300);
        assert!(state.on_sample(MIN_VALID_DISTANCE));
        assert!(state.on_sample(13300));
        assert_eq!(state.velocity, 13300 - MIN_VALID_DISTANCE);
    }

    #[test]
    fn test_reappearing_target_resets_velocity() {
        let mut state = LaneState::new(0, 13300);
        state.on_sample(3000);
        state.on_sample(3100);
        state.on_sample(20);
        state.on_sample(3200);
        assert_eq!(state.velocity, APPEARED_VELOCITY);
    }

    #[test]
    fn test_lane_handle_shares_state() {
        let lane = Lane::new(&lane_config("dist1"));
        let reader = lane.clone();
        lane.submit(4000);
        assert_eq!(reader.snapshot().last_distance, Some(4000));
    }

    #[test]
    fn test_expire_if_stale() {
        let lane = Lane::new(&lane_config("dist1"));
        let start = Instant::now();
        lane.submit_at(4000, start);

        let timeout = Duration::from_millis(500);
        assert!(!lane.expire_if_stale(start + Duration::from_millis(400), timeout));
        assert!(lane.snapshot().is_present());

        assert!(lane.expire_if_stale(start + Duration::from_millis(600), timeout));
        assert!(!lane.snapshot().is_present());
    }

    #[test]
    fn test_lane_set_find() {
        let set = LaneSet::new(&[lane_config("dist1"), lane_config("dist2")]);
        assert_eq!(set.find("dist2").map(Lane::name), Ok("dist2"));
        assert_eq!(set.find("1").map(Lane::name), Ok("dist1"));
        assert!(matches!(set.find("0"), Err(CoreError::UnknownLane(_))));
        assert!(matches!(set.find("3"), Err(CoreError::UnknownLane(_))));
        assert!(matches!(set.find("nope"), Err(CoreError::UnknownLane(_))));
    }
}
