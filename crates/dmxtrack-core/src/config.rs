//! Runtime configuration
//!
//! Defaults reproduce the reference installation: two lanes 0.9 m and 0.8 m
//! either side of a head hung 2.7 m high, 7 m from the sensors.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::geometry::FixtureGeometry;
use crate::lane::MIN_VALID_DISTANCE;

/// Hue used while following a target unless a lane overrides it
pub const DEFAULT_TRACKING_HUE: u16 = 270;

/// Upper bound on the frame rate
pub const MAX_REFRESH_HZ: u32 = 1000;

/// Geometry of one detection lane
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneConfig {
    /// Sensor name, also used in OSC addresses
    pub name: String,
    /// Signed distance (mm) from the fixture centerline
    pub lateral_offset: i32,
    /// Readings beyond this (mm) mean "no target"
    pub max_range: i32,
    /// Hue used while this lane is followed
    #[serde(default)]
    pub hue: Option<u16>,
}

impl LaneConfig {
    /// Create a lane configuration without a hue override
    pub fn new(name: impl Into<String>, lateral_offset: i32, max_range: i32) -> Self {
        Self {
            name: name.into(),
            lateral_offset,
            max_range,
            hue: None,
        }
    }

    /// Set the hue override
    pub fn with_hue(mut self, hue: u16) -> Self {
        self.hue = Some(hue);
        self
    }
}

/// Parses `NAME:OFFSET:MAX_RANGE[:HUE]`
impl FromStr for LaneConfig {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        if !(3..=4).contains(&parts.len()) {
            return Err(CoreError::InvalidConfig(format!(
                "lane must be NAME:OFFSET:MAX_RANGE[:HUE], got '{}'",
                s
            )));
        }

        let number = |field: &str, value: &str| {
            value.trim().parse::<i32>().map_err(|_| {
                CoreError::InvalidConfig(format!("lane {}: invalid {} '{}'", parts[0], field, value))
            })
        };

        let mut lane = LaneConfig::new(
            parts[0].trim(),
            number("offset", parts[1])?,
            number("max range", parts[2])?,
        );
        if let Some(hue) = parts.get(3) {
            let hue = hue.trim().parse::<u16>().map_err(|_| {
                CoreError::InvalidConfig(format!("lane {}: invalid hue '{}'", parts[0], hue))
            })?;
            lane.hue = Some(hue);
        }
        Ok(lane)
    }
}

impl fmt::Display for LaneConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.name, self.lateral_offset, self.max_range)?;
        if let Some(hue) = self.hue {
            write!(f, ":{}", hue)?;
        }
        Ok(())
    }
}

/// Complete tracker configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Lanes in priority order
    pub lanes: Vec<LaneConfig>,
    /// Fixture mounting
    pub fixture: FixtureGeometry,
    /// Hue while following a target (wrapped to 0-255)
    #[serde(default = "default_tracking_hue")]
    pub tracking_hue: u16,
    /// Frames per second
    #[serde(default = "default_refresh_hz")]
    pub refresh_hz: u32,
    /// Break length before each frame (ms)
    #[serde(default = "default_break_ms")]
    pub break_ms: u64,
    /// Extra attempts after a failed frame write
    #[serde(default)]
    pub write_retries: u32,
    /// Drop a target after this long without samples (ms)
    #[serde(default)]
    pub stale_after_ms: Option<u64>,
    /// Send a blackout frame on shutdown
    #[serde(default)]
    pub blackout_on_exit: bool,
}

fn default_tracking_hue() -> u16 {
    DEFAULT_TRACKING_HUE
}

fn default_refresh_hz() -> u32 {
    50
}

fn default_break_ms() -> u64 {
    1
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            lanes: vec![
                LaneConfig::new("dist1", 900, 13300),
                LaneConfig::new("dist2", -800, 12500),
            ],
            fixture: FixtureGeometry::default(),
            tracking_hue: default_tracking_hue(),
            refresh_hz: default_refresh_hz(),
            break_ms: default_break_ms(),
            write_retries: 0,
            stale_after_ms: None,
            blackout_on_exit: false,
        }
    }
}

impl TrackerConfig {
    /// Check the configuration for values the tracker cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.lanes.is_empty() {
            return Err(CoreError::InvalidConfig("at least one lane is required".to_string()));
        }

        let mut names = HashSet::new();
        for lane in &self.lanes {
            if lane.name.is_empty() {
                return Err(CoreError::InvalidConfig("lane name is empty".to_string()));
            }
            if lane.name.contains('/') || lane.name.chars().any(char::is_control) {
                return Err(CoreError::InvalidConfig(format!(
                    "lane name '{}' contains invalid characters",
                    lane.name
                )));
            }
            if !names.insert(lane.name.as_str()) {
                return Err(CoreError::InvalidConfig(format!(
                    "duplicate lane name '{}'",
                    lane.name
                )));
            }
            if lane.max_range < MIN_VALID_DISTANCE {
                return Err(CoreError::InvalidConfig(format!(
                    "lane {}: max range {} mm is below the {} mm sensing minimum",
                    lane.name, lane.max_range, MIN_VALID_DISTANCE
                )));
            }
        }

        if self.fixture.height < 0 || self.fixture.standoff < 0 {
            return Err(CoreError::InvalidConfig(
                "fixture height and standoff must not be negative".to_string(),
            ));
        }

        if self.refresh_hz == 0 || self.refresh_hz > MAX_REFRESH_HZ {
            return Err(CoreError::InvalidConfig(format!(
                "refresh rate must be 1-{} Hz, got {}",
                MAX_REFRESH_HZ, self.refresh_hz
            )));
        }

        if self.stale_after_ms == Some(0) {
            return Err(CoreError::InvalidConfig(
                "stale timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Hue for the lane at `index`
    pub fn hue_for(&self, index: usize) -> u16 {
        self.lanes
            .get(index)
            .and_then(|lane| lane.hue)
            .unwrap_or(self.tracking_hue)
    }

    /// Time between frames
    pub fn cycle_period(&self) -> Duration {
        Duration::from_micros(1_000_000 / u64::from(self.refresh_hz.max(1)))
    }

    /// Break length before each frame
    pub fn break_duration(&self) -> Duration {
        Duration::from_millis(self.break_ms)
    }

    /// Silence after which a target is dropped, if enabled
    pub fn stale_timeout(&self) -> Option<Duration> {
        self.stale_after_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TrackerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.lanes.len(), 2);
        assert_eq!(config.lanes[0], LaneConfig::new("dist1", 900, 13300));
        assert_eq!(config.lanes[1], LaneConfig::new("dist2", -800, 12500));
        assert_eq!(config.fixture, FixtureGeometry::new(2700, 7000));
        assert_eq!(config.cycle_period(), Duration::from_millis(20));
        assert_eq!(config.stale_timeout(), None);
    }

    #[test]
    fn test_lane_from_str() {
        let lane: LaneConfig = "dist1:900:13300".parse().unwrap();
        assert_eq!(lane, LaneConfig::new("dist1", 900, 13300));

        let lane: LaneConfig = "dist2:-800:12500:120".parse().unwrap();
        assert_eq!(lane.hue, Some(120));
        assert_eq!(lane.to_string(), "dist2:-800:12500:120");

        assert!("dist1:900".parse::<LaneConfig>().is_err());
        assert!("dist1:abc:13300".parse::<LaneConfig>().is_err());
        assert!("dist1:900:13300:-1".parse::<LaneConfig>().is_err());
    }

    #[test]
    fn test_hue_for() {
        let mut config = TrackerConfig::default();
        config.lanes[1] = config.lanes[1].clone().with_hue(40);
        assert_eq!(config.hue_for(0), DEFAULT_TRACKING_HUE);
        assert_eq!(config.hue_for(1), 40);
    }

    #[test]
    fn test_config_serialization() {
        let mut config = TrackerConfig::default();
        config.stale_after_ms = Some(2000);
        config.lanes[0].hue = Some(12);

        let json = serde_json::to_string(&config).expect("Failed to serialize TrackerConfig");
        let deserialized: TrackerConfig =
            serde_json::from_str(&json).expect("Failed to deserialize TrackerConfig");
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_config_field_defaults() {
        let json = r#"{
            "lanes": [{ "name": "dist1", "lateral_offset": 900, "max_range": 13300 }],
            "fixture": { "height": 2700, "standoff": 7000 }
        }"#;
        let config: TrackerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.tracking_hue, DEFAULT_TRACKING_HUE);
        assert_eq!(config.refresh_hz, 50);
        assert_eq!(config.break_ms, 1);
        assert_eq!(config.lanes[0].hue, None);
        assert!(!config.blackout_on_exit);
    }

    #[test]
    fn test_validate_rejects() {
        let mut config = TrackerConfig::default();
        config.lanes.clear();
        assert!(config.validate().is_err());

        let mut config = TrackerConfig::default();
        config.lanes[1].name = "dist1".to_string();
        assert!(config.validate().is_err());

        let mut config = TrackerConfig::default();
        config.lanes[0].max_range = 10;
        assert!(config.validate().is_err());

        let mut config = TrackerConfig::default();
        config.refresh_hz = 0;
        assert!(config.validate().is_err());

        let mut config = TrackerConfig::default();
        config.fixture.height = -1;
        assert!(config.validate().is_err());

        let mut config = TrackerConfig::default();
        config.lanes[0].name = "a/b".to_string();
        assert!(config.validate().is_err());
    }
}
