use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use dmxtrack_core::{FixtureGeometry, LaneConfig, TrackerConfig, DEFAULT_TRACKING_HUE};
use tracing::level_filters::LevelFilter;

/// Where DMX frames go
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// RS-485 serial adapter, 250 kbaud 8N2
    Serial,
    /// Art-Net node over UDP
    Artnet,
    /// Discard frames
    Null,
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Detection lane as NAME:OFFSET:MAX_RANGE[:HUE], millimeters.  Repeat
    /// for each lane, in priority order.  OFFSET is the signed distance of
    /// the lane from the fixture centerline.
    #[arg(
        long = "lane",
        env = "DMXTRACK_LANES",
        value_delimiter = ',',
        default_values = ["dist1:900:13300", "dist2:-800:12500"]
    )]
    pub lanes: Vec<LaneConfig>,

    /// Fixture height above the lanes, in millimeters
    #[arg(long, env = "DMXTRACK_FIXTURE_HEIGHT", default_value = "2700")]
    pub fixture_height: i32,

    /// Fixture distance from the sensors along the lanes, in millimeters
    #[arg(long, env = "DMXTRACK_FIXTURE_STANDOFF", default_value = "7000")]
    pub fixture_standoff: i32,

    /// Hue (0-255, wraps) while following a target
    #[arg(long, env = "DMXTRACK_HUE", default_value_t = DEFAULT_TRACKING_HUE)]
    pub hue: u16,

    /// DMX frames per second
    #[arg(long, env = "DMXTRACK_REFRESH_HZ", default_value = "50")]
    pub refresh_hz: u32,

    /// Break length before each frame, in milliseconds
    #[arg(long, env = "DMXTRACK_BREAK_MS", default_value = "1")]
    pub break_ms: u64,

    /// Extra attempts after a failed frame write before giving up
    #[arg(long, env = "DMXTRACK_WRITE_RETRIES", default_value = "0")]
    pub write_retries: u32,

    /// Drop a target when its sensor stays silent this long, in
    /// milliseconds.  Disabled unless set.
    #[arg(long, env = "DMXTRACK_STALE_AFTER_MS")]
    pub stale_after_ms: Option<u64>,

    /// Park the fixture with the light off when stopping
    #[arg(long, env = "DMXTRACK_BLACKOUT_ON_EXIT")]
    pub blackout_on_exit: bool,

    /// DMX output
    #[arg(long, env = "DMXTRACK_TRANSPORT", value_enum, default_value = "serial")]
    pub transport: TransportKind,

    /// Serial device of the RS-485 adapter
    #[arg(long, env = "DMXTRACK_SERIAL_PORT", default_value = "/dev/ttyUSB0")]
    pub serial_port: String,

    /// Art-Net node or broadcast address
    #[arg(long, env = "DMXTRACK_ARTNET_TARGET", default_value = "255.255.255.255:6454")]
    pub artnet_target: String,

    /// Art-Net universe
    #[arg(long, env = "DMXTRACK_ARTNET_UNIVERSE", default_value = "0")]
    pub artnet_universe: u16,

    /// UDP address receiving OSC distance samples
    #[arg(long, env = "DMXTRACK_OSC_LISTEN", default_value = "0.0.0.0:9000")]
    pub osc_listen: String,

    /// Do not print the lane distance line
    #[arg(long, short)]
    pub quiet: bool,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    pub print_config: bool,

    /// Log level, RUST_LOG directives take precedence
    #[arg(long, env = "DMXTRACK_LOG_LEVEL", default_value = "info")]
    pub log_level: LevelFilter,

    /// Also write logs to this file
    #[arg(long, env = "DMXTRACK_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl From<&Args> for TrackerConfig {
    fn from(args: &Args) -> Self {
        TrackerConfig {
            lanes: args.lanes.clone(),
            fixture: FixtureGeometry::new(args.fixture_height, args.fixture_standoff),
            tracking_hue: args.hue,
            refresh_hz: args.refresh_hz,
            break_ms: args.break_ms,
            write_retries: args.write_retries,
            stale_after_ms: args.stale_after_ms,
            blackout_on_exit: args.blackout_on_exit,
        }
    }
}
