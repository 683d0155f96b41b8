//! Control loop
//!
//! Each cycle reads every lane, picks the one to follow, aims the head at it
//! and sends the frame:
//!
//! 1. snapshot the lanes (samples keep arriving between cycles)
//! 2. arbitrate
//! 3. convert the chosen target to pan/tilt
//! 4. encode the frame, lit with the lane hue or blacked out
//! 5. break, then write the frame
//! 6. refresh the status line
//!
//! The transport calls block for the length of one frame.

use std::future::Future;
use std::io::Write;
use std::time::Instant;

use dmxtrack_core::{arbiter, CoreError, LaneSet, PanTilt, TrackerConfig};
use tokio::time::MissedTickBehavior;

use crate::dmx::DmxFrame;
use crate::status::StatusLine;
use crate::transport::DmxTransport;
use crate::Result;

/// Outcome of one cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    /// 0-based index of the followed lane
    pub selected: Option<usize>,
    /// Aim written to the frame
    pub aim: PanTilt,
    /// Hue written to the frame, `None` when blacked out
    pub hue: Option<u16>,
    /// Last distance per lane
    pub distances: Vec<Option<i32>>,
}

/// Fixed-rate loop steering one fixture
pub struct ControlLoop<T: DmxTransport> {
    config: TrackerConfig,
    lanes: LaneSet,
    frame: DmxFrame,
    transport: T,
    status: Option<StatusLine<Box<dyn Write + Send>>>,
    selected: Option<usize>,
    frames_sent: u64,
}

impl<T: DmxTransport> ControlLoop<T> {
    /// Create a loop over `lanes`, which must follow `config.lanes`
    pub fn new(config: TrackerConfig, lanes: LaneSet, transport: T) -> Result<Self> {
        config.validate()?;
        let names_match = lanes.len() == config.lanes.len()
            && lanes
                .iter()
                .zip(&config.lanes)
                .all(|(lane, lane_config)| lane.name() == lane_config.name);
        if !names_match {
            return Err(CoreError::InvalidConfig(
                "lane set does not match the configured lanes".to_string(),
            )
            .into());
        }

        Ok(Self {
            config,
            lanes,
            frame: DmxFrame::default(),
            transport,
            status: None,
            selected: None,
            frames_sent: 0,
        })
    }

    /// Write a status line to `out` every cycle
    pub fn with_status(mut self, out: impl Write + Send + 'static) -> Self {
        self.status = Some(StatusLine::new(Box::new(out)));
        self
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn lanes(&self) -> &LaneSet {
        &self.lanes
    }

    /// Frame as last sent
    pub fn frame(&self) -> &DmxFrame {
        &self.frame
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Number of frames written successfully
    pub fn frames_sent(&self) -> u64 {
        self.frames_sent
    }

    /// Run one cycle now
    pub fn cycle(&mut self) -> Result<CycleReport> {
        self.cycle_at(Instant::now())
    }

    /// Run one cycle as of `now`
    pub fn cycle_at(&mut self, now: Instant) -> Result<CycleReport> {
        if let Some(timeout) = self.config.stale_timeout() {
            self.lanes.expire_stale(now, timeout);
        }

        let states = self.lanes.snapshot();
        let selected = arbiter::select(&states);
        if selected != self.selected {
            match selected {
                Some(index) => tracing::debug!("Following lane {}", self.lane_name(index)),
                None => tracing::debug!("No target, parking"),
            }
            self.selected = selected;
        }

        let target = selected.and_then(|index| states.get(index));
        let aim = self.config.fixture.point_to(target);
        let hue = selected.map(|index| self.config.hue_for(index));

        self.frame.encode_aim(aim, hue);
        self.send_frame()?;

        if let Some(status) = self.status.as_mut() {
            if let Err(e) = status.update(&states) {
                tracing::warn!("Failed to write status line: {}", e);
            }
        }

        Ok(CycleReport {
            selected,
            aim,
            hue,
            distances: states.iter().map(|state| state.last_distance).collect(),
        })
    }

    /// Break and write the current frame, retrying as configured
    fn send_frame(&mut self) -> Result<()> {
        let attempts = self.config.write_retries.saturating_add(1);
        let break_duration = self.config.break_duration();

        for attempt in 1..=attempts {
            let sent = self
                .transport
                .send_break(break_duration)
                .and_then(|()| self.transport.write_frame(self.frame.as_bytes()));

            match sent {
                Ok(()) => {
                    self.frames_sent += 1;
                    tracing::trace!("Frame {} sent: {:?}", self.frames_sent, self.frame.as_bytes());
                    return Ok(());
                }
                Err(e) if attempt < attempts => {
                    tracing::warn!("DMX write failed (attempt {}/{}): {}", attempt, attempts, e);
                }
                Err(e) => {
                    tracing::error!("DMX write failed after {} attempts: {}", attempts, e);
                    return Err(e);
                }
            }
        }

        Ok(())
    }

    /// Finish up after the loop: optional blackout, close the status line
    pub fn shutdown(&mut self) -> Result<()> {
        self.close_status();

        if self.config.blackout_on_exit {
            let parked = self.config.fixture.point_to(None);
            self.frame.blackout(parked);
            self.send_frame()?;
            tracing::info!("Blackout frame sent");
        }
        Ok(())
    }

    /// Cycle at the configured rate until `shutdown` resolves
    ///
    /// A transport failure ends the loop with the error. On a clean stop the
    /// transport is handed back.
    pub async fn run<F>(mut self, shutdown: F) -> Result<T>
    where
        F: Future<Output = ()>,
    {
        let period = self.config.cycle_period();
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        tracing::info!(
            "Control loop started: {} lanes, {} Hz",
            self.lanes.len(),
            self.config.refresh_hz
        );

        let outcome = loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => break Ok(()),
                _ = ticker.tick() => {
                    if let Err(e) = self.cycle() {
                        break Err(e);
                    }
                }
            }
        };

        match outcome {
            Ok(()) => {
                self.shutdown()?;
                tracing::info!("Control loop stopped after {} frames", self.frames_sent);
                Ok(self.transport)
            }
            Err(e) => {
                self.close_status();
                Err(e)
            }
        }
    }

    fn close_status(&mut self) {
        if let Some(status) = self.status.as_mut() {
            if let Err(e) = status.finish() {
                tracing::warn!("Failed to write status line: {}", e);
            }
        }
    }

    fn lane_name(&self, index: usize) -> &str {
        self.lanes.get(index).map(|lane| lane.name()).unwrap_or("?")
    }
}
