//! DmxTrack - Follow spot for detection lanes
//!
//! Listens for distance samples from the lane sensors, follows the fastest
//! target with a DMX512 moving head and prints the lane distances on one
//! refreshing line.

#![warn(missing_docs)]

mod args;
mod logging_setup;

use anyhow::{Context, Result};
use clap::Parser;
use dmxtrack_control::transport::{ArtNetTransport, DmxTransport, NullTransport};
use dmxtrack_control::{ControlLoop, OscSensorServer};
use dmxtrack_core::{LaneSet, TrackerConfig};
use tracing::{error, info};

use crate::args::{Args, TransportKind};
use crate::logging_setup::LogConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = TrackerConfig::from(&args);

    if args.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let _log_guard = logging_setup::init(&LogConfig {
        level: args.log_level,
        console_output: true,
        file: args.log_file.clone(),
    })?;

    config.validate().context("Invalid configuration")?;
    for lane in &config.lanes {
        info!(
            "Lane {}: offset {} mm, range {} mm",
            lane.name, lane.lateral_offset, lane.max_range
        );
    }
    info!(
        "Fixture {} mm high, {} mm from the sensors",
        config.fixture.height, config.fixture.standoff
    );

    let lanes = LaneSet::new(&config.lanes);

    // Sensors and output must both be reachable before anything runs
    let sensors = OscSensorServer::bind(&args.osc_listen, lanes.clone())
        .await
        .with_context(|| format!("Sensor input not available on {}", args.osc_listen))?;
    let transport = open_transport(&args).context("DMX output not available")?;

    let mut tracker = ControlLoop::new(config, lanes, transport)?;
    if !args.quiet {
        tracker = tracker.with_status(std::io::stdout());
    }

    info!("DMX512 tracker running - hit Ctrl-C to stop");

    let sensor_task = tokio::spawn(sensors.run());

    tokio::select! {
        result = tracker.run(shutdown_signal()) => {
            result.context("DMX output failed")?;
        }
        result = sensor_task => {
            let err = match result {
                Ok(Ok(())) => anyhow::anyhow!("sensor input stopped"),
                Ok(Err(e)) => anyhow::Error::new(e),
                Err(e) => anyhow::Error::new(e),
            };
            error!("Sensor input failed: {:#}", err);
            return Err(err.context("Sensor input failed"));
        }
    }

    info!("Stopped");
    Ok(())
}

fn open_transport(args: &Args) -> Result<Box<dyn DmxTransport + Send>> {
    let transport: Box<dyn DmxTransport + Send> = match args.transport {
        TransportKind::Serial => open_serial(&args.serial_port)?,
        TransportKind::Artnet => {
            let sender = ArtNetTransport::new(args.artnet_universe, &args.artnet_target)?;
            info!("DMX output: Art-Net universe {}", sender.universe());
            Box::new(sender)
        }
        TransportKind::Null => {
            info!("Dry run: DMX frames are discarded");
            Box::new(NullTransport::new())
        }
    };
    Ok(transport)
}

#[cfg(feature = "serial")]
fn open_serial(path: &str) -> Result<Box<dyn DmxTransport + Send>> {
    let port = dmxtrack_control::SerialTransport::open(path)
        .with_context(|| format!("Failed to open serial port {}", path))?;
    info!("DMX output: serial {}", port.path());
    Ok(Box::new(port))
}

#[cfg(not(feature = "serial"))]
fn open_serial(_path: &str) -> Result<Box<dyn DmxTransport + Send>> {
    anyhow::bail!("built without serial support, use --transport artnet or null")
}

/// Resolves on the operator interrupt
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Interrupt received, stopping"),
        Err(e) => {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
