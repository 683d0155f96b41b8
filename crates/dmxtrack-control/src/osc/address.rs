//! OSC address space parser
//!
//! Sensor samples arrive on `/dmxtrack/lane/{lane}/distance`, where `{lane}`
//! is a lane name or its 1-based position.

use crate::{error::ControlError, Result};

/// Maximum length of an OSC address string
const MAX_OSC_ADDRESS_LENGTH: usize = 1024;
/// Maximum length of a lane key
const MAX_NAME_LENGTH: usize = 256;

/// Root of the tracker address space
pub const OSC_ROOT: &str = "dmxtrack";

/// Build the address a sensor reports a lane distance on
pub fn lane_distance_address(lane: &str) -> String {
    format!("/{}/lane/{}/distance", OSC_ROOT, lane)
}

/// Parse an OSC address to the lane key it reports for
pub fn parse_osc_address(address: &str) -> Result<&str> {
    if address.len() > MAX_OSC_ADDRESS_LENGTH {
        return Err(ControlError::InvalidMessage(format!(
            "OSC address too long (max {} chars)",
            MAX_OSC_ADDRESS_LENGTH
        )));
    }

    let parts: Vec<&str> = address.trim_start_matches('/').split('/').collect();

    if parts[0] != OSC_ROOT {
        return Err(ControlError::InvalidMessage(format!(
            "OSC address must start with /{}: {}",
            OSC_ROOT, address
        )));
    }

    match parts.get(1) {
        Some(&"lane") => parse_lane_address(&parts[2..]),
        Some(category) => Err(ControlError::InvalidMessage(format!(
            "Unknown OSC category: {}",
            category
        ))),
        None => Err(ControlError::InvalidMessage(format!(
            "Invalid OSC address: {}",
            address
        ))),
    }
}

fn parse_lane_address<'a>(parts: &[&'a str]) -> Result<&'a str> {
    let Some(&lane) = parts.first().filter(|lane| !lane.is_empty()) else {
        return Err(ControlError::InvalidMessage("Missing lane".to_string()));
    };

    if lane.len() > MAX_NAME_LENGTH {
        return Err(ControlError::InvalidMessage(format!(
            "Lane name too long (max {} chars)",
            MAX_NAME_LENGTH
        )));
    }

    match parts.get(1..) {
        Some(["distance"]) => Ok(lane),
        _ => Err(ControlError::InvalidMessage(format!(
            "Lane address must be /{}/lane/{{lane}}/distance",
            OSC_ROOT
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lane_distance() {
        assert_eq!(parse_osc_address("/dmxtrack/lane/dist1/distance").unwrap(), "dist1");
        assert_eq!(parse_osc_address("/dmxtrack/lane/2/distance").unwrap(), "2");
    }

    #[test]
    fn test_round_trip_address() {
        let address = lane_distance_address("dist2");
        assert_eq!(parse_osc_address(&address).unwrap(), "dist2");
    }

    #[test]
    fn test_invalid_addresses() {
        assert!(parse_osc_address("/mapmap/lane/1/distance").is_err());
        assert!(parse_osc_address("/dmxtrack").is_err());
        assert!(parse_osc_address("/dmxtrack/fixture/1").is_err());
        assert!(parse_osc_address("/dmxtrack/lane").is_err());
        assert!(parse_osc_address("/dmxtrack/lane//distance").is_err());
        assert!(parse_osc_address("/dmxtrack/lane/1").is_err());
        assert!(parse_osc_address("/dmxtrack/lane/1/speed").is_err());
        assert!(parse_osc_address("/dmxtrack/lane/1/distance/extra").is_err());
    }

    #[test]
    fn test_address_length_limit() {
        let long_name = "a".repeat(MAX_NAME_LENGTH + 1);
        assert!(parse_osc_address(&lane_distance_address(&long_name)).is_err());

        let too_long = format!("/dmxtrack/{}", "x".repeat(MAX_OSC_ADDRESS_LENGTH));
        assert!(parse_osc_address(&too_long).is_err());
    }
}
