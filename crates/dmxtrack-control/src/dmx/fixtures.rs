//! DMX fixture profiles

use serde::{Deserialize, Serialize};

/// DMX fixture profile defining channel layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureProfile {
    pub name: String,
    pub manufacturer: String,
    pub channels: Vec<FixtureChannel>,
}

/// A channel in a fixture profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureChannel {
    pub name: String,
    pub channel_type: ChannelType,
    pub default_value: u8,
}

/// Type of DMX channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelType {
    Pan,
    PanFine,
    Tilt,
    TiltFine,
    Speed,
    Dimmer,
    Shutter,
    Red,
    Green,
    Blue,
    ColorMode,
    Generic,
}

impl FixtureChannel {
    fn new(name: &str, channel_type: ChannelType, default_value: u8) -> Self {
        Self {
            name: name.to_string(),
            channel_type,
            default_value,
        }
    }
}

impl FixtureProfile {
    /// Eurolite LED TMH-46 moving head in 18-channel mode
    ///
    /// Default values are the personality bytes the tracker starts from.
    /// Pan, tilt and the color block are rewritten every frame.
    pub fn tmh46_18ch() -> Self {
        use ChannelType::*;

        let mut channels = vec![
            FixtureChannel::new("Pan", Pan, 1),
            FixtureChannel::new("Pan Fine", PanFine, 1),
            FixtureChannel::new("Tilt", Tilt, 2),
            FixtureChannel::new("Tilt Fine", TiltFine, 2),
            FixtureChannel::new("Pan/Tilt Speed", Speed, 0),
            FixtureChannel::new("Dimmer", Dimmer, 255),
            FixtureChannel::new("Shutter", Shutter, 5),
            FixtureChannel::new("Red", Red, 6),
            FixtureChannel::new("Green", Green, 7),
            FixtureChannel::new("Blue", Blue, 8),
            FixtureChannel::new("Color Mode", ColorMode, 9),
            FixtureChannel::new("Color Aux 1", Generic, 0),
            FixtureChannel::new("Color Aux 2", Generic, 0),
        ];
        for n in 14..=18 {
            channels.push(FixtureChannel::new(&format!("Channel {}", n), Generic, 0));
        }

        Self {
            name: "LED TMH-46 (18CH)".to_string(),
            manufacturer: "Eurolite".to_string(),
            channels,
        }
    }

    /// Get the number of channels this fixture uses
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// 1-based channel number of the first channel of the given type
    pub fn channel_of(&self, channel_type: ChannelType) -> Option<usize> {
        self.channels
            .iter()
            .position(|channel| channel.channel_type == channel_type)
            .map(|index| index + 1)
    }

    /// Default values in channel order
    pub fn default_values(&self) -> impl Iterator<Item = u8> + '_ {
        self.channels.iter().map(|channel| channel.default_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tmh46_layout() {
        let profile = FixtureProfile::tmh46_18ch();
        assert_eq!(profile.channel_count(), 18);
        assert_eq!(profile.channel_of(ChannelType::Pan), Some(1));
        assert_eq!(profile.channel_of(ChannelType::PanFine), Some(2));
        assert_eq!(profile.channel_of(ChannelType::Tilt), Some(3));
        assert_eq!(profile.channel_of(ChannelType::TiltFine), Some(4));
        assert_eq!(profile.channel_of(ChannelType::Red), Some(8));
        assert_eq!(profile.channel_of(ChannelType::ColorMode), Some(11));
    }

    #[test]
    fn test_default_values() {
        let profile = FixtureProfile::tmh46_18ch();
        let values: Vec<u8> = profile.default_values().collect();
        assert_eq!(&values[..11], &[1, 1, 2, 2, 0, 255, 5, 6, 7, 8, 9]);
        assert!(values[11..].iter().all(|&v| v == 0));
    }
}
