use dmxtrack_control::dmx::{hue2rgb, DmxFrame, FixtureProfile, FRAME_LEN};
use proptest::prelude::*;

#[test]
fn test_blackout_frame_layout() {
    let mut frame = DmxFrame::default();
    frame.encode(5000, 3000, None);

    let bytes = frame.as_bytes();
    assert_eq!(bytes.len(), FRAME_LEN);
    assert_eq!(&bytes[1..3], &5000u16.to_be_bytes());
    assert_eq!(&bytes[3..5], &3000u16.to_be_bytes());
    assert_eq!(&bytes[8..14], &[0; 6]);
}

#[test]
fn test_encoding_is_repeatable() {
    let mut first = DmxFrame::default();
    first.encode(5000, 3000, Some(270));

    let mut second = DmxFrame::default();
    second.encode(1, 2, None);
    second.encode(5000, 3000, Some(270));
    assert_eq!(first, second);

    // 270 wraps to 14
    let mut wrapped = DmxFrame::default();
    wrapped.encode(5000, 3000, Some(14));
    assert_eq!(first, wrapped);
}

#[test]
fn test_hue_wheel_phases() {
    // pure red, green and blue sit a third of the wheel apart
    let mut frame = DmxFrame::from_profile(&FixtureProfile::tmh46_18ch());
    frame.encode(0, 0, Some(0));
    assert_eq!(frame.rgb(), [255, 1, 1]);

    frame.encode(0, 0, Some(85));
    assert_eq!(frame.rgb(), [1, 255, 1]);

    frame.encode(0, 0, Some(170));
    assert_eq!(frame.rgb(), [1, 1, 255]);
}

proptest! {
    #[test]
    fn test_pan_tilt_split(pan in 0i32..=65535, tilt in 0i32..=65535) {
        let mut frame = DmxFrame::default();
        frame.encode(pan, tilt, None);
        prop_assert_eq!(i32::from(frame.pan()), pan);
        prop_assert_eq!(i32::from(frame.tilt()), tilt);
    }

    #[test]
    fn test_hue2rgb_never_zero(h in 0u32..4096) {
        let value = hue2rgb(h);
        prop_assert!(value >= 1);
        prop_assert_eq!(value, hue2rgb(h % 256));
    }
}
