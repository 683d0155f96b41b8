//! OSC type conversion helpers

use rosc::OscType;

use crate::{error::ControlError, Result};

/// Convert the first OSC argument to a distance in whole millimeters
///
/// Floating point readings are truncated toward zero.
pub fn osc_to_distance(osc_args: &[OscType]) -> Result<i32> {
    let Some(arg) = osc_args.first() else {
        return Err(ControlError::InvalidMessage("No OSC arguments".to_string()));
    };

    let distance = match arg {
        OscType::Int(i) => *i,
        OscType::Long(l) => clamp_i64(*l),
        OscType::Float(f) if f.is_finite() => *f as i32,
        OscType::Double(d) if d.is_finite() => *d as i32,
        OscType::String(s) => s.trim().parse().map_err(|_| {
            ControlError::InvalidMessage(format!("Invalid distance string: {:?}", s))
        })?,
        _ => {
            return Err(ControlError::InvalidMessage(format!(
                "Unsupported OSC type for distance: {:?}",
                arg
            )))
        }
    };

    Ok(distance)
}

fn clamp_i64(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_types() {
        assert_eq!(osc_to_distance(&[OscType::Int(4200)]).unwrap(), 4200);
        assert_eq!(osc_to_distance(&[OscType::Long(4200)]).unwrap(), 4200);
        assert_eq!(osc_to_distance(&[OscType::Float(4200.9)]).unwrap(), 4200);
        assert_eq!(osc_to_distance(&[OscType::Double(-3.5)]).unwrap(), -3);
        assert_eq!(osc_to_distance(&[OscType::String(" 812 ".into())]).unwrap(), 812);
    }

    #[test]
    fn test_long_is_clamped() {
        assert_eq!(osc_to_distance(&[OscType::Long(i64::MAX)]).unwrap(), i32::MAX);
    }

    #[test]
    fn test_rejected_arguments() {
        assert!(osc_to_distance(&[]).is_err());
        assert!(osc_to_distance(&[OscType::Bool(true)]).is_err());
        assert!(osc_to_distance(&[OscType::Float(f32::NAN)]).is_err());
        assert!(osc_to_distance(&[OscType::String("far".into())]).is_err());
    }
}
