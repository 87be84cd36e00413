use crate::constants::{FULL_TURN_DEG, MAX_ELEVATION_DEG};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Local sky position of a satellite, as seen by the receiver.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SkyPosition {
    /// Elevation angle above the horizon, in degrees
    pub elevation_deg: f64,
    /// Azimuth angle, clockwise from North, in degrees
    pub azimuth_deg: f64,
}

impl SkyPosition {
    pub fn new(elevation_deg: f64, azimuth_deg: f64) -> Self {
        Self {
            elevation_deg,
            azimuth_deg,
        }
    }

    /// True when elevation lies within [0, 90]° and azimuth within [0, 360)°.
    /// NaN values are always out of range.
    pub fn in_range(&self) -> bool {
        (0.0..=MAX_ELEVATION_DEG).contains(&self.elevation_deg)
            && (0.0..FULL_TURN_DEG).contains(&self.azimuth_deg)
    }
}

/// Wraps any azimuth angle into [0, 360)°
pub(crate) fn normalize_azimuth(azimuth_deg: f64) -> f64 {
    let wrapped = azimuth_deg.rem_euclid(FULL_TURN_DEG);
    // rem_euclid may round up to the modulus itself for tiny negative inputs
    if wrapped >= FULL_TURN_DEG {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod test {
    use super::{normalize_azimuth, SkyPosition};

    #[test]
    fn sky_position_range() {
        assert!(SkyPosition::new(0.0, 0.0).in_range());
        assert!(SkyPosition::new(90.0, 359.9).in_range());
        assert!(!SkyPosition::new(-0.1, 10.0).in_range());
        assert!(!SkyPosition::new(45.0, 360.0).in_range());
        assert!(!SkyPosition::new(f64::NAN, 10.0).in_range());
    }

    #[test]
    fn azimuth_normalization() {
        assert_eq!(normalize_azimuth(370.0), 10.0);
        assert_eq!(normalize_azimuth(-90.0), 270.0);
        assert_eq!(normalize_azimuth(720.0), 0.0);
        assert_eq!(normalize_azimuth(-1.0E-17), 0.0);
    }
}
