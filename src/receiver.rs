//! Receiver location
use crate::constants::DEGENERATE_FIX_EPSILON_DEG;
use crate::prelude::Epoch;

#[cfg(feature = "serde")]
use serde::Serialize;

/// [ReceiverFix] as reported by the receiver PVT monitoring stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReceiverFix {
    /// Latitude (degrees)
    pub latitude: f64,
    /// Longitude (degrees)
    pub longitude: f64,
    /// Height (meters)
    pub height: f64,
    /// GNSS time (seconds)
    pub gps_time: f64,
}

impl ReceiverFix {
    pub fn new(latitude: f64, longitude: f64, height: f64, gps_time: f64) -> Self {
        Self {
            latitude,
            longitude,
            height,
            gps_time,
        }
    }

    /// A fix is accepted when both coordinates are within range,
    /// unless it is the degenerate (0°, 0°) reading of a receiver that
    /// has not fixed yet.
    pub fn is_valid(&self) -> bool {
        let in_range = (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude);
        let degenerate = self.latitude.abs() <= DEGENERATE_FIX_EPSILON_DEG
            && self.longitude.abs() <= DEGENERATE_FIX_EPSILON_DEG;
        in_range && !degenerate
    }
}

/// [ReceiverContext] is the latest accepted receiver location.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ReceiverContext {
    /// Latitude (degrees)
    pub(crate) latitude: f64,
    /// Longitude (degrees)
    pub(crate) longitude: f64,
    /// Height (meters)
    pub(crate) height: f64,
    /// GNSS time (seconds)
    pub(crate) gps_time: f64,
    pub(crate) has_position: bool,
    /// GPST [Epoch] of the latest fix
    pub(crate) last_update: Option<Epoch>,
}

impl Default for ReceiverContext {
    fn default() -> Self {
        Self {
            latitude: 0.0,
            longitude: 0.0,
            height: 0.0,
            gps_time: 0.0,
            has_position: false,
            last_update: None,
        }
    }
}

impl ReceiverContext {
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn gps_time(&self) -> f64 {
        self.gps_time
    }

    /// False until a valid [ReceiverFix] was accepted
    pub fn has_position(&self) -> bool {
        self.has_position
    }

    pub fn last_update(&self) -> Option<Epoch> {
        self.last_update
    }

    /// Applies a [ReceiverFix]. Returns None when the fix is rejected,
    /// otherwise whether the location changed by more than `epsilon_deg`
    /// on either axis (always true for the very first fix).
    pub(crate) fn apply(&mut self, fix: &ReceiverFix, epsilon_deg: f64) -> Option<bool> {
        if !fix.is_valid() {
            return None;
        }

        let changed = !self.has_position
            || (self.latitude - fix.latitude).abs() > epsilon_deg
            || (self.longitude - fix.longitude).abs() > epsilon_deg;

        self.latitude = fix.latitude;
        self.longitude = fix.longitude;
        self.height = fix.height;
        self.gps_time = fix.gps_time;
        self.has_position = true;
        if fix.gps_time.is_finite() {
            self.last_update = Some(Epoch::from_gpst_seconds(fix.gps_time));
        }

        Some(changed)
    }
}

impl std::fmt::Display for ReceiverContext {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.has_position {
            write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
        } else {
            write!(f, "No Position")
        }
    }
}

#[cfg(test)]
mod test {
    use super::{ReceiverContext, ReceiverFix};
    use rstest::*;

    #[rstest]
    #[case(45.0, -122.0, true)]
    #[case(-90.0, 180.0, true)]
    #[case(0.0, 0.0, false)]
    #[case(0.0005, -0.0009, false)]
    #[case(0.0, 0.5, true)]
    #[case(90.5, 10.0, false)]
    #[case(10.0, -180.1, false)]
    #[case(f64::NAN, 10.0, false)]
    fn fix_validity(#[case] lat: f64, #[case] lon: f64, #[case] valid: bool) {
        let fix = ReceiverFix::new(lat, lon, 100.0, 0.0);
        assert_eq!(fix.is_valid(), valid, "({}, {})", lat, lon);
    }

    #[test]
    fn context_updates() {
        let mut ctx = ReceiverContext::default();
        assert!(!ctx.has_position());
        assert_eq!(ctx.to_string(), "No Position");

        let rejected = ReceiverFix::new(0.0, 0.0, 0.0, 10.0);
        assert_eq!(ctx.apply(&rejected, 1.0E-6), None);
        assert!(!ctx.has_position());

        let fix = ReceiverFix::new(45.0, -122.0, 30.0, 3600.0);
        assert_eq!(ctx.apply(&fix, 1.0E-6), Some(true));
        assert!(ctx.has_position());
        assert_eq!(ctx.gps_time(), 3600.0);
        assert!(ctx.last_update().is_some());
        assert_eq!(ctx.to_string(), "45.000000, -122.000000");

        let still = ReceiverFix::new(45.0 + 1.0E-7, -122.0, 31.0, 3601.0);
        assert_eq!(ctx.apply(&still, 1.0E-6), Some(false));
        assert_eq!(ctx.height(), 31.0);

        let moved = ReceiverFix::new(45.0, -121.9, 31.0, 3602.0);
        assert_eq!(ctx.apply(&moved, 1.0E-6), Some(true));
        assert_eq!(ctx.longitude(), -121.9);
    }
}
