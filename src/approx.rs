//! Approximate sky positions.
//!
//! :warning: nothing here is an ephemeris propagator. The "computed"
//! model spreads each constellation over its orbital planes and lets
//! satellites drift with a nominal orbital period, so a sky plot looks
//! plausible and evolves with time. Elevation and azimuth produced
//! here are visualization aids only and must never feed a navigation
//! process. Both functions are total: any input yields an in-range position.
use std::f64::consts::PI;

use crate::{
    position::{normalize_azimuth, SkyPosition},
    prelude::System,
};

/// Per constellation heuristics of the computed model
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct OrbitalModel {
    /// Number of orbital planes
    pub planes: u8,
    /// Nominal orbital period (hours)
    pub period_h: f64,
    /// Elevation baseline (degrees)
    pub elev_baseline: f64,
    /// Main elevation amplitude (degrees)
    pub elev_amplitude: f64,
    /// Secondary (orbital) modulation of the main amplitude
    pub elev_secondary: f64,
    /// PRN dependent perturbation amplitude (degrees)
    pub perturb_amplitude: f64,
    /// PRN dependent perturbation phase factor
    pub perturb_prn: f64,
    /// Slow time drift of the perturbation (per hour)
    pub perturb_time: f64,
    /// Elevation clamp band (degrees)
    pub elev_band: (f64, f64),
    /// Constant azimuth offset of plane #0 (degrees)
    pub azim_offset: f64,
    /// Azimuth swing amplitude (degrees)
    pub azim_amplitude: f64,
    /// PRN dependent azimuth phase factor
    pub azim_prn: f64,
    /// Receiver longitude contribution to the azimuth
    pub azim_longitude: f64,
}

impl OrbitalModel {
    pub(crate) fn of(system: System) -> Option<Self> {
        match system {
            System::GPS => Some(Self {
                planes: 6,
                period_h: 12.0,
                elev_baseline: 25.0,
                elev_amplitude: 50.0,
                elev_secondary: 0.4,
                perturb_amplitude: 10.0,
                perturb_prn: 0.7,
                perturb_time: 0.1,
                elev_band: (5.0, 85.0),
                azim_offset: 0.0,
                azim_amplitude: 45.0,
                azim_prn: 0.3,
                azim_longitude: 0.15,
            }),
            System::Galileo => Some(Self {
                planes: 3,
                period_h: 14.1,
                elev_baseline: 30.0,
                elev_amplitude: 45.0,
                elev_secondary: 0.35,
                perturb_amplitude: 8.0,
                perturb_prn: 0.9,
                perturb_time: 0.12,
                elev_band: (10.0, 80.0),
                azim_offset: 0.0,
                azim_amplitude: 50.0,
                azim_prn: 0.4,
                azim_longitude: 0.18,
            }),
            System::GLONASS => Some(Self {
                planes: 3,
                period_h: 11.3,
                elev_baseline: 35.0,
                elev_amplitude: 40.0,
                elev_secondary: 0.3,
                perturb_amplitude: 12.0,
                perturb_prn: 1.1,
                perturb_time: 0.08,
                elev_band: (15.0, 75.0),
                azim_offset: 60.0,
                azim_amplitude: 40.0,
                azim_prn: 0.35,
                azim_longitude: 0.12,
            }),
            System::BeiDou => Some(Self {
                planes: 3,
                period_h: 12.9,
                elev_baseline: 28.0,
                elev_amplitude: 47.0,
                elev_secondary: 0.38,
                perturb_amplitude: 9.0,
                perturb_prn: 0.8,
                perturb_time: 0.11,
                elev_band: (8.0, 82.0),
                azim_offset: 30.0,
                azim_amplitude: 48.0,
                azim_prn: 0.42,
                azim_longitude: 0.16,
            }),
            _ => None,
        }
    }

    /// Orbital plane this PRN is assigned to. PRN #0 is coerced to plane #0.
    fn plane(&self, prn: u8) -> u8 {
        prn.saturating_sub(1) % self.planes
    }

    fn elevation(&self, prn: u8, t_h: f64) -> f64 {
        let plane = self.plane(prn) as f64;
        let plane_offset = plane * 2.0 * PI / self.planes as f64;
        let orbital_phase = 2.0 * PI * t_h / self.period_h + plane_offset;

        let mut elevation = self.elev_baseline
            + self.elev_amplitude * (0.5 + self.elev_secondary * orbital_phase.sin());

        elevation += self.perturb_amplitude
            * (prn as f64 * self.perturb_prn + t_h * self.perturb_time).sin();

        let (min, max) = self.elev_band;
        // NaN inputs (invalid GNSS time) land on the lower bound
        if elevation.is_nan() {
            min
        } else {
            elevation.clamp(min, max)
        }
    }

    fn azimuth(&self, prn: u8, longitude_deg: f64, t_h: f64) -> f64 {
        let plane = self.plane(prn) as f64;
        let plane_spacing = 360.0 / self.planes as f64;
        let phase = 2.0 * PI * t_h / self.period_h + prn as f64 * self.azim_prn;

        let azimuth = plane * plane_spacing
            + self.azim_offset
            + self.azim_amplitude * phase.sin()
            + longitude_deg * self.azim_longitude;

        finite_azimuth(azimuth)
    }
}

fn finite_azimuth(azimuth: f64) -> f64 {
    if azimuth.is_finite() {
        normalize_azimuth(azimuth)
    } else {
        0.0
    }
}

/// Approximates the sky position of satellite `prn` of [System], seen
/// from the receiver located at (latitude, `receiver_lon_deg`)
/// at `gps_time_s` (seconds of GNSS time).
///
/// The elevation is clamped to a band that depends on the constellation:
/// - GPS: [5, 85]°
/// - Galileo: [10, 80]°
/// - GLONASS: [15, 75]°
/// - BeiDou: [8, 82]°
/// - other systems: [30, 80)°
///
/// The receiver latitude does not contribute to this model.
pub fn computed_position(
    prn: u8,
    system: System,
    _receiver_lat_deg: f64,
    receiver_lon_deg: f64,
    gps_time_s: f64,
) -> SkyPosition {
    let t_h = gps_time_s / 3600.0;

    match OrbitalModel::of(system) {
        Some(model) => SkyPosition::new(
            model.elevation(prn, t_h),
            model.azimuth(prn, receiver_lon_deg, t_h),
        ),
        None => SkyPosition::new(
            30.0 + (prn as f64 * 7.0) % 50.0,
            finite_azimuth(prn as f64 * 23.0 + t_h * 15.0),
        ),
    }
}

/// Azimuth offset applied by the fallback pattern,
/// so each constellation clusters in its own sky quadrant.
fn fallback_azimuth_offset(system: System) -> f64 {
    match system {
        System::Galileo => 90.0,
        System::GLONASS => 180.0,
        System::BeiDou => 270.0,
        _ => 0.0,
    }
}

/// Spreads satellite `prn` of [System] over the sky, when the receiver
/// position is not known. Elevation lies within [20, 80]°.
pub fn fallback_position(prn: u8, system: System) -> SkyPosition {
    let elevation = (20.0 + (prn % 6) as f64 * 10.0).clamp(20.0, 80.0);
    let azimuth = (prn as f64 * 37.0) % 360.0;
    SkyPosition::new(
        elevation,
        normalize_azimuth(azimuth + fallback_azimuth_offset(system)),
    )
}
