/// Default number of consecutive missed cycles tolerated before a channel is dropped
pub const DEFAULT_MAX_MISSED_UPDATES: usize = 5;

/// Default receiver displacement (in degrees) that triggers position re-resolution
pub const DEFAULT_POSITION_RECOMPUTE_EPSILON_DEG: f64 = 1.0E-6;

/// Default refresh cadence (in milliseconds) proposed to the external scheduler
pub const DEFAULT_UPDATE_INTERVAL_MS: f64 = 100.0;

/// Below this CN0 (dB-Hz) a tracked signal is considered weak
pub const DEFAULT_WEAK_CN0_DB_HZ: f64 = 25.0;

/// Receiver fixes closer than this (in degrees) to (0°, 0°) on both axes
/// are considered degenerate (receiver not fixed yet).
pub const DEGENERATE_FIX_EPSILON_DEG: f64 = 1.0E-3;

/// Maximal elevation angle (degrees)
pub const MAX_ELEVATION_DEG: f64 = 90.0;

/// Full azimuth turn (degrees)
pub const FULL_TURN_DEG: f64 = 360.0;
