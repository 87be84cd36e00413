#[cfg(feature = "serde")]
use serde::Deserialize;

use crate::{
    constants::{
        DEFAULT_MAX_MISSED_UPDATES, DEFAULT_POSITION_RECOMPUTE_EPSILON_DEG,
        DEFAULT_UPDATE_INTERVAL_MS, DEFAULT_WEAK_CN0_DB_HZ,
    },
    prelude::{Duration, Error},
};

use hifitime::Unit;

fn default_max_missed_updates() -> usize {
    DEFAULT_MAX_MISSED_UPDATES
}

fn default_position_recompute_epsilon() -> f64 {
    DEFAULT_POSITION_RECOMPUTE_EPSILON_DEG
}

fn default_update_interval() -> Duration {
    DEFAULT_UPDATE_INTERVAL_MS * Unit::Millisecond
}

fn default_weak_cn0() -> f64 {
    DEFAULT_WEAK_CN0_DB_HZ
}

/// [TrackingStore](crate::prelude::TrackingStore) configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct Config {
    /// Number of consecutive cycles a channel may be missing
    /// before it is dropped. It is dropped on the next missed cycle.
    #[cfg_attr(feature = "serde", serde(default = "default_max_missed_updates"))]
    pub max_missed_updates: usize,
    /// Receiver displacement (degrees, on either axis) beyond
    /// which approximated positions are flagged for re-resolution.
    #[cfg_attr(
        feature = "serde",
        serde(default = "default_position_recompute_epsilon")
    )]
    pub position_recompute_epsilon: f64,
    /// Preferred cycle cadence. The store never schedules itself:
    /// this is only forwarded to whatever drives the update cycles.
    #[cfg_attr(feature = "serde", serde(default = "default_update_interval"))]
    pub update_interval: Duration,
    /// CN0 (dB-Hz) below which a signal is reported as weak.
    #[cfg_attr(feature = "serde", serde(default = "default_weak_cn0"))]
    pub weak_cn0_db_hz: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_missed_updates: default_max_missed_updates(),
            position_recompute_epsilon: default_position_recompute_epsilon(),
            update_interval: default_update_interval(),
            weak_cn0_db_hz: default_weak_cn0(),
        }
    }
}

impl Config {
    /// Copies and returns [Config] with desired missed updates tolerance.
    pub fn with_max_missed_updates(&self, max_missed_updates: usize) -> Self {
        let mut s = self.clone();
        s.max_missed_updates = max_missed_updates;
        s
    }

    /// Copies and returns [Config] with desired receiver displacement threshold (degrees).
    pub fn with_position_recompute_epsilon(&self, epsilon_deg: f64) -> Self {
        let mut s = self.clone();
        s.position_recompute_epsilon = epsilon_deg;
        s
    }

    /// Copies and returns [Config] with desired cycle cadence.
    pub fn with_update_interval(&self, interval: Duration) -> Self {
        let mut s = self.clone();
        s.update_interval = interval;
        s
    }

    /// Copies and returns [Config] with desired weak signal threshold (dB-Hz).
    pub fn with_weak_cn0(&self, cn0_db_hz: f64) -> Self {
        let mut s = self.clone();
        s.weak_cn0_db_hz = cn0_db_hz;
        s
    }

    /// Verifies this [Config] is physically meaningful.
    pub fn validate(&self) -> Result<(), Error> {
        let epsilon = self.position_recompute_epsilon;
        if !epsilon.is_finite() || epsilon < 0.0 {
            return Err(Error::InvalidRecomputeEpsilon(epsilon));
        }

        let cn0 = self.weak_cn0_db_hz;
        if !cn0.is_finite() || cn0 < 0.0 {
            return Err(Error::InvalidWeakSignalThreshold(cn0));
        }

        if self.update_interval < Duration::ZERO {
            return Err(Error::NegativeUpdateInterval);
        }

        Ok(())
    }
}
