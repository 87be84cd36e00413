use itertools::Itertools;

use crate::prelude::{PositionSource, SatelliteRecord};

#[cfg(feature = "serde")]
use serde::Serialize;

/// [Statistics] of the tracked satellites, counting only the
/// records whose position is valid for use.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Statistics {
    /// Satellites with a valid position
    pub total: usize,
    /// Satellites positioned by the receiver
    pub real: usize,
    /// Satellites with an approximated position
    pub computed: usize,
    /// Satellites placed by the PRN pattern
    pub fallback: usize,
}

impl Statistics {
    /// Derives [Statistics] from a set of [SatelliteRecord]s
    pub fn from_records<'a>(records: impl Iterator<Item = &'a SatelliteRecord>) -> Self {
        let counts = records
            .filter(|rec| rec.is_position_valid())
            .counts_by(|rec| rec.position_source());

        let count = |source: PositionSource| counts.get(&source).copied().unwrap_or(0);

        Self {
            total: counts.values().sum(),
            real: count(PositionSource::Real),
            computed: count(PositionSource::Computed),
            fallback: count(PositionSource::Fallback),
        }
    }
}

impl std::fmt::Display for Statistics {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "Total: {} Real: {} Computed: {} Fallback: {}",
            self.total, self.real, self.computed, self.fallback
        )
    }
}
