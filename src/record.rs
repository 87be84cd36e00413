//! Tracked satellite state
use crate::prelude::{Epoch, Error, SkyPosition, System, SV};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Hardware (or software) receiver channel identifier.
pub type ChannelId = u32;

/// [PositionSource] describes how the sky position of a
/// [SatelliteRecord] was obtained, by order of preference.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum PositionSource {
    /// No position was ever assigned (or the channel was just reassigned)
    #[default]
    None,
    /// Satellite position reported by the receiver itself
    Real,
    /// Approximated from the receiver location and GNSS time
    Computed,
    /// PRN based pattern, used when the receiver location is not known
    Fallback,
}

impl PositionSource {
    /// True for positions that do not come from the receiver.
    pub fn is_approximated(&self) -> bool {
        matches!(self, Self::Computed | Self::Fallback)
    }
}

impl std::fmt::Display for PositionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "Unknown"),
            Self::Real => write!(f, "Real"),
            Self::Computed => write!(f, "Computed"),
            Self::Fallback => write!(f, "Fallback"),
        }
    }
}

impl std::str::FromStr for PositionSource {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "unknown" => Ok(Self::None),
            "real" => Ok(Self::Real),
            "computed" => Ok(Self::Computed),
            "fallback" => Ok(Self::Fallback),
            _ => Err(Error::UnknownPositionSource(s.to_string())),
        }
    }
}

/// [SatelliteRecord] is the live state of one receiver channel.
/// Records are owned by the [TrackingStore](crate::prelude::TrackingStore):
/// always resolve them again by [ChannelId] after a new cycle.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SatelliteRecord {
    /// Receiver channel
    pub(crate) channel_id: ChannelId,
    /// PRN number, within [System]
    pub(crate) prn: u8,
    pub(crate) system: System,
    /// Signal (frequency band) label, as reported
    pub(crate) signal: String,
    pub(crate) position: SkyPosition,
    pub(crate) position_source: PositionSource,
    /// Carrier to noise density ratio (dB-Hz)
    pub(crate) cn0: f64,
    /// Tracking lock validity
    pub(crate) valid: bool,
    pub(crate) seen_this_cycle: bool,
    pub(crate) missed_updates: usize,
    pub(crate) last_seen: Epoch,
    /// Receiver moved since this (approximated) position was resolved
    pub(crate) pending_resolution: bool,
}

impl SatelliteRecord {
    /// New (unresolved) record for this channel
    pub(crate) fn new(channel_id: ChannelId, epoch: Epoch) -> Self {
        Self {
            channel_id,
            prn: 0,
            system: System::Unknown,
            signal: String::new(),
            position: SkyPosition::default(),
            position_source: PositionSource::None,
            cn0: 0.0,
            valid: false,
            seen_this_cycle: false,
            missed_updates: 0,
            last_seen: epoch,
            pending_resolution: false,
        }
    }

    pub fn channel_id(&self) -> ChannelId {
        self.channel_id
    }

    pub fn prn(&self) -> u8 {
        self.prn
    }

    pub fn system(&self) -> System {
        self.system
    }

    /// [SV] identity, when the [System] is identified.
    pub fn sv(&self) -> Option<SV> {
        self.system.sv(self.prn)
    }

    pub fn signal(&self) -> &str {
        &self.signal
    }

    /// Elevation angle in degrees
    pub fn elevation(&self) -> f64 {
        self.position.elevation_deg
    }

    /// Azimuth angle in degrees
    pub fn azimuth(&self) -> f64 {
        self.position.azimuth_deg
    }

    pub fn sky_position(&self) -> SkyPosition {
        self.position
    }

    pub fn position_source(&self) -> PositionSource {
        self.position_source
    }

    /// CN0 in dB-Hz
    pub fn cn0(&self) -> f64 {
        self.cn0
    }

    pub fn valid(&self) -> bool {
        self.valid
    }

    pub fn seen_this_cycle(&self) -> bool {
        self.seen_this_cycle
    }

    pub fn missed_updates(&self) -> usize {
        self.missed_updates
    }

    pub fn last_seen(&self) -> Epoch {
        self.last_seen
    }

    /// True when the receiver moved since this approximated position was resolved.
    /// The position is resolved again by the next observation of this channel.
    pub fn pending_resolution(&self) -> bool {
        self.pending_resolution
    }

    /// Position may be used (plotted, counted) only when it is both
    /// in range and was assigned by one of the resolution tiers.
    pub fn is_position_valid(&self) -> bool {
        self.position_source != PositionSource::None && self.position.in_range()
    }

    /// Weak signals: tracking lock invalid or CN0 below `threshold_db_hz`.
    pub fn is_weak(&self, threshold_db_hz: f64) -> bool {
        !self.valid || self.cn0 < threshold_db_hz
    }
}

impl std::fmt::Display for SatelliteRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "PRN {} ({})", self.prn, self.system)?;
        writeln!(
            f,
            "El: {:.1}° Az: {:.1}°",
            self.position.elevation_deg, self.position.azimuth_deg
        )?;
        writeln!(f, "CN0: {:.1} dB-Hz", self.cn0)?;
        writeln!(f, "Pos: {}", self.position_source)?;
        write!(f, "Valid: {}", if self.valid { "Yes" } else { "No" })
    }
}
