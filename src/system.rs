//! GNSS system (constellation) identification
use crate::prelude::{Constellation, Error, SV};

#[cfg(feature = "serde")]
use serde::Serialize;

/// [System] a tracked satellite belongs to, as reported by the
/// receiver with a single letter code.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum System {
    /// American constellation ("G")
    GPS,
    /// European constellation ("E")
    Galileo,
    /// Russian constellation ("R")
    GLONASS,
    /// Chinese constellation ("C")
    BeiDou,
    /// Japanese regional system ("J")
    QZSS,
    /// Indian regional system ("I")
    IRNSS,
    /// Any unrecognized code
    #[default]
    Unknown,
}

impl System {
    /// Builds a [System] from the receiver code. This never fails:
    /// unrecognized codes are mapped to [System::Unknown].
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "G" => Self::GPS,
            "E" => Self::Galileo,
            "R" => Self::GLONASS,
            "C" => Self::BeiDou,
            "J" => Self::QZSS,
            "I" => Self::IRNSS,
            _ => Self::Unknown,
        }
    }

    /// Single letter code, "?" for [System::Unknown]
    pub fn code(&self) -> &'static str {
        match self {
            Self::GPS => "G",
            Self::Galileo => "E",
            Self::GLONASS => "R",
            Self::BeiDou => "C",
            Self::QZSS => "J",
            Self::IRNSS => "I",
            Self::Unknown => "?",
        }
    }

    /// Human readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::GPS => "GPS",
            Self::Galileo => "Galileo",
            Self::GLONASS => "GLONASS",
            Self::BeiDou => "BeiDou",
            Self::QZSS => "QZSS",
            Self::IRNSS => "IRNSS",
            Self::Unknown => "Unknown",
        }
    }

    /// Converts to [Constellation], when this [System] is identified.
    pub fn constellation(&self) -> Option<Constellation> {
        match self {
            Self::GPS => Some(Constellation::GPS),
            Self::Galileo => Some(Constellation::Galileo),
            Self::GLONASS => Some(Constellation::Glonass),
            Self::BeiDou => Some(Constellation::BeiDou),
            Self::QZSS => Some(Constellation::QZSS),
            Self::IRNSS => Some(Constellation::IRNSS),
            Self::Unknown => None,
        }
    }

    /// Forms the [SV] identity of satellite numbered `prn` within this [System].
    pub fn sv(&self, prn: u8) -> Option<SV> {
        let constellation = self.constellation()?;
        Some(SV::new(constellation, prn))
    }
}

impl From<Constellation> for System {
    fn from(constellation: Constellation) -> Self {
        match constellation {
            Constellation::GPS => Self::GPS,
            Constellation::Galileo => Self::Galileo,
            Constellation::Glonass => Self::GLONASS,
            Constellation::BeiDou => Self::BeiDou,
            Constellation::QZSS => Self::QZSS,
            Constellation::IRNSS => Self::IRNSS,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for System {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for System {
    type Err = Error;

    /// Strict parsing: the code must be a single letter,
    /// yet unrecognized letters still map to [System::Unknown].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => Ok(Self::from_code(trimmed)),
            _ => Err(Error::InvalidSystemCode(s.to_string())),
        }
    }
}
