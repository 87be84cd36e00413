use thiserror::Error;

/// Errors only exist at the configuration and parsing boundary:
/// observation ingestion and sky position approximation are total.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The receiver displacement threshold must be a finite, positive or null, angle.
    #[error("invalid position recompute epsilon: {0}")]
    InvalidRecomputeEpsilon(f64),

    /// The weak signal threshold must be a finite, positive or null, CN0.
    #[error("invalid weak signal threshold: {0} dB-Hz")]
    InvalidWeakSignalThreshold(f64),

    /// The update cadence cannot be negative.
    #[error("update interval cannot be negative")]
    NegativeUpdateInterval,

    #[error("unknown position source \"{0}\"")]
    UnknownPositionSource(String),

    /// Strict parsing of a constellation code expects a single letter.
    #[error("invalid system code \"{0}\"")]
    InvalidSystemCode(String),
}
