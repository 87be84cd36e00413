#![doc = include_str!("../README.md")]
#![cfg_attr(docrs, feature(doc_cfg))]

extern crate gnss_rs as gnss;

// private modules
mod approx;
mod cfg;
mod constants;
mod error;
mod observation;
mod position;
mod receiver;
mod record;
mod statistics;
mod system;
mod tracker;

#[cfg(test)]
mod tests;

// prelude
pub mod prelude {
    pub use crate::approx::{computed_position, fallback_position};
    pub use crate::cfg::Config;
    pub use crate::error::Error;
    pub use crate::observation::Observation;
    pub use crate::position::SkyPosition;
    pub use crate::receiver::{ReceiverContext, ReceiverFix};
    pub use crate::record::{ChannelId, PositionSource, SatelliteRecord};
    pub use crate::statistics::Statistics;
    pub use crate::system::System;
    pub use crate::tracker::{CycleReport, TrackingStore};
    // re-export
    pub use gnss::prelude::{Constellation, SV};
    pub use hifitime::{Duration, Epoch, TimeScale};
}

// pub export
pub use error::Error;
