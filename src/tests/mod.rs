mod fuzz;

use log::LevelFilter;
use std::sync::Once;

use crate::prelude::{ChannelId, Epoch, Observation};

static INIT: Once = Once::new();

pub fn init_logger() {
    INIT.call_once(|| {
        env_logger::builder()
            .is_test(true)
            .filter_level(LevelFilter::Debug)
            .init();
    });
}

/// Reference [Epoch] of the test cycles
pub fn reference_epoch() -> Epoch {
    Epoch::from_gpst_seconds(1_400_000_000.0)
}

/// Healthy [Observation] without any receiver reported position
pub fn observation(channel_id: ChannelId, prn: u8, system: &str) -> Observation {
    Observation::new(channel_id, prn, system, "1C", 40.0, true, reference_epoch())
}
