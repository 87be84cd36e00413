use log::debug;
use rstest::*;

use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::{
    prelude::{
        computed_position, fallback_position, Observation, PositionSource, ReceiverFix, System,
        TrackingStore,
    },
    tests::{init_logger, reference_epoch},
};

const SYSTEMS: [System; 7] = [
    System::GPS,
    System::Galileo,
    System::GLONASS,
    System::BeiDou,
    System::QZSS,
    System::IRNSS,
    System::Unknown,
];

fn elevation_band(system: System) -> (f64, f64) {
    match system {
        System::GPS => (5.0, 85.0),
        System::Galileo => (10.0, 80.0),
        System::GLONASS => (15.0, 75.0),
        System::BeiDou => (8.0, 82.0),
        _ => (30.0, 80.0),
    }
}

#[test]
fn fallback_is_always_in_range() {
    init_logger();

    for system in SYSTEMS {
        for prn in 0..=u8::MAX {
            let pos = fallback_position(prn, system);
            assert!(
                (20.0..=80.0).contains(&pos.elevation_deg),
                "{}({}): elevation {}",
                system,
                prn,
                pos.elevation_deg
            );
            assert!(
                (0.0..360.0).contains(&pos.azimuth_deg),
                "{}({}): azimuth {}",
                system,
                prn,
                pos.azimuth_deg
            );
        }
    }
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(42)]
fn computed_within_constellation_band(#[case] seed: u64) {
    init_logger();

    let mut rng = SmallRng::seed_from_u64(seed);

    for _ in 0..2000 {
        let system = SYSTEMS[rng.random_range(0..SYSTEMS.len())];
        let prn = rng.random_range(0..=u8::MAX);
        let lat = rng.random_range(-90.0..=90.0);
        let lon = rng.random_range(-180.0..=180.0);
        let gps_time = rng.random_range(-1.0E6..2.0E9);

        let pos = computed_position(prn, system, lat, lon, gps_time);
        let (min, max) = elevation_band(system);

        assert!(
            pos.elevation_deg >= min && pos.elevation_deg <= max,
            "{}({}) t={}: elevation {} out of [{}, {}]",
            system,
            prn,
            gps_time,
            pos.elevation_deg,
            min,
            max
        );
        assert!(
            (0.0..360.0).contains(&pos.azimuth_deg),
            "{}({}) t={}: azimuth {}",
            system,
            prn,
            gps_time,
            pos.azimuth_deg
        );
    }
}

/// Random batches: each cycle reports a random subset of channels,
/// possibly tracking other satellites, with or without real positions.
#[rstest]
#[case(7, 200)]
#[case(1234, 500)]
fn random_cycles(#[case] seed: u64, #[case] num_cycles: usize) {
    init_logger();

    let mut rng = SmallRng::seed_from_u64(seed);
    let mut store = TrackingStore::default();
    let max_missed = store.config().max_missed_updates;

    let codes = ["G", "E", "R", "C", "J", "I", "S"];

    for cycle in 0..num_cycles {
        if rng.random_bool(0.05) {
            let fix = ReceiverFix::new(
                rng.random_range(-90.0..=90.0),
                rng.random_range(-180.0..=180.0),
                rng.random_range(0.0..1000.0),
                rng.random_range(0.0..604_800.0),
            );
            store.update_receiver_context(&fix);
        }

        let batch = (0..rng.random_range(0..16))
            .map(|_| {
                let mut obs = Observation::new(
                    rng.random_range(0..12),
                    rng.random_range(1..40),
                    codes[rng.random_range(0..codes.len())],
                    "1C",
                    rng.random_range(0.0..55.0),
                    rng.random_bool(0.9),
                    reference_epoch(),
                );
                if rng.random_bool(0.3) {
                    // may be out of range on purpose
                    obs = obs.with_real_position(
                        rng.random_range(-10.0..100.0),
                        rng.random_range(-10.0..370.0),
                    );
                }
                if rng.random_bool(0.05) {
                    obs = obs.without_sampling();
                }
                obs
            })
            .collect::<Vec<_>>();

        let report = store.update(&batch);

        for record in store.iter() {
            assert_ne!(
                record.position_source(),
                PositionSource::None,
                "cycle #{}: unresolved ch#{}",
                cycle,
                record.channel_id()
            );
            assert!(
                record.is_position_valid(),
                "cycle #{}: invalid position on ch#{}",
                cycle,
                record.channel_id()
            );
            assert!(record.missed_updates() <= max_missed);
        }

        for channel_id in report.evicted.iter() {
            assert!(store.get(*channel_id).is_none());
            assert!(!batch
                .iter()
                .any(|obs| obs.channel_id == *channel_id && obs.sampling_rate_nonzero));
        }

        let stats = store.statistics();
        assert_eq!(stats.total, store.len());
        assert_eq!(stats.total, stats.real + stats.computed + stats.fallback);

        debug!("cycle #{}: {}", cycle, stats);
    }
}
