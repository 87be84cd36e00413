//! Satellite tracking and sky position resolution
use std::collections::{btree_map::Entry, BTreeMap};

use log::{debug, trace, warn};

use crate::{
    approx::{computed_position, fallback_position},
    prelude::{
        ChannelId, Config, Error, Observation, PositionSource, ReceiverContext, ReceiverFix,
        SatelliteRecord, SkyPosition, Statistics,
    },
};

/// [CycleReport] summarizes what happened to the channels during one
/// update cycle. It is returned by [TrackingStore::end_cycle].
#[derive(Default, Debug, Clone, PartialEq)]
pub struct CycleReport {
    /// Channels seen for the first time
    pub created: Vec<ChannelId>,
    /// Channels now tracking a different PRN
    pub reassigned: Vec<ChannelId>,
    /// Channels dropped for missing too many cycles
    pub evicted: Vec<ChannelId>,
}

/// [TrackingStore] maintains one [SatelliteRecord] per receiver channel
/// and resolves the sky position of each satellite from the best
/// source available (by order of preference):
/// 1. the position reported by the receiver ([PositionSource::Real])
/// 2. an approximation based on the receiver location ([PositionSource::Computed])
/// 3. a PRN based pattern ([PositionSource::Fallback])
///
/// The store is driven by cycles: [TrackingStore::begin_cycle],
/// [TrackingStore::ingest] for each observation of the batch, then
/// [TrackingStore::end_cycle]. All mutations require exclusive access
/// and nothing in here blocks: wrap the store in a single lock held
/// for the whole cycle if it needs to be shared between threads.
///
/// Hovered and selected satellites are designated by [ChannelId] and
/// resolved on each access, they vanish with the evicted channel.
#[derive(Debug, Clone)]
pub struct TrackingStore {
    /// [Config] preset
    cfg: Config,
    /// Records, by channel
    records: BTreeMap<ChannelId, SatelliteRecord>,
    /// Latest receiver location
    receiver: ReceiverContext,
    /// Latest [Statistics]
    statistics: Statistics,
    /// Ongoing cycle report
    report: CycleReport,
    hovered: Option<ChannelId>,
    selected: Option<ChannelId>,
}

impl Default for TrackingStore {
    fn default() -> Self {
        Self::allocate(Config::default())
    }
}

impl TrackingStore {
    /// Creates a new [TrackingStore] from a [Config] preset,
    /// which needs to be valid.
    pub fn new(cfg: Config) -> Result<Self, Error> {
        cfg.validate()?;
        Ok(Self::allocate(cfg))
    }

    fn allocate(cfg: Config) -> Self {
        Self {
            cfg,
            records: BTreeMap::new(),
            receiver: ReceiverContext::default(),
            statistics: Statistics::default(),
            report: CycleReport::default(),
            hovered: None,
            selected: None,
        }
    }

    /// Marks every channel as not seen yet, in the new cycle.
    pub fn begin_cycle(&mut self) {
        for record in self.records.values_mut() {
            record.seen_this_cycle = false;
        }
    }

    /// Ingests one [Observation] of the ongoing cycle, returning the
    /// [PositionSource] we were able to resolve, or None if this
    /// observation was disregarded (channel not streaming).
    pub fn ingest(&mut self, observation: &Observation) -> Option<PositionSource> {
        let channel_id = observation.channel_id;

        if !observation.sampling_rate_nonzero {
            trace!("ch#{} - not streaming", channel_id);
            return None;
        }

        let prn = observation.prn;
        let system = observation.system();
        let epoch = observation.epoch;

        let record = match self.records.entry(channel_id) {
            Entry::Occupied(entry) => {
                let record = entry.into_mut();
                if record.prn != prn {
                    debug!(
                        "{} - ch#{} reassigned from PRN {} to PRN {}",
                        epoch, channel_id, record.prn, prn
                    );
                    record.position_source = PositionSource::None;
                    self.report.reassigned.push(channel_id);
                }
                record
            },
            Entry::Vacant(entry) => {
                debug!(
                    "{} - ch#{} new satellite PRN {} ({})",
                    epoch, channel_id, prn, system
                );
                self.report.created.push(channel_id);
                entry.insert(SatelliteRecord::new(channel_id, epoch))
            },
        };

        record.prn = prn;
        record.system = system;
        record.signal = observation.signal.clone();
        record.cn0 = observation.cn0.max(0.0);
        record.valid = observation.valid;
        record.seen_this_cycle = true;
        record.missed_updates = 0;
        record.last_seen = epoch;
        record.pending_resolution = false;

        let (position, source) = Self::candidate_position(&self.receiver, observation);

        if position.in_range() {
            if source == PositionSource::Real && record.position_source != PositionSource::Real {
                debug!(
                    "{} - ch#{} PRN {} now using real position (el={:.1}° az={:.1}°)",
                    epoch, channel_id, prn, position.elevation_deg, position.azimuth_deg
                );
            }
            record.position = position;
            record.position_source = source;
        } else if record.position_source == PositionSource::None {
            // no established position: the PRN pattern is always in range
            record.position = fallback_position(prn, system);
            record.position_source = PositionSource::Fallback;
        }

        Some(record.position_source)
    }

    /// Best [SkyPosition] candidate for this [Observation]
    fn candidate_position(
        receiver: &ReceiverContext,
        observation: &Observation,
    ) -> (SkyPosition, PositionSource) {
        let prn = observation.prn;
        let system = observation.system();

        if let Some(real) = observation.real_position() {
            if real.in_range() {
                return (real, PositionSource::Real);
            }
            warn!(
                "{} - ch#{} invalid real position for PRN {} (el={} az={})",
                observation.epoch,
                observation.channel_id,
                prn,
                real.elevation_deg,
                real.azimuth_deg
            );
        }

        if receiver.has_position() {
            let gps_time = observation.rx_time.unwrap_or(receiver.gps_time());
            let computed = computed_position(
                prn,
                system,
                receiver.latitude(),
                receiver.longitude(),
                gps_time,
            );
            (computed, PositionSource::Computed)
        } else {
            (fallback_position(prn, system), PositionSource::Fallback)
        }
    }

    /// Concludes the ongoing cycle: channels that were not seen
    /// accumulate one more missed update and are dropped once they missed
    /// more than [Config::max_missed_updates] consecutive cycles.
    /// [Statistics] are refreshed.
    pub fn end_cycle(&mut self) -> CycleReport {
        let max_missed_updates = self.cfg.max_missed_updates;
        let mut evicted = Vec::new();

        self.records.retain(|channel_id, record| {
            if record.seen_this_cycle {
                return true;
            }

            record.missed_updates += 1;

            if record.missed_updates > max_missed_updates {
                debug!(
                    "ch#{} - removing stale satellite PRN {} ({})",
                    channel_id, record.prn, record.system
                );
                evicted.push(*channel_id);
                false
            } else {
                true
            }
        });

        if self.hovered.is_some_and(|ch| evicted.contains(&ch)) {
            self.hovered = None;
        }
        if self.selected.is_some_and(|ch| evicted.contains(&ch)) {
            self.selected = None;
        }

        self.statistics = Statistics::from_records(self.records.values());

        let mut report = std::mem::take(&mut self.report);
        report.evicted = evicted;
        report
    }

    /// Runs a complete cycle over this batch of [Observation]s.
    pub fn update<'a>(&mut self, batch: impl IntoIterator<Item = &'a Observation>) -> CycleReport {
        self.begin_cycle();
        for observation in batch {
            self.ingest(observation);
        }
        self.end_cycle()
    }

    /// Runs an empty cycle: every channel misses one update.
    pub fn clear_stale(&mut self) -> CycleReport {
        self.update(std::iter::empty())
    }

    /// Applies a new [ReceiverFix]. Returns false when the fix is rejected:
    /// out of range coordinates or degenerate (0°, 0°) reading.
    ///
    /// When the receiver moved, approximated positions are flagged
    /// ([SatelliteRecord::pending_resolution]) and resolved again by the
    /// next observation of each channel: they are not recomputed here
    /// because the observations they derive from are not retained.
    /// [PositionSource::Real] positions do not depend on the receiver location.
    pub fn update_receiver_context(&mut self, fix: &ReceiverFix) -> bool {
        match self
            .receiver
            .apply(fix, self.cfg.position_recompute_epsilon)
        {
            None => {
                warn!(
                    "rejected receiver fix (lat={} lon={})",
                    fix.latitude, fix.longitude
                );
                false
            },
            Some(changed) => {
                if changed {
                    debug!("receiver position updated: {}", self.receiver);
                    for record in self.records.values_mut() {
                        if record.position_source.is_approximated() {
                            record.pending_resolution = true;
                        }
                    }
                }
                true
            },
        }
    }

    /// Drops all channels. The receiver context is preserved.
    pub fn clear(&mut self) {
        debug!("clearing all satellite data");
        self.records.clear();
        self.statistics = Statistics::default();
        self.report = CycleReport::default();
        self.hovered = None;
        self.selected = None;
    }

    /// Iterates all [SatelliteRecord]s, by ascending [ChannelId].
    pub fn iter(&self) -> impl Iterator<Item = &SatelliteRecord> + '_ {
        self.records.values()
    }

    /// [SatelliteRecord] of this channel
    pub fn get(&self, channel_id: ChannelId) -> Option<&SatelliteRecord> {
        self.records.get(&channel_id)
    }

    /// Owned copy of all [SatelliteRecord]s, for presentation layers.
    pub fn snapshot(&self) -> Vec<SatelliteRecord> {
        self.records.values().cloned().collect()
    }

    /// Number of tracked channels
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn receiver(&self) -> &ReceiverContext {
        &self.receiver
    }

    /// [Statistics] as of the latest completed cycle
    pub fn statistics(&self) -> Statistics {
        self.statistics
    }

    /// Channels whose signal is weak, with respect to [Config::weak_cn0_db_hz]
    pub fn weak_channels(&self) -> impl Iterator<Item = ChannelId> + '_ {
        self.records
            .values()
            .filter(|record| record.is_weak(self.cfg.weak_cn0_db_hz))
            .map(|record| record.channel_id)
    }

    /// Hit testing. Screen geometry is unknown to us: `hit` tells
    /// whether a [SatelliteRecord] is located under the pointer.
    /// Only records with a valid position are proposed.
    pub fn find_at<F: Fn(&SatelliteRecord) -> bool>(&self, hit: F) -> Option<ChannelId> {
        self.records
            .values()
            .filter(|record| record.is_position_valid())
            .find(|&record| hit(record))
            .map(|record| record.channel_id)
    }

    /// Designates the hovered channel (None to clear).
    /// Returns false if this channel is not tracked.
    pub fn set_hovered(&mut self, channel_id: Option<ChannelId>) -> bool {
        Self::designate(&self.records, &mut self.hovered, channel_id)
    }

    /// Designates the selected channel (None to clear).
    /// Returns false if this channel is not tracked.
    pub fn set_selected(&mut self, channel_id: Option<ChannelId>) -> bool {
        Self::designate(&self.records, &mut self.selected, channel_id)
    }

    fn designate(
        records: &BTreeMap<ChannelId, SatelliteRecord>,
        target: &mut Option<ChannelId>,
        channel_id: Option<ChannelId>,
    ) -> bool {
        match channel_id {
            Some(ch) if !records.contains_key(&ch) => false,
            _ => {
                *target = channel_id;
                true
            },
        }
    }

    pub fn hovered(&self) -> Option<&SatelliteRecord> {
        self.hovered.and_then(|ch| self.records.get(&ch))
    }

    pub fn selected(&self) -> Option<&SatelliteRecord> {
        self.selected.and_then(|ch| self.records.get(&ch))
    }
}

#[cfg(test)]
mod test {
    use super::TrackingStore;
    use crate::{
        approx::computed_position,
        prelude::{Config, Epoch, Observation, PositionSource, ReceiverFix, System},
    };

    fn t0() -> Epoch {
        Epoch::from_gpst_seconds(1000.0)
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = Config::default().with_position_recompute_epsilon(f64::NAN);
        assert!(TrackingStore::new(cfg).is_err());
        assert!(TrackingStore::new(Config::default()).is_ok());
    }

    #[test]
    fn non_streaming_channels_are_ignored() {
        let mut store = TrackingStore::default();
        let obs = Observation::new(2, 4, "G", "1C", 40.0, true, t0()).without_sampling();

        store.begin_cycle();
        assert_eq!(store.ingest(&obs), None);
        let report = store.end_cycle();

        assert!(store.is_empty());
        assert!(report.created.is_empty());
    }

    #[test]
    fn negative_cn0_is_coerced() {
        let mut store = TrackingStore::default();
        let obs = Observation::new(0, 4, "G", "1C", -3.0, true, t0());
        store.update([&obs]);
        assert_eq!(store.get(0).unwrap().cn0(), 0.0);
        assert_eq!(store.weak_channels().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn out_of_range_real_position_degrades_tier() {
        let mut store = TrackingStore::default();
        let obs = Observation::new(1, 8, "E", "1B", 44.0, true, t0());

        let real = obs.with_real_position(33.0, 120.0);
        assert_eq!(store.ingest(&real), Some(PositionSource::Real));

        // invalid real data falls back to the PRN pattern (in range)
        let bad = obs.with_real_position(95.0, 120.0);
        assert_eq!(store.ingest(&bad), Some(PositionSource::Fallback));
    }

    #[test]
    fn computed_tier_uses_observation_time() {
        let mut store = TrackingStore::default();
        assert!(store.update_receiver_context(&ReceiverFix::new(45.0, 5.0, 0.0, 0.0)));

        let obs = Observation::new(1, 3, "G", "1C", 44.0, true, t0());
        store.ingest(&obs.with_rx_time(7200.0));
        let at_rx_time = store.get(1).unwrap().sky_position();

        store.ingest(&obs);
        let at_fix_time = store.get(1).unwrap().sky_position();

        assert_eq!(
            at_rx_time,
            computed_position(3, System::GPS, 45.0, 5.0, 7200.0)
        );
        assert_eq!(at_fix_time, computed_position(3, System::GPS, 45.0, 5.0, 0.0));
    }

    #[test]
    fn selection_is_resolved_by_channel() {
        let mut store = TrackingStore::new(Config::default().with_max_missed_updates(0)).unwrap();
        let obs = Observation::new(6, 11, "C", "B1", 39.0, true, t0());
        store.update([&obs]);

        assert!(!store.set_hovered(Some(7)), "unknown channel");
        assert!(store.set_hovered(Some(6)));
        assert!(store.set_selected(Some(6)));
        assert_eq!(store.hovered().map(|rec| rec.prn()), Some(11));

        let hit = store.find_at(|rec| rec.prn() == 11);
        assert_eq!(hit, Some(6));
        assert_eq!(store.find_at(|_| false), None);

        let report = store.clear_stale();
        assert_eq!(report.evicted, vec![6]);
        assert!(store.hovered().is_none());
        assert!(store.selected().is_none());

        assert!(store.set_selected(None));
    }
}
