use crate::prelude::{ChannelId, Epoch, SkyPosition, System};

/// [Observation] of one receiver channel, as decoded from the receiver
/// monitoring stream. Use [Observation::new] then customize it.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Receiver channel
    pub channel_id: ChannelId,
    /// Satellite PRN number
    pub prn: u8,
    /// [System] code, as reported (for example "G" or "E")
    pub system: String,
    /// Signal (frequency band) label
    pub signal: String,
    /// Carrier to noise density ratio (dB-Hz)
    pub cn0: f64,
    /// Tracking lock validity
    pub valid: bool,
    /// False when the channel is not actively streaming (null sampling rate).
    /// Such observations are disregarded.
    pub sampling_rate_nonzero: bool,
    /// Receiver reported satellite position validity
    pub real_position_valid: bool,
    /// Receiver reported elevation (degrees)
    pub real_elevation: Option<f64>,
    /// Receiver reported azimuth (degrees)
    pub real_azimuth: Option<f64>,
    /// GNSS time of sampling (seconds), when known
    pub rx_time: Option<f64>,
    /// Sampling [Epoch]
    pub epoch: Epoch,
}

impl Observation {
    /// Basic [Observation] of an actively streaming channel,
    /// without any receiver reported satellite position.
    pub fn new(
        channel_id: ChannelId,
        prn: u8,
        system: &str,
        signal: &str,
        cn0: f64,
        valid: bool,
        epoch: Epoch,
    ) -> Self {
        Self {
            channel_id,
            prn,
            epoch,
            cn0,
            valid,
            system: system.to_string(),
            signal: signal.to_string(),
            sampling_rate_nonzero: true,
            real_position_valid: false,
            real_elevation: None,
            real_azimuth: None,
            rx_time: None,
        }
    }

    /// Copies and attaches the satellite position reported by the receiver.
    pub fn with_real_position(&self, elevation_deg: f64, azimuth_deg: f64) -> Self {
        let mut s = self.clone();
        s.real_position_valid = true;
        s.real_elevation = Some(elevation_deg);
        s.real_azimuth = Some(azimuth_deg);
        s
    }

    /// Copies and defines the GNSS time of sampling, in seconds.
    pub fn with_rx_time(&self, rx_time_s: f64) -> Self {
        let mut s = self.clone();
        s.rx_time = Some(rx_time_s);
        s
    }

    /// Copies and marks this channel as not streaming.
    pub fn without_sampling(&self) -> Self {
        let mut s = self.clone();
        s.sampling_rate_nonzero = false;
        s
    }

    /// [System] this observation refers to
    pub fn system(&self) -> System {
        System::from_code(&self.system)
    }

    /// Receiver reported position, when flagged valid and fully described.
    /// The range is not verified here.
    pub fn real_position(&self) -> Option<SkyPosition> {
        if !self.real_position_valid {
            return None;
        }
        let elevation = self.real_elevation?;
        let azimuth = self.real_azimuth?;
        Some(SkyPosition::new(elevation, azimuth))
    }
}
