//! Navigation message identification
use crate::{
    lnav::{SUBFRAME_WORDS, WORD_MASK},
    prelude::{Constellation, Epoch, SV},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Carrier signal the message was demodulated from
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Carrier {
    #[default]
    L1,
    L2,
    L5,
}

impl std::fmt::Display for Carrier {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::L1 => write!(f, "L1"),
            Self::L2 => write!(f, "L2"),
            Self::L5 => write!(f, "L5"),
        }
    }
}

/// Ranging code the message was demodulated from
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TrackingCode {
    /// Coarse / Acquisition
    #[default]
    CA,
    /// Precise code
    P,
    /// Encrypted precise code
    Y,
    /// L2C medium length code
    L2CM,
}

impl std::fmt::Display for TrackingCode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::CA => write!(f, "C/A"),
            Self::P => write!(f, "P"),
            Self::Y => write!(f, "Y"),
            Self::L2CM => write!(f, "L2CM"),
        }
    }
}

/// [NavFilterKey] identifies one candidate navigation message:
/// who received it, who transmitted it, on which signal and when.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavFilterKey {
    /// Station the receiver belongs to
    pub station_id: String,
    /// Receiver identifier, within the station
    pub rx_id: String,
    /// Transmitting satellite
    pub sv: SV,
    pub carrier: Carrier,
    pub code: TrackingCode,
    /// Transmission time of the message start
    pub timestamp: Epoch,
}

impl Default for NavFilterKey {
    fn default() -> Self {
        Self {
            station_id: Default::default(),
            rx_id: Default::default(),
            sv: SV::new(Constellation::GPS, 1),
            carrier: Default::default(),
            code: Default::default(),
            timestamp: Default::default(),
        }
    }
}

impl NavFilterKey {
    pub fn new(sv: SV, timestamp: Epoch) -> Self {
        Self {
            sv,
            timestamp,
            ..Default::default()
        }
    }
    pub fn with_station(&self, station_id: &str) -> Self {
        let mut s = self.clone();
        s.station_id = station_id.to_string();
        s
    }
    pub fn with_receiver(&self, rx_id: &str) -> Self {
        let mut s = self.clone();
        s.rx_id = rx_id.to_string();
        s
    }
    pub fn with_signal(&self, carrier: Carrier, code: TrackingCode) -> Self {
        let mut s = self.clone();
        s.carrier = carrier;
        s.code = code;
        s
    }
    /// Signal identity, used to compare messages across sources
    pub fn signal(&self) -> (SV, Carrier, TrackingCode) {
        (self.sv, self.carrier, self.code)
    }
    /// Signal identity as seen by one receiver
    pub fn source(&self) -> (String, String, SV, Carrier, TrackingCode) {
        (
            self.station_id.clone(),
            self.rx_id.clone(),
            self.sv,
            self.carrier,
            self.code,
        )
    }
}

impl std::fmt::Display for NavFilterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} {}:{} {} {} {}",
            self.timestamp, self.station_id, self.rx_id, self.sv, self.carrier, self.code
        )
    }
}

/// One GPS LNAV subframe candidate
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LNavFilterData {
    pub key: NavFilterKey,
    /// 10 words, 30 bits right justified
    pub subframe: [u32; SUBFRAME_WORDS],
}

impl LNavFilterData {
    pub fn new(key: NavFilterKey, subframe: [u32; SUBFRAME_WORDS]) -> Self {
        Self { key, subframe }
    }
    /// Message content, bits above the 30 word bits ignored
    pub fn content(&self) -> [u32; SUBFRAME_WORDS] {
        let mut content = self.subframe;
        for word in content.iter_mut() {
            *word &= WORD_MASK;
        }
        content
    }
}
