//! Observation records
use crate::{
    epoch::EpochFlag,
    header::{HeaderV2, HeaderV3},
    prelude::{Epoch, Observable, SV},
};
use std::collections::{BTreeMap, HashMap};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod lli;
mod snr;

pub use lli::LliFlags;
pub use snr::SNR;

/// One measurement with its quality flags
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObsDatum {
    /// Observed value, None for a blank field
    pub value: Option<f64>,
    /// Loss of lock indicator
    pub lli: Option<LliFlags>,
    /// Signal strength indicator
    pub ssi: Option<SNR>,
}

impl ObsDatum {
    pub fn new(value: f64) -> Self {
        Self {
            value: Some(value),
            lli: None,
            ssi: None,
        }
    }
    /// Blank field, used to keep columns aligned
    pub fn blank() -> Self {
        Self::default()
    }
    pub fn is_blank(&self) -> bool {
        self.value.is_none()
    }
    pub fn with_lli(&self, lli: LliFlags) -> Self {
        let mut s = *self;
        s.lli = Some(lli);
        s
    }
    pub fn with_ssi(&self, ssi: SNR) -> Self {
        let mut s = *self;
        s.ssi = Some(ssi);
        s
    }
}

/// One RINEX-2 epoch. Measurements are indexed by [Observable],
/// the column order being the one of the [HeaderV2].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObsRecordV2 {
    pub epoch: Epoch,
    pub flag: EpochFlag,
    /// Number of satellites (or of header records, for event epochs)
    pub num_sv: u16,
    /// Receiver clock offset (s)
    pub clock_offset: Option<f64>,
    /// Header records following an event epoch
    pub aux_header: Option<Box<HeaderV2>>,
    #[cfg_attr(feature = "serde", serde(with = "crate::sv::sv_keyed"))]
    pub obs: BTreeMap<SV, HashMap<Observable, ObsDatum>>,
}

impl ObsRecordV2 {
    pub fn new(epoch: Epoch) -> Self {
        Self {
            epoch,
            ..Default::default()
        }
    }
    /// Adds one measurement, creating the satellite entry if needed
    pub fn with_observation(&self, sv: SV, observable: Observable, datum: ObsDatum) -> Self {
        let mut s = self.clone();
        s.obs.entry(sv).or_default().insert(observable, datum);
        s.num_sv = s.obs.len() as u16;
        s
    }
}

/// One RINEX-3 epoch. Measurements are listed in the order
/// the [HeaderV3] declares for the satellite's system.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObsRecordV3 {
    pub epoch: Epoch,
    pub flag: EpochFlag,
    /// Number of satellites (or of header records, for event epochs)
    pub num_sv: u16,
    /// Receiver clock offset (s)
    pub clock_offset: Option<f64>,
    /// Header records following an event epoch
    pub aux_header: Option<Box<HeaderV3>>,
    #[cfg_attr(feature = "serde", serde(with = "crate::sv::sv_keyed"))]
    pub obs: BTreeMap<SV, Vec<ObsDatum>>,
}

impl ObsRecordV3 {
    pub fn new(epoch: Epoch) -> Self {
        Self {
            epoch,
            ..Default::default()
        }
    }
    pub fn with_observations(&self, sv: SV, data: Vec<ObsDatum>) -> Self {
        let mut s = self.clone();
        s.obs.insert(sv, data);
        s.num_sv = s.obs.len() as u16;
        s
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::prelude::Constellation;
    use std::str::FromStr;
    #[test]
    fn datum() {
        let datum = ObsDatum::new(20243517.560)
            .with_lli(LliFlags::UNDER_ANTI_SPOOFING)
            .with_ssi(SNR::from(7));
        assert_eq!(datum.value, Some(20243517.560));
        assert_eq!(datum.lli, Some(LliFlags::UNDER_ANTI_SPOOFING));
        assert_eq!(datum.ssi, Some(SNR::DbHz42_47));
        assert!(!datum.is_blank());
        assert!(ObsDatum::blank().is_blank());
    }
    #[test]
    fn records() {
        let g01 = SV::new(Constellation::GPS, 1);
        let r09 = SV::new(Constellation::Glonass, 9);
        let c1 = Observable::from_str("C1").unwrap();
        let record = ObsRecordV2::new(Epoch::default())
            .with_observation(g01, c1.clone(), ObsDatum::new(1.0))
            .with_observation(g01, Observable::from_str("L1").unwrap(), ObsDatum::new(2.0))
            .with_observation(r09, c1.clone(), ObsDatum::new(3.0));
        assert_eq!(record.num_sv, 2);
        assert_eq!(record.obs[&g01].len(), 2);
        assert_eq!(record.obs[&r09][&c1].value, Some(3.0));

        let record = ObsRecordV3::new(Epoch::default())
            .with_observations(g01, vec![ObsDatum::new(1.0), ObsDatum::blank()]);
        assert_eq!(record.num_sv, 1);
        assert!(record.obs[&g01][1].is_blank());
    }
}
