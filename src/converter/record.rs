//! Record conversion
use super::RinexConverter;
use crate::{
    error::Error,
    header::{HeaderV2, HeaderV3},
    observation::{ObsDatum, ObsRecordV2, ObsRecordV3},
    prelude::{Observable, SV},
    sv::system,
};
use std::collections::{BTreeMap, HashMap};

#[cfg(feature = "log")]
use log::{error, warn};

impl<'a> RinexConverter<'a> {
    /// Converts one RINEX-2 epoch to RINEX-3.
    ///
    /// For each satellite, the header observables are visited in declared
    /// order and only those valid for the satellite's system are kept, so
    /// the resulting list matches [Self::header_to_v3] column for column.
    /// A declared measurement missing from the record becomes a blank
    /// [ObsDatum]. The record must not hold observables the header does
    /// not declare.
    pub fn record_to_v3(&self, src: &ObsRecordV2, header: &HeaderV2) -> Result<ObsRecordV3, Error> {
        if src.obs.is_empty() && !is_event_record(src.flag, src.aux_header.is_some()) {
            return Err(Error::EmptyInput);
        }

        let mut obs = BTreeMap::<SV, Vec<ObsDatum>>::new();

        for (sv, measurements) in src.obs.iter() {
            if let Some(undeclared) = measurements.keys().find(|obs| header.column(obs).is_none()) {
                #[cfg(feature = "log")]
                error!("{}({}): undeclared observable {}", src.epoch, sv, undeclared);
                return Err(Error::UndeclaredObservable(*sv, undeclared.clone()));
            }

            if !self.is_supported(sv.constellation) {
                #[cfg(feature = "log")]
                warn!("{}({}): unsupported system", src.epoch, sv);
                continue;
            }

            let list = header
                .observables
                .iter()
                .filter(|observable| self.converts_to_v3(sv, observable))
                .map(|observable| measurements.get(observable).copied().unwrap_or_default())
                .collect::<Vec<_>>();

            obs.insert(*sv, list);
        }

        let aux_header = match (&src.aux_header, src.flag.is_event()) {
            (Some(aux), true) => Some(Box::new(self.header_to_v3(aux)?)),
            _ => None,
        };

        Ok(ObsRecordV3 {
            epoch: src.epoch,
            flag: src.flag,
            num_sv: src.num_sv,
            clock_offset: src.clock_offset,
            aux_header,
            obs,
        })
    }

    /// True if this RINEX-2 column exists in the RINEX-3 list of this satellite
    fn converts_to_v3(&self, sv: &SV, observable: &Observable) -> bool {
        let code2 = observable.as_str();
        self.map.is_valid_for(sv.constellation, code2) && self.map.to_rinex3(code2).is_ok()
    }

    /// Converts one RINEX-3 epoch to RINEX-2.
    ///
    /// Measurements are moved to the column of their RINEX-2 code
    /// (see [Self::merge_observables]). When two RINEX-3 observables share
    /// a RINEX-2 code, the first one holding a value wins.
    /// Each satellite must provide exactly as many measurements as its
    /// system declares in the header.
    pub fn record_to_v2(&self, src: &ObsRecordV3, header: &HeaderV3) -> Result<ObsRecordV2, Error> {
        if src.obs.is_empty() && !is_event_record(src.flag, src.aux_header.is_some()) {
            return Err(Error::EmptyInput);
        }

        // translation of each system's list, computed once
        let mut translated = HashMap::<_, Vec<Observable>>::new();
        let mut obs = BTreeMap::<SV, HashMap<Observable, ObsDatum>>::new();

        for (sv, data) in src.obs.iter() {
            let constellation = system(sv.constellation);
            let list = header
                .system_observables(constellation)
                .ok_or(Error::MissingSystemObservables(constellation))?;

            if list.len() != data.len() {
                #[cfg(feature = "log")]
                error!(
                    "{}({}): {} observables declared, {} measurements",
                    src.epoch,
                    sv,
                    list.len(),
                    data.len()
                );
                return Err(Error::StructuralMismatch {
                    sv: *sv,
                    expected: list.len(),
                    found: data.len(),
                });
            }

            if !translated.contains_key(&constellation) {
                let codes = list
                    .iter()
                    .map(|observable| self.observable_to_rinex2(observable))
                    .collect::<Result<Vec<_>, _>>()?;
                translated.insert(constellation, codes);
            }

            let mut measurements = HashMap::<Observable, ObsDatum>::new();
            if let Some(codes) = translated.get(&constellation) {
                for (rinex2, datum) in codes.iter().zip(data.iter()) {
                    if datum.is_blank() {
                        continue;
                    }
                    measurements.entry(rinex2.clone()).or_insert(*datum);
                }
            }

            obs.insert(*sv, measurements);
        }

        let aux_header = match (&src.aux_header, src.flag.is_event()) {
            (Some(aux), true) => Some(Box::new(self.header_to_v2(aux)?)),
            _ => None,
        };

        Ok(ObsRecordV2 {
            epoch: src.epoch,
            flag: src.flag,
            num_sv: src.num_sv,
            clock_offset: src.clock_offset,
            aux_header,
            obs,
        })
    }
}

/// Event epochs may only carry header records
fn is_event_record(flag: crate::epoch::EpochFlag, has_aux_header: bool) -> bool {
    flag.is_event() && has_aux_header
}
