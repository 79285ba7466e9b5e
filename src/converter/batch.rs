//! Whole file conversion
use super::{ConversionReport, ObservedSystems, RinexConverter};
use crate::{
    error::Error,
    header::{HeaderV2, HeaderV3},
    observation::{ObsRecordV2, ObsRecordV3},
};

#[cfg(feature = "log")]
use log::{debug, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// RINEX-2 observation file
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObsFileV2 {
    pub header: HeaderV2,
    pub records: Vec<ObsRecordV2>,
}

/// RINEX-3 observation file
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObsFileV3 {
    pub header: HeaderV3,
    pub records: Vec<ObsRecordV3>,
}

/// Observation file of either revision
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ObservationFile {
    V2(ObsFileV2),
    V3(ObsFileV3),
}

impl ObservationFile {
    /// Converts to the other revision
    pub fn convert(
        &self,
        converter: &RinexConverter,
    ) -> Result<(ObservationFile, ConversionReport), Error> {
        match self {
            Self::V2(file) => {
                let (converted, report) = converter.file_to_v3(file)?;
                Ok((Self::V3(converted), report))
            },
            Self::V3(file) => {
                let (converted, report) = converter.file_to_v2(file)?;
                Ok((Self::V2(converted), report))
            },
        }
    }
}

impl<'a> RinexConverter<'a> {
    /// Converts a complete RINEX-2 file. Records without satellites are
    /// skipped and counted, structural errors abort. Systems that were never
    /// observed are removed from the resulting header.
    pub fn file_to_v3(&self, src: &ObsFileV2) -> Result<(ObsFileV3, ConversionReport), Error> {
        let mut report = ConversionReport::default();

        for observable in src.header.observables.iter() {
            if self.map.to_rinex3(observable.as_str()).is_err() {
                report.unknown_codes.insert(observable.to_string());
            }
        }

        let mut header = self.header_to_v3(&src.header)?;
        let mut observed = ObservedSystems::default();
        let mut records = Vec::with_capacity(src.records.len());

        for record in src.records.iter() {
            match self.record_to_v3(record, &src.header) {
                Ok(converted) => {
                    observed.extend(converted.obs.keys());
                    records.push(converted);
                    report.converted += 1;
                },
                Err(e) if e.is_recoverable() => {
                    #[cfg(feature = "log")]
                    warn!("{}: {}", record.epoch, e);
                    report.skipped += 1;
                },
                Err(e) => return Err(e),
            }
        }

        if report.converted > 0 {
            self.prune_absent_systems(&mut header, &observed);
        }

        #[cfg(feature = "log")]
        debug!("rinex3 conversion: {}", report);

        Ok((ObsFileV3 { header, records }, report))
    }

    /// Converts a complete RINEX-3 file.
    pub fn file_to_v2(&self, src: &ObsFileV3) -> Result<(ObsFileV2, ConversionReport), Error> {
        let mut report = ConversionReport::default();

        for list in src.header.observables.values() {
            for observable in list.iter() {
                if self.map.to_rinex2(observable.as_str()).is_err() {
                    report.unknown_codes.insert(observable.to_string());
                }
            }
        }

        let header = self.header_to_v2(&src.header)?;
        let mut records = Vec::with_capacity(src.records.len());

        for record in src.records.iter() {
            match self.record_to_v2(record, &src.header) {
                Ok(converted) => {
                    records.push(converted);
                    report.converted += 1;
                },
                Err(e) if e.is_recoverable() => {
                    #[cfg(feature = "log")]
                    warn!("{}: {}", record.epoch, e);
                    report.skipped += 1;
                },
                Err(e) => return Err(e),
            }
        }

        #[cfg(feature = "log")]
        debug!("rinex2 conversion: {}", report);

        Ok((ObsFileV2 { header, records }, report))
    }
}
