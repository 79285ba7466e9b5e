//! Header conversion
use super::{ObservedSystems, RinexConverter};
use crate::{
    error::Error,
    header::{HeaderV2, HeaderV3, OptionalFields, ValidV2, ValidV3},
    prelude::{Constellation, Observable, Version, SV},
    sv::system,
};
use std::collections::{BTreeMap, BTreeSet};

#[cfg(feature = "log")]
use log::debug;

impl<'a> RinexConverter<'a> {
    /// Converts a RINEX-2 header to RINEX-3.
    ///
    /// Each declared observable is translated, then listed for every system
    /// it is valid for. Codes valid for no system simply vanish.
    /// All systems known to the code table are described: use
    /// [Self::prune_absent_systems] once all records were converted, to drop
    /// the ones that were never observed. PRN / # OBS records are remapped
    /// but never used for pruning: they may not list every satellite
    /// the records carry.
    pub fn header_to_v3(&self, src: &HeaderV2) -> Result<HeaderV3, Error> {
        let mut dest = HeaderV3 {
            version: Version::V3,
            meta: src.meta.clone(),
            marker_type: self.opts.marker_type.unwrap_or_default(),
            ..Default::default()
        };

        for constellation in self.map.constellations() {
            dest.observables.insert(constellation, Vec::new());
        }

        for observable in src.observables.iter() {
            let rinex3 = match self.observable_to_rinex3(observable)? {
                Some(rinex3) => rinex3,
                None => continue,
            };
            for (constellation, list) in dest.observables.iter_mut() {
                if self.map.is_valid_for(*constellation, observable.as_str()) {
                    list.push(rinex3.clone());
                }
            }
        }

        dest.valid = src.valid.to_v3(self.opts.fill_optional_fields)
            | ValidV3::MARKER_TYPE
            | ValidV3::SYSTEM_OBS_TYPES;

        if !self.opts.fill_optional_fields {
            return Ok(dest);
        }

        if self.opts.keep_comments {
            dest.comments = src.comments.clone();
        } else {
            dest.valid.remove(ValidV3::COMMENT);
        }

        dest.optional = OptionalFields {
            obs_per_sv: BTreeMap::new(),
            ..src.optional.clone()
        };

        for (sv, counts) in src.optional.obs_per_sv.iter() {
            dest.optional
                .obs_per_sv
                .insert(*sv, self.counts_to_v3(sv, counts, &src.observables));
        }

        Ok(dest)
    }

    /// Keeps the PRN / # OBS counts of the columns that
    /// survive the conversion, for this satellite.
    fn counts_to_v3(&self, sv: &SV, counts: &[u32], observables: &[Observable]) -> Vec<u32> {
        observables
            .iter()
            .zip(counts.iter())
            .filter_map(|(obs, count)| {
                let code2 = obs.as_str();
                if self.map.to_rinex3(code2).is_ok()
                    && self.map.is_valid_for(sv.constellation, code2)
                {
                    Some(*count)
                } else {
                    None
                }
            })
            .collect()
    }

    /// Drops the systems that were never observed from this RINEX-3 header.
    pub fn prune_absent_systems(&self, header: &mut HeaderV3, observed: &ObservedSystems) {
        header.observables.retain(|constellation, _| {
            let retained = observed.contains(*constellation);
            #[cfg(feature = "log")]
            {
                if !retained {
                    debug!("{} not observed: removed from header", constellation);
                }
            }
            retained
        });
    }

    /// Merges the per system RINEX-3 observables into a flat RINEX-2 list.
    ///
    /// Systems are visited in [Constellation] order and observables in
    /// declared order. Each code is translated to RINEX-2 and the first
    /// occurrence of each RINEX-2 code fixes its column: "C1C" and "C1W"
    /// both end up in the same "C1" column. Merging is idempotent.
    pub fn merge_observables(
        &self,
        observables: &BTreeMap<Constellation, Vec<Observable>>,
    ) -> Result<Vec<Observable>, Error> {
        let mut merged = Vec::<Observable>::new();
        for list in observables.values() {
            for observable in list.iter() {
                let rinex2 = self.observable_to_rinex2(observable)?;
                if !merged.contains(&rinex2) {
                    merged.push(rinex2);
                }
            }
        }
        Ok(merged)
    }

    /// Prepares a RINEX-3 header for RINEX-2 conversion,
    /// by filling its merged observables list.
    pub fn sort_rinex3_obs_types(&self, header: &mut HeaderV3) -> Result<(), Error> {
        header.merged_observables = self.merge_observables(&header.observables)?;
        Ok(())
    }

    /// Converts a RINEX-3 header to RINEX-2.
    pub fn header_to_v2(&self, src: &HeaderV3) -> Result<HeaderV2, Error> {
        let mut dest = HeaderV2 {
            version: Version::V2,
            meta: src.meta.clone(),
            observables: self.merge_observables(&src.observables)?,
            ..Default::default()
        };

        dest.valid = src.valid.to_v2(self.opts.fill_optional_fields) | ValidV2::WAVELENGTH_FACTOR;

        if !self.opts.fill_optional_fields {
            return Ok(dest);
        }

        if self.opts.keep_comments {
            dest.comments = src.comments.clone();
        } else {
            dest.valid.remove(ValidV2::COMMENT);
        }

        dest.optional = OptionalFields {
            obs_per_sv: BTreeMap::new(),
            ..src.optional.clone()
        };

        for (sv, counts) in src.optional.obs_per_sv.iter() {
            let list = match src.system_observables(sv.constellation) {
                Some(list) => list,
                None => continue,
            };
            let mut remapped = vec![0_u32; dest.observables.len()];
            let mut filled = BTreeSet::<usize>::new();
            for (observable, count) in list.iter().zip(counts.iter()) {
                let rinex2 = self.observable_to_rinex2(observable)?;
                if let Some(column) = dest.column(&rinex2) {
                    if filled.insert(column) {
                        remapped[column] = *count;
                    }
                }
            }
            dest.optional.obs_per_sv.insert(*sv, remapped);
        }

        Ok(dest)
    }

    /// True if this RINEX-3 system is described by the code table
    pub(crate) fn is_supported(&self, constellation: Constellation) -> bool {
        let constellation = system(constellation);
        self.map.constellations().any(|c| c == constellation)
    }
}
