use super::{Carrier, LNavFilterData, NavFilter, TrackingCode};
use crate::lnav::{issue_of_data, subframe_id};
use crate::prelude::SV;
use std::collections::BTreeMap;

#[cfg(feature = "log")]
use log::debug;

/// Station, receiver and signal a subframe was collected from
type Source = (String, String, SV, Carrier, TrackingCode);

/// [EphMakerFilter] gathers upright ephemeris subframes (1, 2 and 3)
/// per source and only releases complete, consistent sets: the 8 IODC
/// LSBs of subframe 1 must match the IODE of subframes 2 and 3.
///
/// A held subframe is rejected once superseded, either by a newer copy
/// of the same subframe or by a subframe of another issue of data.
/// Almanac subframes (4 and 5) pass through.
/// Subframes still held when the stream ends are rejected by
/// [NavFilter::finalize].
#[derive(Debug, Default)]
pub struct EphMakerFilter {
    pending: BTreeMap<Source, [Option<LNavFilterData>; 3]>,
    completed: usize,
    rejected: Vec<LNavFilterData>,
}

impl EphMakerFilter {
    pub fn new() -> Self {
        Self::default()
    }
    /// Number of complete ephemerides released so far
    pub fn completed(&self) -> usize {
        self.completed
    }
    /// Number of subframes currently held
    pub fn len(&self) -> usize {
        self.pending
            .values()
            .map(|set| set.iter().flatten().count())
            .sum()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NavFilter for EphMakerFilter {
    fn name(&self) -> &str {
        "eph-maker"
    }
    fn validate(&mut self, candidates: Vec<LNavFilterData>) -> Vec<LNavFilterData> {
        let mut forwarded = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let content = candidate.content();
            let iod = match issue_of_data(&content) {
                Some(iod) => iod,
                None => {
                    forwarded.push(candidate);
                    continue;
                },
            };
            let slot = (subframe_id(&content) - 1) as usize;
            let set = self.pending.entry(candidate.key.source()).or_default();

            for held in set.iter_mut() {
                let superseded =
                    matches!(held, Some(data) if issue_of_data(&data.content()) != Some(iod));
                if superseded {
                    self.rejected.extend(held.take());
                }
            }
            self.rejected.extend(set[slot].replace(candidate));

            if set.iter().all(Option::is_some) {
                #[cfg(feature = "log")]
                debug!("eph-maker: complete ephemeris, iod {}", iod);

                self.completed += 1;
                forwarded.extend(set.iter_mut().filter_map(Option::take));
            }
        }
        forwarded
    }
    fn finalize(&mut self) -> Vec<LNavFilterData> {
        let pending = std::mem::take(&mut self.pending);
        for (_, set) in pending {
            self.rejected.extend(set.into_iter().flatten());
        }
        Vec::new()
    }
    fn processing_depth(&self) -> usize {
        3
    }
    fn rejected(&self) -> &[LNavFilterData] {
        &self.rejected
    }
    fn rejected_mut(&mut self) -> &mut Vec<LNavFilterData> {
        &mut self.rejected
    }
}
