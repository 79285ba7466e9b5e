use super::{LNavFilterData, NavFilter};
use crate::lnav::SUBFRAME_WORDS;
use crate::prelude::Epoch;

use itertools::Itertools;
use std::collections::{BTreeMap, HashMap};

#[cfg(feature = "log")]
use log::debug;

/// [CrossSourceFilter] votes between the copies of a message
/// received by several sources (stations, receivers).
///
/// Within one epoch, candidates are grouped per signal (SV, carrier and
/// code) then per content. A content wins when it gathered at least
/// `min_agreement` copies, strictly more than any other content,
/// while the signal gathered at least `min_total` candidates overall.
/// Winners are forwarded, everything else is rejected.
///
/// Candidates are held until a newer epoch shows up.
#[derive(Debug)]
pub struct CrossSourceFilter {
    min_agreement: usize,
    min_total: usize,
    pending: BTreeMap<Epoch, Vec<LNavFilterData>>,
    rejected: Vec<LNavFilterData>,
}

impl Default for CrossSourceFilter {
    /// Two agreeing copies out of at least three
    fn default() -> Self {
        Self::new(2, 3)
    }
}

impl CrossSourceFilter {
    pub fn new(min_agreement: usize, min_total: usize) -> Self {
        Self {
            min_agreement,
            min_total,
            pending: BTreeMap::new(),
            rejected: Vec::new(),
        }
    }

    fn winner(
        &self,
        votes: &HashMap<[u32; SUBFRAME_WORDS], usize>,
        total: usize,
    ) -> Option<[u32; SUBFRAME_WORDS]> {
        if total < self.min_total {
            return None;
        }
        let (content, best) = votes.iter().max_by_key(|(_, count)| **count)?;
        if *best < self.min_agreement {
            return None;
        }
        if votes.values().filter(|count| *count == best).count() > 1 {
            return None;
        }
        Some(*content)
    }

    /// Votes on all candidates of one epoch
    fn vote(&mut self, candidates: Vec<LNavFilterData>) -> Vec<LNavFilterData> {
        let mut forwarded = Vec::with_capacity(candidates.len());
        let mut signals: BTreeMap<_, Vec<LNavFilterData>> = BTreeMap::new();
        for candidate in candidates {
            signals
                .entry(candidate.key.signal())
                .or_default()
                .push(candidate);
        }
        for (_signal, group) in signals {
            let votes = group.iter().map(|candidate| candidate.content()).counts();
            let winner = self.winner(&votes, group.len());

            #[cfg(feature = "log")]
            debug!(
                "cross-source: {:?} {} candidates, {} contents, winner: {}",
                _signal,
                group.len(),
                votes.len(),
                winner.is_some()
            );

            for candidate in group {
                if winner == Some(candidate.content()) {
                    forwarded.push(candidate);
                } else {
                    self.rejected.push(candidate);
                }
            }
        }
        forwarded
    }
}

impl NavFilter for CrossSourceFilter {
    fn name(&self) -> &str {
        "cross-source"
    }
    fn validate(&mut self, candidates: Vec<LNavFilterData>) -> Vec<LNavFilterData> {
        for candidate in candidates {
            self.pending
                .entry(candidate.key.timestamp)
                .or_default()
                .push(candidate);
        }
        let mut forwarded = Vec::new();
        while self.pending.len() > 1 {
            let oldest = match self.pending.keys().next() {
                Some(t) => *t,
                None => break,
            };
            if let Some(epoch) = self.pending.remove(&oldest) {
                forwarded.extend(self.vote(epoch));
            }
        }
        forwarded
    }
    fn finalize(&mut self) -> Vec<LNavFilterData> {
        let pending = std::mem::take(&mut self.pending);
        let mut forwarded = Vec::new();
        for (_, epoch) in pending {
            forwarded.extend(self.vote(epoch));
        }
        forwarded
    }
    fn rejected(&self) -> &[LNavFilterData] {
        &self.rejected
    }
    fn rejected_mut(&mut self) -> &mut Vec<LNavFilterData> {
        &mut self.rejected
    }
}
