use super::{LNavFilterData, NavFilter};
use crate::prelude::{Duration, Epoch};
use std::collections::BTreeMap;

#[cfg(feature = "log")]
use log::warn;

/// [OrderFilter] sorts candidates by timestamp. Candidates are held
/// until the newest timestamp seen is `depth` epochs ahead of them:
/// at that point no older candidate can show up anymore, so they are
/// released in chronological order. Candidates older than the release
/// threshold when they arrive are rejected as stale.
///
/// Held candidates are only returned by [NavFilter::finalize] once the
/// stream is over.
#[derive(Debug)]
pub struct OrderFilter {
    depth: usize,
    epoch: Duration,
    buffer: BTreeMap<(Epoch, u64), LNavFilterData>,
    /// Arrival counter, breaks timestamp ties
    seq: u64,
    newest: Option<Epoch>,
    threshold: Option<Epoch>,
    rejected: Vec<LNavFilterData>,
}

impl Default for OrderFilter {
    /// One LNAV subframe (6 s) of depth
    fn default() -> Self {
        Self::new(1, Duration::from_seconds(6.0))
    }
}

impl OrderFilter {
    /// Builds an [OrderFilter] holding candidates for `depth` (at least 1)
    /// epochs of `epoch` duration.
    pub fn new(depth: usize, epoch: Duration) -> Self {
        Self {
            depth: depth.max(1),
            epoch,
            buffer: BTreeMap::new(),
            seq: 0,
            newest: None,
            threshold: None,
            rejected: Vec::new(),
        }
    }
    /// Release threshold: candidates older than this are either
    /// released already or stale.
    pub fn threshold(&self) -> Option<Epoch> {
        self.threshold
    }
    /// Number of candidates currently held
    pub fn len(&self) -> usize {
        self.buffer.len()
    }
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl NavFilter for OrderFilter {
    fn name(&self) -> &str {
        "order"
    }
    fn validate(&mut self, candidates: Vec<LNavFilterData>) -> Vec<LNavFilterData> {
        for candidate in candidates {
            let t = candidate.key.timestamp;
            if let Some(threshold) = self.threshold {
                if t < threshold {
                    #[cfg(feature = "log")]
                    warn!("order: stale {} (released up to {})", candidate.key, threshold);
                    self.rejected.push(candidate);
                    continue;
                }
            }
            self.newest = Some(match self.newest {
                Some(newest) if newest > t => newest,
                _ => t,
            });
            self.buffer.insert((t, self.seq), candidate);
            self.seq += 1;
        }

        let newest = match self.newest {
            Some(newest) => newest,
            None => return Vec::new(),
        };

        let window = Duration::from_seconds(self.epoch.to_seconds() * self.depth as f64);
        let threshold = newest - window;
        self.threshold = Some(threshold);

        let held = self.buffer.split_off(&(threshold, 0));
        std::mem::replace(&mut self.buffer, held)
            .into_values()
            .collect()
    }
    fn finalize(&mut self) -> Vec<LNavFilterData> {
        std::mem::take(&mut self.buffer).into_values().collect()
    }
    fn processing_depth(&self) -> usize {
        self.depth
    }
    fn rejected(&self) -> &[LNavFilterData] {
        &self.rejected
    }
    fn rejected_mut(&mut self) -> &mut Vec<LNavFilterData> {
        &mut self.rejected
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::navfilter::NavFilterKey;
    use crate::prelude::{Constellation, SV};

    fn candidate(t: f64, prn: u8) -> LNavFilterData {
        let key = NavFilterKey::new(
            SV::new(Constellation::GPS, prn),
            Epoch::from_gpst_seconds(t),
        );
        LNavFilterData::new(key, [prn as u32; 10])
    }

    #[test]
    fn monotonic_release() {
        let depth = 3;
        let mut filter = OrderFilter::new(depth, Duration::from_seconds(6.0));
        assert_eq!(filter.processing_depth(), depth);

        let mut released = Vec::new();
        for i in 0..=2 * depth {
            let forwarded = filter.validate(vec![candidate(600.0 + 6.0 * i as f64, 1)]);
            if i < depth + 1 {
                assert!(forwarded.is_empty());
            } else {
                assert_eq!(forwarded.len(), 1);
            }
            released.extend(forwarded);
        }
        released.extend(filter.finalize());
        assert!(filter.is_empty());

        assert_eq!(released.len(), 2 * depth + 1);
        for (i, msg) in released.iter().enumerate() {
            assert_eq!(
                msg.key.timestamp,
                Epoch::from_gpst_seconds(600.0 + 6.0 * i as f64)
            );
        }
        assert!(filter.rejected().is_empty());
    }

    #[test]
    fn reorders() {
        let mut filter = OrderFilter::default();
        assert!(filter
            .validate(vec![candidate(12.0, 1), candidate(6.0, 2), candidate(6.0, 3)])
            .is_empty());
        let forwarded = filter.validate(vec![candidate(8.0, 4), candidate(18.0, 5)]);
        let prns: Vec<u8> = forwarded.iter().map(|msg| msg.key.sv.prn).collect();
        assert_eq!(prns, vec![2, 3, 4]);
        assert_eq!(filter.threshold(), Some(Epoch::from_gpst_seconds(12.0)));
        assert_eq!(filter.len(), 2);
    }

    #[test]
    fn rejects_stale() {
        let mut filter = OrderFilter::default();
        filter.validate(vec![candidate(60.0, 1)]);
        assert_eq!(filter.threshold(), Some(Epoch::from_gpst_seconds(54.0)));
        let forwarded = filter.validate(vec![candidate(48.0, 2), candidate(54.0, 3)]);
        assert!(forwarded.is_empty());
        assert_eq!(filter.rejected().len(), 1);
        assert_eq!(filter.rejected()[0].key.sv.prn, 2);
        let flushed = filter.finalize();
        assert_eq!(flushed.len(), 2);
        assert_eq!(flushed[0].key.sv.prn, 3);
    }
}
