//! Navigation message filters.
//!
//! A [NavFilter] consumes batches of candidate messages and either
//! forwards them (to the next filter of the [NavFilterMgr] chain),
//! rejects them, or holds them until enough data was gathered.
//! Messages are moved through the chain: rejected messages are
//! kept by the filter that rejected them, until the caller takes them.

/// Stateless filters only differ by their acceptance test
macro_rules! stateless_filter {
    ($filter: ident, $name: literal) => {
        impl $crate::navfilter::NavFilter for $filter {
            fn name(&self) -> &str {
                $name
            }
            fn validate(
                &mut self,
                candidates: Vec<$crate::navfilter::LNavFilterData>,
            ) -> Vec<$crate::navfilter::LNavFilterData> {
                let mut forwarded = Vec::with_capacity(candidates.len());
                for candidate in candidates {
                    if self.accepts(&candidate) {
                        forwarded.push(candidate);
                    } else {
                        #[cfg(feature = "log")]
                        log::debug!("{}: rejected {}", $name, candidate.key);
                        self.rejected.push(candidate);
                    }
                }
                forwarded
            }
            fn rejected(&self) -> &[$crate::navfilter::LNavFilterData] {
                &self.rejected
            }
            fn rejected_mut(&mut self) -> &mut Vec<$crate::navfilter::LNavFilterData> {
                &mut self.rejected
            }
        }
    };
}

mod almanac;
mod cook;
mod cross_source;
mod empty;
mod eph_maker;
mod key;
mod mgr;
mod order;
mod parity;
mod tlm_how;

pub use almanac::AlmanacRangeFilter;
pub use cook::CookFilter;
pub use cross_source::CrossSourceFilter;
pub use empty::EmptyFilter;
pub use eph_maker::EphMakerFilter;
pub use key::{Carrier, LNavFilterData, NavFilterKey, TrackingCode};
pub use mgr::NavFilterMgr;
pub use order::OrderFilter;
pub use parity::ParityFilter;
pub use tlm_how::TlmHowFilter;

/// Navigation message filter
pub trait NavFilter {
    /// Filter name, for diagnostics
    fn name(&self) -> &str;

    /// Processes a batch of candidates, returns the forwarded ones.
    /// Rejected candidates are appended to [NavFilter::rejected].
    fn validate(&mut self, candidates: Vec<LNavFilterData>) -> Vec<LNavFilterData>;

    /// Flushes buffered candidates, at the end of the stream.
    fn finalize(&mut self) -> Vec<LNavFilterData> {
        Vec::new()
    }

    /// Number of epochs this filter may hold candidates for
    fn processing_depth(&self) -> usize {
        1
    }

    /// Candidates rejected since the last [NavFilter::clear_rejected]
    fn rejected(&self) -> &[LNavFilterData];

    fn rejected_mut(&mut self) -> &mut Vec<LNavFilterData>;

    fn clear_rejected(&mut self) {
        self.rejected_mut().clear();
    }

    /// Hands rejected candidates back to the caller
    fn take_rejected(&mut self) -> Vec<LNavFilterData> {
        std::mem::take(self.rejected_mut())
    }
}
