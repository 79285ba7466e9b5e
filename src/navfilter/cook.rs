use super::{LNavFilterData, NavFilter};
use crate::lnav::cook_subframe;

#[cfg(feature = "log")]
use log::debug;

/// [CookFilter] brings every subframe upright (see [cook_subframe])
/// and forwards all of them. Subframes without a preamble are
/// forwarded untouched, leaving their rejection to parity checks.
#[derive(Debug, Default)]
pub struct CookFilter {
    rejected: Vec<LNavFilterData>,
}

impl CookFilter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NavFilter for CookFilter {
    fn name(&self) -> &str {
        "cook"
    }
    fn validate(&mut self, mut candidates: Vec<LNavFilterData>) -> Vec<LNavFilterData> {
        for candidate in candidates.iter_mut() {
            if !cook_subframe(&mut candidate.subframe) {
                #[cfg(feature = "log")]
                debug!("cook: no preamble in {}", candidate.key);
            }
        }
        candidates
    }
    fn rejected(&self) -> &[LNavFilterData] {
        &self.rejected
    }
    fn rejected_mut(&mut self) -> &mut Vec<LNavFilterData> {
        &mut self.rejected
    }
}
