use super::LNavFilterData;
use crate::lnav::AlmanacPage;

/// [AlmanacRangeFilter] rejects almanac pages (upright subframes 4 and 5
/// carrying the almanac of SV 1..=32) with out of range parameters.
/// Any other subframe passes through.
#[derive(Debug, Default)]
pub struct AlmanacRangeFilter {
    rejected: Vec<LNavFilterData>,
}

impl AlmanacRangeFilter {
    pub fn new() -> Self {
        Self::default()
    }
    fn accepts(&self, candidate: &LNavFilterData) -> bool {
        match AlmanacPage::decode(&candidate.subframe) {
            Some(page) => page.in_range(),
            None => true,
        }
    }
}

stateless_filter!(AlmanacRangeFilter, "almanac-range");
