use super::LNavFilterData;
use crate::lnav::{subframe_id, tow_count, MAX_TOW_COUNT, PREAMBLE, PREAMBLE_MASK};

/// [TlmHowFilter] sanity checks the TLM and HOW words of
/// upright subframes: preamble, HOW D29/D30 zeroed by the
/// "t" bits, valid TOW count and subframe ID.
#[derive(Debug, Default)]
pub struct TlmHowFilter {
    rejected: Vec<LNavFilterData>,
}

impl TlmHowFilter {
    pub fn new() -> Self {
        Self::default()
    }
    fn accepts(&self, candidate: &LNavFilterData) -> bool {
        let words = &candidate.subframe;
        words[0] & PREAMBLE_MASK == PREAMBLE
            && words[1] & 0x3 == 0
            && tow_count(words) < MAX_TOW_COUNT
            && (1..=5).contains(&subframe_id(words))
    }
}

stateless_filter!(TlmHowFilter, "tlm-how");
