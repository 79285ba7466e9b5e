use super::LNavFilterData;
use crate::lnav::parity::{check_cooked_subframe, check_raw_subframe};

/// [ParityFilter] rejects subframes failing the word parity checks
#[derive(Debug, Default)]
pub struct ParityFilter {
    cooked: bool,
    rejected: Vec<LNavFilterData>,
}

impl ParityFilter {
    /// Checks subframes as received (either polarity)
    pub fn new() -> Self {
        Self::default()
    }
    /// Checks subframes that went through a [super::CookFilter]
    pub fn cooked() -> Self {
        Self {
            cooked: true,
            rejected: Vec::new(),
        }
    }
    fn accepts(&self, candidate: &LNavFilterData) -> bool {
        if self.cooked {
            check_cooked_subframe(&candidate.subframe)
        } else {
            check_raw_subframe(&candidate.subframe)
        }
    }
}

stateless_filter!(ParityFilter, "parity");

#[cfg(test)]
mod test {
    use super::*;
    use crate::lnav::{cook_subframe, parity::encode_subframe};
    use crate::navfilter::{NavFilter, NavFilterKey};

    #[test]
    fn parity() {
        let mut data = [0x5a_a5a5; 10];
        data[0] = 0x8b_0042;
        let words = encode_subframe(&data);
        let mut corrupt = words;
        corrupt[6] ^= 0x1 << 12;

        let candidates = vec![
            LNavFilterData::new(NavFilterKey::default(), words),
            LNavFilterData::new(NavFilterKey::default(), corrupt),
        ];

        let mut raw = ParityFilter::new();
        let forwarded = raw.validate(candidates.clone());
        assert_eq!(forwarded.len(), 1);
        assert_eq!(forwarded[0].subframe, words);
        assert_eq!(raw.rejected()[0].subframe, corrupt);

        let mut cooked = ParityFilter::cooked();
        let candidates: Vec<_> = candidates
            .into_iter()
            .map(|mut candidate| {
                cook_subframe(&mut candidate.subframe);
                candidate
            })
            .collect();
        let forwarded = cooked.validate(candidates);
        assert_eq!(forwarded.len(), 1);
        assert_eq!(cooked.rejected().len(), 1);
    }
}
