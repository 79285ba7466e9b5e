use super::LNavFilterData;
use crate::lnav::data_bits;

/// Alternating 1/0 fill, either phase
const FILL_PATTERNS: [u32; 2] = [0xaa_aaaa, 0x55_5555];

/// [EmptyFilter] rejects subframes whose words 3 to 10 carry no data:
/// all zeros, or the alternating ones and zeros fill pattern.
#[derive(Debug, Default)]
pub struct EmptyFilter {
    rejected: Vec<LNavFilterData>,
}

impl EmptyFilter {
    pub fn new() -> Self {
        Self::default()
    }
    fn accepts(&self, candidate: &LNavFilterData) -> bool {
        let mut data = candidate.subframe[2..].iter().map(|word| data_bits(*word));
        let zeros = data.clone().all(|bits| bits == 0);
        let fill = data.all(|bits| FILL_PATTERNS.contains(&bits));
        !zeros && !fill
    }
}

stateless_filter!(EmptyFilter, "empty");

#[cfg(test)]
mod test {
    use super::*;
    use crate::navfilter::{NavFilter, NavFilterKey};
    #[test]
    fn empty() {
        let tlm_how = [0x22c0_1234, 0x0000_1300];
        let build = |body: u32| {
            let mut words = [body << 6; 10];
            words[0] = tlm_how[0];
            words[1] = tlm_how[1];
            LNavFilterData::new(NavFilterKey::default(), words)
        };
        let mut mixed = build(0);
        mixed.subframe[7] = 0x1234 << 6;
        let mut filter = EmptyFilter::new();
        let forwarded = filter.validate(vec![
            build(0),
            build(0xaa_aaaa),
            build(0x55_5555),
            build(0x12_3456),
            mixed,
        ]);
        assert_eq!(forwarded.len(), 2);
        assert_eq!(filter.rejected().len(), 3);
    }
}
