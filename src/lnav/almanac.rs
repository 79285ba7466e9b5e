//! LNAV almanac pages (subframes 4 and 5)
use super::{subframe_id, SUBFRAME_WORDS};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Two's complement interpretation of the `bits` LSBs
fn signed(value: u32, bits: u32) -> i32 {
    let shift = 32 - bits;
    ((value << shift) as i32) >> shift
}

fn scaled(value: i32, exponent: i32) -> f64 {
    value as f64 * 2.0_f64.powi(exponent)
}

/// Decoded almanac page, IS-GPS-200 20.3.3.5.1.2.
/// Angles are expressed in semicircles.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AlmanacPage {
    /// Subframe (4 or 5) this page was found in
    pub subframe: u8,
    /// Data ID
    pub data_id: u8,
    /// Satellite this almanac describes (1..=32)
    pub sv_id: u8,
    /// Eccentricity
    pub e: f64,
    /// Time of applicability (s)
    pub toa: f64,
    /// Inclination offset from 0.3 semicircles
    pub delta_i: f64,
    /// Rate of right ascension (semicircles/s)
    pub omega_dot: f64,
    /// 8 bit health
    pub health: u8,
    /// Square root of the semi major axis (m^1/2)
    pub sqrt_a: f64,
    /// Longitude of ascending node
    pub omega0: f64,
    /// Argument of perigee
    pub omega: f64,
    /// Mean anomaly at reference time
    pub m0: f64,
    /// Clock bias (s)
    pub af0: f64,
    /// Clock drift (s/s)
    pub af1: f64,
}

impl AlmanacPage {
    pub const MAX_ECCENTRICITY: f64 = 0.03;
    pub const MAX_TOA: f64 = 602_112.0;
    pub const MIN_SQRT_A: f64 = 2530.0;
    pub const MAX_SQRT_A: f64 = 8192.0;
    pub const MIN_OMEGA_DOT: f64 = -6.33e-7;
    pub const MAX_OMEGA_DOT: f64 = 0.0;

    /// True if given upright subframe is an almanac page:
    /// subframe 4 or 5, SV ID within 1..=32.
    pub fn is_almanac(words: &[u32; SUBFRAME_WORDS]) -> bool {
        matches!(subframe_id(words), 4 | 5) && (1..=32).contains(&((words[2] >> 22) & 0x3f))
    }

    /// Decodes an upright (cooked) subframe. None when
    /// this is not an almanac page.
    pub fn decode(words: &[u32; SUBFRAME_WORDS]) -> Option<Self> {
        if !Self::is_almanac(words) {
            return None;
        }
        let af0 = (((words[9] >> 22) & 0xff) << 3) | ((words[9] >> 8) & 0x7);
        Some(Self {
            subframe: subframe_id(words),
            data_id: ((words[2] >> 28) & 0x3) as u8,
            sv_id: ((words[2] >> 22) & 0x3f) as u8,
            e: scaled(((words[2] >> 6) & 0xffff) as i32, -21),
            toa: scaled(((words[3] >> 22) & 0xff) as i32, 12),
            delta_i: scaled(signed((words[3] >> 6) & 0xffff, 16), -19),
            omega_dot: scaled(signed((words[4] >> 14) & 0xffff, 16), -38),
            health: ((words[4] >> 6) & 0xff) as u8,
            sqrt_a: scaled(((words[5] >> 6) & 0xff_ffff) as i32, -11),
            omega0: scaled(signed((words[6] >> 6) & 0xff_ffff, 24), -23),
            omega: scaled(signed((words[7] >> 6) & 0xff_ffff, 24), -23),
            m0: scaled(signed((words[8] >> 6) & 0xff_ffff, 24), -23),
            af0: scaled(signed(af0, 11), -20),
            af1: scaled(signed((words[9] >> 11) & 0x7ff, 11), -38),
        })
    }

    /// True if all range constrained fields are within their valid range
    pub fn in_range(&self) -> bool {
        (0.0..=Self::MAX_ECCENTRICITY).contains(&self.e)
            && self.toa <= Self::MAX_TOA
            && (Self::MIN_SQRT_A..=Self::MAX_SQRT_A).contains(&self.sqrt_a)
            && (Self::MIN_OMEGA_DOT..=Self::MAX_OMEGA_DOT).contains(&self.omega_dot)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Cooked almanac page with parity bits left to zero
    fn page(sv_id: u32, e: u32, sqrt_a: u32, omega_dot: u32) -> [u32; SUBFRAME_WORDS] {
        let mut words = [0_u32; SUBFRAME_WORDS];
        words[0] = 0x22c0_0000;
        words[1] = 4 << 8;
        words[2] = (0x1 << 28) | (sv_id << 22) | (e << 6);
        words[3] = (0x90 << 22) | (0xfff0 << 6);
        words[4] = (omega_dot << 14) | (0x3f << 6);
        words[5] = sqrt_a << 6;
        words[6] = 0x80_0000 << 6;
        words[7] = 0x40_0000 << 6;
        words[8] = 0xff_ffff << 6;
        words[9] = (0xff << 22) | (0x001 << 11) | (0x6 << 8);
        words
    }

    #[test]
    fn signed_fields() {
        assert_eq!(signed(0x7ff, 11), -1);
        assert_eq!(signed(0x3ff, 11), 1023);
        assert_eq!(signed(0x8000, 16), -32768);
        assert_eq!(signed(0x80_0000, 24), -8388608);
    }

    #[test]
    fn decode() {
        // e = 0x2000 * 2^-21, sqrt(A) = 5153.5
        let words = page(17, 0x2000, 5153 * 2048 + 1024, 0xffe0);
        let page = AlmanacPage::decode(&words).unwrap();
        assert_eq!(page.subframe, 4);
        assert_eq!(page.data_id, 1);
        assert_eq!(page.sv_id, 17);
        assert_eq!(page.e, 0.00390625);
        assert_eq!(page.toa, 589824.0);
        assert_eq!(page.delta_i, -16.0 * 2.0_f64.powi(-19));
        assert_eq!(page.omega_dot, -32.0 * 2.0_f64.powi(-38));
        assert_eq!(page.health, 0x3f);
        assert_eq!(page.sqrt_a, 5153.5);
        assert_eq!(page.omega0, -1.0);
        assert_eq!(page.omega, 0.5);
        assert_eq!(page.m0, -(2.0_f64.powi(-23)));
        // af0 = 0b11111111_110 = -2
        assert_eq!(page.af0, -2.0 * 2.0_f64.powi(-20));
        assert_eq!(page.af1, 2.0_f64.powi(-38));
        assert!(page.in_range());
    }

    #[test]
    fn not_almanac() {
        let mut words = page(17, 0, 0, 0);
        words[1] = 3 << 8;
        assert!(AlmanacPage::decode(&words).is_none());
        // dummy SV and special pages
        for sv_id in [0, 51, 56, 63] {
            assert!(AlmanacPage::decode(&page(sv_id, 0, 0, 0)).is_none());
        }
    }

    #[test]
    fn ranges() {
        let nominal = 5153 * 2048;
        let valid = |e, sqrt_a, omega_dot| {
            AlmanacPage::decode(&page(1, e, sqrt_a, omega_dot))
                .unwrap()
                .in_range()
        };
        assert!(valid(0, nominal, 0));
        assert!(valid(0, 2530 * 2048, 0));
        assert!(!valid(0xffff, nominal, 0));
        assert!(!valid(0, 2000 * 2048, 0));
        assert!(!valid(0, 2529 * 2048, 0));
        // positive rate of right ascension
        assert!(!valid(0, nominal, 0x0010));
    }
}
