//! LNAV subframe cooker: brings a received subframe upright.
use super::{DATA_MASK, PREAMBLE, PREAMBLE_INVERTED, PREAMBLE_MASK, SUBFRAME_WORDS, WORD_MASK};

/// Cooks a subframe in place, returns true when it is now upright.
///
/// 1. A subframe received phase inverted (inverted preamble in word 1)
///    has all of its bits flipped.
/// 2. Then, for words 2..10, data bits are complemented when the
///    previous (cooked) word ends with D30* = 1.
///
/// When word 1 carries neither preamble, the subframe is left untouched
/// and false is returned: parity checks will reject it downstream.
pub fn cook_subframe(words: &mut [u32; SUBFRAME_WORDS]) -> bool {
    match words[0] & PREAMBLE_MASK {
        PREAMBLE => {},
        PREAMBLE_INVERTED => {
            for word in words.iter_mut() {
                *word ^= WORD_MASK;
            }
        },
        _ => return false,
    }
    for i in 1..SUBFRAME_WORDS {
        if words[i - 1] & 0x1 == 0x1 {
            words[i] ^= DATA_MASK;
        }
    }
    true
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lnav::{
        data_bits,
        parity::{check_cooked_subframe, encode_subframe, encode_word, solve_t_bits},
    };

    fn source_data() -> [u32; SUBFRAME_WORDS] {
        [
            0x8b_0000, 0x00_4a32, 0x12_3456, 0xff_ffff, 0xab_cdef, 0x00_0001, 0x55_5555, 0xaa_aaaa,
            0x7f_0f0f, 0x80_0000,
        ]
    }

    #[test]
    fn cooks_upright() {
        let data = source_data();
        let mut words = encode_subframe(&data);
        assert!(cook_subframe(&mut words));
        for (i, (word, source)) in words.iter().zip(data.iter()).enumerate() {
            if i == 1 || i == 9 {
                // t bits were solved by the encoder
                assert_eq!(data_bits(*word) & !0x3, source & !0x3);
            } else {
                assert_eq!(data_bits(*word), *source);
            }
        }
        assert!(check_cooked_subframe(&words));
    }

    #[test]
    fn cooks_inverted() {
        let data = source_data();
        let upright = encode_subframe(&data);
        let mut expected = upright;
        assert!(cook_subframe(&mut expected));

        let mut words = upright;
        for word in words.iter_mut() {
            *word ^= WORD_MASK;
        }
        assert_eq!(words[0] & PREAMBLE_MASK, PREAMBLE_INVERTED);
        assert!(cook_subframe(&mut words));
        assert_eq!(words, expected);
    }

    #[test]
    fn garbage_is_untouched() {
        let mut words = encode_subframe(&source_data());
        words[0] ^= 0x1 << 25;
        let garbage = words;
        assert!(!cook_subframe(&mut words));
        assert_eq!(words, garbage);
    }

    #[test]
    fn already_upright_is_untouched() {
        // every word ends with D30 = 0: nothing needs complementing
        let data = source_data();
        let mut words = [0_u32; SUBFRAME_WORDS];
        let mut prev = 0;
        for (i, source) in data.iter().enumerate() {
            words[i] = encode_word(solve_t_bits(*source, prev), prev);
            prev = words[i];
        }
        let upright = words;
        assert!(cook_subframe(&mut words));
        assert_eq!(words, upright);
    }
}
