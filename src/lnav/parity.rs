//! LNAV word parity, IS-GPS-200 20.3.5.2.
//!
//! Each word carries 6 parity bits (D25..D30), computed over the 24 source
//! data bits and the last two bits (D29*, D30*) of the previous word.
//! Transmitted data bits are the source bits complemented when D30* is set.
//! The first word of a subframe is checked against D29* = D30* = 0, which is
//! what the "t" bits of word 10 guarantee in a continuous stream.
use super::{data_bits, PARITY_MASK, PREAMBLE_INVERTED, PREAMBLE_MASK, SUBFRAME_WORDS, WORD_MASK};

/// Source data bits mask (d1..d24)
const SOURCE_MASK: u32 = 0x00ff_ffff;

/// Mask of the listed source data bits (1 = first transmitted)
const fn source_bits(bits: &[u32]) -> u32 {
    let mut mask = 0;
    let mut i = 0;
    while i < bits.len() {
        mask |= 1 << (24 - bits[i]);
        i += 1;
    }
    mask
}

/// (uses D29* rather than D30*, data bits involved), D25 to D30
const EQUATIONS: [(bool, u32); 6] = [
    (
        true,
        source_bits(&[1, 2, 3, 5, 6, 10, 11, 12, 13, 14, 17, 18, 20, 23]),
    ),
    (
        false,
        source_bits(&[2, 3, 4, 6, 7, 11, 12, 13, 14, 15, 18, 19, 21, 24]),
    ),
    (
        true,
        source_bits(&[1, 3, 4, 5, 7, 8, 12, 13, 14, 15, 16, 19, 20, 22]),
    ),
    (
        false,
        source_bits(&[2, 4, 5, 6, 8, 9, 13, 14, 15, 16, 17, 20, 21, 23]),
    ),
    (
        false,
        source_bits(&[1, 3, 5, 6, 7, 9, 10, 14, 15, 16, 17, 18, 21, 22, 24]),
    ),
    (
        true,
        source_bits(&[3, 5, 6, 8, 9, 10, 11, 13, 15, 19, 22, 23, 24]),
    ),
];

/// Parity bits (D25 as MSB) of given source data bits
fn parity(source: u32, prev: u32) -> u32 {
    let d29_star = (prev >> 1) & 0x1;
    let d30_star = prev & 0x1;
    EQUATIONS.iter().fold(0, |acc, (uses_d29, mask)| {
        let star = if *uses_d29 { d29_star } else { d30_star };
        (acc << 1) | (star ^ ((source & mask).count_ones() & 0x1))
    })
}

/// Source data bits of a transmitted word
fn source_data(word: u32, prev: u32) -> u32 {
    if prev & 0x1 == 0x1 {
        data_bits(word) ^ SOURCE_MASK
    } else {
        data_bits(word)
    }
}

/// Checks a word as transmitted, given the previous transmitted word.
pub fn check_word(word: u32, prev: u32) -> bool {
    parity(source_data(word, prev), prev) == word & PARITY_MASK
}

/// Checks a word whose data bits were already corrected for D30*
/// (see [super::cook_subframe]). Parity bits are never modified by
/// the correction, so `prev` is the previous cooked word.
pub fn check_cooked_word(word: u32, prev: u32) -> bool {
    parity(data_bits(word), prev) == word & PARITY_MASK
}

/// True if all 10 transmitted words pass [check_word], each word
/// being chained to its predecessor.
pub fn check_subframe(words: &[u32; SUBFRAME_WORDS]) -> bool {
    chain_check(words, check_word)
}

/// [check_subframe] for subframes that went through the cooker
pub fn check_cooked_subframe(words: &[u32; SUBFRAME_WORDS]) -> bool {
    chain_check(words, check_cooked_word)
}

/// [check_subframe] that first restores the subframe polarity,
/// when word 1 carries the inverted preamble.
pub fn check_raw_subframe(words: &[u32; SUBFRAME_WORDS]) -> bool {
    if words[0] & PREAMBLE_MASK == PREAMBLE_INVERTED {
        let mut upright = *words;
        for word in upright.iter_mut() {
            *word ^= WORD_MASK;
        }
        check_subframe(&upright)
    } else {
        check_subframe(words)
    }
}

fn chain_check(words: &[u32; SUBFRAME_WORDS], check: fn(u32, u32) -> bool) -> bool {
    words
        .iter()
        .enumerate()
        .all(|(i, word)| check(*word, if i == 0 { 0 } else { words[i - 1] }))
}

/// Builds the transmitted word for 24 source data bits (right justified):
/// data bits complemented by D30* and parity appended.
pub fn encode_word(source: u32, prev: u32) -> u32 {
    let source = source & SOURCE_MASK;
    let transmitted = if prev & 0x1 == 0x1 {
        source ^ SOURCE_MASK
    } else {
        source
    };
    (transmitted << 6) | parity(source, prev)
}

/// Overwrites d23 and d24 (non information "t" bits) so that
/// the encoded word ends with D29 = D30 = 0.
pub fn solve_t_bits(source: u32, prev: u32) -> u32 {
    let mut source = source & (SOURCE_MASK ^ 0x3);
    // d24 enters D29, d23 does not
    if parity(source, prev) & 0x2 != 0 {
        source |= 0x1;
    }
    if parity(source, prev) & 0x1 != 0 {
        source |= 0x2;
    }
    source
}

/// Encodes a complete subframe from 10 x 24 source data bits.
/// Words 2 (HOW) and 10 get their "t" bits solved, so the
/// next word (and next subframe) is never complemented.
pub fn encode_subframe(data: &[u32; SUBFRAME_WORDS]) -> [u32; SUBFRAME_WORDS] {
    let mut words = [0_u32; SUBFRAME_WORDS];
    let mut prev = 0;
    for (i, source) in data.iter().enumerate() {
        let source = if i == 1 || i == 9 {
            solve_t_bits(*source, prev)
        } else {
            *source
        };
        words[i] = encode_word(source, prev);
        prev = words[i];
    }
    words
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lnav::WORD_BITS;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn equations() {
        // every data bit is protected
        let all = EQUATIONS.iter().fold(0, |acc, (_, mask)| acc | mask);
        assert_eq!(all, SOURCE_MASK);
        assert_eq!(source_bits(&[1]), 0x80_0000);
        assert_eq!(source_bits(&[24]), 0x1);
    }

    #[test]
    fn known_words() {
        assert!(check_word(0, 0));
        // all zeros source, D29* = D30* = 1: everything inverted
        assert!(check_word(WORD_MASK, 0x3));
        assert!(!check_word(0, 0x3));
        // D29* only enters D25, D27 and D30
        assert!(check_word(0b101001, 0x2));
        // D30* only enters D26, D28 and D29, and complements data
        assert!(check_word((SOURCE_MASK << 6) | 0b010110, 0x1));
    }

    #[test]
    fn encode_then_check() {
        let mut rng = StdRng::seed_from_u64(0x8b);
        for _ in 0..1000 {
            let source = rng.gen::<u32>() & SOURCE_MASK;
            let prev = rng.gen::<u32>() & WORD_MASK;
            let word = encode_word(source, prev);
            assert!(check_word(word, prev), "{:08x} {:08x}", word, prev);
            assert_eq!(source_data(word, prev), source);
            assert_eq!(check_word(word, prev), check_word(word, prev));
        }
    }

    #[test]
    fn single_bit_flips() {
        let mut rng = StdRng::seed_from_u64(0x74);
        for _ in 0..500 {
            let source = rng.gen::<u32>() & SOURCE_MASK;
            let prev = rng.gen::<u32>() & WORD_MASK;
            let word = encode_word(source, prev);
            for bit in 0..WORD_BITS {
                let corrupt = word ^ (1 << bit);
                assert!(
                    !check_word(corrupt, prev),
                    "undetected flip of bit {} in {:08x}",
                    WORD_BITS - bit,
                    word
                );
            }
        }
    }

    #[test]
    fn t_bits() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            let source = rng.gen::<u32>() & SOURCE_MASK;
            let prev = rng.gen::<u32>() & WORD_MASK;
            let solved = solve_t_bits(source, prev);
            assert_eq!(solved & !0x3, source & !0x3);
            let word = encode_word(solved, prev);
            assert_eq!(word & 0x3, 0);
            assert!(check_word(word, prev));
        }
    }

    #[test]
    fn subframes() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..100 {
            let mut data = [0_u32; SUBFRAME_WORDS];
            for word in data.iter_mut() {
                *word = rng.gen::<u32>() & SOURCE_MASK;
            }
            data[0] = (0x8b << 16) | (data[0] & 0xffff);
            let words = encode_subframe(&data);
            assert!(check_subframe(&words));
            assert!(check_raw_subframe(&words));
            assert_eq!(words[1] & 0x3, 0);
            assert_eq!(words[9] & 0x3, 0);

            let mut inverted = words;
            for word in inverted.iter_mut() {
                *word ^= WORD_MASK;
            }
            assert!(!check_subframe(&inverted));
            assert!(check_raw_subframe(&inverted));

            let mut corrupt = words;
            corrupt[4] ^= 1 << 17;
            assert!(!check_subframe(&corrupt));
        }
    }
}
