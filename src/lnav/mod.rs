//! GPS legacy navigation (LNAV) subframes.
//!
//! A subframe is 10 words of 30 bits each, every word stored
//! right justified in a `u32`: word bit 1 (first transmitted, MSB)
//! sits at bit position 29, the last parity bit (D30) at position 0.
pub mod almanac;
pub mod cook;
pub mod framer;
pub mod parity;

pub use almanac::AlmanacPage;
pub use cook::cook_subframe;
pub use framer::{RawSubframe, RawWord, SubframeFramer};

/// Bits per word
pub const WORD_BITS: usize = 30;

/// Words per subframe
pub const SUBFRAME_WORDS: usize = 10;

/// Bits per subframe
pub const SUBFRAME_BITS: usize = WORD_BITS * SUBFRAME_WORDS;

/// All 30 bits of a word
pub const WORD_MASK: u32 = 0x3fff_ffff;

/// Data bits (D1..D24) of a word
pub const DATA_MASK: u32 = 0x3fff_ffc0;

/// Parity bits (D25..D30) of a word
pub const PARITY_MASK: u32 = 0x0000_003f;

/// TLM preamble field
pub const PREAMBLE_MASK: u32 = 0x3fc0_0000;

/// Upright preamble (0x8B) in position
pub const PREAMBLE: u32 = 0x22c0_0000;

/// Inverted preamble (0x74) in position
pub const PREAMBLE_INVERTED: u32 = 0x1d00_0000;

/// Highest valid HOW truncated TOW count (one week, 6s units)
pub const MAX_TOW_COUNT: u32 = 100_800;

/// Subframe ID (1..=5) of an upright subframe
pub fn subframe_id(words: &[u32; SUBFRAME_WORDS]) -> u8 {
    ((words[1] >> 8) & 0x7) as u8
}

/// Truncated TOW count of an upright subframe, in 6s units.
/// This is the time of the next subframe start.
pub fn tow_count(words: &[u32; SUBFRAME_WORDS]) -> u32 {
    (words[1] >> 13) & 0x1ffff
}

/// Returns 24 data bits of given word, right justified
pub fn data_bits(word: u32) -> u32 {
    (word >> 6) & 0x00ff_ffff
}

/// 8 bit issue of data carried by an upright ephemeris subframe:
/// IODC LSBs (subframe 1, word 8) or IODE (subframe 2 word 3,
/// subframe 3 word 10). None for any other subframe.
pub fn issue_of_data(words: &[u32; SUBFRAME_WORDS]) -> Option<u8> {
    let word = match subframe_id(words) {
        1 => words[7],
        2 => words[2],
        3 => words[9],
        _ => return None,
    };
    Some((data_bits(word) >> 16) as u8)
}

/// True if given word starts with either preamble
pub fn has_preamble(word: u32) -> bool {
    matches!(word & PREAMBLE_MASK, PREAMBLE | PREAMBLE_INVERTED)
}
