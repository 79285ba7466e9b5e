//! LNAV subframe synchronization, from a demodulated bit stream.
use std::collections::VecDeque;

use super::{
    cook_subframe, data_bits, parity::check_word, PREAMBLE, PREAMBLE_INVERTED, PREAMBLE_MASK,
    SUBFRAME_BITS, SUBFRAME_WORDS, WORD_BITS, WORD_MASK,
};

#[cfg(feature = "log")]
use log::{debug, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One word of a [RawSubframe]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawWord {
    /// 30 bits as received
    pub bits: u32,
    /// Global index of the first bit of this word
    pub bit_index: u64,
    /// D30* of the preceding (polarity corrected) word: data bits of
    /// this word are complemented. Always false for word 1.
    pub d30_star: bool,
}

/// 300 bits framed by the [SubframeFramer]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawSubframe {
    /// Words as received, polarity not corrected
    pub words: [u32; SUBFRAME_WORDS],
    /// Global index of the first preamble bit
    pub bit_index: u64,
    /// Subframe was received with inverted polarity
    pub inverted: bool,
}

impl RawSubframe {
    /// Per word view
    pub fn raw_words(&self) -> [RawWord; SUBFRAME_WORDS] {
        let polarity = if self.inverted { WORD_MASK } else { 0 };
        let mut raw = [RawWord::default(); SUBFRAME_WORDS];
        for (i, word) in self.words.iter().enumerate() {
            raw[i] = RawWord {
                bits: *word,
                bit_index: self.bit_index + (i * WORD_BITS) as u64,
                d30_star: i > 0 && (self.words[i - 1] ^ polarity) & 0x1 == 0x1,
            };
        }
        raw
    }
    /// Upright copy of this subframe
    pub fn cooked(&self) -> [u32; SUBFRAME_WORDS] {
        let mut words = self.words;
        cook_subframe(&mut words);
        words
    }
}

/// [SubframeFramer] searches for the LNAV preamble in either
/// polarity, confirms it with the TLM and HOW parity, then
/// emits one [RawSubframe] every 300 bits. When the next
/// preamble is missing, it slides back into search mode.
#[derive(Clone, Debug, Default)]
pub struct SubframeFramer {
    buffer: VecDeque<bool>,
    next_index: Option<u64>,
    locked: bool,
    inverted: bool,
}

impl SubframeFramer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.buffer.clear();
        self.next_index = None;
        self.locked = false;
        self.inverted = false;
    }

    /// True once a preamble was confirmed and until it goes missing
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Polarity of the stream we are locked on
    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Pushes one bit, with its global index in the stream.
    /// A gap in the indices restarts the search.
    pub fn push(&mut self, bit: bool, bit_index: u64) -> Option<RawSubframe> {
        if let Some(expected) = self.next_index {
            if expected != bit_index {
                #[cfg(feature = "log")]
                warn!("bit stream gap at {} (expecting {})", bit_index, expected);
                self.reset();
            }
        }
        self.next_index = Some(bit_index + 1);
        self.buffer.push_back(bit);

        if self.buffer.len() == 2 * WORD_BITS {
            match self.detect() {
                Some(inverted) => {
                    #[cfg(feature = "log")]
                    {
                        if !self.locked || inverted != self.inverted {
                            debug!(
                                "preamble found at {} (inverted: {})",
                                bit_index + 1 - 2 * WORD_BITS as u64,
                                inverted
                            );
                        }
                    }
                    self.locked = true;
                    self.inverted = inverted;
                },
                None => {
                    if self.locked {
                        #[cfg(feature = "log")]
                        warn!("lost subframe sync at {}", bit_index);
                        self.locked = false;
                    }
                    self.buffer.pop_front();
                    return None;
                },
            }
        }

        if self.buffer.len() == SUBFRAME_BITS {
            let mut words = [0_u32; SUBFRAME_WORDS];
            for (i, word) in words.iter_mut().enumerate() {
                *word = self.word(i);
            }
            self.buffer.clear();
            return Some(RawSubframe {
                words,
                bit_index: bit_index + 1 - SUBFRAME_BITS as u64,
                inverted: self.inverted,
            });
        }
        None
    }

    /// Packs buffered word `i`
    fn word(&self, i: usize) -> u32 {
        self.buffer
            .iter()
            .skip(i * WORD_BITS)
            .take(WORD_BITS)
            .fold(0, |acc, bit| (acc << 1) | (*bit as u32))
    }

    /// Looks for TLM + HOW at the start of the buffer, returns the polarity
    fn detect(&self) -> Option<bool> {
        let (tlm, how) = (self.word(0), self.word(1));
        let (tlm, how, inverted) = match tlm & PREAMBLE_MASK {
            PREAMBLE => (tlm, how, false),
            PREAMBLE_INVERTED => (tlm ^ WORD_MASK, how ^ WORD_MASK, true),
            _ => return None,
        };
        if !check_word(tlm, 0) || !check_word(how, tlm) {
            return None;
        }
        let how = if tlm & 0x1 == 0x1 {
            data_bits(how) ^ 0x00ff_ffff
        } else {
            data_bits(how)
        };
        let subframe_id = (how >> 2) & 0x7;
        if (1..=5).contains(&subframe_id) {
            Some(inverted)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lnav::parity::{check_cooked_subframe, encode_subframe};

    fn subframe(id: u32, tow: u32) -> [u32; SUBFRAME_WORDS] {
        let mut data = [0x00_0000; SUBFRAME_WORDS];
        data[0] = 0x8b_1230;
        data[1] = (tow << 7) | (id << 2);
        for (i, word) in data.iter_mut().enumerate().skip(2) {
            *word = 0x35_5a5a ^ (i as u32 * 0x01_0101);
        }
        encode_subframe(&data)
    }

    fn bits(words: &[u32]) -> Vec<bool> {
        words
            .iter()
            .flat_map(|word| (0..WORD_BITS).rev().map(move |i| (word >> i) & 0x1 == 0x1))
            .collect()
    }

    #[test]
    fn frames_stream() {
        let mut stream = vec![true, false, true, true, false, false, true];
        let offset = stream.len() as u64;
        let mut words = Vec::new();
        for id in 1..=5 {
            words.extend_from_slice(&subframe(id, 1000 + id));
        }
        stream.extend(bits(&words));

        let mut framer = SubframeFramer::new();
        let framed: Vec<RawSubframe> = stream
            .iter()
            .enumerate()
            .filter_map(|(i, bit)| framer.push(*bit, 100 + i as u64))
            .collect();

        assert_eq!(framed.len(), 5);
        assert!(framer.is_locked());
        for (i, raw) in framed.iter().enumerate() {
            assert!(!raw.inverted);
            assert_eq!(raw.bit_index, 100 + offset + (i * SUBFRAME_BITS) as u64);
            assert_eq!(raw.words, subframe(i as u32 + 1, 1001 + i as u32));
            let cooked = raw.cooked();
            assert!(check_cooked_subframe(&cooked));
            assert_eq!(crate::lnav::subframe_id(&cooked), i as u8 + 1);
        }
    }

    #[test]
    fn frames_inverted_stream() {
        let words = subframe(3, 42);
        let stream: Vec<bool> = bits(&words).iter().map(|b| !b).collect();
        let mut framer = SubframeFramer::new();
        let raw = stream
            .iter()
            .enumerate()
            .filter_map(|(i, bit)| framer.push(*bit, i as u64))
            .last()
            .unwrap();
        assert!(raw.inverted);
        assert!(framer.is_inverted());
        assert_eq!(raw.bit_index, 0);
        assert_eq!(raw.cooked(), {
            let mut upright = words;
            cook_subframe(&mut upright);
            upright
        });
        let view = raw.raw_words();
        assert!(!view[0].d30_star);
        assert_eq!(view[9].bit_index, 270);
        for i in 1..SUBFRAME_WORDS {
            assert_eq!(view[i].d30_star, words[i - 1] & 0x1 == 0x1);
            assert_eq!(view[i].bits, !words[i] & WORD_MASK);
        }
    }

    #[test]
    fn loses_sync() {
        let mut words = subframe(1, 10).to_vec();
        // corrupted TLM of the second subframe
        let mut second = subframe(2, 11);
        second[0] ^= 0x1 << 10;
        words.extend_from_slice(&second);
        let mut framer = SubframeFramer::new();
        let mut framed = 0;
        for (i, bit) in bits(&words).iter().enumerate() {
            if framer.push(*bit, i as u64).is_some() {
                framed += 1;
            }
        }
        assert_eq!(framed, 1);
        assert!(!framer.is_locked());
    }

    #[test]
    fn gaps_restart_search() {
        let words = subframe(4, 12);
        let mut framer = SubframeFramer::new();
        let mut framed = 0;
        for (i, bit) in bits(&words).iter().enumerate() {
            let index = if i < 100 { i as u64 } else { i as u64 + 1 };
            if framer.push(*bit, index).is_some() {
                framed += 1;
            }
        }
        assert_eq!(framed, 0);
    }
}
