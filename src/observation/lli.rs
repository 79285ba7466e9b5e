//! Loss of lock indicator
use bitflags::bitflags;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

bitflags! {
    /// Loss of lock indicator attached to a measurement.
    /// Converters carry it over bit for bit: both revisions share
    /// the first two bits, only the meaning of the third one moved.
    #[derive(Debug, Copy, Clone, Default)]
    #[derive(PartialEq, Eq, Hash, PartialOrd)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct LliFlags: u8 {
        /// Lock lost since the previous epoch, possible cycle slip
        const LOCK_LOSS = 0x01;
        /// Half cycle ambiguity or slip
        const HALF_CYCLE_SLIP = 0x02;
        /// RINEX-2: observed under anti spoofing.
        /// RINEX-3: BOC tracking of an MBOC modulated signal.
        const UNDER_ANTI_SPOOFING = 0x04;
    }
}
