//! Header field presence flags.
//!
//! Both revisions track which header records were provided, but the
//! records differ (RINEX-2 has a wavelength factor, RINEX-3 a marker type
//! and per system observables), so flags are converted field by field
//! through [VALIDITY_MAP], never copied as a raw mask.
use bitflags::bitflags;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

bitflags! {
    /// RINEX-2 header records
    #[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct ValidV2: u32 {
        const VERSION = 0x0000_0001;
        const RUN_BY = 0x0000_0002;
        const COMMENT = 0x0000_0004;
        const MARKER_NAME = 0x0000_0008;
        const MARKER_NUMBER = 0x0000_0010;
        const OBSERVER = 0x0000_0020;
        const RECEIVER = 0x0000_0040;
        const ANTENNA_TYPE = 0x0000_0080;
        const ANTENNA_POSITION = 0x0000_0100;
        const ANTENNA_OFFSET = 0x0000_0200;
        const WAVELENGTH_FACTOR = 0x0000_0400;
        const OBS_TYPES = 0x0000_0800;
        const INTERVAL = 0x0000_1000;
        const FIRST_TIME = 0x0000_2000;
        const LAST_TIME = 0x0000_4000;
        const RECEIVER_OFFSET = 0x0000_8000;
        const LEAP_SECONDS = 0x0001_0000;
        const NUM_SATS = 0x0002_0000;
        const PRN_OBS = 0x0004_0000;
        const END_OF_HEADER = 0x8000_0000;

        const REQUIRED = Self::VERSION.bits()
            | Self::RUN_BY.bits()
            | Self::MARKER_NAME.bits()
            | Self::OBSERVER.bits()
            | Self::RECEIVER.bits()
            | Self::ANTENNA_TYPE.bits()
            | Self::ANTENNA_POSITION.bits()
            | Self::ANTENNA_OFFSET.bits()
            | Self::WAVELENGTH_FACTOR.bits()
            | Self::OBS_TYPES.bits()
            | Self::FIRST_TIME.bits()
            | Self::END_OF_HEADER.bits();
    }
}

bitflags! {
    /// RINEX-3 header records
    #[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct ValidV3: u32 {
        const VERSION = 0x0000_0001;
        const RUN_BY = 0x0000_0002;
        const COMMENT = 0x0000_0004;
        const MARKER_NAME = 0x0000_0008;
        const MARKER_TYPE = 0x0000_0010;
        const MARKER_NUMBER = 0x0000_0020;
        const OBSERVER = 0x0000_0040;
        const RECEIVER = 0x0000_0080;
        const ANTENNA_TYPE = 0x0000_0100;
        const ANTENNA_POSITION = 0x0000_0200;
        const ANTENNA_DELTA_HEN = 0x0000_0400;
        const SYSTEM_OBS_TYPES = 0x0000_0800;
        const INTERVAL = 0x0000_1000;
        const FIRST_TIME = 0x0000_2000;
        const LAST_TIME = 0x0000_4000;
        const RECEIVER_OFFSET = 0x0000_8000;
        const LEAP_SECONDS = 0x0001_0000;
        const NUM_SATS = 0x0002_0000;
        const PRN_OBS = 0x0004_0000;
        const END_OF_HEADER = 0x8000_0000;

        // approximate position is optional for moving markers
        const REQUIRED = Self::VERSION.bits()
            | Self::RUN_BY.bits()
            | Self::MARKER_NAME.bits()
            | Self::MARKER_TYPE.bits()
            | Self::OBSERVER.bits()
            | Self::RECEIVER.bits()
            | Self::ANTENNA_TYPE.bits()
            | Self::ANTENNA_DELTA_HEN.bits()
            | Self::SYSTEM_OBS_TYPES.bits()
            | Self::FIRST_TIME.bits()
            | Self::END_OF_HEADER.bits();
    }
}

/// Field to field correspondence: (RINEX-2 flag, RINEX-3 flag, optional field).
/// [ValidV2::WAVELENGTH_FACTOR] and [ValidV3::MARKER_TYPE] have no counterpart.
pub const VALIDITY_MAP: &[(ValidV2, ValidV3, bool)] = &[
    (ValidV2::VERSION, ValidV3::VERSION, false),
    (ValidV2::RUN_BY, ValidV3::RUN_BY, false),
    (ValidV2::MARKER_NAME, ValidV3::MARKER_NAME, false),
    (ValidV2::OBSERVER, ValidV3::OBSERVER, false),
    (ValidV2::RECEIVER, ValidV3::RECEIVER, false),
    (ValidV2::ANTENNA_TYPE, ValidV3::ANTENNA_TYPE, false),
    (ValidV2::ANTENNA_POSITION, ValidV3::ANTENNA_POSITION, false),
    (ValidV2::ANTENNA_OFFSET, ValidV3::ANTENNA_DELTA_HEN, false),
    (ValidV2::OBS_TYPES, ValidV3::SYSTEM_OBS_TYPES, false),
    (ValidV2::FIRST_TIME, ValidV3::FIRST_TIME, false),
    (ValidV2::END_OF_HEADER, ValidV3::END_OF_HEADER, false),
    (ValidV2::COMMENT, ValidV3::COMMENT, true),
    (ValidV2::MARKER_NUMBER, ValidV3::MARKER_NUMBER, true),
    (ValidV2::INTERVAL, ValidV3::INTERVAL, true),
    (ValidV2::LAST_TIME, ValidV3::LAST_TIME, true),
    (ValidV2::RECEIVER_OFFSET, ValidV3::RECEIVER_OFFSET, true),
    (ValidV2::LEAP_SECONDS, ValidV3::LEAP_SECONDS, true),
    (ValidV2::NUM_SATS, ValidV3::NUM_SATS, true),
    (ValidV2::PRN_OBS, ValidV3::PRN_OBS, true),
];

impl ValidV2 {
    /// Converts to [ValidV3]. Optional records are dropped
    /// unless `with_optional` is set.
    pub fn to_v3(self, with_optional: bool) -> ValidV3 {
        let mut v3 = ValidV3::empty();
        for (v2_flag, v3_flag, optional) in VALIDITY_MAP.iter().copied() {
            if (!optional || with_optional) && self.contains(v2_flag) {
                v3 |= v3_flag;
            }
        }
        v3
    }
}

impl ValidV3 {
    /// Converts to [ValidV2]. Optional records are dropped
    /// unless `with_optional` is set.
    pub fn to_v2(self, with_optional: bool) -> ValidV2 {
        let mut v2 = ValidV2::empty();
        for (v2_flag, v3_flag, optional) in VALIDITY_MAP.iter().copied() {
            if (!optional || with_optional) && self.contains(v3_flag) {
                v2 |= v2_flag;
            }
        }
        v2
    }
}
