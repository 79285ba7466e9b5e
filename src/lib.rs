#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate gnss_rs as gnss;

#[macro_use]
extern crate lazy_static;

pub mod codes;
pub mod converter;
pub mod epoch;
pub mod hardware;
pub mod header;
pub mod lnav;
pub mod navfilter;
pub mod observable;
pub mod observation;
pub mod sv;
pub mod version;

mod error;

#[cfg(test)]
mod tests;

/// Package to include all basic structures
pub mod prelude {
    pub use crate::{
        codes::{ObsCodeMap, OBS_CODE_MAP},
        converter::{
            ConversionReport, ConverterOpts, ObsFileV2, ObsFileV3, ObservationFile,
            ObservedSystems, RinexConverter,
        },
        epoch::EpochFlag,
        error::Error,
        hardware::{Antenna, Receiver},
        header::{
            HeaderV2, HeaderV3, MarkerType, Metadata, OptionalFields, ValidV2, ValidV3,
        },
        observable::Observable,
        observation::{LliFlags, ObsDatum, ObsRecordV2, ObsRecordV3, SNR},
        version::Version,
    };

    pub mod lnav {
        pub use crate::lnav::{
            cook_subframe,
            parity::{check_subframe, check_word, encode_subframe, encode_word},
            subframe_id, tow_count, AlmanacPage, RawSubframe, RawWord, SubframeFramer,
        };
    }

    pub mod navfilter {
        pub use crate::navfilter::{
            AlmanacRangeFilter, Carrier, CookFilter, CrossSourceFilter, EmptyFilter,
            EphMakerFilter, LNavFilterData, NavFilter, NavFilterKey, NavFilterMgr, OrderFilter,
            ParityFilter, TlmHowFilter, TrackingCode,
        };
    }

    // pub re-export
    pub use gnss::prelude::{Constellation, SV};
    pub use hifitime::{Duration, Epoch};
}
