//! RINEX-2 / RINEX-3 observation converter
use crate::{
    codes::{ObsCodeMap, OBS_CODE_MAP},
    error::Error,
    header::MarkerType,
    prelude::{Constellation, Observable, SV},
    sv::system,
};
use std::collections::BTreeSet;
use std::str::FromStr;

#[cfg(feature = "log")]
use log::warn;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod batch;
mod header;
mod record;

pub use batch::{ObsFileV2, ObsFileV3, ObservationFile};

/// Converter options
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConverterOpts {
    /// Convert optional header records too
    pub fill_optional_fields: bool,
    /// Carry header comments over
    pub keep_comments: bool,
    /// RINEX-3 marker type. [MarkerType::NonGeodetic] when not specified.
    pub marker_type: Option<MarkerType>,
    /// Turns unknown observation codes into errors,
    /// instead of dropping (RINEX-2) or truncating (RINEX-3) them.
    pub strict_codes: bool,
}

impl Default for ConverterOpts {
    fn default() -> Self {
        Self {
            fill_optional_fields: true,
            keep_comments: true,
            marker_type: None,
            strict_codes: false,
        }
    }
}

impl ConverterOpts {
    pub fn with_optional_fields(&self, fill: bool) -> Self {
        let mut s = *self;
        s.fill_optional_fields = fill;
        s
    }
    pub fn with_comments(&self, keep: bool) -> Self {
        let mut s = *self;
        s.keep_comments = keep;
        s
    }
    pub fn with_marker_type(&self, marker: MarkerType) -> Self {
        let mut s = *self;
        s.marker_type = Some(marker);
        s
    }
    pub fn with_strict_codes(&self, strict: bool) -> Self {
        let mut s = *self;
        s.strict_codes = strict;
        s
    }
}

/// Systems for which at least one satellite was converted.
/// Accumulated while converting records, then used to
/// drop the unobserved systems from the RINEX-3 header.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObservedSystems(BTreeSet<Constellation>);

impl ObservedSystems {
    pub fn insert(&mut self, sv: &SV) {
        self.0.insert(system(sv.constellation));
    }
    pub fn contains(&self, constellation: Constellation) -> bool {
        self.0.contains(&system(constellation))
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = &Constellation> {
        self.0.iter()
    }
}

impl<'a> Extend<&'a SV> for ObservedSystems {
    fn extend<T: IntoIterator<Item = &'a SV>>(&mut self, iter: T) {
        for sv in iter {
            self.insert(sv);
        }
    }
}

/// Whole file conversion summary
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConversionReport {
    /// Records converted
    pub converted: usize,
    /// Records skipped (no satellites)
    pub skipped: usize,
    /// Observation codes the code table does not know about
    pub unknown_codes: BTreeSet<String>,
}

impl std::fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} converted, {} skipped", self.converted, self.skipped)?;
        if !self.unknown_codes.is_empty() {
            write!(f, ", unknown codes: ")?;
            for (i, code) in self.unknown_codes.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{}", code)?;
            }
        }
        Ok(())
    }
}

/// [RinexConverter] translates headers and records between
/// the two revisions, following an [ObsCodeMap].
/// It keeps no state between calls.
#[derive(Clone, Debug)]
pub struct RinexConverter<'a> {
    map: &'a ObsCodeMap,
    opts: ConverterOpts,
}

impl Default for RinexConverter<'static> {
    fn default() -> Self {
        Self::new(ConverterOpts::default())
    }
}

impl RinexConverter<'static> {
    /// Converter using the standard code table
    pub fn new(opts: ConverterOpts) -> Self {
        Self {
            map: &*OBS_CODE_MAP,
            opts,
        }
    }
}

impl<'a> RinexConverter<'a> {
    /// Converter using a custom code table
    pub fn with_code_map(map: &'a ObsCodeMap, opts: ConverterOpts) -> Self {
        Self { map, opts }
    }
    pub fn opts(&self) -> &ConverterOpts {
        &self.opts
    }
    pub fn code_map(&self) -> &ObsCodeMap {
        self.map
    }

    /// RINEX-2 observable to RINEX-3. `None` when the code is unknown
    /// and we are not in strict mode.
    fn observable_to_rinex3(&self, observable: &Observable) -> Result<Option<Observable>, Error> {
        match self.map.observable_to_rinex3(observable) {
            Ok(obs) => Ok(Some(obs)),
            Err(Error::UnknownCode(code)) => {
                if self.opts.strict_codes {
                    Err(Error::UnknownCode(code))
                } else {
                    #[cfg(feature = "log")]
                    warn!("unknown observable \"{}\": dropped", code);
                    Ok(None)
                }
            },
            Err(e) => Err(e),
        }
    }

    /// RINEX-3 observable to RINEX-2, truncated when unknown
    /// and we are not in strict mode.
    fn observable_to_rinex2(&self, observable: &Observable) -> Result<Observable, Error> {
        let code3 = observable.as_str();
        match self.map.to_rinex2(code3) {
            Ok(code2) => Ok(Observable::from_str(code2)?),
            Err(e) => {
                if self.opts.strict_codes {
                    Err(e)
                } else {
                    #[cfg(feature = "log")]
                    warn!("unknown observable \"{}\": truncated", code3);
                    Ok(Observable::from_str(self.map.to_rinex2_lossy(code3))?)
                }
            },
        }
    }
}
