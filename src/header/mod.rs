//! Observation RINEX headers, for both revisions
use crate::{
    hardware::{Antenna, Receiver},
    prelude::{Constellation, Duration, Epoch, Observable, Version, SV},
};
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod marker;
mod validity;

pub use marker::MarkerType;
pub use validity::{ValidV2, ValidV3, VALIDITY_MAP};

/// Header records that exist in both revisions, with the same meaning
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Metadata {
    /// File type, "OBSERVATION DATA"
    pub file_type: String,
    /// Satellite system(s) described in this file
    pub system: Constellation,
    /// Program that generated this file
    pub program: String,
    /// Operator or agency that ran the program
    pub run_by: String,
    /// File creation date, as written in the header
    pub date: String,
    pub marker_name: String,
    pub observer: String,
    pub agency: String,
    pub receiver: Receiver,
    pub antenna: Antenna,
    /// Approximate marker position, ECEF (m)
    pub position: Option<(f64, f64, f64)>,
    pub time_of_first_obs: Option<Epoch>,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            file_type: "OBSERVATION DATA".to_string(),
            system: Constellation::Mixed,
            program: String::new(),
            run_by: String::new(),
            date: String::new(),
            marker_name: String::new(),
            observer: String::new(),
            agency: String::new(),
            receiver: Receiver::default(),
            antenna: Antenna::default(),
            position: None,
            time_of_first_obs: None,
        }
    }
}

/// Header records that may be omitted
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OptionalFields {
    pub marker_number: Option<String>,
    /// Sampling interval
    pub interval: Option<Duration>,
    pub time_of_last_obs: Option<Epoch>,
    /// True when epochs, ranges and phases were corrected
    /// by the receiver clock offset
    pub rcv_clock_offs_applied: Option<bool>,
    pub leap_seconds: Option<i32>,
    /// Number of satellites in this file
    pub num_sv: Option<u16>,
    /// Number of observations per satellite, in header column order
    #[cfg_attr(feature = "serde", serde(default, with = "crate::sv::sv_keyed"))]
    pub obs_per_sv: BTreeMap<SV, Vec<u32>>,
}

/// RINEX-2 observation header.
/// Observables are described once, for all systems.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HeaderV2 {
    pub version: Version,
    pub meta: Metadata,
    /// Observables, in data column order
    pub observables: Vec<Observable>,
    /// Default L1 and L2 wavelength factors
    pub wavelength_factors: (u8, u8),
    pub optional: OptionalFields,
    pub comments: Vec<String>,
    pub valid: ValidV2,
}

impl Default for HeaderV2 {
    fn default() -> Self {
        Self {
            version: Version::V2,
            meta: Metadata::default(),
            observables: Vec::new(),
            wavelength_factors: (1, 1),
            optional: OptionalFields::default(),
            comments: Vec::new(),
            valid: ValidV2::empty(),
        }
    }
}

impl HeaderV2 {
    /// True if all required records are present
    pub fn is_valid(&self) -> bool {
        self.valid.contains(ValidV2::REQUIRED)
    }
    /// Returns column index of this observable
    pub fn column(&self, observable: &Observable) -> Option<usize> {
        self.observables.iter().position(|obs| obs == observable)
    }
    pub fn with_observables(&self, observables: &[&str]) -> Self {
        let mut s = self.clone();
        s.observables = observables
            .iter()
            .filter_map(|code| code.parse::<Observable>().ok())
            .collect();
        s.valid |= ValidV2::OBS_TYPES;
        s
    }
    pub fn with_comment(&self, comment: &str) -> Self {
        let mut s = self.clone();
        s.comments.push(comment.to_string());
        s.valid |= ValidV2::COMMENT;
        s
    }
}

/// RINEX-3 observation header.
/// Observables are described per system.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HeaderV3 {
    pub version: Version,
    pub meta: Metadata,
    pub marker_type: MarkerType,
    /// Observables, per system, in data column order
    pub observables: BTreeMap<Constellation, Vec<Observable>>,
    /// Flat list of RINEX-2 observables merged from all systems.
    /// Empty until the header was prepared for RINEX-2 conversion.
    #[cfg_attr(feature = "serde", serde(default))]
    pub merged_observables: Vec<Observable>,
    pub optional: OptionalFields,
    pub comments: Vec<String>,
    pub valid: ValidV3,
}

impl Default for HeaderV3 {
    fn default() -> Self {
        Self {
            version: Version::V3,
            meta: Metadata::default(),
            marker_type: MarkerType::default(),
            observables: BTreeMap::new(),
            merged_observables: Vec::new(),
            optional: OptionalFields::default(),
            comments: Vec::new(),
            valid: ValidV3::empty(),
        }
    }
}

impl HeaderV3 {
    /// True if all required records are present
    pub fn is_valid(&self) -> bool {
        self.valid.contains(ValidV3::REQUIRED)
    }
    /// Observables declared for this system
    pub fn system_observables(&self, constellation: Constellation) -> Option<&Vec<Observable>> {
        self.observables.get(&crate::sv::system(constellation))
    }
    pub fn with_system_observables(
        &self,
        constellation: Constellation,
        observables: &[&str],
    ) -> Self {
        let mut s = self.clone();
        s.observables.insert(
            crate::sv::system(constellation),
            observables
                .iter()
                .filter_map(|code| code.parse::<Observable>().ok())
                .collect(),
        );
        s.valid |= ValidV3::SYSTEM_OBS_TYPES;
        s
    }
    pub fn with_comment(&self, comment: &str) -> Self {
        let mut s = self.clone();
        s.comments.push(comment.to_string());
        s.valid |= ValidV3::COMMENT;
        s
    }
}
