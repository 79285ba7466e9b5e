//! RINEX-2 / RINEX-3 observation code table
use crate::{
    error::Error,
    prelude::{Constellation, Observable},
    sv::system,
};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::str::FromStr;

#[cfg(feature = "log")]
use log::debug;

/// RINEX-2 code to RINEX-3 code.
/// RINEX-2 codes carry no tracking information: the civilian (C)
/// tracking code is assumed unless the code is a P-code range.
const RINEX2_TO_RINEX3: &[(&str, &str)] = &[
    ("C1", "C1C"),
    ("C2", "C2C"),
    ("C5", "C5C"),
    ("C6", "C6C"),
    ("C7", "C7C"),
    ("C8", "C8C"),
    ("P1", "C1P"),
    ("P2", "C2P"),
    ("L1", "L1C"),
    ("L2", "L2C"),
    ("L5", "L5C"),
    ("L6", "L6C"),
    ("L7", "L7C"),
    ("L8", "L8C"),
    ("D1", "D1C"),
    ("D2", "D2C"),
    ("D5", "D5C"),
    ("D6", "D6C"),
    ("D7", "D7C"),
    ("D8", "D8C"),
    ("S1", "S1C"),
    ("S2", "S2C"),
    ("S5", "S5C"),
    ("S6", "S6C"),
    ("S7", "S7C"),
    ("S8", "S8C"),
];

const GPS_CODES: &[&str] = &[
    "C1", "C2", "C5", "P1", "P2", "L1", "L2", "L5", "D1", "D2", "S1", "S2", "S5",
];

// P2 ranges are not converted for Glonass
const GLONASS_CODES: &[&str] = &["C1", "C2", "P1", "L1", "L2", "D1", "D2", "S1", "S2"];

const GALILEO_CODES: &[&str] = &[
    "C1", "C5", "C6", "C7", "C8", "L1", "L5", "L6", "L7", "L8", "D1", "D5", "D6", "D7", "D8",
    "S1", "S5", "S6", "S7", "S8",
];

const SBAS_CODES: &[&str] = &["C1", "C5", "L1", "L5", "D1", "D5", "S1", "S5"];

lazy_static! {
    /// Standard RINEX-2 / RINEX-3 code table, built once.
    pub static ref OBS_CODE_MAP: ObsCodeMap = ObsCodeMap::default();
}

/// [ObsCodeMap] translates observation codes between the
/// two RINEX revisions and tells which RINEX-2 codes make
/// sense for each [Constellation].
///
/// The table is immutable once built. RINEX-2 codes map to
/// exactly one RINEX-3 code, while the reverse lookup is
/// many to one: RINEX-3 to 2 to 3 is lossy by nature.
#[derive(Debug, Clone, PartialEq)]
pub struct ObsCodeMap {
    /// Sorted by RINEX-2 code, which gives the reverse lookup tie-break
    to_rinex3: BTreeMap<String, String>,
    to_rinex2: HashMap<String, String>,
    validity: HashMap<Constellation, BTreeSet<String>>,
}

impl Default for ObsCodeMap {
    fn default() -> Self {
        Self::new(
            RINEX2_TO_RINEX3.iter().copied(),
            [
                (Constellation::GPS, GPS_CODES),
                (Constellation::Glonass, GLONASS_CODES),
                (Constellation::Galileo, GALILEO_CODES),
                (Constellation::SBAS, SBAS_CODES),
            ]
            .into_iter()
            .map(|(c, codes)| (c, codes.iter().copied())),
        )
    }
}

impl ObsCodeMap {
    /// Builds a custom table from (RINEX-2, RINEX-3) pairs and per
    /// [Constellation] RINEX-2 validity sets.
    /// When several RINEX-2 codes share a RINEX-3 code, the
    /// lexically smallest one is returned by [Self::to_rinex2].
    pub fn new<'a, P, V, C>(pairs: P, validity: V) -> Self
    where
        P: IntoIterator<Item = (&'a str, &'a str)>,
        V: IntoIterator<Item = (Constellation, C)>,
        C: IntoIterator<Item = &'a str>,
    {
        let to_rinex3 = pairs
            .into_iter()
            .map(|(v2, v3)| (v2.to_string(), v3.to_string()))
            .collect::<BTreeMap<_, _>>();

        let mut to_rinex2 = HashMap::<String, String>::with_capacity(to_rinex3.len());
        for (v2, v3) in to_rinex3.iter() {
            to_rinex2.entry(v3.clone()).or_insert_with(|| v2.clone());
        }

        let mut map = HashMap::<Constellation, BTreeSet<String>>::new();
        for (constellation, codes) in validity {
            map.entry(system(constellation))
                .or_default()
                .extend(codes.into_iter().map(|c| c.to_string()));
        }

        Self {
            to_rinex3,
            to_rinex2,
            validity: map,
        }
    }

    /// Returns the canonical RINEX-3 code for this RINEX-2 code.
    pub fn to_rinex3(&self, code2: &str) -> Result<&str, Error> {
        self.to_rinex3
            .get(code2)
            .map(|s| s.as_str())
            .ok_or_else(|| Error::UnknownCode(code2.to_string()))
    }

    /// Returns the RINEX-2 code for this RINEX-3 code.
    pub fn to_rinex2(&self, code3: &str) -> Result<&str, Error> {
        self.to_rinex2
            .get(code3)
            .map(|s| s.as_str())
            .ok_or_else(|| Error::UnknownCode(code3.to_string()))
    }

    /// Same as [Self::to_rinex2], but falls back to the first two characters
    /// of unknown codes. This is lossy: "C1W" becomes "C1".
    pub fn to_rinex2_lossy<'a>(&'a self, code3: &'a str) -> &'a str {
        match self.to_rinex2(code3) {
            Ok(code2) => code2,
            Err(_) => {
                let truncated = code3.get(..2).unwrap_or(code3);
                #[cfg(feature = "log")]
                debug!("{}: truncated to {}", code3, truncated);
                truncated
            },
        }
    }

    /// True if this RINEX-2 code applies to given [Constellation].
    /// SBAS sub-systems share [Constellation::SBAS] validity.
    pub fn is_valid_for(&self, constellation: Constellation, code2: &str) -> bool {
        self.validity
            .get(&system(constellation))
            .map(|set| set.contains(code2))
            .unwrap_or(false)
    }

    /// Constellations this table knows about
    pub fn constellations(&self) -> impl Iterator<Item = Constellation> + '_ {
        let mut sorted = self.validity.keys().copied().collect::<Vec<_>>();
        sorted.sort();
        sorted.into_iter()
    }

    /// [Observable] flavor of [Self::to_rinex3]
    pub fn observable_to_rinex3(&self, observable: &Observable) -> Result<Observable, Error> {
        let code3 = self.to_rinex3(observable.as_str())?;
        Ok(Observable::from_str(code3)?)
    }

    /// [Observable] flavor of [Self::to_rinex2_lossy]
    pub fn observable_to_rinex2(&self, observable: &Observable) -> Result<Observable, Error> {
        let code2 = self.to_rinex2_lossy(observable.as_str());
        Ok(Observable::from_str(code2)?)
    }
}
