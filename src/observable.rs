//! Observation codes, in RINEX-2 (`C1`) or RINEX-3 (`C1C`) form
use std::str::FromStr;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParsingError {
    #[error("unknown observable \"{0}\"")]
    UnknownObservable(String),
    #[error("malformed observable \"{0}\"")]
    MalformedDescriptor(String),
}

/// Observable describes one observation column of an Observation RINEX.
/// The inner descriptor is either 2 characters `[type][band]` (RINEX-2)
/// or 3 characters `[type][band][code]` (RINEX-3).
#[derive(Debug, Clone, PartialEq, PartialOrd, Hash, Ord, Eq)]
pub enum Observable {
    /// Carrier phase observation
    Phase(String),
    /// Doppler shift observation
    Doppler(String),
    /// SSI observation
    SSI(String),
    /// Pseudo range observation.
    /// RINEX-2 P-code ranges (`P1`, `P2`) are pseudo ranges too.
    PseudoRange(String),
}

impl Default for Observable {
    fn default() -> Self {
        Self::Phase("L1C".to_string())
    }
}

impl Observable {
    pub fn is_phase_observable(&self) -> bool {
        matches!(self, Self::Phase(_))
    }
    pub fn is_pseudorange_observable(&self) -> bool {
        matches!(self, Self::PseudoRange(_))
    }
    pub fn is_doppler_observable(&self) -> bool {
        matches!(self, Self::Doppler(_))
    }
    pub fn is_ssi_observable(&self) -> bool {
        matches!(self, Self::SSI(_))
    }
    /// Returns the plain descriptor, like "C1" or "L2W"
    pub fn as_str(&self) -> &str {
        match self {
            Self::Phase(c) | Self::Doppler(c) | Self::SSI(c) | Self::PseudoRange(c) => c,
        }
    }
    /// True if this is a 2 character RINEX-2 descriptor
    pub fn is_rinex2(&self) -> bool {
        self.as_str().len() == 2
    }
    /// True if this is a 3 character RINEX-3 descriptor
    pub fn is_rinex3(&self) -> bool {
        self.as_str().len() == 3
    }
    /// Frequency band digit
    pub fn band(&self) -> Option<char> {
        self.as_str().chars().nth(1)
    }
    /// Returns the band + tracking code part of a RINEX-3 descriptor,
    /// for example "1C" for "C1C".
    pub fn code(&self) -> Option<String> {
        let c = self.as_str();
        if c.len() == 3 {
            c.get(1..).map(|s| s.to_string())
        } else {
            None
        }
    }
}

impl std::fmt::Display for Observable {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Observable {
    type Err = ParsingError;
    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let content = content.trim().to_uppercase();
        let len = content.len();
        if len < 2 || len > 3 || !content.is_ascii() {
            return Err(ParsingError::MalformedDescriptor(content));
        }
        if content.starts_with('L') {
            Ok(Self::Phase(content))
        } else if content.starts_with('C') || content.starts_with('P') {
            Ok(Self::PseudoRange(content))
        } else if content.starts_with('S') {
            Ok(Self::SSI(content))
        } else if content.starts_with('D') {
            Ok(Self::Doppler(content))
        } else {
            Err(ParsingError::UnknownObservable(content))
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for Observable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Observable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn test_default_observable() {
        let default = Observable::default();
        assert_eq!(default, Observable::from_str("L1C").unwrap());
        assert_eq!(default, Observable::Phase(String::from("L1C")));
        assert!(default.is_phase_observable());
        assert!(default.is_rinex3());
    }
    #[test]
    fn test_physics() {
        assert!(Observable::from_str("L1").unwrap().is_phase_observable());
        assert!(Observable::from_str("L6X").unwrap().is_phase_observable());
        assert!(Observable::from_str("C1").unwrap().is_pseudorange_observable());
        assert!(Observable::from_str("P2").unwrap().is_pseudorange_observable());
        assert!(Observable::from_str("C6X").unwrap().is_pseudorange_observable());
        assert!(Observable::from_str("D1").unwrap().is_doppler_observable());
        assert!(Observable::from_str("D6X").unwrap().is_doppler_observable());
        assert!(Observable::from_str("S2").unwrap().is_ssi_observable());
        assert!(Observable::from_str("S1W").unwrap().is_ssi_observable());
    }
    #[test]
    fn test_observable() {
        assert_eq!(
            Observable::from_str("l2"),
            Ok(Observable::Phase(String::from("L2")))
        );
        assert!(Observable::from_str("L1").unwrap().code().is_none());
        assert!(Observable::from_str("L1").unwrap().is_rinex2());
        assert_eq!(
            Observable::from_str("L6Q").unwrap().code(),
            Some(String::from("6Q"))
        );
        assert_eq!(Observable::from_str("C7X").unwrap().band(), Some('7'));
        assert_eq!(
            format!("{}", Observable::Doppler(String::from("D7Q"))),
            "D7Q"
        );
        assert!(matches!(
            Observable::from_str("X1"),
            Err(ParsingError::UnknownObservable(_))
        ));
        assert!(matches!(
            Observable::from_str("C1CX"),
            Err(ParsingError::MalformedDescriptor(_))
        ));
        assert!(Observable::from_str("C").is_err());
    }
    #[test]
    fn test_non_ascii_code() {
        assert!(Observable::Phase("é1".to_string()).code().is_none());
        assert!(Observable::Phase("é1C".to_string()).code().is_none());
        assert_eq!(Observable::Phase("L1Ç".to_string()).band(), Some('1'));
    }
}
