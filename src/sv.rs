//! Satellite system helpers
use crate::prelude::{Constellation, SV};
use std::str::FromStr;

/// Collapses a [Constellation] to the system it is tabulated under:
/// every augmentation system (EGNOS, WAAS, ...) is [Constellation::SBAS].
pub fn system(constellation: Constellation) -> Constellation {
    if constellation.is_sbas() {
        Constellation::SBAS
    } else {
        constellation
    }
}

/// Parses "XYY" satellite descriptors, with SBAS vehicles
/// normalized to [Constellation::SBAS].
pub fn parse_sv(desc: &str) -> Result<SV, gnss::sv::ParsingError> {
    let sv = SV::from_str(desc.trim())?;
    Ok(SV::new(system(sv.constellation), sv.prn))
}

/// Serdes for maps indexed by [SV], with "G01" like string keys
#[cfg(feature = "serde")]
pub(crate) mod sv_keyed {
    use super::parse_sv;
    use crate::prelude::SV;
    use serde::{
        de::Error as _, ser::SerializeMap, Deserialize, Deserializer, Serialize, Serializer,
    };
    use std::collections::BTreeMap;

    pub fn serialize<S, T>(map: &BTreeMap<SV, T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        let mut m = serializer.serialize_map(Some(map.len()))?;
        for (sv, value) in map {
            m.serialize_entry(&sv.to_string(), value)?;
        }
        m.end()
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<BTreeMap<SV, T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        let raw = BTreeMap::<String, T>::deserialize(deserializer)?;
        raw.into_iter()
            .map(|(k, v)| parse_sv(&k).map(|sv| (sv, v)).map_err(D::Error::custom))
            .collect()
    }
}
