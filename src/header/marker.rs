//! Geodetic marker type (RINEX-3 only)
use crate::error::Error;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MarkerType {
    /// Earth fixed & high precision
    Geodetic,
    /// Earth fixed & low precision.
    /// Assumed for all RINEX-2 data, which does not describe the marker.
    #[default]
    NonGeodetic,
    /// Generated from network
    NonPhysical,
    /// Orbiting space vehicle
    Spaceborne,
    /// Aircraft, balloon..
    Airborne,
    /// Mobile water craft
    Watercraft,
    /// Mobile terrestrial vehicle
    Groundcraft,
    /// Fixed on water surface
    FixedBuoy,
    /// Floating on water surface
    FloatingBuoy,
    /// Floating on ice
    FloatingIce,
    /// Fixed on glacier
    Glacier,
    /// Rockets, shells, etc..
    Ballistic,
    /// Animal carrying a receiver
    Animal,
    /// Human being carrying a receiver
    Human,
}

impl std::fmt::Display for MarkerType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            Self::Geodetic => "GEODETIC",
            Self::NonGeodetic => "NON_GEODETIC",
            Self::NonPhysical => "NON_PHYSICAL",
            Self::Spaceborne => "SPACEBORNE",
            Self::Airborne => "AIRBORNE",
            Self::Watercraft => "WATER_CRAFT",
            Self::Groundcraft => "GROUND_CRAFT",
            Self::FixedBuoy => "FIXED_BUOY",
            Self::FloatingBuoy => "FLOATING_BUOY",
            Self::FloatingIce => "FLOATING_ICE",
            Self::Glacier => "GLACIER",
            Self::Ballistic => "BALLISTIC",
            Self::Animal => "ANIMAL",
            Self::Human => "HUMAN",
        };
        f.write_str(s)
    }
}

impl FromStr for MarkerType {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "GEODETIC" => Ok(Self::Geodetic),
            "NON_GEODETIC" => Ok(Self::NonGeodetic),
            "NON_PHYSICAL" => Ok(Self::NonPhysical),
            "SPACEBORNE" | "SPACE_BORNE" => Ok(Self::Spaceborne),
            "AIRBORNE" | "AIR_BORNE" => Ok(Self::Airborne),
            "WATER_CRAFT" | "WATERCRAFT" => Ok(Self::Watercraft),
            "GROUND_CRAFT" | "GROUNDCRAFT" => Ok(Self::Groundcraft),
            "FIXED_BUOY" => Ok(Self::FixedBuoy),
            "FLOATING_BUOY" => Ok(Self::FloatingBuoy),
            "FLOATING_ICE" => Ok(Self::FloatingIce),
            "GLACIER" => Ok(Self::Glacier),
            "BALLISTIC" => Ok(Self::Ballistic),
            "ANIMAL" => Ok(Self::Animal),
            "HUMAN" => Ok(Self::Human),
            _ => Err(Error::MarkerTypeParsing(s.to_string())),
        }
    }
}
