//! Fuel types sold by the station.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::ParseFuelTypeError;

/// Kind of fuel a pump holds and a price applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelType {
    /// Regular petrol.
    Regular,
    /// Super petrol.
    Super,
    /// Diesel.
    Diesel,
}

impl FuelType {
    /// Every fuel type, in declaration order.
    pub const ALL: [Self; 3] = [Self::Regular, Self::Super, Self::Diesel];

    /// Lowercase name used in config files and on the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Super => "super",
            Self::Diesel => "diesel",
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FuelType {
    type Err = ParseFuelTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "regular" => Ok(Self::Regular),
            "super" => Ok(Self::Super),
            "diesel" => Ok(Self::Diesel),
            other => Err(ParseFuelTypeError(other.to_string())),
        }
    }
}
