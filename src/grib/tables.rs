//! Code tables needed to select fields: level types and time units.

use std::fmt;
use std::str::FromStr;

/// Type of vertical level, named the way ecCodes names `typeOfLevel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LevelType {
    Surface,
    IsobaricInhPa,
    MeanSea,
    HeightAboveGround,
    DepthBelowLandLayer,
    /// Any other code, as found in the file.
    Other(u8),
}

impl LevelType {
    /// GRIB1 Table 3 (PDS octet 10).
    pub fn from_grib1(code: u8) -> Self {
        match code {
            1 => LevelType::Surface,
            100 => LevelType::IsobaricInhPa,
            102 => LevelType::MeanSea,
            105 => LevelType::HeightAboveGround,
            112 => LevelType::DepthBelowLandLayer,
            other => LevelType::Other(other),
        }
    }

    /// GRIB2 Code Table 4.5 (type of first fixed surface).
    pub fn from_grib2(code: u8) -> Self {
        match code {
            1 => LevelType::Surface,
            100 => LevelType::IsobaricInhPa,
            101 => LevelType::MeanSea,
            103 => LevelType::HeightAboveGround,
            106 => LevelType::DepthBelowLandLayer,
            other => LevelType::Other(other),
        }
    }

    pub fn name(&self) -> String {
        match self {
            LevelType::Surface => "surface".to_string(),
            LevelType::IsobaricInhPa => "isobaricInhPa".to_string(),
            LevelType::MeanSea => "meanSea".to_string(),
            LevelType::HeightAboveGround => "heightAboveGround".to_string(),
            LevelType::DepthBelowLandLayer => "depthBelowLandLayer".to_string(),
            LevelType::Other(code) => format!("level{}", code),
        }
    }
}

impl fmt::Display for LevelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for LevelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "surface" => Ok(LevelType::Surface),
            "isobaricInhPa" => Ok(LevelType::IsobaricInhPa),
            "meanSea" => Ok(LevelType::MeanSea),
            "heightAboveGround" => Ok(LevelType::HeightAboveGround),
            "depthBelowLandLayer" => Ok(LevelType::DepthBelowLandLayer),
            other => Err(format!("Unknown typeOfLevel '{}'", other)),
        }
    }
}

/// Seconds per unit of GRIB1 Table 4. `None` for units with no fixed length.
pub(crate) fn grib1_time_unit_seconds(unit: u8) -> Option<i64> {
    match unit {
        0 => Some(60),
        1 => Some(3_600),
        2 => Some(86_400),
        10 => Some(3 * 3_600),
        11 => Some(6 * 3_600),
        12 => Some(12 * 3_600),
        13 => Some(15 * 60),
        14 => Some(30 * 60),
        254 => Some(1),
        _ => None,
    }
}

/// Seconds per unit of GRIB2 Code Table 4.4.
pub(crate) fn grib2_time_unit_seconds(unit: u8) -> Option<i64> {
    match unit {
        0 => Some(60),
        1 => Some(3_600),
        2 => Some(86_400),
        10 => Some(3 * 3_600),
        11 => Some(6 * 3_600),
        12 => Some(12 * 3_600),
        13 => Some(1),
        _ => None,
    }
}
