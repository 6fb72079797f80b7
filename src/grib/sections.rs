//! Parsing of the GRIB1 sections that locate a field: the Product
//! Definition Section and the Grid Description Section.
//!
//! Every slice passed in starts at the first octet of its section, so
//! index `n` is octet `n + 1` of the WMO tables.

use crate::error::GridCellError;
use crate::grib::grid::{Grid, LatLonGrid};
use crate::grib::tables::{LevelType, grib1_time_unit_seconds};

/// Product information needed to select a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Product {
    pub level: LevelType,
    /// Forecast step in seconds; `None` when the time encoding is not understood.
    pub step_seconds: Option<i64>,
}

fn take<const N: usize>(data: &[u8], at: usize, section: &str) -> Result<[u8; N], GridCellError> {
    data.get(at..at + N)
        .and_then(|b| b.try_into().ok())
        .ok_or_else(|| {
            GridCellError::GribParseError(format!(
                "{}: need {} bytes at offset {}, have {}",
                section,
                N,
                at,
                data.len()
            ))
        })
}

fn byte(data: &[u8], at: usize, section: &str) -> Result<u8, GridCellError> {
    take::<1>(data, at, section).map(|b| b[0])
}

pub(crate) fn be_u16(data: &[u8], at: usize, section: &str) -> Result<u16, GridCellError> {
    take::<2>(data, at, section).map(u16::from_be_bytes)
}

pub(crate) fn be_u24(data: &[u8], at: usize, section: &str) -> Result<u32, GridCellError> {
    let b = take::<3>(data, at, section)?;
    Ok(u32::from_be_bytes([0, b[0], b[1], b[2]]))
}

/// GRIB stores negative numbers as sign and magnitude, not two's complement.
fn sign_magnitude(raw: u64, bits: u32) -> i64 {
    let sign = 1u64 << (bits - 1);
    let magnitude = (raw & (sign - 1)) as i64;
    if raw & sign != 0 { -magnitude } else { magnitude }
}

fn be_s24(data: &[u8], at: usize, section: &str) -> Result<i64, GridCellError> {
    be_u24(data, at, section).map(|v| sign_magnitude(v as u64, 24))
}

/// Parses a GRIB1 Product Definition Section.
pub fn parse_grib1_product(pds: &[u8]) -> Result<Product, GridCellError> {
    const S: &str = "GRIB1 PDS";

    let level = LevelType::from_grib1(byte(pds, 9, S)?);
    let unit = byte(pds, 17, S)?;
    let p1 = byte(pds, 18, S)? as i64;
    let p2 = byte(pds, 19, S)? as i64;
    let time_range = byte(pds, 20, S)?;

    // Time range indicator, GRIB1 Table 5
    let step_units = match time_range {
        0 => Some(p1),
        1 => Some(0),
        2..=5 => Some(p2),
        10 => Some((p1 << 8) | p2),
        _ => None,
    };
    let step_seconds = step_units.zip(grib1_time_unit_seconds(unit)).map(|(v, s)| v * s);

    Ok(Product {
        level,
        step_seconds,
    })
}

/// Parses a GRIB1 Grid Description Section.
pub fn parse_grib1_grid(gds: &[u8]) -> Result<Grid, GridCellError> {
    const S: &str = "GRIB1 GDS";

    let representation = byte(gds, 5, S)?;
    if representation != 0 {
        return Ok(Grid::Unsupported(representation as u16));
    }

    let increments_given = byte(gds, 16, S)? & 0x80 != 0;
    let increment = |at| -> Result<Option<i64>, GridCellError> {
        let v = be_u16(gds, at, S)?;
        Ok((increments_given && v != u16::MAX).then_some(v as i64))
    };

    Ok(Grid::LatLon(LatLonGrid {
        ni: be_u16(gds, 6, S)? as u32,
        nj: be_u16(gds, 8, S)? as u32,
        lat_first: be_s24(gds, 10, S)?,
        lon_first: be_s24(gds, 13, S)?,
        lat_last: be_s24(gds, 17, S)?,
        lon_last: be_s24(gds, 20, S)?,
        di: increment(23)?,
        dj: increment(25)?,
        scanning_mode: byte(gds, 27, S)?,
        basic_angle: 1,
        subdivisions: 1_000,
    }))
}
