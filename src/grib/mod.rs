//! Minimal GRIB (editions 1 and 2) reader.
//!
//! Reads just enough of each message to know where a field lives: its
//! vertical level, forecast step and grid definition. Packed data values
//! are never decoded. GRIB2 messages go through the `grib` crate; GRIB1,
//! which it does not read, is parsed here.

mod edition2;
mod grid;
mod reader;
mod sections;
mod tables;

#[cfg(test)]
pub(crate) mod testdata;

pub use grid::{Grid, GridPoints, LatLonGrid};
pub use reader::GribReader;
pub use edition2::{parse_grib2_grid, parse_grib2_message, parse_grib2_product};
pub use sections::{Product, parse_grib1_grid, parse_grib1_product};
pub use tables::LevelType;

/// One field (product) described by a GRIB message.
#[derive(Debug, Clone, PartialEq)]
pub struct GribField {
    pub level: LevelType,
    /// Forecast step in seconds, `None` when the encoding is not understood
    pub step_seconds: Option<i64>,
    pub grid: Grid,
}

/// A GRIB message and the fields it carries.
///
/// GRIB1 messages always carry one field; GRIB2 messages may repeat
/// Sections 4 to 7 and carry several.
#[derive(Debug, Clone, PartialEq)]
pub struct GribMessage {
    /// Position of the message in the file, starting at 0
    pub index: usize,
    /// Byte offset of the `GRIB` marker
    pub offset: u64,
    pub edition: u8,
    /// Total length in bytes, Section 0 to the `7777` marker
    pub length: u64,
    pub fields: Vec<GribField>,
}
