//! GRIB2 messages, decoded with the `grib` crate.

use crate::error::GridCellError;
use crate::grib::GribField;
use crate::grib::grid::{Grid, LatLonGrid};
use crate::grib::sections::Product;
use crate::grib::tables::{LevelType, grib2_time_unit_seconds};
use grib::{GridDefinition, GridDefinitionTemplateValues, Name, Num, ProdDefinition};

fn grib_error(e: grib::GribError) -> GridCellError {
    GridCellError::GribParseError(e.to_string())
}

/// Decodes every field of one complete GRIB2 message (Section 0 to `7777`).
///
/// Each repeated Section 4 becomes a field paired with the grid definition
/// in force at that point of the message.
pub fn parse_grib2_message(bytes: Vec<u8>) -> Result<Vec<GribField>, GridCellError> {
    let grib2 = grib::from_bytes(bytes).map_err(grib_error)?;

    let mut fields = Vec::with_capacity(grib2.len());
    for (_, submessage) in grib2.iter() {
        let product = parse_grib2_product(submessage.prod_def());
        let grid = parse_grib2_grid(submessage.grid_def())?;
        fields.push(GribField {
            level: product.level,
            step_seconds: product.step_seconds,
            grid,
        });
    }
    Ok(fields)
}

/// Converts a GRIB2 grid definition. Only template 3.0 (regular lat/lon) is
/// kept; its coordinates are in microdegrees.
pub fn parse_grib2_grid(def: &GridDefinition) -> Result<Grid, GridCellError> {
    let template = def.grid_tmpl_num();
    if template != 0 {
        return Ok(Grid::Unsupported(template));
    }

    match GridDefinitionTemplateValues::try_from(def).map_err(grib_error)? {
        GridDefinitionTemplateValues::Template0(ll) => Ok(Grid::LatLon(LatLonGrid {
            ni: ll.ni,
            nj: ll.nj,
            lat_first: ll.first_point_lat as i64,
            lon_first: ll.first_point_lon as i64,
            lat_last: ll.last_point_lat as i64,
            lon_last: ll.last_point_lon as i64,
            di: None,
            dj: None,
            scanning_mode: ll.scanning_mode.0,
            basic_angle: 1,
            subdivisions: 1_000_000,
        })),
        _ => Ok(Grid::Unsupported(template)),
    }
}

/// Reads the level type and forecast step of a GRIB2 product definition.
///
/// For templates 4.8 and 4.11 the step is the end of the statistical
/// processing range, as ecCodes reports `step` for accumulations.
pub fn parse_grib2_product(def: &ProdDefinition) -> Product {
    let level = def
        .fixed_surfaces()
        .map(|(first, _)| LevelType::from_grib2(first.surface_type))
        .unwrap_or(LevelType::Other(255));

    let mut step_seconds = def.forecast_time().and_then(|ft| {
        let unit = match ft.unit {
            Name(unit) => u8::from(unit),
            Num(unit) => unit,
        };
        grib2_time_unit_seconds(unit).map(|s| ft.value as i64 * s)
    });

    // Offsets into the section body (octet - 6): unit of the time range, then its length
    let range_at = match def.prod_tmpl_num() {
        8 => Some(43),
        11 => Some(46),
        _ => None,
    };
    if let Some(at) = range_at {
        let body: Vec<u8> = def.iter().copied().collect();
        let range = body.get(at..at + 5).map(|b| {
            let length = u32::from_be_bytes([b[1], b[2], b[3], b[4]]) as i64;
            (grib2_time_unit_seconds(b[0]), length)
        });
        step_seconds = match range {
            Some((Some(unit), length)) => step_seconds.map(|start| start + length * unit),
            _ => None,
        };
    }

    Product {
        level,
        step_seconds,
    }
}
