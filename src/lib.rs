//! # era5-gridcells
//!
//! Turns the grid points of an ERA5-LAND GRIB file into square grid cells
//! and renders them on an interactive web map.
//!
//! ### 1. `GridTable` - Load & Filter
//!
//! ```no_run
//! use era5_gridcells::{GridTable, SelectionKeys};
//!
//! # fn main() -> Result<(), era5_gridcells::GridCellError> {
//! // typeOfLevel = surface, step = 1
//! let table = GridTable::load("data/era5_land.grib", &SelectionKeys::default())?;
//! let coords = table.unique_coordinates();
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. `GridCell` / `CellGrid` - Cells around points
//!
//! ```
//! use era5_gridcells::{CellGrid, GridCell, GridPoint};
//!
//! let cell = GridCell::from_grid_point(&GridPoint::new(10.0, 20.0));
//! let polygon = cell.to_polygon();
//!
//! let grid = CellGrid::from_coordinates(&[GridPoint::new(10.0, 20.0)], 0.1);
//! assert_eq!(grid.len(), 1);
//! ```
//!
//! ### 3. `write_html_map` - Visualize
//!
//! ```no_run
//! use era5_gridcells::{CellGrid, GridPoint, write_html_map};
//!
//! # fn main() -> Result<(), era5_gridcells::GridCellError> {
//! let grid = CellGrid::from_coordinates(&[GridPoint::new(56.5, -3.2)], 0.1);
//! write_html_map(&grid, "grid_map.html", 12)?;
//! # Ok(())
//! # }
//! ```
//!
//! Or run all of it with [`run`] and a [`PipelineConfig`].

pub mod cell;
pub mod constants;
pub mod coord;
pub mod error;
pub mod geom;
pub mod grib;
pub mod grid;
pub mod io;
pub mod loader;
pub mod pipeline;

pub use cell::GridCell;
pub use constants::{
    CELL_SIZE_DEGREES, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH, DEFAULT_STEP_HOURS, DEFAULT_ZOOM,
};
pub use coord::{Coordinate, GridPoint, deduplicate};
pub use error::GridCellError;
pub use geom::{create_square, create_square_from_point, mean_centroid};
pub use grib::{GribField, GribMessage, GribReader, Grid, LatLonGrid, LevelType};
pub use grid::CellGrid;
pub use io::{GridMap, MapView, write_html_map};
pub use loader::{GridRecord, GridTable, SelectionKeys};
pub use pipeline::{PipelineConfig, PipelineSummary, run};

pub use geo_types;
pub use geojson;
