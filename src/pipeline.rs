use crate::constants::{CELL_SIZE_DEGREES, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH, DEFAULT_ZOOM};
use crate::error::GridCellError;
use crate::grid::CellGrid;
use crate::io::html::{MapView, write_html_map};
use crate::loader::{GridTable, SelectionKeys};
use std::path::PathBuf;
use tracing::info;

/// Configuration for a GRIB to grid-map run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub selection: SelectionKeys,
    pub cell_size: f64,
    pub zoom: u8,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            selection: SelectionKeys::default(),
            cell_size: CELL_SIZE_DEGREES,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl PipelineConfig {
    /// Create config reading `input_path` and writing `output_path`, with
    /// default selection keys, cell size and zoom.
    ///
    /// # Example
    /// ```
    /// use era5_gridcells::{LevelType, PipelineConfig, SelectionKeys};
    ///
    /// let config = PipelineConfig::new("era5.grib", "map.html")
    ///     .selection(SelectionKeys::new(LevelType::Surface, 1))
    ///     .cell_size(0.1)
    ///     .zoom(10);
    /// ```
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            ..Self::default()
        }
    }

    pub fn selection(mut self, selection: SelectionKeys) -> Self {
        self.selection = selection;
        self
    }

    pub fn cell_size(mut self, cell_size: f64) -> Self {
        self.cell_size = cell_size;
        self
    }

    pub fn zoom(mut self, zoom: u8) -> Self {
        self.zoom = zoom;
        self
    }
}

/// What a run read and produced.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSummary {
    /// Fields matching the selection keys
    pub records: usize,
    /// Coordinate rows before deduplication
    pub rows: usize,
    /// Unique coordinates, and so cells
    pub cells: usize,
    pub view: MapView,
}

/// Load, deduplicate, cellify and render, stopping at the first error.
///
/// # Example
///
/// ```no_run
/// use era5_gridcells::{PipelineConfig, run};
///
/// # fn main() -> Result<(), era5_gridcells::GridCellError> {
/// let summary = run(&PipelineConfig::default())?;
/// println!("{} cells", summary.cells);
/// # Ok(())
/// # }
/// ```
pub fn run(config: &PipelineConfig) -> Result<PipelineSummary, GridCellError> {
    let table = GridTable::load(&config.input_path, &config.selection)?;
    let rows = table.len();

    let coords = table.unique_coordinates();
    info!(records = table.records().len(), rows, unique = coords.len(), "Deduplicated coordinates");

    let grid = CellGrid::from_coordinates(&coords, config.cell_size);
    info!(cells = grid.len(), size = grid.cell_size(), "Built grid cells");

    let view = write_html_map(&grid, &config.output_path, config.zoom)?;

    Ok(PipelineSummary {
        records: table.records().len(),
        rows,
        cells: grid.len(),
        view,
    })
}
