use crate::constants::DEFAULT_STEP_HOURS;
use crate::coord::{GridPoint, deduplicate};
use crate::error::GridCellError;
use crate::grib::{GribField, GribReader, Grid, LatLonGrid, LevelType};
use std::collections::HashSet;
use std::io::{Read, Seek};
use std::path::Path;
use tracing::{debug, info};

/// Keys selecting which slice of a GRIB file to read, as in
/// `filter_by_keys={'typeOfLevel': 'surface', 'step': 1}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionKeys {
    pub type_of_level: LevelType,
    pub step_hours: i64,
}

impl Default for SelectionKeys {
    fn default() -> Self {
        Self {
            type_of_level: LevelType::Surface,
            step_hours: DEFAULT_STEP_HOURS,
        }
    }
}

impl SelectionKeys {
    pub fn new(type_of_level: LevelType, step_hours: i64) -> Self {
        Self {
            type_of_level,
            step_hours,
        }
    }

    pub fn matches(&self, field: &GribField) -> bool {
        field.level == self.type_of_level && field.step_seconds == Some(self.step_hours * 3_600)
    }
}

/// A selected field and the message it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct GridRecord {
    pub message_index: usize,
    pub grid: LatLonGrid,
}

/// The coordinate rows of every selected field.
///
/// Rows are generated on demand from the grid definitions: iterating
/// yields one [`GridPoint`] per grid point per record.
#[derive(Debug, Clone, Default)]
pub struct GridTable {
    records: Vec<GridRecord>,
}

impl GridTable {
    /// Reads `path` and keeps the fields matching `keys`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use era5_gridcells::{GridTable, SelectionKeys};
    ///
    /// # fn main() -> Result<(), era5_gridcells::GridCellError> {
    /// let table = GridTable::load("data/era5_land.grib", &SelectionKeys::default())?;
    /// let coords = table.unique_coordinates();
    /// println!("{} rows, {} unique points", table.len(), coords.len());
    /// # Ok(())
    /// # }
    /// ```
    pub fn load(path: impl AsRef<Path>, keys: &SelectionKeys) -> Result<Self, GridCellError> {
        let path = path.as_ref();
        info!(path = %path.display(), type_of_level = %keys.type_of_level, step = keys.step_hours, "Loading GRIB file");
        Self::from_reader(GribReader::open(path)?, keys)
    }

    /// Builds a table from an already opened reader.
    pub fn from_reader<R: Read + Seek>(
        reader: GribReader<R>,
        keys: &SelectionKeys,
    ) -> Result<Self, GridCellError> {
        let mut records = Vec::new();
        let mut messages = 0usize;
        let mut fields = 0usize;

        for message in reader {
            let message = message?;
            messages += 1;
            for field in message.fields {
                fields += 1;
                if !keys.matches(&field) {
                    continue;
                }
                let record = match field.grid {
                    Grid::LatLon(grid) => GridRecord {
                        message_index: message.index,
                        grid,
                    },
                    Grid::Unsupported(template) => {
                        return Err(GridCellError::UnsupportedGrid(template));
                    }
                };
                debug!(
                    message = record.message_index,
                    ni = record.grid.ni,
                    nj = record.grid.nj,
                    "Selected field"
                );
                records.push(record);
            }
        }

        debug!(messages, fields, selected = records.len(), "Scanned GRIB file");

        if records.is_empty() {
            return Err(GridCellError::NoMatchingRecords {
                type_of_level: keys.type_of_level.name(),
                step_hours: keys.step_hours,
            });
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[GridRecord] {
        &self.records
    }

    /// Number of rows (grid points summed over all records).
    pub fn len(&self) -> usize {
        self.records.iter().map(|r| r.grid.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every row, record by record.
    pub fn rows(&self) -> impl Iterator<Item = GridPoint> + '_ {
        self.records.iter().flat_map(|r| r.grid.points())
    }

    /// Unique (lat, lon) pairs in first-occurrence order.
    ///
    /// Records sharing a grid definition contribute identical rows, so each
    /// distinct grid is expanded once.
    pub fn unique_coordinates(&self) -> Vec<GridPoint> {
        let mut seen: HashSet<&LatLonGrid> = HashSet::new();
        let grids: Vec<&LatLonGrid> = self
            .records
            .iter()
            .map(|r| &r.grid)
            .filter(|g| seen.insert(*g))
            .collect();

        debug!(records = self.records.len(), grids = grids.len(), "Distinct grid definitions");
        deduplicate(grids.into_iter().flat_map(|g| g.points()))
    }
}
