/// Error type for era5-gridcells operations.
#[derive(Debug, PartialEq)]
pub enum GridCellError {
    /// File I/O error (missing input, unwritable output, truncated read).
    IoError(String),
    /// A GRIB message is structurally invalid.
    GribParseError(String),
    /// The GRIB edition number is neither 1 nor 2.
    UnsupportedEdition(u8),
    /// A selected field is defined on a grid other than a regular lat/lon grid.
    /// Holds the GRIB2 grid template, the GRIB1 data representation type or
    /// the GRIB1 predefined grid number.
    UnsupportedGrid(u16),
    /// No field in the file matched the selection keys.
    NoMatchingRecords { type_of_level: String, step_hours: i64 },
    /// There are no cells to compute a map view from.
    EmptyGrid,
    /// JSON/GeoJSON serialization error.
    SerializationError(String),
}

impl std::fmt::Display for GridCellError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridCellError::IoError(msg) => write!(f, "IO error: {}", msg),
            GridCellError::GribParseError(msg) => write!(f, "GRIB parse error: {}", msg),
            GridCellError::UnsupportedEdition(e) => write!(f, "Unsupported GRIB edition: {}", e),
            GridCellError::UnsupportedGrid(t) => write!(f, "Unsupported grid type: {}", t),
            GridCellError::NoMatchingRecords {
                type_of_level,
                step_hours,
            } => write!(
                f,
                "No records matching typeOfLevel={} step={}",
                type_of_level, step_hours
            ),
            GridCellError::EmptyGrid => write!(f, "Grid contains no cells"),
            GridCellError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for GridCellError {}

impl From<std::io::Error> for GridCellError {
    fn from(e: std::io::Error) -> Self {
        GridCellError::IoError(e.to_string())
    }
}
