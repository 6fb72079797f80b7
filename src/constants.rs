/// Side length of every grid cell, in degrees
pub const CELL_SIZE_DEGREES: f64 = 0.1;

/// Initial zoom level of the rendered map
pub const DEFAULT_ZOOM: u8 = 12;

/// GRIB file read by the binary
pub const DEFAULT_INPUT_PATH: &str = "data/download_ERA5_LAND_package_1979_01.grib";

/// HTML document written by the binary
pub const DEFAULT_OUTPUT_PATH: &str = "grid_map.html";

/// Forecast step selected from the input, in hours
pub const DEFAULT_STEP_HOURS: i64 = 1;

/// Leaflet release loaded by the rendered page
pub(crate) const LEAFLET_VERSION: &str = "1.9.4";

/// Base map tiles
pub(crate) const TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";

pub(crate) const TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

pub(crate) const TILE_MAX_ZOOM: u8 = 19;
