use crate::constants::{LEAFLET_VERSION, TILE_ATTRIBUTION, TILE_MAX_ZOOM, TILE_URL};
use crate::coord::GridPoint;
use crate::error::GridCellError;
use crate::grid::CellGrid;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

const MAP_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta http-equiv="content-type" content="text/html; charset=UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0, maximum-scale=1.0, user-scalable=no" />
    <title>Grid cells</title>
    <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/leaflet@__LEAFLET_VERSION__/dist/leaflet.css" />
    <script src="https://cdn.jsdelivr.net/npm/leaflet@__LEAFLET_VERSION__/dist/leaflet.js"></script>
    <style>
        html, body { width: 100%; height: 100%; margin: 0; padding: 0; }
        #grid_map { position: absolute; top: 0; bottom: 0; right: 0; left: 0; }
    </style>
</head>
<body>
    <div id="grid_map"></div>
    <script>
        var grid_map = L.map("grid_map", __MAP_OPTIONS__);
        L.tileLayer(__TILE_URL__, __TILE_OPTIONS__).addTo(grid_map);
        var grid_cells = L.geoJson(null, {}).addTo(grid_map);
        grid_cells.addData(__CELLS__);
    </script>
</body>
</html>
"#;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MapOptions {
    center: [f64; 2],
    zoom: u8,
    zoom_control: bool,
    prefer_canvas: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TileOptions<'a> {
    attribution: &'a str,
    max_zoom: u8,
}

/// Initial viewport of the rendered map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: GridPoint,
    pub zoom: u8,
}

impl MapView {
    /// Centers the view on the mean of the cell centroids.
    pub fn from_cells(cells: &CellGrid, zoom: u8) -> Result<Self, GridCellError> {
        let centroid = cells.mean_centroid().ok_or(GridCellError::EmptyGrid)?;
        Ok(Self {
            center: GridPoint::new(centroid.y(), centroid.x()),
            zoom,
        })
    }
}

/// A Leaflet map with one GeoJSON layer holding every cell.
#[derive(Debug, Clone)]
pub struct GridMap<'a> {
    pub view: MapView,
    cells: &'a CellGrid,
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, GridCellError> {
    serde_json::to_string(value).map_err(|e| GridCellError::SerializationError(e.to_string()))
}

impl<'a> GridMap<'a> {
    pub fn new(cells: &'a CellGrid, zoom: u8) -> Result<Self, GridCellError> {
        let view = MapView::from_cells(cells, zoom)?;
        Ok(Self { view, cells })
    }

    /// Renders the map as a standalone HTML document.
    ///
    /// Element ids are fixed, so the same cells always give the same bytes.
    pub fn to_html(&self) -> Result<String, GridCellError> {
        let map_options = MapOptions {
            center: [self.view.center.lat, self.view.center.lon],
            zoom: self.view.zoom,
            zoom_control: true,
            prefer_canvas: false,
        };
        let tile_options = TileOptions {
            attribution: TILE_ATTRIBUTION,
            max_zoom: TILE_MAX_ZOOM,
        };
        let cells = to_json(&self.cells.to_feature_collection())?;

        Ok(MAP_TEMPLATE
            .replace("__LEAFLET_VERSION__", LEAFLET_VERSION)
            .replace("__MAP_OPTIONS__", &to_json(&map_options)?)
            .replace("__TILE_URL__", &to_json(TILE_URL)?)
            .replace("__TILE_OPTIONS__", &to_json(&tile_options)?)
            .replace("__CELLS__", &cells))
    }

    /// Writes the HTML document to `path`, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), GridCellError> {
        let path = path.as_ref();
        let html = self.to_html()?;
        fs::write(path, html)
            .map_err(|e| GridCellError::IoError(format!("{}: {}", path.display(), e)))?;

        info!(
            path = %path.display(),
            cells = self.cells.len(),
            lat = self.view.center.lat,
            lon = self.view.center.lon,
            zoom = self.view.zoom,
            "Saved grid map"
        );
        Ok(())
    }
}

/// Renders `cells` on a map centered on their mean centroid and saves it to `path`.
///
/// # Example
///
/// ```no_run
/// use era5_gridcells::{CellGrid, GridPoint, write_html_map};
///
/// # fn main() -> Result<(), era5_gridcells::GridCellError> {
/// let grid = CellGrid::from_coordinates(&[GridPoint::new(56.5, -3.2)], 0.1);
/// let view = write_html_map(&grid, "grid_map.html", 12)?;
/// println!("centered on {:?}", view.center);
/// # Ok(())
/// # }
/// ```
pub fn write_html_map(
    cells: &CellGrid,
    path: impl AsRef<Path>,
    zoom: u8,
) -> Result<MapView, GridCellError> {
    let map = GridMap::new(cells, zoom)?;
    map.save(path)?;
    Ok(map.view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn grid() -> CellGrid {
        CellGrid::from_coordinates(&[GridPoint::new(0.0, 0.0), GridPoint::new(0.0, 2.0)], 0.1)
    }

    #[test]
    fn test_view_is_mean_centroid() -> Result<(), GridCellError> {
        let view = MapView::from_cells(&grid(), 12)?;

        assert!(view.center.lat.abs() < 1e-9);
        assert!((view.center.lon - 1.0).abs() < 1e-9);
        assert_eq!(view.zoom, 12);
        Ok(())
    }

    #[test]
    fn test_empty_grid_has_no_view() {
        let empty = CellGrid::from_coordinates::<GridPoint>(&[], 0.1);
        assert_eq!(MapView::from_cells(&empty, 12).unwrap_err(), GridCellError::EmptyGrid);
    }

    #[test]
    fn test_html_contents() -> Result<(), GridCellError> {
        let grid = grid();
        let html = GridMap::new(&grid, 12)?.to_html()?;

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(!html.contains("__"));
        assert!(html.contains("leaflet@1.9.4/dist/leaflet.js"));
        assert!(html.contains("\"zoom\":12"));
        assert!(html.contains("\"zoomControl\":true"));
        assert!(html.contains("\"type\":\"FeatureCollection\""));
        assert_eq!(html.matches("\"Polygon\"").count(), 2);
        Ok(())
    }

    #[test]
    fn test_html_is_deterministic() -> Result<(), GridCellError> {
        let grid = grid();
        let first = GridMap::new(&grid, 12)?.to_html()?;
        let second = GridMap::new(&grid, 12)?.to_html()?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_write_html_map_overwrites() -> Result<(), GridCellError> {
        let dir = tempdir().map_err(|e| GridCellError::IoError(e.to_string()))?;
        let path = dir.path().join("grid_map.html");
        fs::write(&path, "stale").map_err(|e| GridCellError::IoError(e.to_string()))?;

        let view = write_html_map(&grid(), &path, 12)?;
        assert!((view.center.lon - 1.0).abs() < 1e-9);

        let html = fs::read_to_string(&path).map_err(|e| GridCellError::IoError(e.to_string()))?;
        assert!(html.contains("L.geoJson"));
        assert!(!html.contains("stale"));
        Ok(())
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let result = write_html_map(&grid(), "no/such/dir/grid_map.html", 12);
        assert!(matches!(result, Err(GridCellError::IoError(_))));
    }
}
