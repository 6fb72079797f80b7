use crate::cell::GridCell;
use crate::coord::Coordinate;
use crate::geom::mean_centroid;
use geo_types::{Point, Polygon};
use geojson::{Feature, FeatureCollection, Geometry, feature::Id};

/// The collection of cells built from a set of grid points.
#[derive(Debug, Clone)]
pub struct CellGrid {
    cells: Vec<GridCell>,
    cell_size: f64,
}

impl CellGrid {
    /// Builds one cell per coordinate, in input order.
    ///
    /// # Example
    ///
    /// ```
    /// use era5_gridcells::{CellGrid, GridPoint};
    ///
    /// let points = vec![GridPoint::new(0.0, 0.0), GridPoint::new(0.0, 2.0)];
    /// let grid = CellGrid::from_coordinates(&points, 0.1);
    /// assert_eq!(grid.len(), 2);
    ///
    /// let center = grid.mean_centroid().unwrap();
    /// assert!((center.x() - 1.0).abs() < 1e-9);
    /// ```
    pub fn from_coordinates<C: Coordinate>(coords: &[C], cell_size: f64) -> Self {
        let cells = coords
            .iter()
            .map(|c| GridCell::from_center(c, cell_size))
            .collect();
        Self { cells, cell_size }
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = &GridCell> {
        self.cells.iter()
    }

    pub fn to_polygons(&self) -> Vec<Polygon<f64>> {
        self.cells.iter().map(|cell| cell.to_polygon()).collect()
    }

    /// Flat mean of the cell centroids (x = longitude, y = latitude).
    pub fn mean_centroid(&self) -> Option<Point<f64>> {
        mean_centroid(&self.to_polygons())
    }

    /// One Polygon feature per cell; feature ids are the cell indices.
    pub fn to_feature_collection(&self) -> FeatureCollection {
        let features = self
            .cells
            .iter()
            .enumerate()
            .map(|(i, cell)| Feature {
                bbox: None,
                geometry: Some(Geometry::from(&cell.to_polygon())),
                id: Some(Id::String(i.to_string())),
                properties: None,
                foreign_members: None,
            })
            .collect();

        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }
}
