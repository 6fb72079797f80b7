use crate::constants::CELL_SIZE_DEGREES;
use crate::coord::{Coordinate, GridPoint};
use crate::geom::create_square_from_point;
use geo::Centroid;
use geo_types::{Point, Polygon};

/// A square grid cell centered on a grid point.
///
/// # Example
///
/// ```
/// use era5_gridcells::GridCell;
///
/// // (lon, lat)
/// let cell = GridCell::from_center(&(20.0, 10.0), 0.1);
/// let polygon = cell.to_polygon();
/// assert_eq!(polygon.exterior().coords().count(), 5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    /// Center point, x = longitude, y = latitude
    pub center: Point<f64>,
    /// Side length in degrees
    pub size: f64,
}

impl GridCell {
    /// Create a cell of side `size` around any coordinate.
    pub fn from_center(coord: &impl Coordinate, size: f64) -> Self {
        Self {
            center: Point::new(coord.x(), coord.y()),
            size,
        }
    }

    /// Create a cell with the default 0.1 degree side.
    pub fn from_grid_point(point: &GridPoint) -> Self {
        Self::from_center(point, CELL_SIZE_DEGREES)
    }

    pub fn lat(&self) -> f64 {
        self.center.y()
    }

    pub fn lon(&self) -> f64 {
        self.center.x()
    }

    pub fn grid_point(&self) -> GridPoint {
        GridPoint::new(self.lat(), self.lon())
    }

    /// Converts this cell to a closed square polygon, vertices counter-clockwise
    /// from the southwest corner.
    pub fn to_polygon(&self) -> Polygon<f64> {
        create_square_from_point(&self.center, self.size)
    }

    /// Centroid of the cell polygon.
    pub fn centroid(&self) -> Option<Point<f64>> {
        self.to_polygon().centroid()
    }
}
