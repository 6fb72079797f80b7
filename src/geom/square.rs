use geo_types::{Coord, LineString, Point, Polygon};

/// Builds an axis-aligned square of side `size` centered on (`center_x`, `center_y`).
///
/// Vertices run counter-clockwise from the southwest corner; the ring is closed.
pub fn create_square(center_x: f64, center_y: f64, size: f64) -> Polygon<f64> {
    let half = size / 2.0;
    let (west, east) = (center_x - half, center_x + half);
    let (south, north) = (center_y - half, center_y + half);

    let coords = vec![
        Coord { x: west, y: south },
        Coord { x: east, y: south },
        Coord { x: east, y: north },
        Coord { x: west, y: north },
        Coord { x: west, y: south },
    ];

    Polygon::new(LineString::from(coords), vec![])
}

pub fn create_square_from_point(center: &Point<f64>, size: f64) -> Polygon<f64> {
    create_square(center.x(), center.y(), size)
}
