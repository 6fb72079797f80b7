use geo::Centroid;
use geo_types::{Point, Polygon};

/// Flat mean of the centroids of `polygons` (no area weighting).
///
/// Returns `None` when there is nothing to average.
pub fn mean_centroid<'a, I>(polygons: I) -> Option<Point<f64>>
where
    I: IntoIterator<Item = &'a Polygon<f64>>,
{
    let mut count = 0usize;
    let (mut sum_x, mut sum_y) = (0.0, 0.0);

    for centroid in polygons.into_iter().filter_map(|p| p.centroid()) {
        sum_x += centroid.x();
        sum_y += centroid.y();
        count += 1;
    }

    if count == 0 {
        return None;
    }
    Some(Point::new(sum_x / count as f64, sum_y / count as f64))
}
