use geo_types::Point;
use std::collections::HashSet;

/// Trait for types that can provide x/y coordinates.
///
/// Implemented for `(f64, f64)` tuples (lon, lat), `geo_types::Point<f64>`
/// and [`GridPoint`]. This allows cell builders to accept any of them.
pub trait Coordinate {
    /// Returns the x-coordinate (longitude).
    fn x(&self) -> f64;
    /// Returns the y-coordinate (latitude).
    fn y(&self) -> f64;
}

impl Coordinate for (f64, f64) {
    fn x(&self) -> f64 {
        self.0
    }
    fn y(&self) -> f64 {
        self.1
    }
}

impl Coordinate for Point<f64> {
    fn x(&self) -> f64 {
        Point::x(*self)
    }
    fn y(&self) -> f64 {
        Point::y(*self)
    }
}

/// A single latitude/longitude sample location in decimal degrees (WGS84).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GridPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Hashable key for exact-equality deduplication. `-0.0` and `0.0` share a key.
    pub(crate) fn key(&self) -> (u64, u64) {
        (canonical_bits(self.lat), canonical_bits(self.lon))
    }
}

impl Coordinate for GridPoint {
    fn x(&self) -> f64 {
        self.lon
    }
    fn y(&self) -> f64 {
        self.lat
    }
}

impl From<GridPoint> for Point<f64> {
    fn from(p: GridPoint) -> Self {
        Point::new(p.lon, p.lat)
    }
}

fn canonical_bits(v: f64) -> u64 {
    if v == 0.0 { 0.0f64.to_bits() } else { v.to_bits() }
}

/// Drops duplicate (lat, lon) pairs, keeping the first occurrence of each.
pub fn deduplicate<I>(rows: I) -> Vec<GridPoint>
where
    I: IntoIterator<Item = GridPoint>,
{
    let mut seen: HashSet<(u64, u64)> = HashSet::new();
    rows.into_iter().filter(|p| seen.insert(p.key())).collect()
}
