use crate::coord::GridPoint;

/// Scanning mode flag: points along a parallel run westward.
const SCAN_I_NEGATIVE: u8 = 0x80;
/// Scanning mode flag: points along a meridian run northward.
const SCAN_J_POSITIVE: u8 = 0x40;
/// Scanning mode flag: adjacent points are consecutive in j rather than i.
const SCAN_J_CONSECUTIVE: u8 = 0x20;

/// Grid definition attached to a GRIB field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Grid {
    /// Regular latitude/longitude grid.
    LatLon(LatLonGrid),
    /// Any other grid, identified by its template number (GRIB2) or
    /// data representation type (GRIB1).
    Unsupported(u16),
}

/// Regular latitude/longitude grid, kept in the integer units of the file.
///
/// One unit is `basic_angle / subdivisions` degrees: 1/1000 for GRIB1,
/// 1/1000000 for GRIB2 unless the message says otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LatLonGrid {
    /// Number of points along a parallel
    pub ni: u32,
    /// Number of points along a meridian
    pub nj: u32,
    pub lat_first: i64,
    pub lon_first: i64,
    pub lat_last: i64,
    pub lon_last: i64,
    /// i (longitude) increment, when given
    pub di: Option<i64>,
    /// j (latitude) increment, when given
    pub dj: Option<i64>,
    pub scanning_mode: u8,
    pub basic_angle: u32,
    pub subdivisions: u32,
}

impl LatLonGrid {
    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.ni as usize * self.nj as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn to_degrees(&self, units: f64) -> f64 {
        units * self.basic_angle as f64 / self.subdivisions as f64
    }

    /// Latitude of each row, in scan order.
    pub fn latitudes(&self) -> Vec<f64> {
        let positive = self.scanning_mode & SCAN_J_POSITIVE != 0;
        self.axis(self.lat_first, self.lat_last, self.nj, self.dj, positive, false)
    }

    /// Longitude of each column, in scan order.
    pub fn longitudes(&self) -> Vec<f64> {
        let positive = self.scanning_mode & SCAN_I_NEGATIVE == 0;
        self.axis(self.lon_first, self.lon_last, self.ni, self.di, positive, true)
    }

    fn axis(
        &self,
        first: i64,
        last: i64,
        n: u32,
        increment: Option<i64>,
        positive: bool,
        wraps: bool,
    ) -> Vec<f64> {
        let n = n as i64;
        match increment {
            Some(inc) => (0..n)
                .map(|k| {
                    let units = if positive { first + k * inc } else { first - k * inc };
                    self.to_degrees(units as f64)
                })
                .collect(),
            None => {
                let mut last = last as f64;
                if wraps && positive && last < first as f64 {
                    last += 360.0 * self.subdivisions as f64 / self.basic_angle as f64;
                }
                let span = last - first as f64;
                (0..n)
                    .map(|k| {
                        let offset = if n > 1 { span * k as f64 / (n - 1) as f64 } else { 0.0 };
                        self.to_degrees(first as f64 + offset)
                    })
                    .collect()
            }
        }
    }

    /// Every grid point, in the order the scanning mode stores them.
    pub fn points(&self) -> GridPoints {
        GridPoints {
            lats: self.latitudes(),
            lons: self.longitudes(),
            j_consecutive: self.scanning_mode & SCAN_J_CONSECUTIVE != 0,
            next: 0,
        }
    }
}

/// Iterator over the points of a [`LatLonGrid`].
#[derive(Debug, Clone)]
pub struct GridPoints {
    lats: Vec<f64>,
    lons: Vec<f64>,
    j_consecutive: bool,
    next: usize,
}

impl Iterator for GridPoints {
    type Item = GridPoint;

    fn next(&mut self) -> Option<GridPoint> {
        let total = self.lats.len() * self.lons.len();
        if self.next >= total {
            return None;
        }
        let (i, j) = if self.j_consecutive {
            (self.next / self.lats.len(), self.next % self.lats.len())
        } else {
            (self.next % self.lons.len(), self.next / self.lons.len())
        };
        self.next += 1;
        Some(GridPoint::new(self.lats[j], self.lons[i]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.lats.len() * self.lons.len() - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GridPoints {}
