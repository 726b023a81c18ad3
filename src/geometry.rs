//! Point-in-polygon containment for country boundary geometries.
//!
//! Shapefile collaborators hand over boundary records as polygons or
//! multipolygons in plain lon/lat degrees; the mask builder only ever asks
//! one question of them: does this grid cell centre fall inside the
//! country?

/// A geographic point in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// A single polygon: one exterior ring and zero or more hole rings.
/// Rings do not need an explicit closing vertex; the test wraps around.
#[derive(Debug, Clone)]
pub struct Polygon {
    pub exterior: Vec<GeoPoint>,
    pub holes: Vec<Vec<GeoPoint>>,
}

impl Polygon {
    pub fn new(exterior: Vec<GeoPoint>, holes: Vec<Vec<GeoPoint>>) -> Self {
        Self { exterior, holes }
    }

    /// Axis-aligned rectangle, handy for synthetic country shapes
    pub fn rectangle(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self::new(
            vec![
                GeoPoint::new(min_lon, min_lat),
                GeoPoint::new(max_lon, min_lat),
                GeoPoint::new(max_lon, max_lat),
                GeoPoint::new(min_lon, max_lat),
            ],
            Vec::new(),
        )
    }

    /// A point is inside the polygon if it is inside the exterior ring and
    /// not inside any hole.
    pub fn contains(&self, point: &GeoPoint) -> bool {
        ring_contains(&self.exterior, point) && !self.holes.iter().any(|h| ring_contains(h, point))
    }
}

/// A country geometry: one or more disjoint polygon parts (mainland plus
/// islands, exclaves and so on).
#[derive(Debug, Clone)]
pub struct MultiPolygon {
    pub polygons: Vec<Polygon>,
}

impl MultiPolygon {
    pub fn new(polygons: Vec<Polygon>) -> Self {
        Self { polygons }
    }

    pub fn contains(&self, point: &GeoPoint) -> bool {
        self.polygons.iter().any(|p| p.contains(point))
    }
}

impl From<Polygon> for MultiPolygon {
    fn from(polygon: Polygon) -> Self {
        Self::new(vec![polygon])
    }
}

/// Even-odd ray casting: cast a ray towards +lon and count edge crossings.
/// Points exactly on an edge may land on either side; country masks are
/// built from cell centres, which do not sit on borders in practice.
fn ring_contains(ring: &[GeoPoint], point: &GeoPoint) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = ring[i];
        let b = ring[j];
        if (a.lat > point.lat) != (b.lat > point.lat) {
            let t = (point.lat - a.lat) / (b.lat - a.lat);
            let lon_cross = a.lon + t * (b.lon - a.lon);
            if point.lon < lon_cross {
                inside = !inside;
            }
        }
        j = i;
    }

    inside
}
