use geo::{
    Area, BoundingRect as _BoundingRect, Centroid, EuclideanDistance, EuclideanLength, Point,
    Polygon, Relate,
};

use crate::algorithm::native::BoundingRect;
use crate::algorithm::ops::{CrsTransform, GeometryOps, NoTransform, SpatialPredicate};
use crate::crs::Crs;
use crate::error::Result;
use crate::geometry::Geometry;

/// Planar (Cartesian) geometry operations backed by [`geo`].
///
/// Measurements are in the units of the coordinates, so areas and distances on geographic
/// coordinates are in squared degrees and degrees. Reproject with
/// [`GeoTable::to_crs`][crate::table::GeoTable::to_crs] first for metric results.
///
/// # Examples
///
/// ```
/// use geo::point;
/// use geotable::algorithm::geo::Planar;
/// use geotable::algorithm::GeometryOps;
/// use geotable::crs::Crs;
///
/// let ops = Planar::new();
/// let crs = Crs::unknown();
/// let d = ops
///     .distance(&point!(x: 0., y: 0.).into(), &crs, &point!(x: 1., y: 1.).into(), &crs)
///     .unwrap();
/// assert!((d - 2f64.sqrt()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Planar<T = NoTransform> {
    transform: T,
}

impl Planar<NoTransform> {
    /// Planar operations without reprojection support.
    pub fn new() -> Self {
        Self {
            transform: NoTransform,
        }
    }
}

impl<T: CrsTransform> Planar<T> {
    /// Planar operations that reproject through `transform`.
    pub fn with_transform(transform: T) -> Self {
        Self { transform }
    }
}

fn polygon_perimeter(polygon: &Polygon) -> f64 {
    polygon.exterior().euclidean_length()
        + polygon
            .interiors()
            .iter()
            .map(|ring| ring.euclidean_length())
            .sum::<f64>()
}

impl<T: CrsTransform> GeometryOps for Planar<T> {
    fn area(&self, geometry: &Geometry) -> f64 {
        geometry.unsigned_area()
    }

    fn length(&self, geometry: &Geometry) -> f64 {
        match geometry {
            Geometry::LineString(g) => g.euclidean_length(),
            Geometry::MultiLineString(g) => g.euclidean_length(),
            Geometry::Line(g) => g.euclidean_length(),
            Geometry::Polygon(g) => polygon_perimeter(g),
            Geometry::MultiPolygon(g) => g.iter().map(polygon_perimeter).sum(),
            Geometry::Rect(g) => polygon_perimeter(&g.to_polygon()),
            Geometry::Triangle(g) => polygon_perimeter(&g.to_polygon()),
            Geometry::GeometryCollection(g) => g.iter().map(|g| self.length(g)).sum(),
            Geometry::Point(_) | Geometry::MultiPoint(_) => 0.0,
        }
    }

    fn distance(&self, a: &Geometry, a_crs: &Crs, b: &Geometry, b_crs: &Crs) -> Result<f64> {
        a_crs.check_compatible(b_crs)?;
        Ok(a.euclidean_distance(b))
    }

    fn centroid(&self, geometry: &Geometry) -> Option<Point> {
        geometry.centroid()
    }

    fn bounds(&self, geometry: &Geometry) -> Option<BoundingRect> {
        geometry.bounding_rect().map(BoundingRect::from)
    }

    fn relate(
        &self,
        a: &Geometry,
        a_crs: &Crs,
        predicate: SpatialPredicate,
        b: &Geometry,
        b_crs: &Crs,
    ) -> Result<bool> {
        a_crs.check_compatible(b_crs)?;
        let matrix = a.relate(b);
        let result = match predicate {
            SpatialPredicate::Intersects => matrix.is_intersects(),
            SpatialPredicate::Contains => matrix.is_contains(),
            SpatialPredicate::Within => matrix.is_within(),
            SpatialPredicate::Touches => matrix.is_touches(),
            SpatialPredicate::Overlaps => matrix.is_overlaps(),
        };
        Ok(result)
    }

    fn transform_crs(&self, geometry: &Geometry, from: &Crs, to: &Crs) -> Result<Geometry> {
        if from == to {
            return Ok(geometry.clone());
        }
        self.transform.transform(geometry, from, to)
    }
}
