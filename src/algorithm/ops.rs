//! The capability interface through which a table measures and reprojects its geometries.

use geo::{Coord, MapCoords, Point};
use serde::{Deserialize, Serialize};

use crate::algorithm::native::BoundingRect;
use crate::crs::Crs;
use crate::error::{GeoTableError, Result};
use crate::geometry::Geometry;

/// A binary spatial relationship between two geometries, in the DE-9IM sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpatialPredicate {
    /// The geometries share at least one point.
    Intersects,
    /// No point of the right geometry lies outside the left one, and their interiors meet.
    Contains,
    /// The left geometry is contained by the right one.
    Within,
    /// The geometries share boundary points but no interior points.
    Touches,
    /// The geometries have the same dimension and share some but not all interior points.
    Overlaps,
}

/// Geometric measurements and coordinate transforms used by table operations.
///
/// A table never measures geometries itself: area, distance and friends come from whichever
/// implementation of this trait the caller passes in. [`Planar`][crate::algorithm::geo::Planar]
/// is the implementation backed by the `geo` crate.
pub trait GeometryOps: Send + Sync {
    /// Enclosed area. Zero for points and lines.
    fn area(&self, geometry: &Geometry) -> f64;

    /// Length of lines, perimeter of polygons. Zero for points.
    fn length(&self, geometry: &Geometry) -> f64;

    /// Minimum distance between `a` and `b`.
    ///
    /// Fails with [`IncompatibleCrs`][GeoTableError::IncompatibleCrs] if the two geometries are
    /// declared under different coordinate reference systems.
    fn distance(&self, a: &Geometry, a_crs: &Crs, b: &Geometry, b_crs: &Crs) -> Result<f64>;

    /// Centroid, or `None` for an empty geometry.
    fn centroid(&self, geometry: &Geometry) -> Option<Point>;

    /// Bounds, or `None` for an empty geometry.
    fn bounds(&self, geometry: &Geometry) -> Option<BoundingRect>;

    /// Evaluate `predicate` with `a` on the left and `b` on the right.
    fn relate(
        &self,
        a: &Geometry,
        a_crs: &Crs,
        predicate: SpatialPredicate,
        b: &Geometry,
        b_crs: &Crs,
    ) -> Result<bool>;

    /// Reproject `geometry` from `from` to `to`.
    fn transform_crs(&self, geometry: &Geometry, from: &Crs, to: &Crs) -> Result<Geometry>;
}

/// A pluggable reprojection strategy.
pub trait CrsTransform: Send + Sync {
    fn transform(&self, geometry: &Geometry, from: &Crs, to: &Crs) -> Result<Geometry>;
}

/// Strategy that refuses every reprojection between distinct CRSs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTransform;

impl CrsTransform for NoTransform {
    fn transform(&self, _geometry: &Geometry, from: &Crs, to: &Crs) -> Result<Geometry> {
        Err(GeoTableError::IncompatibleCrs {
            left: from.clone(),
            right: to.clone(),
        })
    }
}

/// Strategy that applies a per-coordinate function.
///
/// ```
/// use geo::{coord, point};
/// use geotable::algorithm::{CoordTransform, CrsTransform};
/// use geotable::crs::Crs;
///
/// let shift = CoordTransform::new(|c: geo::Coord, _: &Crs, _: &Crs| {
///     Ok(coord! { x: c.x + 1., y: c.y })
/// });
/// let out = shift
///     .transform(&point!(x: 0., y: 0.).into(), &Crs::from_epsg(4326), &Crs::from_epsg(3857))
///     .unwrap();
/// assert_eq!(out, point!(x: 1., y: 0.).into());
/// ```
pub struct CoordTransform<F> {
    func: F,
}

impl<F> CoordTransform<F>
where
    F: Fn(Coord, &Crs, &Crs) -> Result<Coord> + Send + Sync,
{
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> CrsTransform for CoordTransform<F>
where
    F: Fn(Coord, &Crs, &Crs) -> Result<Coord> + Send + Sync,
{
    fn transform(&self, geometry: &Geometry, from: &Crs, to: &Crs) -> Result<Geometry> {
        let func = &self.func;
        geometry.try_map_coords(|coord| func(coord, from, to))
    }
}
