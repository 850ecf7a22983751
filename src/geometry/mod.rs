//! The geometry values held by a table and their validation rules.
//!
//! Geometries are plain [`geo::Geometry`] values. A table only accepts the six simple-feature
//! variants ([`GeometryType`]), and rejects malformed line strings and polygons up front so that
//! downstream algorithms never see them.

use geo::{Coord, LineString, Polygon};
use itertools::Itertools;

use crate::datatypes::GeometryType;
use crate::error::{GeoTableError, Result};

/// A vector geometry with `f64` coordinates.
pub type Geometry = geo::Geometry<f64>;

/// The [`GeometryType`] of a geometry, or an error if the variant is not supported.
pub fn geometry_type(geometry: &Geometry) -> Result<GeometryType> {
    match geometry {
        Geometry::Point(_) => Ok(GeometryType::Point),
        Geometry::LineString(_) => Ok(GeometryType::LineString),
        Geometry::Polygon(_) => Ok(GeometryType::Polygon),
        Geometry::MultiPoint(_) => Ok(GeometryType::MultiPoint),
        Geometry::MultiLineString(_) => Ok(GeometryType::MultiLineString),
        Geometry::MultiPolygon(_) => Ok(GeometryType::MultiPolygon),
        Geometry::Line(_) => Err(unsupported("Line")),
        Geometry::Rect(_) => Err(unsupported("Rect")),
        Geometry::Triangle(_) => Err(unsupported("Triangle")),
        Geometry::GeometryCollection(_) => Err(unsupported("GeometryCollection")),
    }
}

fn unsupported(name: &str) -> GeoTableError {
    GeoTableError::InvalidGeometry(format!("{name} is not a supported geometry type"))
}

/// Check that `geometry` is a supported variant with well-formed parts.
///
/// - a line string has at least 2 coordinates;
/// - a polygon ring is closed and has at least 3 distinct positions (4 stored coordinates).
pub fn validate(geometry: &Geometry) -> Result<GeometryType> {
    let geometry_type = geometry_type(geometry)?;
    match geometry {
        Geometry::Point(p) => validate_coord(&p.0)?,
        Geometry::MultiPoint(mp) => {
            for p in mp.iter() {
                validate_coord(&p.0)?;
            }
        }
        Geometry::LineString(ls) => validate_line_string(ls)?,
        Geometry::MultiLineString(mls) => {
            for ls in mls.iter() {
                validate_line_string(ls)?;
            }
        }
        Geometry::Polygon(polygon) => validate_polygon(polygon)?,
        Geometry::MultiPolygon(mp) => {
            for polygon in mp.iter() {
                validate_polygon(polygon)?;
            }
        }
        _ => unreachable!("rejected by geometry_type"),
    }
    Ok(geometry_type)
}

fn validate_coord(coord: &Coord) -> Result<()> {
    if coord.x.is_finite() && coord.y.is_finite() {
        Ok(())
    } else {
        Err(GeoTableError::InvalidGeometry(format!(
            "non-finite coordinate ({}, {})",
            coord.x, coord.y
        )))
    }
}

fn validate_line_string(line_string: &LineString) -> Result<()> {
    if line_string.0.len() < 2 {
        return Err(GeoTableError::InvalidGeometry(format!(
            "LineString needs at least 2 coordinates, got {}",
            line_string.0.len()
        )));
    }
    line_string.0.iter().try_for_each(validate_coord)
}

fn validate_ring(ring: &LineString) -> Result<()> {
    if !ring.is_closed() {
        return Err(GeoTableError::InvalidGeometry(
            "polygon ring is not closed".to_string(),
        ));
    }
    if ring.0.len() < 4 {
        return Err(GeoTableError::InvalidGeometry(format!(
            "polygon ring needs at least 3 distinct positions, got {}",
            ring.0.len().saturating_sub(1)
        )));
    }
    ring.0.iter().try_for_each(validate_coord)?;

    // The closing coordinate repeats the first one.
    let distinct = ring.0[..ring.0.len() - 1]
        .iter()
        .map(|c| (c.x.to_bits(), c.y.to_bits()))
        .unique()
        .count();
    if distinct < 3 {
        return Err(GeoTableError::InvalidGeometry(format!(
            "polygon ring needs at least 3 distinct positions, got {distinct}"
        )));
    }
    Ok(())
}

fn validate_polygon(polygon: &Polygon) -> Result<()> {
    validate_ring(polygon.exterior())?;
    polygon.interiors().iter().try_for_each(validate_ring)
}
