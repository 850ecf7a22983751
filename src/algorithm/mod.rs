//! Geometry operations a table delegates to, and the table-wide algorithms built on them.

pub mod geo;
pub mod native;
mod ops;
#[cfg(feature = "proj")]
pub mod proj;

pub use ops::{CoordTransform, CrsTransform, GeometryOps, NoTransform, SpatialPredicate};
