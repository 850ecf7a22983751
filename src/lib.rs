//! Tables of attributes paired with one geometry per row, with pluggable geometry operations.
//!
//! A [`GeoTable`] holds an ordered sequence of records that share one attribute schema. Each
//! record carries exactly one planar [`Geometry`][geometry::Geometry]. Tables are immutable:
//! filtering, sorting, slicing and adding derived columns all return new tables.
//!
//! Geometric measures and predicates are computed through the
//! [`GeometryOps`][algorithm::GeometryOps] trait. [`Planar`][algorithm::geo::Planar] implements
//! it with the [`geo`] crate; CRS reprojection is delegated to a
//! [`CrsTransform`][algorithm::CrsTransform] strategy.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(not(test), deny(unused_crate_dependencies))]

pub use table::GeoTable;

pub mod algorithm;
pub mod crs;
pub mod datatypes;
pub mod error;
pub mod geometry;
pub mod io;
pub mod scalar;
pub mod table;
#[cfg(test)]
pub(crate) mod test;
