//! Geometry operations implemented with georust/geo algorithms.

mod planar;

pub use planar::Planar;
