//! Algorithms that work directly on coordinates and records, without an injected
//! [`GeometryOps`][crate::algorithm::GeometryOps].

mod bounding_rect;
mod take;
mod total_bounds;

pub use bounding_rect::BoundingRect;
pub use take::Take;
pub use total_bounds::TotalBounds;
