//! Hand-off of tables to presentation layers: Arrow record batches and text previews.

pub mod arrow;
pub mod display;
