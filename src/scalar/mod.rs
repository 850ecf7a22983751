//! Scalar attribute values stored in a record.

pub use value::Value;

mod value;
