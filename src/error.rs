//! Defines [`GeoTableError`], representing all errors returned by this crate.

use std::borrow::Cow;
use std::fmt::Debug;

use arrow_schema::ArrowError;
use thiserror::Error;

use crate::crs::Crs;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GeoTableError {
    /// Attribute rows and geometries disagree in length, arity or type.
    #[error("Schema error: {0}")]
    Schema(String),

    /// A column name that is not present in the table schema.
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// A new column would shadow an existing one.
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    /// Two geometries are declared under different coordinate reference systems.
    #[error("Incompatible CRS: {left} and {right}")]
    IncompatibleCrs { left: Crs, right: Crs },

    /// A geometry that is not one of the supported variants, or is malformed.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Incorrect type was passed to an operation.
    #[error("Incorrect type passed to operation: {0}")]
    IncorrectType(Cow<'static, str>),

    /// A row index past the end of the table.
    #[error("Index {index} out of bounds for table of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// General error.
    #[error("General error: {0}")]
    General(String),

    /// [ArrowError]
    #[error(transparent)]
    Arrow(#[from] ArrowError),

    /// [proj::ProjError]
    #[cfg(feature = "proj")]
    #[error(transparent)]
    ProjError(#[from] proj::ProjError),

    /// [proj::ProjCreateError]
    #[cfg(feature = "proj")]
    #[error(transparent)]
    ProjCreateError(#[from] proj::ProjCreateError),
}

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, GeoTableError>;
