//! Logical types of attribute columns and geometries.

use std::fmt;

use arrow_schema::DataType;
use serde::{Deserialize, Serialize};

use crate::error::{GeoTableError, Result};

/// The semantic type of an attribute column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeType {
    /// UTF-8 text.
    Utf8,
    /// 64-bit signed integer.
    Int64,
    /// 64-bit float.
    Float64,
    /// Calendar date.
    Date32,
}

impl AttributeType {
    /// Whether `describe` summarizes this type with moments rather than distinct counts.
    pub fn is_numeric(&self) -> bool {
        matches!(self, AttributeType::Int64 | AttributeType::Float64)
    }

    pub fn to_data_type(&self) -> DataType {
        match self {
            AttributeType::Utf8 => DataType::Utf8,
            AttributeType::Int64 => DataType::Int64,
            AttributeType::Float64 => DataType::Float64,
            AttributeType::Date32 => DataType::Date32,
        }
    }
}

impl TryFrom<&DataType> for AttributeType {
    type Error = GeoTableError;

    fn try_from(value: &DataType) -> Result<Self> {
        match value {
            DataType::Utf8 => Ok(AttributeType::Utf8),
            DataType::Int64 => Ok(AttributeType::Int64),
            DataType::Float64 => Ok(AttributeType::Float64),
            DataType::Date32 => Ok(AttributeType::Date32),
            dt => Err(GeoTableError::IncorrectType(
                format!("unsupported attribute data type: {dt}").into(),
            )),
        }
    }
}

impl From<AttributeType> for DataType {
    fn from(value: AttributeType) -> Self {
        value.to_data_type()
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttributeType::Utf8 => "string",
            AttributeType::Int64 => "int64",
            AttributeType::Float64 => "float64",
            AttributeType::Date32 => "date",
        };
        f.write_str(name)
    }
}

/// The variant of a geometry value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryType {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GeometryType::Point => "Point",
            GeometryType::LineString => "LineString",
            GeometryType::Polygon => "Polygon",
            GeometryType::MultiPoint => "MultiPoint",
            GeometryType::MultiLineString => "MultiLineString",
            GeometryType::MultiPolygon => "MultiPolygon",
        };
        f.write_str(name)
    }
}

/// The data type of any column in a table, including the geometry column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    Attribute(AttributeType),
    Geometry,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Attribute(t) => t.fmt(f),
            ColumnType::Geometry => f.write_str("geometry"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn numeric_types() {
        assert!(AttributeType::Int64.is_numeric());
        assert!(AttributeType::Float64.is_numeric());
        assert!(!AttributeType::Date32.is_numeric());
        assert_eq!(
            AttributeType::try_from(&DataType::Date32).unwrap(),
            AttributeType::Date32
        );
    }

    #[test]
    fn unsupported_arrow_type() {
        let err = AttributeType::try_from(&DataType::UInt8).unwrap_err();
        assert!(matches!(err, GeoTableError::IncorrectType(_)));
    }
}
