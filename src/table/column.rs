use arrow_schema::Field;
use itertools::Itertools;

use crate::datatypes::{AttributeType, ColumnType};
use crate::geometry::Geometry;
use crate::scalar::Value;

/// The ordered values of one column of a [`GeoTable`][crate::table::GeoTable].
#[derive(Debug, Clone, PartialEq)]
pub enum Column<'a> {
    Attribute {
        field: &'a Field,
        attribute_type: AttributeType,
        values: Vec<&'a Value>,
    },
    Geometry(Vec<&'a Geometry>),
}

impl<'a> Column<'a> {
    pub fn len(&self) -> usize {
        match self {
            Column::Attribute { values, .. } => values.len(),
            Column::Geometry(geoms) => geoms.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn column_type(&self) -> ColumnType {
        match self {
            Column::Attribute { attribute_type, .. } => ColumnType::Attribute(*attribute_type),
            Column::Geometry(_) => ColumnType::Geometry,
        }
    }

    /// Attribute values, or `None` for the geometry column.
    pub fn values(&self) -> Option<&[&'a Value]> {
        match self {
            Column::Attribute { values, .. } => Some(values),
            Column::Geometry(_) => None,
        }
    }

    /// Geometries, or `None` for an attribute column.
    pub fn geometries(&self) -> Option<&[&'a Geometry]> {
        match self {
            Column::Attribute { .. } => None,
            Column::Geometry(geoms) => Some(geoms),
        }
    }

    /// Owned copies of the attribute values, or `None` for the geometry column.
    pub fn to_values(&self) -> Option<Vec<Value>> {
        self.values()
            .map(|values| values.iter().map(|v| (*v).clone()).collect())
    }

    /// Distinct attribute values in order of first appearance, or `None` for the geometry
    /// column. Null counts as a value.
    pub fn unique(&self) -> Option<Vec<&'a Value>> {
        self.values().map(|values| {
            values
                .iter()
                .copied()
                .unique_by(|v| (v.attribute_type(), v.to_string()))
                .collect()
        })
    }
}
