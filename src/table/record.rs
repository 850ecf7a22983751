use arrow_schema::Schema;
use geo::Point;

use crate::error::{GeoTableError, Result};
use crate::geometry::Geometry;
use crate::scalar::Value;

/// One entity of a table: attribute values aligned to the table schema, plus its geometry.
///
/// Records are shared between tables derived from each other and are never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    values: Vec<Value>,
    geometry: Geometry,
}

impl Record {
    pub(crate) fn new(values: Vec<Value>, geometry: Geometry) -> Self {
        Self { values, geometry }
    }

    /// Attribute values in schema order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn value(&self, i: usize) -> Option<&Value> {
        self.values.get(i)
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// A copy of this record with `value` appended.
    pub(crate) fn with_value(&self, value: Value) -> Self {
        let mut values = Vec::with_capacity(self.values.len() + 1);
        values.extend_from_slice(&self.values);
        values.push(value);
        Self {
            values,
            geometry: self.geometry.clone(),
        }
    }

    /// A copy of this record keeping only the values at `indices`, in that order.
    pub(crate) fn project(&self, indices: &[usize]) -> Self {
        Self {
            values: indices.iter().map(|&i| self.values[i].clone()).collect(),
            geometry: self.geometry.clone(),
        }
    }

    /// A copy of this record with its geometry replaced.
    pub(crate) fn with_geometry(&self, geometry: Geometry) -> Self {
        Self {
            values: self.values.clone(),
            geometry,
        }
    }
}

/// A borrowed view of one record that resolves attributes by column name.
///
/// This is what row-wise callbacks such as [`GeoTable::filter`][crate::table::GeoTable::filter]
/// and [`GeoTable::with_derived_column`][crate::table::GeoTable::with_derived_column] receive.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    schema: &'a Schema,
    geometry_column: &'a str,
    record: &'a Record,
    index: usize,
}

impl<'a> Row<'a> {
    pub(crate) fn new(
        schema: &'a Schema,
        geometry_column: &'a str,
        record: &'a Record,
        index: usize,
    ) -> Self {
        Self {
            schema,
            geometry_column,
            record,
            index,
        }
    }

    /// Position of this row in its table.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn record(&self) -> &'a Record {
        self.record
    }

    pub fn geometry(&self) -> &'a Geometry {
        self.record.geometry()
    }

    /// The geometry as a point, if it is one.
    pub fn point(&self) -> Option<Point> {
        match self.record.geometry() {
            Geometry::Point(p) => Some(*p),
            _ => None,
        }
    }

    /// The named attribute, or `None` if no attribute has that name.
    pub fn get(&self, name: &str) -> Option<&'a Value> {
        let (i, _) = self.schema.column_with_name(name)?;
        self.record.value(i)
    }

    /// The named attribute.
    ///
    /// Fails with [`ColumnNotFound`][GeoTableError::ColumnNotFound] if no attribute has that
    /// name. The geometry column is reached through [`geometry`][Self::geometry] instead.
    pub fn value(&self, name: &str) -> Result<&'a Value> {
        self.get(name).ok_or_else(|| {
            if name == self.geometry_column {
                GeoTableError::IncorrectType(
                    format!("{name} is the geometry column, not an attribute").into(),
                )
            } else {
                GeoTableError::ColumnNotFound(name.to_string())
            }
        })
    }

    /// Numeric value of the named attribute; `None` when absent, null or non-numeric.
    pub fn f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_f64)
    }

    /// Text value of the named attribute; `None` when absent, null or not text.
    pub fn str(&self, name: &str) -> Option<&'a str> {
        self.get(name).and_then(Value::as_str)
    }
}
