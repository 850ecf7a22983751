//! Conversion between [`GeoTable`] and Arrow [`RecordBatch`]es.
//!
//! Attributes map one-to-one onto Arrow columns. On export the geometry column is encoded as WKT
//! text and tagged with the `geoarrow.wkt` extension type, so any GeoArrow-aware consumer can
//! pick it up along with the table CRS.

use std::collections::HashMap;
use std::sync::Arc;

use arrow_array::cast::AsArray;
use arrow_array::types::{Date32Type, Float64Type, Int64Type};
use arrow_array::{ArrayRef, Date32Array, Float64Array, Int64Array, RecordBatch, StringArray};
use arrow_schema::{DataType, Field, Schema};
use tracing::debug;
use wkt::ToWkt;

use crate::crs::Crs;
use crate::datatypes::AttributeType;
use crate::error::{GeoTableError, Result};
use crate::geometry::Geometry;
use crate::scalar::Value;
use crate::table::{Column, GeoTable};

/// Arrow field metadata key naming an extension type.
pub const EXTENSION_NAME_KEY: &str = "ARROW:extension:name";

/// Arrow field metadata key holding extension type metadata.
pub const EXTENSION_METADATA_KEY: &str = "ARROW:extension:metadata";

/// Extension name of WKT-encoded GeoArrow geometry columns.
pub const WKT_EXTENSION_NAME: &str = "geoarrow.wkt";

fn attribute_array(attribute_type: AttributeType, values: Vec<&Value>) -> ArrayRef {
    match attribute_type {
        AttributeType::Utf8 => Arc::new(
            values
                .into_iter()
                .map(Value::as_str)
                .collect::<StringArray>(),
        ),
        AttributeType::Int64 => Arc::new(
            values
                .into_iter()
                .map(Value::as_i64)
                .collect::<Int64Array>(),
        ),
        AttributeType::Float64 => Arc::new(
            values
                .into_iter()
                .map(Value::as_f64)
                .collect::<Float64Array>(),
        ),
        AttributeType::Date32 => Arc::new(
            values
                .into_iter()
                .map(|v| v.as_date().map(Date32Type::from_naive_date))
                .collect::<Date32Array>(),
        ),
    }
}

fn attribute_values(array: &ArrayRef, attribute_type: AttributeType) -> Vec<Value> {
    match attribute_type {
        AttributeType::Utf8 => array
            .as_string::<i32>()
            .iter()
            .map(|v| Value::from(v.map(str::to_string)))
            .collect(),
        AttributeType::Int64 => array
            .as_primitive::<Int64Type>()
            .iter()
            .map(Value::from)
            .collect(),
        AttributeType::Float64 => array
            .as_primitive::<Float64Type>()
            .iter()
            .map(Value::from)
            .collect(),
        AttributeType::Date32 => array
            .as_primitive::<Date32Type>()
            .iter()
            .map(|v| Value::from(v.map(Date32Type::to_naive_date)))
            .collect(),
    }
}

impl GeoTable {
    /// Export to an Arrow [`RecordBatch`] for a presentation layer.
    ///
    /// Attribute columns keep their names and types. The geometry column is appended last as
    /// non-nullable `Utf8` WKT, carrying the table CRS in its extension metadata.
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        let mut fields = self.schema().fields().iter().cloned().collect::<Vec<_>>();
        let mut columns = Vec::with_capacity(fields.len() + 1);

        for field in self.schema().fields() {
            if let Column::Attribute {
                attribute_type,
                values,
                ..
            } = self.column(field.name())?
            {
                columns.push(attribute_array(attribute_type, values));
            }
        }

        let mut metadata = HashMap::from([(
            EXTENSION_NAME_KEY.to_string(),
            WKT_EXTENSION_NAME.to_string(),
        )]);
        if !self.crs().is_unknown() {
            metadata.insert(
                EXTENSION_METADATA_KEY.to_string(),
                serde_json::to_string(self.crs())
                    .map_err(|err| GeoTableError::General(err.to_string()))?,
            );
        }
        fields.push(Arc::new(
            Field::new(self.geometry_column_name(), DataType::Utf8, false).with_metadata(metadata),
        ));
        columns.push(Arc::new(
            self.geometries()
                .map(|geom| Some(geom.to_wkt().to_string()))
                .collect::<StringArray>(),
        ));

        let schema = Schema::new_with_metadata(fields, self.schema().metadata().clone());
        debug!(rows = self.len(), columns = columns.len(), "exported record batch");
        Ok(RecordBatch::try_new(Arc::new(schema), columns)?)
    }

    /// Build a table from the attribute columns of an Arrow [`RecordBatch`] and a parallel
    /// sequence of geometries.
    ///
    /// Supported attribute types are `Utf8`, `Int64`, `Float64` and `Date32`. A column tagged
    /// with the `geoarrow.wkt` extension, as written by [`to_record_batch`][Self::to_record_batch],
    /// is not read as an attribute: it names the geometry column and its metadata supplies the
    /// table CRS.
    pub fn from_record_batch(batch: &RecordBatch, geometries: Vec<Geometry>) -> Result<Self> {
        let schema = batch.schema();
        let mut geometry_field = None;
        let mut fields = Vec::with_capacity(schema.fields().len());
        let mut arrays = Vec::with_capacity(schema.fields().len());
        for (field, array) in schema.fields().iter().zip(batch.columns()) {
            if !is_wkt_field(field) {
                fields.push(field.clone());
                arrays.push(array);
            } else if geometry_field.replace(field).is_some() {
                return Err(GeoTableError::Schema(
                    "record batch has more than one geoarrow.wkt column".to_string(),
                ));
            }
        }

        let columns = fields
            .iter()
            .zip(arrays)
            .map(|(field, array)| {
                AttributeType::try_from(field.data_type()).map(|t| attribute_values(array, t))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut rows = vec![Vec::with_capacity(columns.len()); batch.num_rows()];
        for column in columns {
            for (row, value) in rows.iter_mut().zip(column) {
                row.push(value);
            }
        }

        let attributes = Arc::new(Schema::new_with_metadata(fields, schema.metadata().clone()));
        let table = GeoTable::try_new(attributes, rows, geometries)?;
        let Some(field) = geometry_field else {
            return Ok(table);
        };

        let crs = match field.metadata().get(EXTENSION_METADATA_KEY) {
            Some(metadata) => serde_json::from_str(metadata)
                .map_err(|err| GeoTableError::General(err.to_string()))?,
            None => Crs::unknown(),
        };
        let table = table.with_crs(crs);
        if field.name() == table.geometry_column_name() {
            Ok(table)
        } else {
            table.with_geometry_column_name(field.name().clone())
        }
    }
}

fn is_wkt_field(field: &Field) -> bool {
    field
        .metadata()
        .get(EXTENSION_NAME_KEY)
        .is_some_and(|name| name == WKT_EXTENSION_NAME)
}

#[cfg(test)]
mod test {
    use arrow_array::Array;
    use chrono::NaiveDate;
    use geo::point;

    use super::*;
    use crate::algorithm::native::TotalBounds;
    use crate::test::cities;

    #[test]
    fn export_cities() {
        let batch = cities::table().head(2).to_record_batch().unwrap();
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.num_columns(), 6);

        let schema = batch.schema();
        let geometry_field = schema.field(5);
        assert_eq!(geometry_field.name(), "geometry");
        assert_eq!(
            geometry_field.metadata().get(EXTENSION_NAME_KEY).unwrap(),
            WKT_EXTENSION_NAME
        );
        let crs: Crs = serde_json::from_str(
            geometry_field
                .metadata()
                .get(EXTENSION_METADATA_KEY)
                .unwrap(),
        )
        .unwrap();
        assert_eq!(crs, Crs::from_epsg(4326));

        let wkt = batch.column(5).as_string::<i32>();
        assert_eq!(wkt.value(0), "POINT(90.4125 23.8101)");

        let population = batch.column(1).as_primitive::<Int64Type>();
        assert_eq!(population.value(1), 8325666);
    }

    #[test]
    fn nulls_survive_export() {
        let table = GeoTable::try_from_columns(
            vec![("score", vec![Value::Null, Value::from(1.5)])],
            vec![point!(x: 0., y: 0.).into(), point!(x: 1., y: 1.).into()],
        )
        .unwrap();
        let batch = table.to_record_batch().unwrap();
        let scores = batch.column(0);
        assert!(scores.is_null(0));
        assert_eq!(scores.as_primitive::<Float64Type>().value(1), 1.5);
        assert!(batch
            .schema()
            .field(1)
            .metadata()
            .get(EXTENSION_METADATA_KEY)
            .is_none());
    }

    #[test]
    fn import_attributes() {
        let date = NaiveDate::from_ymd_opt(2007, 1, 1).unwrap();
        let schema = Arc::new(Schema::new(vec![
            Field::new("country", DataType::Utf8, false),
            Field::new("year", DataType::Date32, true),
            Field::new("lifeExp", DataType::Float64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(vec!["Bangladesh", "Chile"])),
                Arc::new(Date32Array::from(vec![
                    Some(Date32Type::from_naive_date(date)),
                    None,
                ])),
                Arc::new(Float64Array::from(vec![64.062, 78.553])),
            ],
        )
        .unwrap();

        let table = GeoTable::from_record_batch(
            &batch,
            vec![point!(x: 90.4, y: 23.8).into(), point!(x: -70.66, y: -33.45).into()],
        )
        .unwrap();
        assert_eq!(table.shape(), (2, 4));
        let row = table.row(0).unwrap();
        assert_eq!(row.str("country"), Some("Bangladesh"));
        assert_eq!(row.value("year").unwrap(), &Value::Date32(date));
        assert_eq!(table.row(1).unwrap().value("year").unwrap(), &Value::Null);

        let sorted = table.sort_by("lifeExp", false).unwrap();
        assert_eq!(sorted.row(0).unwrap().str("country"), Some("Chile"));
    }

    #[test]
    fn import_rejects_unsupported_types() {
        let schema = Arc::new(Schema::new(vec![Field::new("flag", DataType::Boolean, false)]));
        let batch = RecordBatch::try_new(
            schema,
            vec![Arc::new(arrow_array::BooleanArray::from(vec![true]))],
        )
        .unwrap();
        let err = GeoTable::from_record_batch(&batch, vec![point!(x: 0., y: 0.).into()])
            .unwrap_err();
        assert!(matches!(err, GeoTableError::IncorrectType(_)));
    }

    #[test]
    fn import_length_mismatch() {
        let schema = Arc::new(Schema::new(vec![Field::new("n", DataType::Int64, false)]));
        let batch =
            RecordBatch::try_new(schema, vec![Arc::new(Int64Array::from(vec![1, 2, 3]))]).unwrap();
        let err = GeoTable::from_record_batch(&batch, vec![point!(x: 0., y: 0.).into()])
            .unwrap_err();
        assert!(matches!(err, GeoTableError::Schema(_)));
    }

    #[test]
    fn reimport_exported_batch() {
        let table = cities::table();
        let batch = table.to_record_batch().unwrap();
        let back =
            GeoTable::from_record_batch(&batch, table.geometries().cloned().collect()).unwrap();
        assert_eq!(back.columns(), table.columns());
        assert_eq!(back.crs(), &Crs::from_epsg(4326));
        assert_eq!(
            back.column("population").unwrap(),
            table.column("population").unwrap()
        );
        assert_eq!(back.total_bounds(), table.total_bounds());
    }

    #[test]
    fn reimport_keeps_geometry_name() {
        let table = cities::two_city_table()
            .with_geometry_column_name("location")
            .unwrap();
        let batch = table.to_record_batch().unwrap();
        let back =
            GeoTable::from_record_batch(&batch, table.geometries().cloned().collect()).unwrap();
        assert_eq!(back.columns(), ["city", "population", "location"]);
        assert!(back.crs().is_unknown());
    }
}
