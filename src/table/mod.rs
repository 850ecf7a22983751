//! Tables of attributes paired with geometries.
//!
//! A [`GeoTable`] is built once and never mutated. Filtering, sorting and slicing return new
//! tables that share the same [`Record`]s; adding a derived column returns a new table with an
//! extended schema.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use arrow_schema::{Field, Schema, SchemaRef};
use geo::{point, Point};
use itertools::Itertools;
use tracing::{debug, trace};

use crate::algorithm::native::{BoundingRect, Take, TotalBounds};
use crate::algorithm::{GeometryOps, SpatialPredicate};
use crate::crs::Crs;
use crate::datatypes::{AttributeType, ColumnType, GeometryType};
use crate::error::{GeoTableError, Result};
use crate::geometry::{self, Geometry};
use crate::scalar::Value;

pub use column::Column;
pub use describe::{CategoricalSummary, ColumnSummary, Description, NumericSummary};
pub use record::{Record, Row};

mod column;
mod compute;
mod describe;
mod infer;
mod record;

/// The default name of the geometry column.
pub const DEFAULT_GEOMETRY_COLUMN: &str = "geometry";

/// An ordered collection of records sharing one attribute schema, each with one geometry.
///
/// # Examples
///
/// ```
/// use geo::point;
/// use geotable::scalar::Value;
/// use geotable::table::GeoTable;
///
/// let table = GeoTable::try_from_columns(
///     vec![
///         ("city", vec![Value::from("A"), Value::from("B")]),
///         ("population", vec![Value::from(10), Value::from(30)]),
///     ],
///     vec![point!(x: 0., y: 0.).into(), point!(x: 1., y: 1.).into()],
/// )
/// .unwrap();
///
/// let large = table.filter(|row| row.f64("population").is_some_and(|p| p > 15.));
/// assert_eq!(large.len(), 1);
/// assert_eq!(large.row(0).unwrap().str("city"), Some("B"));
/// ```
#[derive(Debug, Clone)]
pub struct GeoTable {
    schema: SchemaRef,
    attribute_types: Arc<[AttributeType]>,
    geometry_column: Arc<str>,
    crs: Crs,
    records: Vec<Arc<Record>>,
}

impl GeoTable {
    /// Build a table from attribute rows and a parallel sequence of geometries.
    ///
    /// Fails with [`Schema`][GeoTableError::Schema] if the number of attribute rows differs from
    /// the number of geometries, or if a row does not match the schema.
    pub fn try_new(
        schema: SchemaRef,
        attributes: Vec<Vec<Value>>,
        geometries: Vec<Geometry>,
    ) -> Result<Self> {
        let attribute_types = validate_schema(&schema, DEFAULT_GEOMETRY_COLUMN)?;

        if attributes.len() != geometries.len() {
            return Err(GeoTableError::Schema(format!(
                "{} attribute rows but {} geometries",
                attributes.len(),
                geometries.len()
            )));
        }

        let records = attributes
            .into_iter()
            .zip(geometries)
            .enumerate()
            .map(|(i, (values, geometry))| {
                if values.len() != schema.fields().len() {
                    return Err(GeoTableError::Schema(format!(
                        "row {i} has {} values but the schema has {} fields",
                        values.len(),
                        schema.fields().len()
                    )));
                }
                for ((field, t), value) in schema
                    .fields()
                    .iter()
                    .zip(attribute_types.iter())
                    .zip(values.iter())
                {
                    infer::check_value(field, *t, value)?;
                }
                geometry::validate(&geometry)?;
                Ok(Arc::new(Record::new(values, geometry)))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            rows = records.len(),
            columns = schema.fields().len(),
            "constructed table"
        );
        Ok(Self {
            schema,
            attribute_types: attribute_types.into(),
            geometry_column: DEFAULT_GEOMETRY_COLUMN.into(),
            crs: Crs::unknown(),
            records,
        })
    }

    /// Build a table from named attribute columns, inferring each column's type.
    ///
    /// All columns and the geometry sequence must have the same length.
    pub fn try_from_columns<S: Into<String>>(
        columns: Vec<(S, Vec<Value>)>,
        geometries: Vec<Geometry>,
    ) -> Result<Self> {
        let columns = columns
            .into_iter()
            .map(|(name, values)| (name.into(), values))
            .collect::<Vec<(String, Vec<Value>)>>();

        if let Some((name, values)) = columns
            .iter()
            .find(|(_, values)| values.len() != geometries.len())
        {
            return Err(GeoTableError::Schema(format!(
                "column {name:?} has {} values but there are {} geometries",
                values.len(),
                geometries.len()
            )));
        }

        let fields = columns
            .iter()
            .map(|(name, values)| infer::infer_field(name, values))
            .collect::<Result<Vec<_>>>()?;

        let mut rows = vec![Vec::with_capacity(columns.len()); geometries.len()];
        for (_, values) in columns {
            for (row, value) in rows.iter_mut().zip(values) {
                row.push(value);
            }
        }

        Self::try_new(Arc::new(Schema::new(fields)), rows, geometries)
    }

    /// Build a table of points from parallel x and y coordinate sequences.
    pub fn try_from_xy<S: Into<String>>(
        columns: Vec<(S, Vec<Value>)>,
        xs: &[f64],
        ys: &[f64],
    ) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(GeoTableError::Schema(format!(
                "{} x coordinates but {} y coordinates",
                xs.len(),
                ys.len()
            )));
        }
        let geometries = xs
            .iter()
            .zip(ys)
            .map(|(x, y)| point!(x: *x, y: *y).into())
            .collect();
        Self::try_from_columns(columns, geometries)
    }

    /// The same table with its geometries declared under `crs`.
    ///
    /// This only relabels the geometries; use [`to_crs`][Self::to_crs] to reproject.
    pub fn with_crs(self, crs: Crs) -> Self {
        Self { crs, ..self }
    }

    /// The same table with its geometry column renamed.
    pub fn with_geometry_column_name(self, name: impl Into<String>) -> Result<Self> {
        let name: String = name.into();
        if self.schema.column_with_name(&name).is_some() {
            return Err(GeoTableError::DuplicateColumn(name));
        }
        Ok(Self {
            geometry_column: name.into(),
            ..self
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(rows, columns)`, counting the geometry column.
    pub fn shape(&self) -> (usize, usize) {
        (self.len(), self.schema.fields().len() + 1)
    }

    /// Schema of the attribute columns. The geometry column is not part of it.
    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    pub fn geometry_column_name(&self) -> &str {
        &self.geometry_column
    }

    pub fn crs(&self) -> &Crs {
        &self.crs
    }

    /// Column names: attributes in schema order, then the geometry column.
    pub fn columns(&self) -> Vec<&str> {
        self.schema
            .fields()
            .iter()
            .map(|f| f.name().as_str())
            .chain(std::iter::once(self.geometry_column_name()))
            .collect()
    }

    /// Column names with their types, in [`columns`][Self::columns] order.
    pub fn dtypes(&self) -> Vec<(&str, ColumnType)> {
        self.schema
            .fields()
            .iter()
            .zip(self.attribute_types.iter())
            .map(|(f, t)| (f.name().as_str(), ColumnType::Attribute(*t)))
            .chain(std::iter::once((
                self.geometry_column_name(),
                ColumnType::Geometry,
            )))
            .collect()
    }

    pub fn records(&self) -> &[Arc<Record>] {
        &self.records
    }

    pub fn row(&self, i: usize) -> Option<Row<'_>> {
        self.records
            .get(i)
            .map(|record| Row::new(&self.schema, &self.geometry_column, record, i))
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = Row<'_>> + '_ {
        self.records
            .iter()
            .enumerate()
            .map(|(i, record)| Row::new(&self.schema, &self.geometry_column, record, i))
    }

    pub fn geometries(&self) -> impl ExactSizeIterator<Item = &Geometry> + '_ {
        self.records.iter().map(|record| record.geometry())
    }

    fn field_index(&self, name: &str) -> Option<usize> {
        self.schema.column_with_name(name).map(|(i, _)| i)
    }

    /// The ordered values of an attribute column or of the geometry column.
    pub fn column(&self, name: &str) -> Result<Column<'_>> {
        if name == self.geometry_column_name() {
            return Ok(Column::Geometry(self.geometries().collect()));
        }
        let i = self
            .field_index(name)
            .ok_or_else(|| GeoTableError::ColumnNotFound(name.to_string()))?;
        let values = self
            .records
            .iter()
            .map(|record| &record.values()[i])
            .collect();
        Ok(Column::Attribute {
            field: self.schema.field(i),
            attribute_type: self.attribute_types[i],
            values,
        })
    }

    fn has_column(&self, name: &str) -> bool {
        name == self.geometry_column_name() || self.field_index(name).is_some()
    }

    /// A new table sharing this table's records, in the given order.
    fn with_records(&self, records: Vec<Arc<Record>>) -> Self {
        Self {
            schema: self.schema.clone(),
            attribute_types: self.attribute_types.clone(),
            geometry_column: self.geometry_column.clone(),
            crs: self.crs.clone(),
            records,
        }
    }

    /// Add a column computed from every row, in order.
    ///
    /// The column type is inferred from the produced values. Fails with
    /// [`DuplicateColumn`][GeoTableError::DuplicateColumn] if `name` is already a column.
    ///
    /// ```
    /// # use geotable::scalar::Value;
    /// # use geotable::table::GeoTable;
    /// # use geo::point;
    /// # let table = GeoTable::try_from_columns(
    /// #     vec![
    /// #         ("population", vec![Value::from(36433505)]),
    /// #         ("area", vec![Value::from(20593.74)]),
    /// #     ],
    /// #     vec![point!(x: 90.4125, y: 23.8101).into()],
    /// # ).unwrap();
    /// let with_density = table
    ///     .with_derived_column("density", |row| {
    ///         match (row.f64("population"), row.f64("area")) {
    ///             (Some(p), Some(a)) => Value::Float64(p / a),
    ///             _ => Value::Null,
    ///         }
    ///     })
    ///     .unwrap();
    /// assert_eq!(with_density.columns(), ["population", "area", "density", "geometry"]);
    /// ```
    pub fn with_derived_column<F>(&self, name: &str, func: F) -> Result<Self>
    where
        F: Fn(&Row<'_>) -> Value,
    {
        self.try_with_derived_column(name, |row| Ok(func(row)))
    }

    /// Like [`with_derived_column`][Self::with_derived_column], but `func` may fail. The first
    /// error is returned.
    pub fn try_with_derived_column<F>(&self, name: &str, func: F) -> Result<Self>
    where
        F: Fn(&Row<'_>) -> Result<Value>,
    {
        if self.has_column(name) {
            return Err(GeoTableError::DuplicateColumn(name.to_string()));
        }

        let values = self.rows().map(|row| func(&row)).collect::<Result<Vec<_>>>()?;
        let field = infer::infer_field(name, &values)?;
        let attribute_type = AttributeType::try_from(field.data_type())?;

        let records = self
            .records
            .iter()
            .zip(values)
            .map(|(record, value)| Arc::new(record.with_value(value)))
            .collect();

        let mut fields = self.schema.fields().iter().cloned().collect::<Vec<_>>();
        fields.push(Arc::new(field));
        let attribute_types = self
            .attribute_types
            .iter()
            .copied()
            .chain(std::iter::once(attribute_type))
            .collect::<Vec<_>>();

        debug!(column = name, %attribute_type, rows = self.len(), "derived column");
        Ok(Self {
            schema: Arc::new(Schema::new_with_metadata(
                fields,
                self.schema.metadata().clone(),
            )),
            attribute_types: attribute_types.into(),
            geometry_column: self.geometry_column.clone(),
            crs: self.crs.clone(),
            records,
        })
    }

    /// Keep only rows for which `predicate` holds, in their original order.
    pub fn filter<F>(&self, predicate: F) -> Self
    where
        F: Fn(&Row<'_>) -> bool,
    {
        let records = self
            .rows()
            .filter(|row| predicate(row))
            .map(|row| self.records[row.index()].clone())
            .collect::<Vec<_>>();
        debug!(rows = self.len(), kept = records.len(), "filtered table");
        self.with_records(records)
    }

    /// Reorder rows by the named column.
    ///
    /// The sort is stable in both directions: rows with equal keys keep their relative order.
    /// Nulls sort last in both directions.
    pub fn sort_by(&self, name: &str, ascending: bool) -> Result<Self> {
        if name == self.geometry_column_name() {
            return Err(GeoTableError::IncorrectType(
                "geometry columns have no natural order".into(),
            ));
        }
        let i = self
            .field_index(name)
            .ok_or_else(|| GeoTableError::ColumnNotFound(name.to_string()))?;

        let mut records = self.records.clone();
        records.sort_by(|a, b| compare_values(&a.values()[i], &b.values()[i], ascending));

        debug!(column = name, ascending, rows = self.len(), "sorted table");
        Ok(self.with_records(records))
    }

    /// The first `n` rows.
    pub fn head(&self, n: usize) -> Self {
        self.take_range(&(0..n.min(self.len())))
    }

    /// The last `n` rows.
    pub fn tail(&self, n: usize) -> Self {
        let len = self.len();
        self.take_range(&(len.saturating_sub(n)..len))
    }

    /// All rows except those at `indices`. Indices past the end are ignored.
    pub fn drop_rows(&self, indices: &[usize]) -> Self {
        let dropped = indices.iter().copied().collect::<HashSet<_>>();
        let records = self
            .records
            .iter()
            .enumerate()
            .filter(|(i, _)| !dropped.contains(i))
            .map(|(_, record)| record.clone())
            .collect::<Vec<_>>();
        trace!(rows = self.len(), kept = records.len(), "dropped rows");
        self.with_records(records)
    }

    /// Keep only the named attribute columns, in the given order.
    ///
    /// The geometry column is always kept; naming it is allowed and has no effect.
    pub fn select(&self, names: &[&str]) -> Result<Self> {
        let mut indices = Vec::with_capacity(names.len());
        for name in names {
            if *name == self.geometry_column_name() {
                continue;
            }
            let i = self
                .field_index(name)
                .ok_or_else(|| GeoTableError::ColumnNotFound(name.to_string()))?;
            if indices.contains(&i) {
                return Err(GeoTableError::DuplicateColumn(name.to_string()));
            }
            indices.push(i);
        }
        Ok(self.project(&indices))
    }

    /// All columns except the named attribute columns.
    ///
    /// Fails with [`ColumnNotFound`][GeoTableError::ColumnNotFound] on an unknown name. The
    /// geometry column cannot be dropped.
    pub fn drop_columns(&self, names: &[&str]) -> Result<Self> {
        let mut dropped = HashSet::with_capacity(names.len());
        for name in names {
            if *name == self.geometry_column_name() {
                return Err(GeoTableError::IncorrectType(
                    "the geometry column cannot be dropped".into(),
                ));
            }
            let i = self
                .field_index(name)
                .ok_or_else(|| GeoTableError::ColumnNotFound(name.to_string()))?;
            dropped.insert(i);
        }
        let indices = (0..self.schema.fields().len())
            .filter(|i| !dropped.contains(i))
            .collect::<Vec<_>>();
        Ok(self.project(&indices))
    }

    /// A new table with the attribute columns at `indices`, in that order.
    fn project(&self, indices: &[usize]) -> Self {
        let fields = indices
            .iter()
            .map(|&i| self.schema.fields()[i].clone())
            .collect::<Vec<_>>();
        let attribute_types = indices
            .iter()
            .map(|&i| self.attribute_types[i])
            .collect::<Vec<_>>();
        let records = self
            .records
            .iter()
            .map(|record| Arc::new(record.project(indices)))
            .collect();

        debug!(columns = indices.len(), rows = self.len(), "projected columns");
        Self {
            schema: Arc::new(Schema::new_with_metadata(
                fields,
                self.schema.metadata().clone(),
            )),
            attribute_types: attribute_types.into(),
            geometry_column: self.geometry_column.clone(),
            crs: self.crs.clone(),
            records,
        }
    }

    /// Reproject every geometry to `target` and declare the result under it.
    ///
    /// A table whose CRS is unknown cannot be reprojected.
    pub fn to_crs(&self, ops: &impl GeometryOps, target: Crs) -> Result<Self> {
        if self.crs.is_unknown() {
            return Err(GeoTableError::IncompatibleCrs {
                left: self.crs.clone(),
                right: target,
            });
        }
        if self.crs == target {
            return Ok(self.clone());
        }

        let geometries =
            self.try_map_geometries(|geom| ops.transform_crs(geom, &self.crs, &target))?;
        let records = self
            .records
            .iter()
            .zip(geometries)
            .map(|(record, geometry)| {
                geometry::validate(&geometry)?;
                Ok(Arc::new(record.with_geometry(geometry)))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(from = %self.crs, to = %target, rows = self.len(), "reprojected table");
        Ok(Self {
            crs: target,
            ..self.with_records(records)
        })
    }

    /// Area of every geometry.
    pub fn area(&self, ops: &impl GeometryOps) -> Vec<f64> {
        self.map_geometries(|geom| ops.area(geom))
    }

    /// Length (or perimeter) of every geometry.
    pub fn length(&self, ops: &impl GeometryOps) -> Vec<f64> {
        self.map_geometries(|geom| ops.length(geom))
    }

    /// Centroid of every geometry.
    pub fn centroid(&self, ops: &impl GeometryOps) -> Vec<Option<Point>> {
        self.map_geometries(|geom| ops.centroid(geom))
    }

    /// Bounds of every geometry.
    pub fn bounds(&self, ops: &impl GeometryOps) -> Vec<Option<BoundingRect>> {
        self.map_geometries(|geom| ops.bounds(geom))
    }

    /// The geometry type of every row.
    pub fn geom_type(&self) -> Vec<GeometryType> {
        // Geometries are validated on construction, so every type is supported.
        self.geometries()
            .filter_map(|geom| geometry::geometry_type(geom).ok())
            .collect()
    }

    /// Distance from every geometry to `other`, declared under `other_crs`.
    pub fn distance_to(
        &self,
        ops: &impl GeometryOps,
        other: &Geometry,
        other_crs: &Crs,
    ) -> Result<Vec<f64>> {
        self.crs.check_compatible(other_crs)?;
        self.try_map_geometries(|geom| ops.distance(geom, &self.crs, other, other_crs))
    }

    /// Evaluate `predicate` between every geometry (on the left) and `other`.
    pub fn relate(
        &self,
        ops: &impl GeometryOps,
        predicate: SpatialPredicate,
        other: &Geometry,
        other_crs: &Crs,
    ) -> Result<Vec<bool>> {
        self.crs.check_compatible(other_crs)?;
        self.try_map_geometries(|geom| ops.relate(geom, &self.crs, predicate, other, other_crs))
    }

    /// Summary statistics of every attribute column.
    pub fn describe(&self) -> Description {
        describe::describe(self)
    }
}

/// Order two values of one column, keeping nulls last whatever the direction.
fn compare_values(a: &Value, b: &Value, ascending: bool) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) if ascending => a.total_cmp(b),
        (false, false) => b.total_cmp(a),
    }
}

/// Check field names and types, returning the attribute type of every field.
fn validate_schema(schema: &Schema, geometry_column: &str) -> Result<Vec<AttributeType>> {
    if let Some(name) = schema
        .fields()
        .iter()
        .map(|f| f.name())
        .duplicates()
        .next()
    {
        return Err(GeoTableError::DuplicateColumn(name.clone()));
    }
    if schema.column_with_name(geometry_column).is_some() {
        return Err(GeoTableError::DuplicateColumn(geometry_column.to_string()));
    }
    schema
        .fields()
        .iter()
        .map(|f: &Arc<Field>| AttributeType::try_from(f.data_type()))
        .collect()
}

impl Take for GeoTable {
    type Output = Self;

    fn take(&self, indices: &[usize]) -> Result<Self::Output> {
        let records = indices
            .iter()
            .map(|&index| {
                self.records
                    .get(index)
                    .cloned()
                    .ok_or(GeoTableError::IndexOutOfBounds {
                        index,
                        len: self.len(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(self.with_records(records))
    }

    fn take_range(&self, range: &std::ops::Range<usize>) -> Self::Output {
        let end = range.end.min(self.len());
        let start = range.start.min(end);
        self.with_records(self.records[start..end].to_vec())
    }
}

impl TotalBounds for GeoTable {
    fn total_bounds(&self) -> BoundingRect {
        self.geometries().fold(BoundingRect::new(), |mut bounds, geom| {
            bounds.add_geometry(geom);
            bounds
        })
    }
}
