use arrow_schema::Field;

use crate::datatypes::AttributeType;
use crate::error::{GeoTableError, Result};
use crate::scalar::Value;

/// Infer the field for a column from its values.
///
/// Every non-null value must share one type. A column with no non-null values is a nullable
/// `Float64` column, matching how dataframes treat an all-missing column.
pub(crate) fn infer_field<'a>(
    name: &str,
    values: impl IntoIterator<Item = &'a Value>,
) -> Result<Field> {
    let mut inferred: Option<AttributeType> = None;
    let mut nullable = false;

    for value in values {
        match (value.attribute_type(), inferred) {
            (None, _) => nullable = true,
            (Some(t), None) => inferred = Some(t),
            (Some(t), Some(existing)) if t != existing => {
                return Err(GeoTableError::Schema(format!(
                    "column {name:?} mixes {existing} and {t} values"
                )));
            }
            _ => {}
        }
    }

    let attribute_type = inferred.unwrap_or_else(|| {
        nullable = true;
        AttributeType::Float64
    });
    Ok(Field::new(name, attribute_type.to_data_type(), nullable))
}

/// Check that `value` can be stored in `field`.
pub(crate) fn check_value(field: &Field, attribute_type: AttributeType, value: &Value) -> Result<()> {
    match value.attribute_type() {
        None if field.is_nullable() => Ok(()),
        None => Err(GeoTableError::Schema(format!(
            "null value in non-nullable column {:?}",
            field.name()
        ))),
        Some(t) if t == attribute_type => Ok(()),
        Some(t) => Err(GeoTableError::Schema(format!(
            "column {:?} has type {attribute_type} but got a {t} value",
            field.name()
        ))),
    }
}
