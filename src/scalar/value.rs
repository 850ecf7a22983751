use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;

use crate::datatypes::AttributeType;

/// A single attribute value of a record.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Utf8(String),
    Int64(i64),
    Float64(f64),
    Date32(NaiveDate),
}

impl Value {
    /// The attribute type of this value, or `None` for [`Value::Null`].
    pub fn attribute_type(&self) -> Option<AttributeType> {
        match self {
            Value::Null => None,
            Value::Utf8(_) => Some(AttributeType::Utf8),
            Value::Int64(_) => Some(AttributeType::Int64),
            Value::Float64(_) => Some(AttributeType::Float64),
            Value::Date32(_) => Some(AttributeType::Date32),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of integer and float values.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int64(v) => Some(*v as f64),
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Utf8(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date32(v) => Some(*v),
            _ => None,
        }
    }

    /// Total order used for sorting a column.
    ///
    /// Nulls sort after every other value, floats use IEEE 754 `totalOrder`, and integers compare
    /// numerically against floats. Values of unrelated types are ordered by type so the result is
    /// still a total order.
    pub fn total_cmp(&self, other: &Value) -> Ordering {
        use Value::*;

        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Null, _) => Ordering::Greater,
            (_, Null) => Ordering::Less,
            (Utf8(a), Utf8(b)) => a.cmp(b),
            (Int64(a), Int64(b)) => a.cmp(b),
            (Float64(a), Float64(b)) => a.total_cmp(b),
            (Int64(a), Float64(b)) => (*a as f64).total_cmp(b),
            (Float64(a), Int64(b)) => a.total_cmp(&(*b as f64)),
            (Date32(a), Date32(b)) => a.cmp(b),
            (a, b) => a.type_rank().cmp(&b.type_rank()),
        }
    }

    fn type_rank(&self) -> u8 {
        match self {
            Value::Int64(_) | Value::Float64(_) => 0,
            Value::Date32(_) => 1,
            Value::Utf8(_) => 2,
            Value::Null => 3,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Utf8(v) => f.write_str(v),
            Value::Int64(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::Date32(v) => write!(f, "{}", v.format("%Y-%m-%d")),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Utf8(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Utf8(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int64(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int64(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float64(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Value::Date32(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn nulls_sort_last() {
        let mut values = vec![
            Value::Null,
            Value::Float64(2.5),
            Value::Int64(1),
            Value::Float64(-0.5),
        ];
        values.sort_by(|a, b| a.total_cmp(b));
        assert_eq!(
            values,
            vec![
                Value::Float64(-0.5),
                Value::Int64(1),
                Value::Float64(2.5),
                Value::Null
            ]
        );
    }

    #[test]
    fn dates_order_chronologically() {
        let early = Value::from(NaiveDate::from_ymd_opt(1999, 12, 31).unwrap());
        let late = Value::from(NaiveDate::from_ymd_opt(2007, 1, 1).unwrap());
        assert_eq!(early.total_cmp(&late), Ordering::Less);
        assert_eq!(late.to_string(), "2007-01-01");
    }

    #[test]
    fn option_conversion() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("Dhaka")), Value::Utf8("Dhaka".to_string()));
        assert_eq!(Value::from(3).as_f64(), Some(3.0));
    }
}
