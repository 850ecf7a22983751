use std::fmt;

use indexmap::IndexMap;
use itertools::Itertools;
use serde::Serialize;

use crate::scalar::Value;
use crate::table::GeoTable;

/// Summary statistics of a numeric column.
///
/// Quartiles interpolate linearly between the two nearest ranks, so the median of an even count
/// is the mean of the middle pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    /// Number of non-null values.
    pub count: usize,
    pub mean: Option<f64>,
    /// Sample standard deviation (`n - 1` denominator); `None` with fewer than two values.
    pub std: Option<f64>,
    pub min: Option<f64>,
    #[serde(rename = "25%")]
    pub q25: Option<f64>,
    #[serde(rename = "50%")]
    pub median: Option<f64>,
    #[serde(rename = "75%")]
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

/// Summary of a text or date column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoricalSummary {
    /// Number of non-null values.
    pub count: usize,
    /// Number of distinct non-null values.
    pub unique: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnSummary {
    Numeric(NumericSummary),
    Categorical(CategoricalSummary),
}

impl ColumnSummary {
    pub fn as_numeric(&self) -> Option<&NumericSummary> {
        match self {
            ColumnSummary::Numeric(s) => Some(s),
            ColumnSummary::Categorical(_) => None,
        }
    }

    pub fn as_categorical(&self) -> Option<&CategoricalSummary> {
        match self {
            ColumnSummary::Numeric(_) => None,
            ColumnSummary::Categorical(s) => Some(s),
        }
    }
}

/// Per-column summary statistics of a table, keyed by column name in schema order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Description {
    columns: IndexMap<String, ColumnSummary>,
}

impl Description {
    pub fn get(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns.get(name)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnSummary)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Quantile `q` of ascending `sorted` values, interpolating linearly between ranks.
fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let position = q * last as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

fn numeric_summary<'a>(values: impl Iterator<Item = &'a Value>) -> NumericSummary {
    let mut values = values.filter_map(Value::as_f64).collect::<Vec<_>>();
    values.sort_by(f64::total_cmp);
    let count = values.len();
    if count == 0 {
        return NumericSummary {
            count,
            mean: None,
            std: None,
            min: None,
            q25: None,
            median: None,
            q75: None,
            max: None,
        };
    }

    let mean = values.iter().sum::<f64>() / count as f64;
    let std = (count > 1).then(|| {
        let sum_sq = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
        (sum_sq / (count - 1) as f64).sqrt()
    });

    NumericSummary {
        count,
        mean: Some(mean),
        std,
        min: values.first().copied(),
        q25: quantile(&values, 0.25),
        median: quantile(&values, 0.5),
        q75: quantile(&values, 0.75),
        max: values.last().copied(),
    }
}

fn categorical_summary<'a>(values: impl Iterator<Item = &'a Value>) -> CategoricalSummary {
    let present = values.filter(|v| !v.is_null()).collect::<Vec<_>>();
    CategoricalSummary {
        count: present.len(),
        unique: present.iter().map(|v| v.to_string()).unique().count(),
    }
}

pub(super) fn describe(table: &GeoTable) -> Description {
    let columns = table
        .dtypes()
        .into_iter()
        .enumerate()
        .filter_map(|(i, (name, column_type))| {
            let crate::datatypes::ColumnType::Attribute(attribute_type) = column_type else {
                return None;
            };
            let values = table.records().iter().map(move |r| &r.values()[i]);
            let summary = if attribute_type.is_numeric() {
                ColumnSummary::Numeric(numeric_summary(values))
            } else {
                ColumnSummary::Categorical(categorical_summary(values))
            };
            Some((name.to_string(), summary))
        })
        .collect();
    Description { columns }
}

fn fmt_stat(value: Option<f64>) -> String {
    value.map_or_else(|| "null".to_string(), |v| format!("{v:.6}"))
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Description")?;
        for (name, summary) in self.iter() {
            match summary {
                ColumnSummary::Numeric(s) => writeln!(
                    f,
                    "{name}: count={} mean={} std={} min={} 25%={} 50%={} 75%={} max={}",
                    s.count,
                    fmt_stat(s.mean),
                    fmt_stat(s.std),
                    fmt_stat(s.min),
                    fmt_stat(s.q25),
                    fmt_stat(s.median),
                    fmt_stat(s.q75),
                    fmt_stat(s.max)
                )?,
                ColumnSummary::Categorical(s) => {
                    writeln!(f, "{name}: count={} unique={}", s.count, s.unique)?
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use super::*;
    use crate::test::cities;

    #[test]
    fn two_city_mean() {
        let description = cities::two_city_table().describe();
        let population = description.get("population").unwrap().as_numeric().unwrap();
        assert_eq!(population.count, 2);
        assert_eq!(population.mean, Some(20.0));
        assert_eq!(population.min, Some(10.0));
        assert_eq!(population.max, Some(30.0));
        assert_relative_eq!(population.std.unwrap(), 200f64.sqrt());

        let city = description.get("city").unwrap().as_categorical().unwrap();
        assert_eq!(city.count, 2);
        assert_eq!(city.unique, 2);
    }

    #[test]
    fn quartiles() {
        let description = cities::two_city_table().describe();
        let population = description.get("population").unwrap().as_numeric().unwrap();
        assert_eq!(population.q25, Some(15.0));
        assert_eq!(population.median, Some(20.0));
        assert_eq!(population.q75, Some(25.0));

        let description = cities::table().describe();
        let population = description.get("population").unwrap().as_numeric().unwrap();
        assert_relative_eq!(population.q25.unwrap(), 10979250.0);
        assert_relative_eq!(population.median.unwrap(), 15737758.5);
        assert_relative_eq!(population.q75.unwrap(), 21150643.5);
        assert_eq!(population.min, Some(8325666.0));
        assert_eq!(population.max, Some(36433505.0));
    }

    #[test]
    fn single_value_quartiles() {
        let summary = numeric_summary([Value::Float64(2.5), Value::Null].iter());
        assert_eq!(summary.q25, Some(2.5));
        assert_eq!(summary.median, Some(2.5));
        assert_eq!(summary.q75, Some(2.5));
        assert_eq!(numeric_summary([Value::Null].iter()).median, None);
    }

    #[test]
    fn geometry_column_is_not_summarized() {
        let description = cities::table().describe();
        assert!(description.get("geometry").is_none());
        assert_eq!(
            description.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            ["city", "population", "area", "latitude", "longitude"]
        );
    }

    #[test]
    fn cities_area() {
        let description = cities::table().describe();
        let area = description.get("area").unwrap().as_numeric().unwrap();
        assert_eq!(area.min, Some(10584.06));
        assert_eq!(area.max, Some(33908.55));
        assert_eq!(area.count, 8);
    }

    #[test]
    fn nulls_are_not_counted() {
        let values = [Value::Null, Value::Int64(4), Value::Null];
        let summary = numeric_summary(values.iter());
        assert_eq!(summary.count, 1);
        assert_eq!(summary.mean, Some(4.0));
        assert_eq!(summary.std, None);

        let empty = numeric_summary([Value::Null].iter());
        assert_eq!(empty.count, 0);
        assert_eq!(empty.mean, None);

        let categories = [Value::from("a"), Value::Null, Value::from("a"), Value::from("b")];
        let summary = categorical_summary(categories.iter());
        assert_eq!(summary.count, 3);
        assert_eq!(summary.unique, 2);
    }

    #[test]
    fn serializes_as_map() {
        let json = serde_json::to_value(cities::two_city_table().describe()).unwrap();
        assert_eq!(json["population"]["kind"], "numeric");
        assert_eq!(json["population"]["mean"], 20.0);
        assert_eq!(json["population"]["50%"], 20.0);
        assert_eq!(json["city"]["unique"], 2);
    }
}
