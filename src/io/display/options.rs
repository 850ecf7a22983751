use serde::{Deserialize, Serialize};

/// Options for rendering a [`GeoTable`][crate::table::GeoTable] as text.
///
/// Every field has a default, so a partial JSON object is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    /// The maximum number of rows to print. Longer tables show their head and tail around an
    /// ellipsis row.
    max_rows: usize,

    /// Digits after the decimal point for float attributes. If `None`, floats are printed in
    /// their shortest round-trip form.
    float_precision: Option<usize>,

    /// Whether to print the geometry column as WKT.
    geometry: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            max_rows: 10,
            float_precision: None,
            geometry: true,
        }
    }
}

impl DisplayOptions {
    /// Set the maximum number of rows to print.
    ///
    /// Defaults to 10. Values below 2 still print one row from each end.
    pub fn with_max_rows(self, max_rows: usize) -> Self {
        Self { max_rows, ..self }
    }

    pub fn with_float_precision(self, float_precision: usize) -> Self {
        Self {
            float_precision: Some(float_precision),
            ..self
        }
    }

    /// Include or omit the geometry column.
    pub fn with_geometry(self, geometry: bool) -> Self {
        Self { geometry, ..self }
    }

    pub fn max_rows(&self) -> usize {
        self.max_rows
    }

    pub fn float_precision(&self) -> Option<usize> {
        self.float_precision
    }

    pub fn geometry(&self) -> bool {
        self.geometry
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn partial_json() {
        let options: DisplayOptions = serde_json::from_str(r#"{"float_precision": 2}"#).unwrap();
        assert_eq!(options, DisplayOptions::default().with_float_precision(2));
        assert_eq!(options.max_rows(), 10);
        assert!(options.geometry());
    }
}
