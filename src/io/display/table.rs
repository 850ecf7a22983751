use std::fmt;

use itertools::Itertools;
use wkt::ToWkt;

use crate::io::display::DisplayOptions;
use crate::scalar::Value;
use crate::table::{GeoTable, Row};

const ELLIPSIS: &str = "...";

fn fmt_value(value: &Value, options: &DisplayOptions) -> String {
    match (value, options.float_precision()) {
        (Value::Float64(v), Some(precision)) => format!("{v:.precision$}"),
        _ => value.to_string(),
    }
}

fn fmt_row(row: &Row<'_>, options: &DisplayOptions) -> String {
    let mut values = row.record().values().iter().map(|v| fmt_value(v, options));
    if options.geometry() {
        values
            .chain(std::iter::once(row.geometry().to_wkt().to_string()))
            .join(" | ")
    } else {
        values.join(" | ")
    }
}

impl GeoTable {
    /// Render a preview of this table.
    ///
    /// The header names the columns. If the table has more than
    /// [`max_rows`][DisplayOptions::max_rows] rows, only its head and tail are printed. The
    /// footer gives the full shape.
    pub fn to_string_with(&self, options: &DisplayOptions) -> String {
        let mut lines = Vec::new();
        lines.push(format!("GeoTable (crs: {})", self.crs()));

        let columns = self.columns();
        let header = if options.geometry() {
            columns.iter().join(" | ")
        } else {
            columns[..columns.len() - 1].iter().join(" | ")
        };
        lines.push(header);

        let max_rows = options.max_rows().max(2);
        if self.len() <= max_rows {
            lines.extend(self.rows().map(|row| fmt_row(&row, options)));
        } else {
            let head = max_rows.div_ceil(2);
            let tail = max_rows / 2;
            lines.extend(self.rows().take(head).map(|row| fmt_row(&row, options)));
            lines.push(ELLIPSIS.to_string());
            lines.extend(
                self.rows()
                    .skip(self.len() - tail)
                    .map(|row| fmt_row(&row, options)),
            );
        }

        let (rows, columns) = self.shape();
        lines.push(format!("[{rows} rows x {columns} columns]"));
        lines.join("\n")
    }
}

impl fmt::Display for GeoTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(&DisplayOptions::default()))
    }
}
