//! Bulk per-geometry evaluation, parallel when the `rayon` feature is enabled.
//!
//! Results are always in row order and identical to sequential evaluation.

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::error::Result;
use crate::geometry::Geometry;
use crate::table::GeoTable;

impl GeoTable {
    pub(crate) fn map_geometries<T, F>(&self, func: F) -> Vec<T>
    where
        T: Send,
        F: Fn(&Geometry) -> T + Send + Sync,
    {
        #[cfg(feature = "rayon")]
        {
            self.records()
                .par_iter()
                .map(|record| func(record.geometry()))
                .collect()
        }
        #[cfg(not(feature = "rayon"))]
        {
            self.geometries().map(func).collect()
        }
    }

    pub(crate) fn try_map_geometries<T, F>(&self, func: F) -> Result<Vec<T>>
    where
        T: Send,
        F: Fn(&Geometry) -> Result<T> + Send + Sync,
    {
        #[cfg(feature = "rayon")]
        {
            self.records()
                .par_iter()
                .map(|record| func(record.geometry()))
                .collect()
        }
        #[cfg(not(feature = "rayon"))]
        {
            self.geometries().map(func).collect()
        }
    }
}
