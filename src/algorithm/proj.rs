//! Reprojection through [PROJ](https://proj.org).

use proj::{Proj, Transform};
use serde_json::Value;

use crate::algorithm::ops::CrsTransform;
use crate::crs::{Crs, CrsType};
use crate::error::{GeoTableError, Result};
use crate::geometry::Geometry;

/// Reproject geometries using PROJ.
///
/// A PROJ pipeline is created for each call from the two CRS definitions, since [`Proj`]
/// handles cannot be shared across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjTransform;

fn definition(crs: &Crs) -> Result<String> {
    match (crs.crs_type(), crs.crs_value()) {
        (Some(CrsType::Srid), _) | (_, None) => Err(GeoTableError::General(format!(
            "CRS {crs} cannot be passed to PROJ"
        ))),
        (_, Some(Value::String(s))) => Ok(s.clone()),
        (_, Some(projjson)) => Ok(projjson.to_string()),
    }
}

impl CrsTransform for ProjTransform {
    fn transform(&self, geometry: &Geometry, from: &Crs, to: &Crs) -> Result<Geometry> {
        let proj = Proj::new_known_crs(&definition(from)?, &definition(to)?, None)?;
        Ok(geometry.transformed(&proj)?)
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use geo::{point, Point};

    use super::*;

    #[test]
    fn point_to_web_mercator() {
        let p: Geometry = point!(x: 0., y: 1.).into();

        // You can verify this with PROJ on the command line:
        // echo 1 0 | cs2cs EPSG:4326 EPSG:3857
        // 0.00	111325.14 0.00
        // Though note that cs2cs is using y/x for EPSG:4326
        let out = ProjTransform
            .transform(&p, &Crs::from_epsg(4326), &Crs::from_epsg(3857))
            .unwrap();
        let out = Point::try_from(out).unwrap();
        assert_eq!(out.x(), 0.0);
        assert_relative_eq!(out.y(), 111325.1428663851);
    }

    #[test]
    fn unknown_crs_is_rejected() {
        let p: Geometry = point!(x: 0., y: 1.).into();
        assert!(ProjTransform
            .transform(&p, &Crs::unknown(), &Crs::from_epsg(3857))
            .is_err());
    }
}
