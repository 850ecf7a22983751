//! Coordinate reference system metadata attached to a table's geometries.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{GeoTableError, Result};

/// The declared coordinate reference system of a geometry column.
///
/// `Crs` is only a label: it records how coordinates should be interpreted but does not carry
/// any projection math. Reprojection goes through a
/// [`CrsTransform`][crate::algorithm::CrsTransform].
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Crs {
    /// One of:
    ///
    /// - A JSON object describing the CRS using
    ///   [PROJJSON](https://proj.org/specifications/projjson.html).
    /// - A string containing a serialized CRS representation.
    /// - Omitted, indicating that the producer does not have any information about the CRS.
    crs: Option<Value>,

    /// An optional string disambiguating the value of the `crs` field.
    #[serde(skip_serializing_if = "Option::is_none")]
    crs_type: Option<CrsType>,
}

impl Crs {
    /// A CRS with no information. Compatible with every other CRS.
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Construct from a PROJJSON object.
    ///
    /// Note that `value` should be a _parsed_ JSON object; this should not contain
    /// `Value::String`.
    pub fn from_projjson(value: Value) -> Self {
        Self {
            crs: Some(value),
            crs_type: Some(CrsType::Projjson),
        }
    }

    /// Construct from a WKT:2019 string.
    pub fn from_wkt2_2019(value: String) -> Self {
        Self {
            crs: Some(Value::String(value)),
            crs_type: Some(CrsType::Wkt2_2019),
        }
    }

    /// Construct from an `AUTHORITY:CODE` string such as `"EPSG:4326"`.
    pub fn from_authority_code(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        match value.split_once(':') {
            Some((authority, code)) if !authority.is_empty() && !code.is_empty() => Ok(Self {
                crs: Some(Value::String(value)),
                crs_type: Some(CrsType::AuthorityCode),
            }),
            _ => Err(GeoTableError::General(format!(
                "expected AUTHORITY:CODE CRS, got {value:?}"
            ))),
        }
    }

    /// Construct from an EPSG code, e.g. `4326` for WGS 84 or `3857` for Web Mercator.
    pub fn from_epsg(code: u32) -> Self {
        Self {
            crs: Some(Value::String(format!("EPSG:{code}"))),
            crs_type: Some(CrsType::AuthorityCode),
        }
    }

    /// Construct from an opaque string identifier
    pub fn from_srid(value: String) -> Self {
        Self {
            crs: Some(Value::String(value)),
            crs_type: Some(CrsType::Srid),
        }
    }

    /// Access the underlying [CrsType].
    pub fn crs_type(&self) -> Option<CrsType> {
        self.crs_type
    }

    /// Access the underlying CRS value.
    ///
    /// Consult [`crs_type`][Self::crs_type] to accurately determine the CRS type.
    pub fn crs_value(&self) -> Option<&Value> {
        self.crs.as_ref()
    }

    /// `true` when nothing is known about this CRS.
    pub fn is_unknown(&self) -> bool {
        self.crs.is_none()
    }

    /// The `AUTHORITY:CODE` string, if this CRS was declared that way.
    pub fn authority_code(&self) -> Option<&str> {
        match (self.crs_type, &self.crs) {
            (Some(CrsType::AuthorityCode), Some(Value::String(s))) => Some(s),
            _ => None,
        }
    }

    /// Whether geometries declared under `self` and `other` can be measured against each other
    /// without a transform.
    ///
    /// An unknown CRS is compatible with anything.
    pub fn is_compatible(&self, other: &Crs) -> bool {
        self.is_unknown() || other.is_unknown() || self == other
    }

    /// Returns an [`IncompatibleCrs`][GeoTableError::IncompatibleCrs] error unless the two CRSs
    /// are compatible.
    pub fn check_compatible(&self, other: &Crs) -> Result<()> {
        if self.is_compatible(other) {
            Ok(())
        } else {
            Err(GeoTableError::IncompatibleCrs {
                left: self.clone(),
                right: other.clone(),
            })
        }
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.crs {
            None => write!(f, "unknown"),
            Some(Value::String(s)) => write!(f, "{s}"),
            Some(other) => write!(f, "{other}"),
        }
    }
}

/// An optional string disambiguating the value of the `crs` field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CrsType {
    /// Indicates that the `"crs"` field was written as
    /// [PROJJSON](https://proj.org/specifications/projjson.html).
    #[serde(rename = "projjson")]
    Projjson,

    /// Indicates that the `"crs"` field was written as
    /// [WKT2:2019](https://www.ogc.org/publications/standard/wkt-crs/).
    #[serde(rename = "wkt2:2019")]
    Wkt2_2019,

    /// Indicates that the `"crs"` field contains an identifier
    /// in the form `AUTHORITY:CODE`.
    #[serde(rename = "authority_code")]
    AuthorityCode,

    /// Indicates that the `"crs"` field contains an opaque identifier.
    #[serde(rename = "srid")]
    Srid,
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn crs_omitted() {
        let crs = Crs::default();
        assert!(crs.crs_value().is_none());
        assert!(crs.crs_type().is_none());
        assert!(crs.is_unknown());
        assert_eq!(crs.to_string(), "unknown");
    }

    #[test]
    fn crs_projjson() {
        let crs = Crs::from_projjson(json!({}));
        assert!(crs.crs_value().is_some_and(|x| x.is_object()));
        assert!(matches!(crs.crs_type(), Some(CrsType::Projjson)));
        assert_eq!(
            serde_json::to_string(&crs).unwrap(),
            r#"{"crs":{},"crs_type":"projjson"}"#
        );
    }

    #[test]
    fn crs_epsg() {
        let crs = Crs::from_epsg(4326);
        assert_eq!(crs.authority_code(), Some("EPSG:4326"));
        assert_eq!(crs, Crs::from_authority_code("EPSG:4326").unwrap());
        assert_eq!(
            serde_json::to_string(&crs).unwrap(),
            r#"{"crs":"EPSG:4326","crs_type":"authority_code"}"#
        );
    }

    #[test]
    fn crs_authority_code_requires_colon() {
        assert!(Crs::from_authority_code("4326").is_err());
        assert!(Crs::from_authority_code("EPSG:").is_err());
    }

    #[test]
    fn compatibility() {
        let wgs84 = Crs::from_epsg(4326);
        let mercator = Crs::from_epsg(3857);

        assert!(wgs84.is_compatible(&wgs84.clone()));
        assert!(wgs84.is_compatible(&Crs::unknown()));
        assert!(Crs::unknown().is_compatible(&mercator));
        assert!(!wgs84.is_compatible(&mercator));

        let err = wgs84.check_compatible(&mercator).unwrap_err();
        assert!(matches!(err, GeoTableError::IncompatibleCrs { .. }));
        assert_eq!(err.to_string(), "Incompatible CRS: EPSG:4326 and EPSG:3857");
    }

    #[test]
    fn crs_srid() {
        let crs = Crs::from_srid("1234".to_string());
        assert_eq!(crs.crs_value(), Some(&Value::String("1234".to_string())));
        assert!(crs.authority_code().is_none());
        assert_eq!(
            serde_json::to_string(&crs).unwrap(),
            r#"{"crs":"1234","crs_type":"srid"}"#
        );
    }
}
