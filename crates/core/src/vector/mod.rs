//! GeoJSON boundary documents.
//!
//! Boundaries are kept verbatim: the document is parsed only far enough to
//! know it is a JSON object, then handed to Leaflet unchanged.

use crate::error::{Error, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A GeoJSON document loaded for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    document: Value,
    source: Option<PathBuf>,
}

impl Boundary {
    /// Read and parse a GeoJSON file (UTF-8).
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let document: Value =
            serde_json::from_str(&text).map_err(|source| Error::MalformedGeoJson {
                path: path.to_path_buf(),
                source,
            })?;
        let mut boundary = Self::from_value(document)?;
        boundary.source = Some(path.to_path_buf());
        debug!(
            "Loaded boundary {} ({} features)",
            path.display(),
            boundary.feature_count()
        );
        Ok(boundary)
    }

    /// Wrap an already parsed document. Any GeoJSON object is a JSON object,
    /// so arrays and scalars are rejected.
    pub fn from_value(document: Value) -> Result<Self> {
        if !document.is_object() {
            return Err(Error::InvalidGeoJson(format!(
                "expected a JSON object, got {}",
                json_type_name(&document)
            )));
        }
        Ok(Self {
            document,
            source: None,
        })
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    /// File the document was read from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Layer name derived from the source file stem.
    pub fn default_name(&self) -> String {
        self.source
            .as_deref()
            .and_then(Path::file_stem)
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "boundary".to_string())
    }

    /// Number of features: a collection's length, 1 for a lone feature or
    /// geometry.
    pub fn feature_count(&self) -> usize {
        match self.document.get("type").and_then(Value::as_str) {
            Some("FeatureCollection") => self
                .document
                .get("features")
                .and_then(Value::as_array)
                .map_or(0, Vec::len),
            Some(_) => 1,
            None => 0,
        }
    }

    /// Values of property `field` across all features, stringified.
    pub fn property_values(&self, field: &str) -> Vec<String> {
        self.features()
            .filter_map(|f| f.get("properties")?.get(field))
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect()
    }

    fn features(&self) -> Box<dyn Iterator<Item = &Value> + '_> {
        match self.document.get("type").and_then(Value::as_str) {
            Some("FeatureCollection") => Box::new(
                self.document
                    .get("features")
                    .and_then(Value::as_array)
                    .into_iter()
                    .flatten(),
            ),
            Some("Feature") => Box::new(std::iter::once(&self.document)),
            _ => Box::new(std::iter::empty()),
        }
    }
}

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    fn districts() -> Value {
        json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"name": "Jongno-gu"},
                 "geometry": {"type": "Point", "coordinates": [126.98, 37.57]}},
                {"type": "Feature", "properties": {"name": "Jung-gu", "code": 11140},
                 "geometry": {"type": "Point", "coordinates": [126.99, 37.56]}}
            ]
        })
    }

    #[test]
    fn counts_features() {
        let b = Boundary::from_value(districts()).unwrap();
        assert_eq!(b.feature_count(), 2);
        let single = Boundary::from_value(json!({"type": "Feature", "properties": {}})).unwrap();
        assert_eq!(single.feature_count(), 1);
    }

    #[test]
    fn property_values() {
        let b = Boundary::from_value(districts()).unwrap();
        assert_eq!(b.property_values("name"), vec!["Jongno-gu", "Jung-gu"]);
        assert_eq!(b.property_values("code"), vec!["11140"]);
    }

    #[test]
    fn rejects_non_objects() {
        let err = Boundary::from_value(json!([1, 2])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::File);
    }

    #[test]
    fn default_name_without_source() {
        let b = Boundary::from_value(districts()).unwrap();
        assert_eq!(b.default_name(), "boundary");
        assert!(b.source().is_none());
    }
}
