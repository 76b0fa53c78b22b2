//! Named locations read from CSV or JSON tables.

use crate::error::{Error, Result};
use crate::geo::LatLng;
use csv::{ReaderBuilder, Trim};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

const REQUIRED_COLUMNS: [&str; 3] = ["name", "lat", "lng"];

/// One row of a location table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub fn new(name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lng,
        }
    }

    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }

    fn validate(&self) -> Result<()> {
        if !self.lat.is_finite() {
            return Err(Error::invalid("lat", self.lat, "latitude must be finite"));
        }
        if !self.lng.is_finite() {
            return Err(Error::invalid("lng", self.lng, "longitude must be finite"));
        }
        Ok(())
    }
}

/// Ordered rows with `name`, `lat` and `lng` columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationTable {
    rows: Vec<Location>,
}

impl LocationTable {
    /// Build a table, rejecting rows with non-finite coordinates.
    pub fn new(rows: Vec<Location>) -> Result<Self> {
        rows.iter().try_for_each(Location::validate)?;
        Ok(Self { rows })
    }

    /// Read a CSV file with a header row.
    ///
    /// Columns may come in any order and extra columns are ignored.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_csv_reader(file)?;
        debug!("Read {} locations from {}", table.len(), path.display());
        Ok(table)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

        let headers = rdr.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(Error::MissingColumn(column));
            }
        }

        let rows = rdr
            .deserialize::<Location>()
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Self::new(rows)
    }

    /// Read a JSON array of `{"name", "lat", "lng"}` objects.
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let rows: Vec<Location> =
            serde_json::from_str(&text).map_err(|source| Error::MalformedLocations {
                path: path.to_path_buf(),
                source,
            })?;
        Self::new(rows)
    }

    /// Pick the reader from the file extension: `.json` or CSV otherwise.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_path(path)
        } else {
            Self::from_csv_path(path)
        }
    }

    pub fn push(&mut self, location: Location) -> Result<()> {
        location.validate()?;
        self.rows.push(location);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.rows.iter()
    }

    pub fn as_slice(&self) -> &[Location] {
        &self.rows
    }
}

impl<'a> IntoIterator for &'a LocationTable {
    type Item = &'a Location;
    type IntoIter = std::slice::Iter<'a, Location>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use approx::assert_relative_eq;

    #[test]
    fn reads_csv_with_extra_and_reordered_columns() {
        let data = "lng, name, lat, note\n127.0276946, Gangnam, 37.4979126, busy\n126.9708, Seoul Station, 37.5546, \n";
        let table = LocationTable::from_csv_reader(data.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        let first = &table.as_slice()[0];
        assert_eq!(first.name, "Gangnam");
        assert_relative_eq!(first.lat, 37.4979126);
        assert_relative_eq!(first.lng, 127.0276946);
    }

    #[test]
    fn missing_column_is_a_file_error() {
        let data = "name,lat\nA,1.0\n";
        let err = LocationTable::from_csv_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::MissingColumn("lng")));
        assert_eq!(err.kind(), ErrorKind::File);
    }

    #[test]
    fn non_numeric_coordinate_fails() {
        let data = "name,lat,lng\nA,north,1.0\n";
        let err = LocationTable::from_csv_reader(data.as_bytes()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::File);
    }

    #[test]
    fn non_finite_rows_rejected() {
        let err = LocationTable::new(vec![Location::new("x", f64::NAN, 0.0)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let mut table = LocationTable::default();
        assert!(table.push(Location::new("y", 1.0, f64::INFINITY)).is_err());
        assert!(table.is_empty());
    }
}
