//! Error types for pinmap

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for pinmap operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid argument: {name} = {value} ({reason})")]
    InvalidArgument {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid style: {0}")]
    Style(#[from] pinmap_style::StyleError),

    #[error("Cannot read {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed GeoJSON in {}: {source}", .path.display())]
    MalformedGeoJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid GeoJSON: {0}")]
    InvalidGeoJson(String),

    #[error("Location table is missing column {0:?}")]
    MissingColumn(&'static str),

    #[error("Location table: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed location list in {}: {source}", .path.display())]
    MalformedLocations {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification of [`Error`], for callers that only need to know
/// which side of the API boundary was at fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A caller-supplied value was rejected.
    InvalidArgument,
    /// An input file was missing, unreadable or malformed.
    File,
    /// Writing output failed.
    Io,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidArgument { .. } | Error::Style(_) => ErrorKind::InvalidArgument,
            Error::FileRead { .. }
            | Error::MalformedGeoJson { .. }
            | Error::InvalidGeoJson(_)
            | Error::MissingColumn(_)
            | Error::Csv(_)
            | Error::MalformedLocations { .. } => ErrorKind::File,
            Error::Io(_) | Error::Json(_) => ErrorKind::Io,
        }
    }

    pub(crate) fn invalid(name: &'static str, value: impl std::fmt::Debug, reason: &str) -> Self {
        Error::InvalidArgument {
            name,
            value: format!("{:?}", value),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for pinmap operations
pub type Result<T> = std::result::Result<T, Error>;
