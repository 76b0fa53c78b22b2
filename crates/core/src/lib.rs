//! # pinmap core
//!
//! Compose Leaflet web maps from Rust.
//!
//! This crate provides:
//! - `MapCanvas`: one owned map with typed setters and drawing helpers
//! - `Map`: the scene itself (center, options, overlays)
//! - `LocationTable`: named points read from CSV or JSON
//! - `Boundary`: GeoJSON documents drawn as styled regions
//! - HTML export and inline display in notebook front-ends
//!
//! ## Usage
//!
//! ```ignore
//! use pinmap_core::prelude::*;
//!
//! let mut canvas = MapCanvas::new((37.55, 126.98));
//! canvas.make_marker(&LocationTable::from_csv_path("stations.csv")?);
//! canvas.make_bound("seoul.geojson")?;
//! canvas.set_zoom_scale(11)?;
//! canvas.save("seoul.html")?;
//! ```

pub mod canvas;
pub mod display;
pub mod error;
pub mod geo;
pub mod io;
pub mod map;
pub mod vector;

pub use canvas::MapCanvas;
pub use error::{Error, ErrorKind, Result};
pub use geo::{LatLng, Scalar, ZoomLevel};
pub use map::{Map, MapInfo, MapOptions};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::canvas::MapCanvas;
    pub use crate::error::{Error, ErrorKind, Result};
    pub use crate::geo::{LatLng, ZoomLevel};
    pub use crate::io::{Location, LocationTable};
    pub use crate::map::{CircleOptions, MapInfo, MapOptions, RegionOptions, TileProvider};
    pub use crate::vector::Boundary;
    pub use pinmap_style::{Color, PathStyle};
}
