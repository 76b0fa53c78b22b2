//! Map-level options and base tile providers.

use crate::error::{Error, Result};
use crate::geo::{ZoomLevel, MAX_ZOOM, MIN_ZOOM};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Base layer the map draws underneath its overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileProvider {
    #[default]
    #[serde(rename = "OpenStreetMap")]
    OpenStreetMap,
    #[serde(rename = "CartoDB positron")]
    CartoDbPositron,
    #[serde(rename = "CartoDB dark_matter")]
    CartoDbDarkMatter,
}

impl TileProvider {
    pub const ALL: &[TileProvider] = &[
        Self::OpenStreetMap,
        Self::CartoDbPositron,
        Self::CartoDbDarkMatter,
    ];

    /// Human-readable name, also accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenStreetMap => "OpenStreetMap",
            Self::CartoDbPositron => "CartoDB positron",
            Self::CartoDbDarkMatter => "CartoDB dark_matter",
        }
    }

    /// Leaflet URL template.
    pub fn url_template(&self) -> &'static str {
        match self {
            Self::OpenStreetMap => "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
            Self::CartoDbPositron => {
                "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png"
            }
            Self::CartoDbDarkMatter => {
                "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png"
            }
        }
    }

    pub fn attribution(&self) -> &'static str {
        match self {
            Self::OpenStreetMap => {
                "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"
            }
            Self::CartoDbPositron | Self::CartoDbDarkMatter => {
                "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors &copy; <a href=\"https://carto.com/attributions\">CARTO</a>"
            }
        }
    }
}

impl fmt::Display for TileProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TileProvider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "openstreetmap" | "osm" => Ok(Self::OpenStreetMap),
            "cartodbpositron" | "positron" => Ok(Self::CartoDbPositron),
            "cartodbdarkmatter" | "darkmatter" => Ok(Self::CartoDbDarkMatter),
            _ => Err(Error::invalid(
                "tiles",
                s,
                "expected OpenStreetMap, CartoDB positron or CartoDB dark_matter",
            )),
        }
    }
}

/// Mutable map options, named as Leaflet names them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapOptions {
    /// Current zoom level.
    pub zoom: ZoomLevel,
    pub min_zoom: u8,
    pub max_zoom: u8,
    /// Show the +/- zoom buttons.
    pub zoom_control: bool,
    /// Draw vector overlays on a canvas instead of SVG.
    pub prefer_canvas: bool,
    /// Show a scale bar in the bottom-left corner.
    pub control_scale: bool,
    pub tiles: TileProvider,
}

impl MapOptions {
    pub fn new(zoom: ZoomLevel) -> Self {
        Self {
            zoom,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_control: true,
            prefer_canvas: false,
            control_scale: false,
            tiles: TileProvider::default(),
        }
    }

    pub fn with_tiles(mut self, tiles: TileProvider) -> Self {
        self.tiles = tiles;
        self
    }

    pub fn with_control_scale(mut self, on: bool) -> Self {
        self.control_scale = on;
        self
    }
}

impl Default for MapOptions {
    fn default() -> Self {
        Self::new(ZoomLevel::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let o = MapOptions::default();
        assert_eq!(o.zoom.get(), 12);
        assert_eq!(o.min_zoom, 1);
        assert_eq!(o.max_zoom, 18);
        assert!(o.zoom_control);
        assert_eq!(o.tiles, TileProvider::OpenStreetMap);
    }

    #[test]
    fn camel_case_keys() {
        let v = serde_json::to_value(MapOptions::default()).unwrap();
        assert_eq!(v["zoom"], 12);
        assert_eq!(v["zoomControl"], true);
        assert_eq!(v["preferCanvas"], false);
        assert_eq!(v["tiles"], "OpenStreetMap");
    }

    #[test]
    fn tile_names_parse() {
        assert_eq!("osm".parse::<TileProvider>().unwrap(), TileProvider::OpenStreetMap);
        assert_eq!(
            "CartoDB positron".parse::<TileProvider>().unwrap(),
            TileProvider::CartoDbPositron
        );
        assert_eq!(
            "cartodb_dark_matter".parse::<TileProvider>().unwrap(),
            TileProvider::CartoDbDarkMatter
        );
        assert!("stamen".parse::<TileProvider>().is_err());
        for t in TileProvider::ALL {
            assert_eq!(t.name().parse::<TileProvider>().unwrap(), *t);
        }
    }
}
