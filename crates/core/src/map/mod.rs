//! The map scene: center, options and overlays.

mod options;
mod overlay;

pub use options::{MapOptions, TileProvider};
pub use overlay::{
    Circle, CircleOptions, Marker, Overlay, Popup, Region, RegionOptions,
    DEFAULT_CIRCLE_RADIUS_M, POPUP_LABEL_WIDTH_PX, POPUP_MAX_WIDTH_PX,
};

use crate::geo::{LatLng, ZoomLevel};
use serde::{Deserialize, Serialize};

/// A web map: where it looks, how it behaves, and what is drawn on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Map {
    center: LatLng,
    options: MapOptions,
    overlays: Vec<Overlay>,
}

impl Map {
    /// Empty map at `center` with default options and the given zoom.
    pub fn new(center: LatLng, zoom: ZoomLevel) -> Self {
        Self::with_options(center, MapOptions::new(zoom))
    }

    pub fn with_options(center: LatLng, options: MapOptions) -> Self {
        Self {
            center,
            options,
            overlays: Vec::new(),
        }
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn set_center(&mut self, center: LatLng) {
        self.center = center;
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut MapOptions {
        &mut self.options
    }

    pub fn zoom(&self) -> ZoomLevel {
        self.options.zoom
    }

    pub fn add_overlay(&mut self, overlay: Overlay) {
        self.overlays.push(overlay);
    }

    /// Overlays in drawing order.
    pub fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }

    pub fn info(&self) -> MapInfo {
        MapInfo {
            center: self.center,
            options: self.options.clone(),
        }
    }
}

/// Snapshot of a map's view state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapInfo {
    pub center: LatLng,
    pub options: MapOptions,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn info_snapshot_serializes() {
        let map = Map::new(LatLng::new(37.55, 126.98), ZoomLevel::clamped(12));
        let v = serde_json::to_value(map.info()).unwrap();
        assert_eq!(v["center"], json!([37.55, 126.98]));
        assert_eq!(v["options"]["zoom"], 12);
    }

    #[test]
    fn overlays_keep_insertion_order() {
        let mut map = Map::new(LatLng::new(0.0, 0.0), ZoomLevel::default());
        for i in 0..3 {
            map.add_overlay(Overlay::Marker(Marker {
                position: LatLng::new(i as f64, 0.0),
                popup: None,
            }));
        }
        let lats: Vec<f64> = map
            .overlays()
            .iter()
            .map(|o| match o {
                Overlay::Marker(m) => m.position.lat,
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(lats, vec![0.0, 1.0, 2.0]);
    }
}
