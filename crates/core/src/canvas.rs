//! `MapCanvas`: one owned map plus typed setters and drawing helpers.

use crate::display::{detect_frontend, Frontend, INLINE_HEIGHT_PX, UNSUPPORTED_NOTICE};
use crate::error::Result;
use crate::geo::{LatLng, Scalar, ZoomLevel, DEFAULT_ZOOM};
use crate::io::html::{iframe, render_html, save_html, write_html};
use crate::io::LocationTable;
use crate::map::{
    Circle, CircleOptions, Map, MapInfo, Marker, Overlay, Popup, Region, RegionOptions,
};
use crate::vector::Boundary;
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, info, warn};

/// Owns a [`Map`] and forwards edits onto it.
///
/// Mutating methods take `&mut self`; a canvas is meant to be driven from a
/// single place.
#[derive(Debug, Clone)]
pub struct MapCanvas {
    map: Map,
}

impl MapCanvas {
    /// New canvas centred on `center` at the default zoom (12).
    pub fn new(center: impl Into<LatLng>) -> Self {
        Self::with_zoom(center, DEFAULT_ZOOM)
    }

    /// New canvas with an explicit zoom, clamped to the valid range.
    pub fn with_zoom(center: impl Into<LatLng>, zoom: u8) -> Self {
        Self {
            map: Map::new(center.into(), ZoomLevel::from(zoom)),
        }
    }

    /// Wrap an existing map.
    pub fn from_map(map: Map) -> Self {
        Self { map }
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut Map {
        &mut self.map
    }

    /// Move the center. Both values must be numeric.
    pub fn set_center<A: Scalar, B: Scalar>(&mut self, lat: A, lng: B) -> Result<()> {
        let center = LatLng::try_new(lat, lng)?;
        self.map.set_center(center);
        debug!("Center set to {}", center);
        Ok(())
    }

    /// Change the zoom. Must be integer-valued; clamped to 1..=18.
    pub fn set_zoom_scale<Z: Scalar>(&mut self, zoom: Z) -> Result<()> {
        let level = ZoomLevel::from_scalar(zoom)?;
        self.map.options_mut().zoom = level;
        debug!("Zoom set to {}", level);
        Ok(())
    }

    /// Current center and options.
    pub fn map_info(&self) -> MapInfo {
        self.map.info()
    }

    pub fn overlays(&self) -> &[Overlay] {
        self.map.overlays()
    }

    pub fn overlay_count(&self) -> usize {
        self.map.overlays().len()
    }

    /// One marker per location, each with a name label popup.
    pub fn make_marker(&mut self, locations: &LocationTable) {
        for loc in locations {
            self.map.add_overlay(Overlay::Marker(Marker {
                position: loc.position(),
                popup: Some(Popup::label(&loc.name)),
            }));
        }
        debug!("Added {} markers", locations.len());
    }

    /// Load a GeoJSON file and draw it with the default region style and a
    /// `name` popup.
    pub fn make_bound<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.make_bound_with(path, RegionOptions::default())
    }

    pub fn make_bound_with<P: AsRef<Path>>(
        &mut self,
        path: P,
        options: RegionOptions,
    ) -> Result<()> {
        let boundary = Boundary::from_path(path)?;
        self.add_boundary(boundary, options);
        Ok(())
    }

    /// Draw an already loaded boundary.
    pub fn add_boundary(&mut self, boundary: Boundary, options: RegionOptions) {
        let name = options.name.unwrap_or_else(|| boundary.default_name());
        debug!(
            "Added boundary {:?} ({} features)",
            name,
            boundary.feature_count()
        );
        self.map.add_overlay(Overlay::Region(Region {
            name,
            boundary,
            style: options.style,
            popup_fields: options.popup_fields,
        }));
    }

    /// One circle per location, all sharing `options`.
    pub fn make_circle(&mut self, locations: &LocationTable, options: &CircleOptions) {
        for loc in locations {
            self.map.add_overlay(Overlay::Circle(Circle {
                center: loc.position(),
                radius: options.radius,
                style: options.style.clone(),
                popup: Some(Popup::label(&loc.name)),
            }));
        }
        debug!(
            "Added {} circles (radius {} m)",
            locations.len(),
            options.radius
        );
    }

    /// Start over with an empty map at the current center and options.
    pub fn clear(&mut self) {
        let dropped = self.overlay_count();
        self.map = Map::with_options(self.map.center(), self.map.options().clone());
        info!("Cleared map ({} overlays removed)", dropped);
    }

    /// Show the map in the current front-end, or print a notice to stdout
    /// when there is none.
    pub fn display(&self) -> Result<()> {
        let mut frontend = detect_frontend();
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.display_with(
            frontend.as_mut().map(|f| f as &mut dyn Frontend),
            &mut out,
        )
    }

    /// [`display`](Self::display) with an explicit front-end and notice sink.
    ///
    /// A front-end that fails to take the page gets the same notice as no
    /// front-end at all.
    pub fn display_with(
        &self,
        frontend: Option<&mut dyn Frontend>,
        out: &mut dyn Write,
    ) -> Result<()> {
        if let Some(fe) = frontend {
            let page = render_html(&self.map)?;
            match fe.show_html(&iframe(&page, INLINE_HEIGHT_PX)) {
                Ok(()) => {
                    debug!("Displayed map via {}", fe.name());
                    return Ok(());
                }
                Err(e) => warn!("{} front-end failed: {}", fe.name(), e),
            }
        } else {
            warn!("No interactive front-end; map not displayed");
        }
        for line in UNSUPPORTED_NOTICE {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }

    /// Write the map and all overlays to an HTML file at `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        save_html(&self.map, path)
    }

    /// Write the map into a stream the caller keeps ownership of.
    pub fn write_html<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        write_html(&self.map, out)
    }

    /// The rendered page as a string.
    pub fn to_html(&self) -> Result<String> {
        render_html(&self.map)
    }
}
