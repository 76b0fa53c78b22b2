//! Overlays: the markers, circles and regions drawn on top of the base tiles.

use crate::error::{Error, Result};
use crate::geo::LatLng;
use crate::io::html::escape_html;
use crate::vector::Boundary;
use pinmap_style::{Color, PathStyle};

/// Width of the label box used for marker and circle popups.
pub const POPUP_LABEL_WIDTH_PX: u32 = 150;

/// Leaflet's default popup max width.
pub const POPUP_MAX_WIDTH_PX: u32 = 300;

/// Default circle radius in meters.
pub const DEFAULT_CIRCLE_RADIUS_M: f64 = 5000.0;

/// HTML shown when an overlay is clicked.
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub html: String,
    pub max_width: u32,
}

impl Popup {
    /// Raw HTML popup. The caller is responsible for escaping.
    pub fn html(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            max_width: POPUP_MAX_WIDTH_PX,
        }
    }

    /// Fixed-width label box holding escaped `text`.
    pub fn label(text: &str) -> Self {
        Self::html(format!(
            r#"<div style="width:{}px">{}</div>"#,
            POPUP_LABEL_WIDTH_PX,
            escape_html(text)
        ))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: LatLng,
    pub popup: Option<Popup>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub center: LatLng,
    /// Radius in meters.
    pub radius: f64,
    pub style: PathStyle,
    pub popup: Option<Popup>,
}

/// A GeoJSON document drawn as styled regions.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Layer name.
    pub name: String,
    pub boundary: Boundary,
    pub style: PathStyle,
    /// Feature properties listed in the popup table; empty means no popup.
    pub popup_fields: Vec<String>,
}

/// Anything attached to the map's scene.
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    Marker(Marker),
    Circle(Circle),
    Region(Region),
}

impl Overlay {
    pub fn kind(&self) -> &'static str {
        match self {
            Overlay::Marker(_) => "marker",
            Overlay::Circle(_) => "circle",
            Overlay::Region(_) => "region",
        }
    }
}

/// Options for drawing circles; anything not set keeps its default.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleOptions {
    /// Radius in meters.
    pub radius: f64,
    pub style: PathStyle,
}

impl CircleOptions {
    pub fn new() -> Self {
        Self {
            radius: DEFAULT_CIRCLE_RADIUS_M,
            style: PathStyle::circle_default(),
        }
    }

    /// Radius in meters; must be finite and positive.
    pub fn radius(mut self, meters: f64) -> Result<Self> {
        if !meters.is_finite() || meters <= 0.0 {
            return Err(Error::invalid("radius", meters, "radius must be a positive number of meters"));
        }
        self.radius = meters;
        Ok(self)
    }

    pub fn weight(mut self, weight: f64) -> Result<Self> {
        self.style = self.style.with_weight(weight)?;
        Ok(self)
    }

    pub fn color(mut self, color: &str) -> Result<Self> {
        self.style = self.style.with_color(Color::parse(color)?);
        Ok(self)
    }

    pub fn fill(mut self, fill: bool) -> Self {
        self.style = self.style.with_fill(fill);
        self
    }

    pub fn fill_color(mut self, color: &str) -> Result<Self> {
        self.style = self.style.with_fill_color(Color::parse(color)?);
        Ok(self)
    }

    pub fn fill_opacity(mut self, opacity: f64) -> Result<Self> {
        self.style = self.style.with_fill_opacity(opacity)?;
        Ok(self)
    }
}

impl Default for CircleOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Options for GeoJSON region overlays.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionOptions {
    /// Layer name; the file stem is used when unset.
    pub name: Option<String>,
    pub style: PathStyle,
    pub popup_fields: Vec<String>,
}

impl RegionOptions {
    pub fn new() -> Self {
        Self {
            name: None,
            style: PathStyle::region_default(),
            popup_fields: vec!["name".to_string()],
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn style(mut self, style: PathStyle) -> Self {
        self.style = style;
        self
    }

    pub fn popup_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.popup_fields = fields.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for RegionOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use approx::assert_relative_eq;

    #[test]
    fn label_is_fixed_width_and_escaped() {
        let p = Popup::label("A&B <x>");
        assert_eq!(p.html, r#"<div style="width:150px">A&amp;B &lt;x&gt;</div>"#);
        assert_eq!(p.max_width, 300);
    }

    #[test]
    fn circle_option_defaults() {
        let o = CircleOptions::default();
        assert_relative_eq!(o.radius, 5000.0);
        assert_eq!(o.style, PathStyle::circle_default());
    }

    #[test]
    fn circle_option_overrides_keep_other_defaults() {
        let o = CircleOptions::new()
            .radius(250.0)
            .unwrap()
            .fill_color("steelblue")
            .unwrap();
        assert_relative_eq!(o.radius, 250.0);
        assert_eq!(o.style.fill_color.as_css(), "steelblue");
        assert_eq!(o.style.color.as_css(), "brown");
        assert_relative_eq!(o.style.fill_opacity, 0.3);
    }

    #[test]
    fn circle_option_errors_are_invalid_arguments() {
        let e = CircleOptions::new().radius(-1.0).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::InvalidArgument);
        let e = CircleOptions::new().color("blurple").unwrap_err();
        assert_eq!(e.kind(), ErrorKind::InvalidArgument);
        let e = CircleOptions::new().fill_opacity(2.0).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn region_defaults_show_name() {
        let o = RegionOptions::default();
        assert_eq!(o.popup_fields, vec!["name".to_string()]);
        assert_eq!(o.style, PathStyle::region_default());
        assert!(o.name.is_none());
    }
}
