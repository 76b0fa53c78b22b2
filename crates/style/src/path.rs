//! Stroke and fill options for vector overlays (circles, GeoJSON regions).

use crate::color::Color;
use crate::error::{Result, StyleError};
use serde::{Deserialize, Serialize};

/// Leaflet path options.
///
/// Serializes with Leaflet's option names (`fillColor`, `fillOpacity`) so the
/// value can be dropped straight into a layer constructor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub weight: f64,
    /// Whether the shape is filled.
    pub fill: bool,
    /// Fill color.
    pub fill_color: Color,
    /// Fill opacity in [0, 1].
    pub fill_opacity: f64,
}

impl PathStyle {
    /// Circle defaults: brown 3px stroke, coral fill at 0.3.
    pub fn circle_default() -> Self {
        Self {
            color: Color::named("brown"),
            weight: 3.0,
            fill: true,
            fill_color: Color::named("coral"),
            fill_opacity: 0.3,
        }
    }

    /// Region defaults: black 2px stroke, yellow fill at 0.15.
    pub fn region_default() -> Self {
        Self {
            color: Color::named("black"),
            weight: 2.0,
            fill: true,
            fill_color: Color::named("yellow"),
            fill_opacity: 0.15,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set the stroke width; must be finite and non-negative.
    pub fn with_weight(mut self, weight: f64) -> Result<Self> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(StyleError::InvalidWeight(weight));
        }
        self.weight = weight;
        Ok(self)
    }

    pub fn with_fill(mut self, fill: bool) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_fill_color(mut self, color: Color) -> Self {
        self.fill_color = color;
        self
    }

    /// Set the fill opacity; must lie in [0, 1].
    pub fn with_fill_opacity(mut self, opacity: f64) -> Result<Self> {
        check_opacity("fill_opacity", opacity)?;
        self.fill_opacity = opacity;
        Ok(self)
    }

    /// Re-check numeric fields, e.g. after deserializing a user config.
    pub fn validate(&self) -> Result<()> {
        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(StyleError::InvalidWeight(self.weight));
        }
        check_opacity("fill_opacity", self.fill_opacity)
    }
}

impl Default for PathStyle {
    fn default() -> Self {
        Self::circle_default()
    }
}

fn check_opacity(field: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(StyleError::InvalidOpacity { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn circle_defaults() {
        let s = PathStyle::circle_default();
        assert_eq!(s.color.as_css(), "brown");
        assert_relative_eq!(s.weight, 3.0);
        assert!(s.fill);
        assert_eq!(s.fill_color.as_css(), "coral");
        assert_relative_eq!(s.fill_opacity, 0.3);
    }

    #[test]
    fn region_defaults() {
        let s = PathStyle::region_default();
        assert_eq!(s.color.as_css(), "black");
        assert_relative_eq!(s.weight, 2.0);
        assert_eq!(s.fill_color.as_css(), "yellow");
        assert_relative_eq!(s.fill_opacity, 0.15);
    }

    #[test]
    fn opacity_out_of_range() {
        let err = PathStyle::default().with_fill_opacity(1.5).unwrap_err();
        assert_eq!(
            err,
            StyleError::InvalidOpacity {
                field: "fill_opacity",
                value: 1.5
            }
        );
        assert!(PathStyle::default().with_fill_opacity(f64::NAN).is_err());
    }

    #[test]
    fn negative_weight() {
        assert!(PathStyle::default().with_weight(-1.0).is_err());
        assert!(PathStyle::default().with_weight(f64::INFINITY).is_err());
        assert!(PathStyle::default().with_weight(0.0).is_ok());
    }

    #[test]
    fn serializes_leaflet_names() {
        let json = serde_json::to_value(PathStyle::region_default()).unwrap();
        assert_eq!(json["color"], "black");
        assert_eq!(json["fillColor"], "yellow");
        assert_eq!(json["fillOpacity"], 0.15);
        assert_eq!(json["weight"], 2.0);
        assert_eq!(json["fill"], true);
    }

    #[test]
    fn validate_catches_bad_deserialized_values() {
        let s: PathStyle = serde_json::from_str(
            r#"{"color":"red","weight":1,"fill":true,"fillColor":"blue","fillOpacity":3}"#,
        )
        .unwrap();
        assert!(s.validate().is_err());
    }
}
