//! Scene description: what to draw, merged from a JSON config and CLI flags.

use anyhow::{bail, Context, Result};
use pinmap_core::prelude::*;
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Circle style overrides; unset fields keep the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CircleConfig {
    pub radius: Option<f64>,
    pub weight: Option<f64>,
    pub color: Option<String>,
    pub fill: Option<bool>,
    pub fill_color: Option<String>,
    pub fill_opacity: Option<f64>,
}

impl CircleConfig {
    /// Later values win.
    pub fn merge(&mut self, other: CircleConfig) {
        self.radius = other.radius.or(self.radius);
        self.weight = other.weight.or(self.weight);
        self.color = other.color.or(self.color.take());
        self.fill = other.fill.or(self.fill);
        self.fill_color = other.fill_color.or(self.fill_color.take());
        self.fill_opacity = other.fill_opacity.or(self.fill_opacity);
    }

    pub fn to_options(&self) -> Result<CircleOptions> {
        let mut opts = CircleOptions::new();
        if let Some(r) = self.radius {
            opts = opts.radius(r)?;
        }
        if let Some(w) = self.weight {
            opts = opts.weight(w)?;
        }
        if let Some(c) = &self.color {
            opts = opts.color(c)?;
        }
        if let Some(f) = self.fill {
            opts = opts.fill(f);
        }
        if let Some(c) = &self.fill_color {
            opts = opts.fill_color(c)?;
        }
        if let Some(o) = self.fill_opacity {
            opts = opts.fill_opacity(o)?;
        }
        Ok(opts)
    }
}

/// Everything needed to build one map.
///
/// Center and zoom stay loosely typed so bad values are rejected by the
/// canvas setters with the same errors a library caller would see.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    pub center: Option<(Value, Value)>,
    pub zoom: Option<Value>,
    pub tiles: Option<String>,
    pub control_scale: Option<bool>,
    pub markers: Vec<PathBuf>,
    pub circles: Vec<PathBuf>,
    pub bounds: Vec<PathBuf>,
    pub circle: CircleConfig,
}

impl SceneConfig {
    /// Load a JSON config. Relative input paths are resolved against the
    /// config file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let mut scene: SceneConfig = serde_json::from_str(&text)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        if let Some(base) = path.parent() {
            scene.resolve_paths(base);
        }
        Ok(scene)
    }

    fn resolve_paths(&mut self, base: &Path) {
        for p in self
            .markers
            .iter_mut()
            .chain(self.circles.iter_mut())
            .chain(self.bounds.iter_mut())
        {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        }
    }

    /// Overlay `other` on top of `self`: scalars replace, input lists append.
    pub fn merge(&mut self, other: SceneConfig) {
        if other.center.is_some() {
            self.center = other.center;
        }
        if other.zoom.is_some() {
            self.zoom = other.zoom;
        }
        if other.tiles.is_some() {
            self.tiles = other.tiles;
        }
        if other.control_scale.is_some() {
            self.control_scale = other.control_scale;
        }
        self.markers.extend(other.markers);
        self.circles.extend(other.circles);
        self.bounds.extend(other.bounds);
        self.circle.merge(other.circle);
    }

    /// Build the canvas and draw every input onto it.
    pub fn build(&self, mut read: impl FnMut(&Path) -> Result<LocationTable>) -> Result<MapCanvas> {
        let Some((lat, lng)) = &self.center else {
            bail!("No map center given; pass --center LAT,LNG or set \"center\" in the config");
        };
        let mut canvas = MapCanvas::new((0.0, 0.0));
        canvas.set_center(lat, lng).context("Invalid center")?;
        if let Some(zoom) = &self.zoom {
            canvas.set_zoom_scale(zoom).context("Invalid zoom")?;
        }
        if let Some(tiles) = &self.tiles {
            canvas.map_mut().options_mut().tiles = tiles.parse()?;
        }
        if let Some(on) = self.control_scale {
            canvas.map_mut().options_mut().control_scale = on;
        }

        for path in &self.markers {
            let table = read(path)?;
            canvas.make_marker(&table);
        }
        if !self.circles.is_empty() {
            let opts = self.circle.to_options().context("Invalid circle style")?;
            for path in &self.circles {
                let table = read(path)?;
                canvas.make_circle(&table, &opts);
            }
        }
        for path in &self.bounds {
            canvas
                .make_bound(path)
                .with_context(|| format!("Failed to load boundary {}", path.display()))?;
        }
        Ok(canvas)
    }
}

/// Parse `LAT,LNG` without interpreting the numbers; the canvas validates them.
pub fn split_center(text: &str) -> Result<(Value, Value)> {
    match text.split_once(',') {
        Some((lat, lng)) => Ok((
            Value::String(lat.trim().to_string()),
            Value::String(lng.trim().to_string()),
        )),
        None => bail!("Center must be 'LAT,LNG', got: {}", text),
    }
}
