//! Standalone Leaflet HTML export.
//!
//! The page loads Leaflet from a CDN and rebuilds the scene in one inline
//! script: map, base tiles, then every overlay in insertion order. Variable
//! names are numbered per overlay so the same map always produces the same
//! bytes.

use crate::error::Result;
use crate::map::{Circle, Map, Marker, Overlay, Popup, Region};
use serde::Serialize;
use serde_json::json;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

const LEAFLET_JS: &str = "https://cdn.jsdelivr.net/npm/leaflet@1.9.3/dist/leaflet.js";
const LEAFLET_CSS: &str = "https://cdn.jsdelivr.net/npm/leaflet@1.9.3/dist/leaflet.css";

/// Popup helper for GeoJSON layers: one table row per requested property.
const FIELD_TABLE_JS: &str = r#"    function pinmapEscape(value) {
        return String(value)
            .replace(/&/g, "&amp;")
            .replace(/</g, "&lt;")
            .replace(/>/g, "&gt;")
            .replace(/"/g, "&quot;")
            .replace(/'/g, "&#39;");
    }
    function pinmapFieldTable(feature, fields) {
        var props = (feature && feature.properties) || {};
        var rows = fields
            .filter(function (f) { return Object.prototype.hasOwnProperty.call(props, f); })
            .map(function (f) {
                return "<tr><th>" + pinmapEscape(f) + "</th><td>" + pinmapEscape(props[f]) + "</td></tr>";
            });
        return "<table>" + rows.join("") + "</table>";
    }
"#;

/// Escape text for use in HTML content or a double-quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// JSON literal safe to embed inside a `<script>` block.
///
/// `<`, `>` and `&` only occur inside JSON strings, where the `\uXXXX` forms
/// decode to the same text but cannot open or close markup.
fn js_literal<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026"))
}

/// Render `map` as a complete HTML document.
pub fn render_html(map: &Map) -> Result<String> {
    let opts = map.options();
    let map_options = json!({
        "center": map.center(),
        "zoom": opts.zoom,
        "minZoom": opts.min_zoom,
        "maxZoom": opts.max_zoom,
        "zoomControl": opts.zoom_control,
        "preferCanvas": opts.prefer_canvas,
    });
    let tile_options = json!({
        "attribution": opts.tiles.attribution(),
        "minZoom": opts.min_zoom,
        "maxZoom": opts.max_zoom,
    });

    let mut script = String::new();
    let has_regions = map
        .overlays()
        .iter()
        .any(|o| matches!(o, Overlay::Region(_)));
    if has_regions {
        script.push_str(FIELD_TABLE_JS);
    }
    script.push_str(&format!(
        "    var map = L.map(\"map\", {});\n",
        js_literal(&map_options)?
    ));
    script.push_str(&format!(
        "    L.tileLayer({}, {}).addTo(map);\n",
        js_literal(opts.tiles.url_template())?,
        js_literal(&tile_options)?
    ));
    if opts.control_scale {
        script.push_str("    L.control.scale().addTo(map);\n");
    }

    for (idx, overlay) in map.overlays().iter().enumerate() {
        let stmt = match overlay {
            Overlay::Marker(m) => marker_js(idx, m)?,
            Overlay::Circle(c) => circle_js(idx, c)?,
            Overlay::Region(r) => region_js(idx, r)?,
        };
        script.push_str(&stmt);
    }

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0, maximum-scale=1.0, user-scalable=no" />
    <link rel="stylesheet" href="{css}" />
    <script src="{js}"></script>
    <style>
        html, body {{ width: 100%; height: 100%; margin: 0; padding: 0; }}
        #map {{ position: absolute; top: 0; bottom: 0; right: 0; left: 0; }}
    </style>
</head>
<body>
    <div id="map"></div>
<script>
{script}</script>
</body>
</html>
"#,
        css = LEAFLET_CSS,
        js = LEAFLET_JS,
        script = script,
    ))
}

fn popup_js(var: &str, popup: &Popup) -> Result<String> {
    Ok(format!(
        "    {var}.bindPopup(L.popup({{\"maxWidth\": {}}}).setContent({}));\n",
        popup.max_width,
        js_literal(&popup.html)?
    ))
}

fn marker_js(idx: usize, marker: &Marker) -> Result<String> {
    let var = format!("marker_{idx}");
    let mut out = format!(
        "    var {var} = L.marker({}, {{}}).addTo(map);\n",
        js_literal(&marker.position)?
    );
    if let Some(popup) = &marker.popup {
        out.push_str(&popup_js(&var, popup)?);
    }
    Ok(out)
}

fn circle_js(idx: usize, circle: &Circle) -> Result<String> {
    let var = format!("circle_{idx}");
    let mut options = serde_json::to_value(&circle.style)?;
    if let Some(obj) = options.as_object_mut() {
        obj.insert("radius".to_string(), json!(circle.radius));
    }
    let mut out = format!(
        "    var {var} = L.circle({}, {}).addTo(map);\n",
        js_literal(&circle.center)?,
        js_literal(&options)?
    );
    if let Some(popup) = &circle.popup {
        out.push_str(&popup_js(&var, popup)?);
    }
    Ok(out)
}

fn region_js(idx: usize, region: &Region) -> Result<String> {
    let var = format!("geo_json_{idx}");
    let on_each = if region.popup_fields.is_empty() {
        String::new()
    } else {
        format!(
            ",\n        \"onEachFeature\": function (feature, layer) {{ layer.bindPopup(pinmapFieldTable(feature, {})); }}",
            js_literal(&region.popup_fields)?
        )
    };
    Ok(format!(
        "    var {var} = L.geoJson({data}, {{\n        \"style\": function (feature) {{ return {style}; }}{on_each}\n    }}).addTo(map);\n",
        data = js_literal(region.boundary.document())?,
        style = js_literal(&region.style)?,
    ))
}

/// Write the rendered page into a caller-owned stream, which stays open.
pub fn write_html<W: Write + ?Sized>(map: &Map, out: &mut W) -> Result<()> {
    out.write_all(render_html(map)?.as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Write the rendered page to `path`, creating or truncating the file.
pub fn save_html<P: AsRef<Path>>(map: &Map, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_html(map, &mut writer)?;
    info!(
        "Saved map with {} overlays to {}",
        map.overlays().len(),
        path.display()
    );
    Ok(())
}

/// Wrap a full page in an `<iframe srcdoc>` so it can sit inside another
/// document (notebook output cells).
pub fn iframe(page: &str, height_px: u32) -> String {
    format!(
        r#"<iframe srcdoc="{}" style="width:100%; height:{}px; border:none;"></iframe>"#,
        escape_html(page),
        height_px
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{LatLng, ZoomLevel};
    use crate::map::{CircleOptions, RegionOptions};
    use crate::vector::Boundary;

    fn seoul() -> Map {
        Map::new(LatLng::new(37.55, 126.98), ZoomLevel::clamped(12))
    }

    #[test]
    fn escapes_html_specials() {
        assert_eq!(escape_html(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
    }

    #[test]
    fn empty_map_page() {
        let html = render_html(&seoul()).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(LEAFLET_JS));
        assert!(html.contains("L.map(\"map\""));
        assert!(html.contains("\"center\":[37.55,126.98]"));
        assert!(html.contains("\"zoom\":12"));
        assert!(html.contains("tile.openstreetmap.org"));
        assert!(!html.contains("pinmapFieldTable"));
    }

    #[test]
    fn one_constructor_per_overlay() {
        let mut map = seoul();
        map.add_overlay(Overlay::Marker(Marker {
            position: LatLng::new(37.4979, 127.0277),
            popup: Some(Popup::label("Gangnam")),
        }));
        let opts = CircleOptions::default();
        map.add_overlay(Overlay::Circle(Circle {
            center: LatLng::new(37.5546, 126.9708),
            radius: opts.radius,
            style: opts.style,
            popup: None,
        }));
        let region = RegionOptions::default();
        map.add_overlay(Overlay::Region(Region {
            name: "seoul".into(),
            boundary: Boundary::from_value(json!({"type": "FeatureCollection", "features": []}))
                .unwrap(),
            style: region.style,
            popup_fields: region.popup_fields,
        }));

        let html = render_html(&map).unwrap();
        assert_eq!(html.matches("L.marker(").count(), 1);
        assert_eq!(html.matches("L.circle(").count(), 1);
        assert_eq!(html.matches("L.geoJson(").count(), 1);
        assert!(html.contains("var marker_0"));
        assert!(html.contains("var circle_1"));
        assert!(html.contains("var geo_json_2"));
        assert!(html.contains("\"radius\":5000.0"));
        assert!(html.contains("\"fillColor\":\"coral\""));
        assert!(html.contains("\"fillColor\":\"yellow\""));
        assert!(html.contains("pinmapFieldTable(feature, [\"name\"])"));
        assert!(html.contains("width:150px"));
    }

    #[test]
    fn script_cannot_be_closed_from_data() {
        let mut map = seoul();
        map.add_overlay(Overlay::Marker(Marker {
            position: LatLng::new(0.0, 0.0),
            popup: Some(Popup::html("</script><b>x</b>")),
        }));
        let html = render_html(&map).unwrap();
        assert_eq!(html.matches("</script>").count(), 2);
    }

    #[test]
    fn comment_openers_stay_escaped() {
        let mut map = seoul();
        map.add_overlay(Overlay::Marker(Marker {
            position: LatLng::new(0.0, 0.0),
            popup: Some(Popup::html("<!--<script>")),
        }));
        let boundary = Boundary::from_value(json!({
            "type": "Feature",
            "properties": {"name": "<!--<script>"},
            "geometry": null
        }))
        .unwrap();
        map.add_overlay(Overlay::Region(Region {
            name: "x".into(),
            boundary,
            style: RegionOptions::default().style,
            popup_fields: RegionOptions::default().popup_fields,
        }));
        let html = render_html(&map).unwrap();
        assert!(!html.contains("<!--"));
        assert!(html.contains(r#"setContent("\u003c!--\u003cscript\u003e")"#));
        assert_eq!(html.matches("<script").count(), 2);
    }

    #[test]
    fn render_is_deterministic() {
        let mut map = seoul();
        map.add_overlay(Overlay::Marker(Marker {
            position: LatLng::new(1.0, 2.0),
            popup: None,
        }));
        assert_eq!(render_html(&map).unwrap(), render_html(&map).unwrap());
    }

    #[test]
    fn iframe_escapes_page() {
        let frame = iframe("<p class=\"x\">hi</p>", 400);
        assert!(frame.starts_with("<iframe srcdoc=\"&lt;p class=&quot;x&quot;&gt;"));
        assert!(frame.contains("height:400px"));
    }
}
