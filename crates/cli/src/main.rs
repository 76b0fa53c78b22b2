//! pinmap CLI - compose Leaflet web maps from CSV and GeoJSON

mod scene;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use pinmap_core::prelude::*;
use scene::{split_center, CircleConfig, SceneConfig};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "pinmap")]
#[command(author, version, about = "Compose Leaflet web maps from CSV and GeoJSON", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a map and save it as a standalone HTML page
    Render {
        #[command(flatten)]
        scene: SceneArgs,
        /// Output HTML file
        #[arg(short, long)]
        output: PathBuf,
        /// Also show the map in the current notebook front-end
        #[arg(long)]
        display: bool,
    },
    /// Print the map's center and options as JSON
    Info {
        #[command(flatten)]
        scene: SceneArgs,
    },
    /// Markers and circles at three Seoul stations
    Demo {
        /// Output HTML file
        #[arg(short, long, default_value = "pinmap-demo.html")]
        output: PathBuf,
    },
}

#[derive(Args)]
struct SceneArgs {
    /// JSON scene config; flags given here override it
    #[arg(long)]
    config: Option<PathBuf>,
    /// Map center as LAT,LNG
    #[arg(long, allow_hyphen_values = true)]
    center: Option<String>,
    /// Zoom level (clamped to 1-18)
    #[arg(short, long)]
    zoom: Option<i64>,
    /// Base tiles: OpenStreetMap, "CartoDB positron", "CartoDB dark_matter"
    #[arg(long)]
    tiles: Option<String>,
    /// Show a scale bar
    #[arg(long)]
    control_scale: bool,
    /// Location table (CSV or .json) to draw as markers; repeatable
    #[arg(long)]
    markers: Vec<PathBuf>,
    /// Location table (CSV or .json) to draw as circles; repeatable
    #[arg(long)]
    circles: Vec<PathBuf>,
    /// GeoJSON file to draw as a boundary; repeatable
    #[arg(long)]
    bounds: Vec<PathBuf>,
    /// Circle radius in meters [default: 5000]
    #[arg(long)]
    radius: Option<f64>,
    /// Circle stroke width [default: 3]
    #[arg(long)]
    weight: Option<f64>,
    /// Circle stroke color [default: brown]
    #[arg(long)]
    color: Option<String>,
    /// Circle fill color [default: coral]
    #[arg(long)]
    fill_color: Option<String>,
    /// Circle fill opacity [default: 0.3]
    #[arg(long)]
    fill_opacity: Option<f64>,
    /// Draw circles without fill
    #[arg(long)]
    no_fill: bool,
}

impl SceneArgs {
    fn into_scene(self) -> Result<SceneConfig> {
        let mut scene = match &self.config {
            Some(path) => SceneConfig::load(path)?,
            None => SceneConfig::default(),
        };
        let center = self.center.as_deref().map(split_center).transpose()?;
        scene.merge(SceneConfig {
            center,
            zoom: self.zoom.map(serde_json::Value::from),
            tiles: self.tiles,
            control_scale: self.control_scale.then_some(true),
            markers: self.markers,
            circles: self.circles,
            bounds: self.bounds,
            circle: CircleConfig {
                radius: self.radius,
                weight: self.weight,
                color: self.color,
                fill: self.no_fill.then_some(false),
                fill_color: self.fill_color,
                fill_opacity: self.fill_opacity,
            },
        });
        Ok(scene)
    }
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn read_locations(path: &Path) -> Result<LocationTable> {
    let pb = spinner("Reading locations...");
    let table = LocationTable::from_path(path)
        .with_context(|| format!("Failed to read locations from {}", path.display()))?;
    pb.finish_and_clear();
    info!("{}: {} locations", path.display(), table.len());
    Ok(table)
}

fn build(scene: SceneArgs) -> Result<MapCanvas> {
    scene.into_scene()?.build(read_locations)
}

fn save(canvas: &MapCanvas, path: &Path) -> Result<()> {
    let pb = spinner("Writing output...");
    canvas.save(path).context("Failed to write output")?;
    pb.finish_and_clear();
    Ok(())
}

fn print_info(canvas: &MapCanvas) -> Result<()> {
    let info = serde_json::json!({
        "center": canvas.map_info().center,
        "options": canvas.map_info().options,
        "overlays": canvas.overlay_count(),
    });
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}

fn done(path: &Path, overlays: usize, elapsed: std::time::Duration) {
    println!("Map saved to: {}", path.display());
    println!("  Overlays: {}", overlays);
    println!("  Processing time: {:.2?}", elapsed);
}

fn demo_stations() -> Result<LocationTable> {
    Ok(LocationTable::new(vec![
        Location::new("Gangnam Station", 37.4979126, 127.0276946),
        Location::new("Seoul Station", 37.5546, 126.9708),
        Location::new("Guro Digital Complex", 37.4853, 126.9015),
    ])?)
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    match cli.command {
        Commands::Render {
            scene,
            output,
            display,
        } => {
            let start = Instant::now();
            let canvas = build(scene)?;
            save(&canvas, &output)?;
            let elapsed = start.elapsed();
            if display {
                canvas.display()?;
            }
            done(&output, canvas.overlay_count(), elapsed);
        }

        Commands::Info { scene } => {
            let canvas = build(scene)?;
            print_info(&canvas)?;
        }

        Commands::Demo { output } => {
            let start = Instant::now();
            let stations = demo_stations()?;
            let mut canvas = MapCanvas::with_zoom((37.55, 126.98), 12);
            canvas.make_marker(&stations);
            canvas.make_circle(&stations, &CircleOptions::default());
            canvas.display()?;
            save(&canvas, &output)?;
            done(&output, canvas.overlay_count(), start.elapsed());

            canvas.set_zoom_scale(10)?;
            canvas.clear();
            canvas.display()?;
            print_info(&canvas)?;
        }
    }

    Ok(())
}
