//! mini3d CLI
//!
//! Render an orientation indicator to SVG, or find out which axis sits under
//! a pixel.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mini3d::{OrientationTriad, Renderer, SceneStats};
use mini3d_core::{DrawSurface, RecordingSurface};
use mini3d_paint::SvgCanvas;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;

use config::Mini3dConfig;

#[derive(Parser)]
#[command(name = "mini3d")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Software-rendered 3D orientation indicators", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file
    #[arg(short, long, global = true, default_value = "mini3d.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the orientation triad to an SVG file
    Render {
        /// Output path (defaults to the configured one)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Print which part of the triad is under a pixel
    Probe {
        /// Pixel column
        x: f32,

        /// Pixel row
        y: f32,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Write a default mini3d.toml
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

/// Viewport and trackball options shared by render and probe
#[derive(clap::Args)]
struct ViewArgs {
    /// Viewport width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Viewport height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Trackball drag applied before rendering, as "x0,y0,x1,y1" in pixels
    #[arg(long)]
    drag: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Render { output, view } => cmd_render(&cli.config, output.as_deref(), &view),

        Commands::Probe { x, y, view } => cmd_probe(&cli.config, x, y, &view),

        Commands::Init { force } => cmd_init(&cli.config, force),
    }
}

fn cmd_render(config_path: &Path, output: Option<&Path>, view: &ViewArgs) -> Result<()> {
    let config = Mini3dConfig::load(config_path)?;
    let (mut renderer, triad) = build_scene(&config, view)?;

    let size = renderer.size();
    let mut canvas = SvgCanvas::from_size(size).with_background(renderer.background());
    let stats = draw_frame(&mut renderer, &triad, &mut canvas);

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&config.widget.output));
    canvas
        .save(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!(
        "Rendered {} of {} elements to {}",
        stats.drawn,
        stats.submitted,
        output.display()
    );
    Ok(())
}

fn cmd_probe(config_path: &Path, x: f32, y: f32, view: &ViewArgs) -> Result<()> {
    let config = Mini3dConfig::load(config_path)?;
    let (mut renderer, triad) = build_scene(&config, view)?;

    let mut surface = RecordingSurface::new(renderer.size());
    draw_frame(&mut renderer, &triad, &mut surface);

    let name = renderer
        .probe(x, y)
        .and_then(OrientationTriad::part_name)
        .unwrap_or("none");
    println!("{}", name);
    Ok(())
}

fn cmd_init(config_path: &Path, force: bool) -> Result<()> {
    Mini3dConfig::write_default(config_path, force)?;
    info!("Wrote {}", config_path.display());
    Ok(())
}

/// Renderer and triad for the configuration with command-line overrides
fn build_scene(config: &Mini3dConfig, view: &ViewArgs) -> Result<(Renderer, OrientationTriad)> {
    let mut settings = config.renderer.clone();
    if let Some(width) = view.width {
        settings.width = width;
    }
    if let Some(height) = view.height {
        settings.height = height;
    }
    if settings.width == 0 || settings.height == 0 {
        anyhow::bail!(
            "Invalid viewport {}x{}: width and height must be positive",
            settings.width,
            settings.height
        );
    }

    let mut renderer = Renderer::from_settings(&settings);
    if let Some(drag) = &view.drag {
        let [x0, y0, x1, y1] = parse_drag(drag)?;
        renderer.trackball_drag(x0, y0, x1, y1);
    }

    let mut triad = OrientationTriad::new(config.widget.arrow_length);
    if let Some(half_size) = config.widget.origin_cube {
        triad = triad.with_origin_cube(half_size);
    }
    Ok((renderer, triad))
}

fn draw_frame(
    renderer: &mut Renderer,
    triad: &OrientationTriad,
    surface: &mut dyn DrawSurface,
) -> SceneStats {
    let mut scene = renderer.begin_scene(surface);
    triad.submit_to(&mut scene);
    scene.end()
}

/// Parse "x0,y0,x1,y1"
fn parse_drag(text: &str) -> Result<[f32; 4]> {
    let values = text
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f32>()
                .with_context(|| format!("Invalid drag coordinate '{}'", part.trim()))
        })
        .collect::<Result<Vec<f32>>>()?;

    match values.as_slice() {
        [x0, y0, x1, y1] => Ok([*x0, *y0, *x1, *y1]),
        _ => anyhow::bail!(
            "Invalid drag '{}': expected four comma-separated numbers",
            text
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_drag() {
        assert_eq!(
            parse_drag("10, 20,30.5,40").unwrap(),
            [10.0, 20.0, 30.5, 40.0]
        );
        assert!(parse_drag("1,2,3").is_err());
        assert!(parse_drag("1,2,3,x").is_err());
    }

    #[test]
    fn test_command_line_overrides_viewport() {
        let view = ViewArgs {
            width: Some(128),
            height: None,
            drag: None,
        };
        let (renderer, _) = build_scene(&Mini3dConfig::default(), &view).unwrap();
        assert_eq!(renderer.size(), mini3d_core::Size::new(128.0, 300.0));
    }

    #[test]
    fn test_zero_viewport_is_rejected() {
        let view = ViewArgs {
            width: Some(0),
            height: None,
            drag: None,
        };
        assert!(build_scene(&Mini3dConfig::default(), &view).is_err());
    }

    #[test]
    fn test_probe_center_hits_z_arrow() {
        let view = ViewArgs {
            width: Some(200),
            height: Some(200),
            drag: None,
        };
        let (mut renderer, triad) = build_scene(&Mini3dConfig::default(), &view).unwrap();
        let mut surface = RecordingSurface::default();
        let stats = draw_frame(&mut renderer, &triad, &mut surface);

        assert!(stats.drawn > 0);
        let hit = renderer.probe(102.0, 101.0).and_then(OrientationTriad::part_name);
        assert_eq!(hit, Some("z"));
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["mini3d", "probe", "10", "20", "--drag", "0,0,5,5"]).unwrap();
        match cli.command {
            Commands::Probe { x, y, view } => {
                assert_eq!((x, y), (10.0, 20.0));
                assert_eq!(view.drag.as_deref(), Some("0,0,5,5"));
            }
            _ => panic!("expected probe"),
        }
        assert_eq!(cli.config, PathBuf::from("mini3d.toml"));
    }
}
