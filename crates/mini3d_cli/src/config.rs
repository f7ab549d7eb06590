//! mini3d configuration file handling
//!
//! `mini3d.toml` holds the renderer settings (viewport, camera, lights) under
//! `[renderer]` and the widget and output options under `[widget]`.

use anyhow::{Context, Result};
use mini3d::RendererSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Contents of mini3d.toml
#[derive(Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Mini3dConfig {
    #[serde(default)]
    pub renderer: RendererSettings,
    #[serde(default)]
    pub widget: WidgetConfig,
}

/// Orientation triad and output options
#[derive(Debug, PartialEq, Deserialize, Serialize)]
pub struct WidgetConfig {
    /// Arrow length in world units
    #[serde(default = "default_arrow_length")]
    pub arrow_length: f32,
    /// Half-extent of the origin cube
    #[serde(default = "default_origin_cube")]
    pub origin_cube: Option<f32>,
    /// Default SVG output path for `mini3d render`
    #[serde(default = "default_output")]
    pub output: String,
}

fn default_arrow_length() -> f32 {
    1.0
}

fn default_origin_cube() -> Option<f32> {
    Some(0.1)
}

fn default_output() -> String {
    "triad.svg".to_string()
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            arrow_length: default_arrow_length(),
            origin_cube: default_origin_cube(),
            output: default_output(),
        }
    }
}

impl Mini3dConfig {
    /// Load configuration from `path`, or the defaults if it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("{} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config: Mini3dConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Write the default configuration to `path`
    pub fn write_default(path: &Path, force: bool) -> Result<()> {
        if path.exists() && !force {
            anyhow::bail!(
                "{} already exists. Use --force to overwrite it.",
                path.display()
            );
        }

        let content = Self::default().to_toml()?;
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}
