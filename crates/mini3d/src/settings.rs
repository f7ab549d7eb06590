//! Renderer settings
//!
//! A serializable snapshot of everything [`Renderer::from_settings`] needs:
//! viewport, flags, camera and light rig. Every field has a default, so a
//! settings file only has to name what it changes.
//!
//! ```toml
//! width = 256
//! height = 256
//! specular = true
//!
//! [camera]
//! eye = [0.0, 0.0, 5.0]
//! fov_degrees = 30.0
//!
//! [[lights]]
//! slot = 1
//! kind = "ambient"
//! color = [0.2, 0.2, 0.2]
//! ```
//!
//! [`Renderer::from_settings`]: crate::Renderer::from_settings

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::lights::LightKind;

/// Viewport, flags, camera and lights for a renderer
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RendererSettings {
    pub width: u32,
    pub height: u32,
    /// Background color, RGB in [0, 1]
    pub background: [f32; 3],
    pub specular: bool,
    pub backface_culling: bool,
    pub camera: CameraSettings,
    pub lights: Vec<LightSettings>,
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            width: 400,
            height: 300,
            background: [0.0, 0.0, 0.0],
            specular: false,
            backface_culling: true,
            camera: CameraSettings::default(),
            lights: vec![
                LightSettings {
                    slot: 1,
                    kind: LightKind::Ambient,
                    direction: [0.0, 0.0, 0.0],
                    color: [0.2, 0.2, 0.2],
                },
                LightSettings {
                    slot: 2,
                    kind: LightKind::Directional,
                    direction: [-1.0, -1.0, -1.0],
                    color: [0.8, 0.8, 0.8],
                },
            ],
        }
    }
}

impl RendererSettings {
    /// Parse settings from TOML
    pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(source)?)
    }

    /// Serialize to pretty-printed TOML
    pub fn to_toml_string(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Perspective camera looking from `eye` toward `target`
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CameraSettings {
    pub eye: [f32; 3],
    pub target: [f32; 3],
    pub up: [f32; 3],
    /// Full vertical field of view
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            eye: [0.0, 0.0, 5.0],
            target: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
            fov_degrees: 30.0,
            near: 1.0,
            far: 10.0,
        }
    }
}

/// One configured light slot
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct LightSettings {
    /// Slot number, 1 through 8
    pub slot: usize,
    pub kind: LightKind,
    /// Direction of travel (ignored for ambient lights)
    #[serde(default)]
    pub direction: [f32; 3],
    #[serde(default = "default_light_color")]
    pub color: [f32; 3],
}

fn default_light_color() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}
