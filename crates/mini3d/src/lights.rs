//! Lighting
//!
//! A renderer carries a fixed rig of [`MAX_LIGHTS`] light slots. Each slot
//! holds one of four kinds of light; the kind decides at which stage of the
//! submit pipeline the light is applied:
//!
//! | kind          | applied in   |
//! |---------------|--------------|
//! | `Ambient`     | object space |
//! | `Directional` | world space  |
//! | `Eye`         | view space   |
//! | `Off`         | never        |

use mini3d_core::Color;
use serde::{Deserialize, Serialize};

use crate::error::RenderError;
use crate::math::Vec3;

/// Number of light slots on a renderer
pub const MAX_LIGHTS: usize = 8;

/// Light types
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightKind {
    /// Slot unused
    #[default]
    Off,
    /// Uniform illumination, independent of orientation
    Ambient,
    /// Parallel rays fixed in world space
    Directional,
    /// Parallel rays fixed relative to the camera
    Eye,
}

/// A light in one slot of the rig
///
/// `direction` is the direction the light travels. The normalized direction
/// is cached whenever the light is built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    kind: LightKind,
    direction: Vec3,
    unit_direction: Vec3,
    color: Color,
}

impl Default for Light {
    fn default() -> Self {
        Self::off()
    }
}

impl Light {
    pub fn new(kind: LightKind, direction: Vec3, color: Color) -> Self {
        Self {
            kind,
            direction,
            unit_direction: direction.normalize(),
            color,
        }
    }

    /// An unused slot
    pub fn off() -> Self {
        Self::new(LightKind::Off, Vec3::ZERO, Color::BLACK)
    }

    /// Ambient light (direction is irrelevant)
    pub fn ambient(color: Color) -> Self {
        Self::new(LightKind::Ambient, Vec3::ZERO, color)
    }

    /// World-space directional light
    pub fn directional(direction: Vec3, color: Color) -> Self {
        Self::new(LightKind::Directional, direction, color)
    }

    /// Camera-relative directional light
    pub fn eye(direction: Vec3, color: Color) -> Self {
        Self::new(LightKind::Eye, direction, color)
    }

    pub fn kind(&self) -> LightKind {
        self.kind
    }

    /// Direction as given
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Cached normalized direction
    pub fn unit_direction(&self) -> Vec3 {
        self.unit_direction
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

/// The renderer's fixed set of light slots, numbered 1 through [`MAX_LIGHTS`]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LightRig {
    slots: [Light; MAX_LIGHTS],
}

impl LightRig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace slot `n` (1-based)
    pub fn set(&mut self, n: usize, light: Light) -> Result<(), RenderError> {
        let slot = Self::slot_index(n)?;
        self.slots[slot] = light;
        Ok(())
    }

    /// Light in slot `n` (1-based)
    pub fn get(&self, n: usize) -> Option<&Light> {
        Self::slot_index(n).ok().map(|slot| &self.slots[slot])
    }

    /// Turn every slot off
    pub fn clear(&mut self) {
        self.slots = [Light::off(); MAX_LIGHTS];
    }

    /// Lights of one kind, in slot order
    pub fn of_kind(&self, kind: LightKind) -> impl Iterator<Item = &Light> {
        self.slots.iter().filter(move |light| light.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Light> {
        self.slots.iter()
    }

    fn slot_index(n: usize) -> Result<usize, RenderError> {
        if (1..=MAX_LIGHTS).contains(&n) {
            Ok(n - 1)
        } else {
            Err(RenderError::InvalidLightIndex(n))
        }
    }
}
