//! Renderable elements
//!
//! An [`Element`] is anything the renderer can push through its pipeline.
//! Four kinds ship with the crate:
//!
//! - [`Line`]: a stroked segment, optionally split into several segments
//! - [`FlatTriangle`]: a filled triangle in a single color, pickable
//! - [`LitTriangle`]: a filled triangle shaded by the renderer's lights
//! - [`CompositeElement`]: an owned group of the above, flattened on submit
//!
//! Elements are never handed to the renderer directly. `submit` makes
//! renderer-owned copies and passes them to [`Scene::submit_owned`], so the
//! caller's element is left untouched and can be submitted again.

mod composite;
mod line;
mod triangle;

pub use composite::CompositeElement;
pub use line::Line;
pub use triangle::{FlatTriangle, LitTriangle};

use std::fmt;

use mini3d_core::{Color, DrawSurface, Point};

use crate::lights::Light;
use crate::math::{Mat4, Vec3};
use crate::renderer::Scene;

/// Pick id (7 bits) plus a "was drawn" flag, packed in one byte
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PickTag(u8);

impl PickTag {
    /// Largest pick id
    pub const MAX_ID: u8 = 0x7F;
    const DRAWN: u8 = 0x80;

    /// Tag with the given id; bits above the low seven are discarded
    pub const fn new(id: u8) -> Self {
        Self(id & Self::MAX_ID)
    }

    pub const fn id(&self) -> u8 {
        self.0 & Self::MAX_ID
    }

    pub const fn was_drawn(&self) -> bool {
        self.0 & Self::DRAWN != 0
    }

    pub fn mark_drawn(&mut self) {
        self.0 |= Self::DRAWN;
    }
}

/// Shading inputs for directional and eye lights
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightingContext {
    /// Eye position, in the same space as the element's geometry
    pub eye: Vec3,
    /// Whether lit elements add a specular highlight
    pub specular: bool,
}

/// Capability set shared by every renderable element
///
/// Only `transform`, `submit`, `draw`, `vertices`, `color` and `tag` are
/// required. Picking, lighting and culling default to "not pickable",
/// "unaffected" and "always front facing".
pub trait Element: fmt::Debug {
    /// Transform the geometry in place
    fn transform(&mut self, m: &Mat4);

    /// Hand renderer-owned copies of this element to `scene`
    ///
    /// `color` overrides the element's own color when set; `id` becomes the
    /// pick id of every copy.
    fn submit(&self, scene: &mut Scene<'_>, color: Option<Color>, id: u8);

    /// Draw onto the surface and mark the element drawn
    fn draw(&mut self, surface: &mut dyn DrawSurface);

    /// Geometry, in whatever space the element currently lives in
    fn vertices(&self) -> &[Vec3];

    /// Base color
    fn color(&self) -> Color;

    fn tag(&self) -> PickTag;

    /// Depth used by the painter's sort: mean Z of the vertices
    fn sort_depth(&self) -> f32 {
        let vertices = self.vertices();
        if vertices.is_empty() {
            return 0.0;
        }
        vertices.iter().map(|v| v.z).sum::<f32>() / vertices.len() as f32
    }

    /// Whether the device-space point `(x, y)` lies on this element
    fn hit_test(&self, _x: f32, _y: f32) -> bool {
        false
    }

    /// Accumulate an ambient light (object space)
    fn light_ambient(&mut self, _light: &Light) {}

    /// Accumulate a directional light (world space)
    fn light_directional(&mut self, _light: &Light, _ctx: &LightingContext) {}

    /// Accumulate an eye light (view space)
    fn light_eye(&mut self, _light: &Light, _ctx: &LightingContext) {}

    /// Back-face test against the view-space cull vector
    fn is_front_facing(&self, _cull: Vec3) -> bool {
        true
    }
}

/// Device-space projection of a vertex
pub(crate) fn device_point(v: Vec3) -> Point {
    Point::new(v.x, v.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_tag_packs_id_and_flag() {
        let mut tag = PickTag::new(42);
        assert_eq!(tag.id(), 42);
        assert!(!tag.was_drawn());

        tag.mark_drawn();
        assert_eq!(tag.id(), 42);
        assert!(tag.was_drawn());
    }

    #[test]
    fn test_pick_tag_masks_to_seven_bits() {
        assert_eq!(PickTag::new(0xFF).id(), PickTag::MAX_ID);
        assert_eq!(PickTag::new(130).id(), 2);
        assert!(!PickTag::new(0xFF).was_drawn());
    }
}
