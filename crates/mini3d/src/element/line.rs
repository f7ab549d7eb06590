//! Line element

use mini3d_core::{Color, DrawSurface, Stroke};

use super::{device_point, Element, PickTag};
use crate::math::{Mat4, Vec3};
use crate::renderer::Scene;

/// A stroked line segment
///
/// With a segment count above one, submission splits the line into that many
/// equal pieces. Each piece is sorted on its own, so a long line crossing
/// other geometry interleaves with it correctly in the painter's order.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    points: [Vec3; 2],
    color: Color,
    stroke: Stroke,
    segments: u32,
    tag: PickTag,
}

impl Line {
    pub fn new(from: Vec3, to: Vec3, color: Color) -> Self {
        Self {
            points: [from, to],
            color,
            stroke: Stroke::default(),
            segments: 1,
            tag: PickTag::default(),
        }
    }

    /// Set stroke style
    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = stroke;
        self
    }

    /// Number of pieces the line is split into on submission (at least 1)
    pub fn with_segments(mut self, segments: u32) -> Self {
        self.segments = segments.max(1);
        self
    }

    /// Set pick id
    pub fn with_id(mut self, id: u8) -> Self {
        self.tag = PickTag::new(id);
        self
    }

    pub fn from(&self) -> Vec3 {
        self.points[0]
    }

    pub fn to(&self) -> Vec3 {
        self.points[1]
    }

    pub fn stroke(&self) -> &Stroke {
        &self.stroke
    }

    pub fn segments(&self) -> u32 {
        self.segments
    }

    fn copy_between(&self, from: Vec3, to: Vec3, color: Option<Color>, id: u8) -> Line {
        Line {
            points: [from, to],
            color: color.unwrap_or(self.color),
            stroke: self.stroke.clone(),
            segments: 1,
            tag: PickTag::new(id),
        }
    }
}

impl Element for Line {
    fn transform(&mut self, m: &Mat4) {
        for p in &mut self.points {
            *p = m.transform_vertex(*p);
        }
    }

    fn submit(&self, scene: &mut Scene<'_>, color: Option<Color>, id: u8) {
        let [from, to] = self.points;
        if self.segments <= 1 {
            scene.submit_owned(Box::new(self.copy_between(from, to, color, id)));
            return;
        }

        let n = self.segments as f32;
        for i in 0..self.segments {
            let a = from.lerp(to, i as f32 / n);
            let b = from.lerp(to, (i + 1) as f32 / n);
            scene.submit_owned(Box::new(self.copy_between(a, b, color, id)));
        }
    }

    fn draw(&mut self, surface: &mut dyn DrawSurface) {
        surface.set_stroke(self.color, &self.stroke);
        surface.draw_line(device_point(self.points[0]), device_point(self.points[1]));
        self.tag.mark_drawn();
    }

    fn vertices(&self) -> &[Vec3] {
        &self.points
    }

    fn color(&self) -> Color {
        self.color
    }

    fn tag(&self) -> PickTag {
        self.tag
    }
}
