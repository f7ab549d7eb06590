//! Triangle elements

use mini3d_core::{Color, DrawSurface};

use super::{device_point, Element, LightingContext, PickTag};
use crate::lights::Light;
use crate::math::{Mat4, Vec3};
use crate::renderer::Scene;

/// Specular exponent of the highlight term
const SPECULAR_POWER: i32 = 4;

/// A filled triangle in a single color
#[derive(Clone, Debug, PartialEq)]
pub struct FlatTriangle {
    points: [Vec3; 3],
    color: Color,
    tag: PickTag,
}

impl FlatTriangle {
    pub fn new(a: Vec3, b: Vec3, c: Vec3, color: Color) -> Self {
        Self {
            points: [a, b, c],
            color,
            tag: PickTag::default(),
        }
    }

    /// Set pick id
    pub fn with_id(mut self, id: u8) -> Self {
        self.tag = PickTag::new(id);
        self
    }

    pub fn points(&self) -> &[Vec3; 3] {
        &self.points
    }

    /// Mean of the three vertices
    pub fn centroid(&self) -> Vec3 {
        let [a, b, c] = self.points;
        (a + b + c) / 3.0
    }

    fn copy_for_submit(&self, color: Option<Color>, id: u8) -> Self {
        Self {
            points: self.points,
            color: color.unwrap_or(self.color),
            tag: PickTag::new(id),
        }
    }

    fn fill(&mut self, surface: &mut dyn DrawSurface, color: Color) {
        let [a, b, c] = self.points;
        surface.set_fill(color);
        surface.fill_polygon(&[device_point(a), device_point(b), device_point(c)]);
        self.tag.mark_drawn();
    }
}

/// Half-plane function of the edge `a -> b`, evaluated at `(x, y)`
fn edge(a: Vec3, b: Vec3, x: f32, y: f32) -> f32 {
    (a.y - b.y) * x + (b.x - a.x) * y + a.x * b.y - b.x * a.y
}

impl Element for FlatTriangle {
    fn transform(&mut self, m: &Mat4) {
        for p in &mut self.points {
            *p = m.transform_vertex(*p);
        }
    }

    fn submit(&self, scene: &mut Scene<'_>, color: Option<Color>, id: u8) {
        scene.submit_owned(Box::new(self.copy_for_submit(color, id)));
    }

    fn draw(&mut self, surface: &mut dyn DrawSurface) {
        let color = self.color;
        self.fill(surface, color);
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

    /// Inside when all three edge functions share a sign, independent of
    /// winding. Points on an edge and zero-area triangles never hit.
    fn hit_test(&self, x: f32, y: f32) -> bool {
        let [a, b, c] = self.points;
        let f_ab = edge(a, b, x, y);
        let f_bc = edge(b, c, x, y);
        let f_ca = edge(c, a, x, y);
        f_ab * f_bc > 0.0 && f_bc * f_ca > 0.0
    }
}

/// A filled triangle shaded by the renderer's lights
///
/// The lit color starts black on every submission and each light adds to it,
/// clamping channels to 1.0 after every individual light. Light order
/// therefore matters once a channel saturates.
#[derive(Clone, Debug, PartialEq)]
pub struct LitTriangle {
    triangle: FlatTriangle,
    normal: Vec3,
    lit: Color,
}

impl LitTriangle {
    /// Triangle with an explicit normal
    pub fn new(a: Vec3, b: Vec3, c: Vec3, normal: Vec3, color: Color) -> Self {
        Self {
            triangle: FlatTriangle::new(a, b, c, color),
            normal: normal.normalize(),
            lit: Color::BLACK,
        }
    }

    /// Triangle whose normal follows the winding `a -> b -> c`
    /// (counter-clockwise seen from the front)
    pub fn from_vertices(a: Vec3, b: Vec3, c: Vec3, color: Color) -> Self {
        let normal = (b - a).cross(c - a);
        Self::new(a, b, c, normal, color)
    }

    /// Set pick id
    pub fn with_id(mut self, id: u8) -> Self {
        self.triangle.tag = PickTag::new(id);
        self
    }

    pub fn points(&self) -> &[Vec3; 3] {
        self.triangle.points()
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Color accumulated from lights so far
    pub fn lit_color(&self) -> Color {
        self.lit
    }

    fn add_light(&mut self, contribution: Color) {
        self.lit = (self.lit + contribution).saturate();
    }

    /// Diffuse plus optional specular for a directional or eye light
    fn shade(&mut self, light: &Light, ctx: &LightingContext) {
        let l = light.unit_direction();
        let ln = -self.normal.dot(l);
        if ln <= 0.0 {
            return;
        }

        let mut contribution = light.color() * self.triangle.color * ln;

        if ctx.specular {
            let v = (ctx.eye - self.triangle.centroid()).normalize();
            let h = ((-l + v) / 2.0).normalize();
            let nh = self.normal.dot(h);
            if nh > 0.0 {
                contribution += light.color() * nh.powi(SPECULAR_POWER);
            }
        }

        self.add_light(contribution);
    }
}

impl Element for LitTriangle {
    fn transform(&mut self, m: &Mat4) {
        self.triangle.transform(m);
        self.normal = m.transform_vector(self.normal).normalize();
    }

    fn submit(&self, scene: &mut Scene<'_>, color: Option<Color>, id: u8) {
        let copy = LitTriangle {
            triangle: self.triangle.copy_for_submit(color, id),
            normal: self.normal,
            lit: Color::BLACK,
        };
        scene.submit_owned(Box::new(copy));
    }

    fn draw(&mut self, surface: &mut dyn DrawSurface) {
        let lit = self.lit;
        self.triangle.fill(surface, lit);
    }

    fn vertices(&self) -> &[Vec3] {
        self.triangle.vertices()
    }

    fn color(&self) -> Color {
        self.triangle.color
    }

    fn tag(&self) -> PickTag {
        self.triangle.tag
    }

    fn hit_test(&self, x: f32, y: f32) -> bool {
        self.triangle.hit_test(x, y)
    }

    fn light_ambient(&mut self, light: &Light) {
        let contribution = self.triangle.color * light.color();
        self.add_light(contribution);
    }

    fn light_directional(&mut self, light: &Light, ctx: &LightingContext) {
        self.shade(light, ctx);
    }

    fn light_eye(&mut self, light: &Light, ctx: &LightingContext) {
        self.shade(light, ctx);
    }

    fn is_front_facing(&self, cull: Vec3) -> bool {
        cull.dot(self.normal) > 0.0
    }
}
