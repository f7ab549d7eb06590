//! Composite element

use mini3d_core::{Color, DrawSurface, Stroke};

use super::{Element, FlatTriangle, Line, LitTriangle, PickTag};
use crate::math::{Mat4, Vec3};
use crate::renderer::Scene;

/// Children reserved by [`CompositeElement::new`]
const DEFAULT_CAPACITY: usize = 8;

/// An owned group of elements
///
/// The `add_*` builders create children with the composite's current color,
/// stroke and segment count. Submitting forwards to every child, so the
/// renderer only ever holds the children's copies; the composite and its
/// children are left as they were and can be submitted to any number of
/// scenes.
#[derive(Debug)]
pub struct CompositeElement {
    children: Vec<Box<dyn Element>>,
    color: Color,
    stroke: Stroke,
    segments: u32,
    id: u8,
}

impl Default for CompositeElement {
    fn default() -> Self {
        Self::new()
    }
}

impl CompositeElement {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            children: Vec::with_capacity(capacity),
            color: Color::WHITE,
            stroke: Stroke::default(),
            segments: 1,
            id: 0,
        }
    }

    /// Set pick id used by [`Scene::submit`]
    pub fn with_id(mut self, id: u8) -> Self {
        self.id = id & PickTag::MAX_ID;
        self
    }

    /// Color for children added from now on
    pub fn set_color(&mut self, color: Color) -> &mut Self {
        self.color = color;
        self
    }

    /// Stroke for lines added from now on
    pub fn set_stroke(&mut self, stroke: Stroke) -> &mut Self {
        self.stroke = stroke;
        self
    }

    /// Segment count for lines added from now on
    pub fn set_segments(&mut self, segments: u32) -> &mut Self {
        self.segments = segments.max(1);
        self
    }

    /// Add a line in the current color and stroke
    pub fn add_line_c(&mut self, from: Vec3, to: Vec3) -> &mut Self {
        let line = Line::new(from, to, self.color)
            .with_stroke(self.stroke.clone())
            .with_segments(self.segments);
        self.add_element(Box::new(line))
    }

    /// Add a flat triangle in the current color
    pub fn add_tri_c(&mut self, a: Vec3, b: Vec3, c: Vec3) -> &mut Self {
        let tri = FlatTriangle::new(a, b, c, self.color);
        self.add_element(Box::new(tri))
    }

    /// Add a lit triangle in the current color, its normal taken from the
    /// winding `a -> b -> c`
    pub fn add_tri_n(&mut self, a: Vec3, b: Vec3, c: Vec3) -> &mut Self {
        let tri = LitTriangle::from_vertices(a, b, c, self.color);
        self.add_element(Box::new(tri))
    }

    pub fn add_element(&mut self, element: Box<dyn Element>) -> &mut Self {
        self.children.push(element);
        self
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn children(&self) -> &[Box<dyn Element>] {
        &self.children
    }
}

impl Element for CompositeElement {
    fn transform(&mut self, m: &Mat4) {
        for child in &mut self.children {
            child.transform(m);
        }
    }

    fn submit(&self, scene: &mut Scene<'_>, color: Option<Color>, id: u8) {
        for child in &self.children {
            child.submit(scene, color, id);
        }
    }

    fn draw(&mut self, surface: &mut dyn DrawSurface) {
        for child in &mut self.children {
            child.draw(surface);
        }
    }

    fn vertices(&self) -> &[Vec3] {
        &[]
    }

    fn color(&self) -> Color {
        self.color
    }

    fn tag(&self) -> PickTag {
        PickTag::new(self.id)
    }
}
