//! Ready-made overlay widgets

use mini3d_core::{Color, Stroke};

use crate::element::CompositeElement;
use crate::math::Vec3;
use crate::renderer::Scene;

/// Facets around each arrowhead cone
const CONE_FACETS: usize = 8;

/// Orientation indicator: three colored arrows along the world axes
///
/// X is red, Y green and Z blue. Each arrow is a line plus a lit cone and is
/// pickable under its own id: 1 for X, 2 for Y, 3 for Z. An optional origin
/// cube is pickable as 4.
#[derive(Debug)]
pub struct OrientationTriad {
    axes: [CompositeElement; 3],
    origin: Option<CompositeElement>,
}

impl Default for OrientationTriad {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl OrientationTriad {
    pub const X_ID: u8 = 1;
    pub const Y_ID: u8 = 2;
    pub const Z_ID: u8 = 3;
    pub const ORIGIN_ID: u8 = 4;

    /// Triad with arrows of the given length
    pub fn new(length: f32) -> Self {
        let axes = [
            arrow(Vec3::X, Vec3::Y, Vec3::Z, length, Color::RED, Self::X_ID),
            arrow(Vec3::Y, Vec3::Z, Vec3::X, length, Color::GREEN, Self::Y_ID),
            arrow(Vec3::Z, Vec3::X, Vec3::Y, length, Color::BLUE, Self::Z_ID),
        ];
        Self { axes, origin: None }
    }

    /// Add a cube centered on the origin with half-extent `half_size`
    pub fn with_origin_cube(mut self, half_size: f32) -> Self {
        self.origin = Some(cube(half_size, Color::gray(0.8), Self::ORIGIN_ID));
        self
    }

    /// Element group for a pick id
    pub fn part(&self, id: u8) -> Option<&CompositeElement> {
        match id {
            Self::X_ID..=Self::Z_ID => self.axes.get(usize::from(id - Self::X_ID)),
            Self::ORIGIN_ID => self.origin.as_ref(),
            _ => None,
        }
    }

    /// Human-readable name of a pick id
    pub fn part_name(id: u8) -> Option<&'static str> {
        match id {
            Self::X_ID => Some("x"),
            Self::Y_ID => Some("y"),
            Self::Z_ID => Some("z"),
            Self::ORIGIN_ID => Some("origin"),
            _ => None,
        }
    }

    /// Submit every part to an open scene
    pub fn submit_to(&self, scene: &mut Scene<'_>) {
        for axis in &self.axes {
            scene.submit(axis);
        }
        if let Some(origin) = &self.origin {
            scene.submit(origin);
        }
    }
}

/// Arrow along `axis`; `u` and `v` complete a right-handed basis
/// (`u x v == axis`)
fn arrow(axis: Vec3, u: Vec3, v: Vec3, length: f32, color: Color, id: u8) -> CompositeElement {
    let head_length = length * 0.2;
    let radius = length * 0.06;
    let base = axis * (length - head_length);
    let tip = axis * length;

    let rim: Vec<Vec3> = (0..CONE_FACETS)
        .map(|i| {
            let theta = std::f32::consts::TAU * i as f32 / CONE_FACETS as f32;
            base + u * (radius * theta.cos()) + v * (radius * theta.sin())
        })
        .collect();

    let mut group = CompositeElement::with_capacity(1 + 2 * CONE_FACETS).with_id(id);
    group.set_color(color).set_stroke(Stroke::new(2.0));
    group.add_line_c(Vec3::ZERO, base);

    for i in 0..CONE_FACETS {
        let a = rim[i];
        let b = rim[(i + 1) % CONE_FACETS];
        group.add_tri_n(a, b, tip);
        group.add_tri_n(base, b, a);
    }
    group
}

fn cube(h: f32, color: Color, id: u8) -> CompositeElement {
    let mut group = CompositeElement::with_capacity(12).with_id(id);
    group.set_color(color);

    let faces = [
        (Vec3::X, Vec3::Y, Vec3::Z),
        (Vec3::Y, Vec3::Z, Vec3::X),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (-Vec3::X, Vec3::Z, Vec3::Y),
        (-Vec3::Y, Vec3::X, Vec3::Z),
        (-Vec3::Z, Vec3::Y, Vec3::X),
    ];
    for (normal, u, v) in faces {
        let center = normal * h;
        let (u, v) = (u * h, v * h);
        let corners = [
            center - u - v,
            center + u - v,
            center + u + v,
            center - u + v,
        ];
        group.add_tri_n(corners[0], corners[1], corners[2]);
        group.add_tri_n(corners[0], corners[2], corners[3]);
    }
    group
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;

    #[test]
    fn test_parts_and_names() {
        let triad = OrientationTriad::default();
        assert_eq!(triad.part(1).map(|p| p.color()), Some(Color::RED));
        assert_eq!(triad.part(2).map(|p| p.color()), Some(Color::GREEN));
        assert_eq!(triad.part(3).map(|p| p.color()), Some(Color::BLUE));
        assert!(triad.part(4).is_none());
        assert!(triad.part(0).is_none());

        assert_eq!(OrientationTriad::part_name(3), Some("z"));
        assert_eq!(OrientationTriad::part_name(9), None);
    }

    #[test]
    fn test_arrow_layout() {
        let triad = OrientationTriad::new(2.0);
        let x = triad.part(OrientationTriad::X_ID).unwrap();
        assert_eq!(x.len(), 1 + 2 * CONE_FACETS);
        assert_eq!(x.tag().id(), OrientationTriad::X_ID);

        // Every vertex stays within the arrow's length along its axis
        for child in x.children() {
            for v in child.vertices() {
                assert!(v.x >= 0.0 && v.x <= 2.0 + 1e-5);
            }
        }
    }

    #[test]
    fn test_cone_facets_point_away_from_axis() {
        let triad = OrientationTriad::default();
        let z = triad.part(OrientationTriad::Z_ID).unwrap();
        // Facets alternate side, cap; the side normals lean outward and forward
        for child in z.children().iter().skip(1).step_by(2) {
            let vertices = child.vertices();
            let centroid = (vertices[0] + vertices[1] + vertices[2]) / 3.0;
            let radial = Vec3::new(centroid.x, centroid.y, 0.0);
            assert!(child.is_front_facing(radial));
            assert!(child.is_front_facing(Vec3::Z));
        }
    }

    #[test]
    fn test_origin_cube_faces_outward() {
        let triad = OrientationTriad::default().with_origin_cube(0.1);
        let cube = triad.part(OrientationTriad::ORIGIN_ID).unwrap();
        assert_eq!(cube.len(), 12);
        for face in cube.children() {
            let vertices = face.vertices();
            let centroid = (vertices[0] + vertices[1] + vertices[2]) / 3.0;
            assert!(face.is_front_facing(centroid));
        }
    }
}
