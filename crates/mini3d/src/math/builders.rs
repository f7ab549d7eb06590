//! Camera and model matrix builders

use std::f32::consts::{FRAC_1_SQRT_2, SQRT_2};

use super::{Mat4, Quat, Vec3, RIGHT_HANDED};

/// Radius of the virtual trackball, in normalized device units
pub const TRACKBALL_RADIUS: f32 = 0.8;

impl Mat4 {
    /// Create a translation matrix
    pub fn translation(x: f32, y: f32, z: f32) -> Mat4 {
        Mat4::from_rows([
            [1.0, 0.0, 0.0, x],
            [0.0, 1.0, 0.0, y],
            [0.0, 0.0, 1.0, z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Create a uniform scale matrix
    pub fn uniform_scale(s: f32) -> Mat4 {
        Mat4::from_rows([
            [s, 0.0, 0.0, 0.0],
            [0.0, s, 0.0, 0.0],
            [0.0, 0.0, s, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Create a view matrix looking from `eye` toward `target`
    ///
    /// The basis is built by Gram-Schmidt from the view direction and `up`.
    /// Right-handed: the camera looks down its -Z axis. Left-handed: +Z.
    pub fn view(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        let (x, y, z) = view_basis(eye, target, up);
        Mat4::from_rows([
            [x.x, x.y, x.z, -x.dot(eye)],
            [y.x, y.y, y.z, -y.dot(eye)],
            [z.x, z.y, z.z, -z.dot(eye)],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Create a perspective projection matrix
    ///
    /// `fov_y` is the full field of view in radians. The projected square
    /// spans [-1, 1] in x and y; depth maps the near plane to one end of
    /// [-1, 1] and the far plane to the other, so that sorting by the
    /// handedness-specific direction draws the far plane first.
    pub fn perspective(near: f32, far: f32, fov_y: f32) -> Mat4 {
        let f = 1.0 / (fov_y * 0.5).tan();
        if RIGHT_HANDED {
            // near -> -1, far -> +1
            Mat4::from_rows([
                [f, 0.0, 0.0, 0.0],
                [0.0, f, 0.0, 0.0],
                [0.0, 0.0, (far + near) / (near - far), 2.0 * far * near / (near - far)],
                [0.0, 0.0, -1.0, 0.0],
            ])
        } else {
            // near -> +1, far -> -1
            Mat4::from_rows([
                [f, 0.0, 0.0, 0.0],
                [0.0, f, 0.0, 0.0],
                [0.0, 0.0, -(far + near) / (far - near), 2.0 * far * near / (far - near)],
                [0.0, 0.0, 1.0, 0.0],
            ])
        }
    }

    /// Create a rigid-body transform placing an object at `origin`, oriented
    /// by the same basis a camera at `origin` looking at `target` would use
    ///
    /// Built as the inverse of the rotation-only view basis with the
    /// translation re-inserted.
    pub fn rigid_body(origin: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        let (x, y, z) = view_basis(origin, target, up);
        let basis = Mat4::from_rows([
            [x.x, x.y, x.z, 0.0],
            [y.x, y.y, y.z, 0.0],
            [z.x, z.y, z.z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);

        let mut rbt = basis.inverse();
        rbt.rows[0][3] = origin.x;
        rbt.rows[1][3] = origin.y;
        rbt.rows[2][3] = origin.z;
        rbt
    }

    /// Rotation for a virtual trackball dragged from `(p1x, p1y)` to
    /// `(p2x, p2y)`, both in normalized [-1, 1] device coordinates
    ///
    /// Both points are projected onto a sphere of radius
    /// [`TRACKBALL_RADIUS`] (blending into a hyperbolic sheet away from the
    /// center). The rotation axis is their cross product and the angle comes
    /// from the chord between them.
    pub fn trackball(p1x: f32, p1y: f32, p2x: f32, p2y: f32) -> Mat4 {
        if p1x == p2x && p1y == p2y {
            return Mat4::IDENTITY;
        }

        let p1 = Vec3::new(p1x, p1y, project_to_sphere(TRACKBALL_RADIUS, p1x, p1y));
        let p2 = Vec3::new(p2x, p2y, project_to_sphere(TRACKBALL_RADIUS, p2x, p2y));

        let mut axis = p1.cross(p2);
        if !RIGHT_HANDED {
            // Mirroring z flips the x and y components of an axial vector
            axis.x = -axis.x;
            axis.y = -axis.y;
        }

        let t = ((p1 - p2).length() / (2.0 * TRACKBALL_RADIUS)).clamp(-1.0, 1.0);
        let phi = 2.0 * t.asin();

        Quat::from_axis_angle(axis, phi).normalize().to_mat4()
    }
}

/// Orthonormal camera basis (right, up, back-or-forward)
fn view_basis(eye: Vec3, target: Vec3, up: Vec3) -> (Vec3, Vec3, Vec3) {
    let z = if RIGHT_HANDED {
        eye - target
    } else {
        target - eye
    }
    .normalize();
    let x = up.cross(z).normalize();
    let y = z.cross(x);
    (x, y, z)
}

/// Height of the trackball surface above `(x, y)`
fn project_to_sphere(r: f32, x: f32, y: f32) -> f32 {
    let d = (x * x + y * y).sqrt();
    if d < r * FRAC_1_SQRT_2 {
        // Inside the sphere
        (r * r - d * d).sqrt()
    } else {
        // On the hyperbola
        let t = r / SQRT_2;
        t * t / d
    }
}
