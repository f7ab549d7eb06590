//! Quaternion for 3D rotations

use super::{Mat4, Vec3};

/// Unit quaternion representing a rotation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    /// Identity quaternion (no rotation)
    pub const IDENTITY: Quat = Quat {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Create from axis-angle representation (angle in radians)
    ///
    /// A zero-length axis yields the identity.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let len = axis.length();
        if len < 1e-6 {
            return Self::IDENTITY;
        }

        let (s, c) = (angle * 0.5).sin_cos();
        let axis = axis / len;
        Self {
            x: axis.x * s,
            y: axis.y * s,
            z: axis.z * s,
            w: c,
        }
    }

    /// Four-component magnitude
    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }

    /// Rescale to unit length; a near-zero quaternion becomes the identity
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len < 1e-6 {
            Self::IDENTITY
        } else {
            Self::new(self.x / len, self.y / len, self.z / len, self.w / len)
        }
    }

    /// Convert to a 4x4 rotation matrix
    pub fn to_mat4(&self) -> Mat4 {
        let x2 = self.x + self.x;
        let y2 = self.y + self.y;
        let z2 = self.z + self.z;

        let xx = self.x * x2;
        let xy = self.x * y2;
        let xz = self.x * z2;
        let yy = self.y * y2;
        let yz = self.y * z2;
        let zz = self.z * z2;
        let wx = self.w * x2;
        let wy = self.w * y2;
        let wz = self.w * z2;

        Mat4::from_rows([
            [1.0 - (yy + zz), xy - wz, xz + wy, 0.0],
            [xy + wz, 1.0 - (xx + zz), yz - wx, 0.0],
            [xz - wy, yz + wx, 1.0 - (xx + yy), 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn assert_vec_near(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-5, "{a:?} != {b:?}");
    }

    fn rotate(q: Quat, v: Vec3) -> Vec3 {
        q.to_mat4().transform_vector(v)
    }

    #[test]
    fn test_identity() {
        assert_eq!(Quat::default(), Quat::IDENTITY);
        assert_eq!(Quat::IDENTITY.to_mat4(), Mat4::IDENTITY);
    }

    #[test]
    fn test_from_axis_angle() {
        // Quarter turn about Y carries +X to -Z
        let q = Quat::from_axis_angle(Vec3::Y, FRAC_PI_2);
        assert_vec_near(rotate(q, Vec3::X), Vec3::new(0.0, 0.0, -1.0));
        assert_vec_near(rotate(q, Vec3::Y), Vec3::Y);
        assert_vec_near(rotate(q, Vec3::Z), Vec3::X);
    }

    #[test]
    fn test_axis_length_is_ignored() {
        let short = Quat::from_axis_angle(Vec3::Z, 0.4);
        let long = Quat::from_axis_angle(Vec3::new(0.0, 0.0, 7.0), 0.4);
        assert!((long.length() - 1.0).abs() < 1e-6);
        assert_vec_near(rotate(long, Vec3::X), rotate(short, Vec3::X));
    }

    #[test]
    fn test_matrix_is_a_rotation() {
        let q = Quat::from_axis_angle(Vec3::new(1.0, 1.0, 0.0), 0.7);
        let m = q.to_mat4();

        // Points on the axis stay put and lengths are preserved
        let axis = Vec3::new(1.0, 1.0, 0.0);
        assert_vec_near(m.transform_vector(axis), axis);
        let v = Vec3::new(0.2, -0.4, 1.3);
        assert!((m.transform_vector(v).length() - v.length()).abs() < 1e-5);

        // No translation, so vertices and vectors agree
        assert_vec_near(m.transform_vertex(v), m.transform_vector(v));
    }

    #[test]
    fn test_normalize() {
        let q = Quat::new(0.0, 0.0, 2.0, 2.0).normalize();
        assert!((q.length() - 1.0).abs() < 1e-6);
        // Same rotation as the unit quaternion for a quarter turn about Z
        assert_vec_near(rotate(q, Vec3::X), Vec3::Y);

        assert_eq!(Quat::new(0.0, 0.0, 0.0, 0.0).normalize(), Quat::IDENTITY);
    }

    #[test]
    fn test_zero_axis_is_identity() {
        assert_eq!(Quat::from_axis_angle(Vec3::ZERO, 1.0), Quat::IDENTITY);
    }
}
