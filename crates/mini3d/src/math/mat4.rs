//! 4x4 transformation matrix

use std::ops::Mul;

use super::lu::LuDecomposition;
use super::Vec3;

/// 4x4 transformation matrix (row-major)
///
/// `rows[r][c]` is row `r`, column `c`. Points are column vectors, so a
/// matrix applies as `M * v` and the translation lives in the fourth column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat4 {
    pub rows: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        rows: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub const ZERO: Mat4 = Mat4 {
        rows: [[0.0; 4]; 4],
    };

    pub const fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        Self { rows }
    }

    /// Matrix product `self * other`
    ///
    /// The result applies `other` first, then `self`.
    pub fn mul(&self, other: &Mat4) -> Mat4 {
        let mut result = [[0.0f32; 4]; 4];
        for (r, row) in result.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.rows[r][k] * other.rows[k][c]).sum();
            }
        }
        Mat4 { rows: result }
    }

    /// Transform a point, including the homogeneous divide
    ///
    /// The resulting `w` must be non-zero; a point that maps to infinity
    /// yields non-finite coordinates.
    pub fn transform_vertex(&self, v: Vec3) -> Vec3 {
        let m = &self.rows;
        let x = m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z + m[0][3];
        let y = m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z + m[1][3];
        let z = m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z + m[2][3];
        let w = m[3][0] * v.x + m[3][1] * v.y + m[3][2] * v.z + m[3][3];
        Vec3::new(x / w, y / w, z / w)
    }

    /// Transform a direction (upper 3x3 only, no translation, no divide)
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        let m = &self.rows;
        Vec3::new(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
            m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
            m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
        )
    }

    pub fn transpose(&self) -> Mat4 {
        let mut rows = [[0.0f32; 4]; 4];
        for (r, row) in rows.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = self.rows[c][r];
            }
        }
        Mat4 { rows }
    }

    /// Inverse via LU decomposition, or `None` if the matrix is singular
    pub fn try_inverse(&self) -> Option<Mat4> {
        let lu = LuDecomposition::new(&self.rows)?;
        let mut rows = [[0.0f32; 4]; 4];
        for c in 0..4 {
            let mut column = [0.0f32; 4];
            column[c] = 1.0;
            lu.solve(&mut column);
            for (r, value) in column.into_iter().enumerate() {
                rows[r][c] = value;
            }
        }
        Some(Mat4 { rows })
    }

    /// Inverse via LU decomposition
    ///
    /// A singular matrix yields the identity matrix. Callers cannot tell that
    /// apart from a matrix whose true inverse is the identity.
    pub fn inverse(&self) -> Mat4 {
        self.try_inverse().unwrap_or_else(|| {
            tracing::trace!("singular matrix, substituting identity for its inverse");
            Mat4::IDENTITY
        })
    }

    /// Translation part (fourth column)
    pub fn translation_part(&self) -> Vec3 {
        Vec3::new(self.rows[0][3], self.rows[1][3], self.rows[2][3])
    }

    /// Element-wise comparison within `eps`
    pub fn approx_eq(&self, other: &Mat4, eps: f32) -> bool {
        self.rows
            .iter()
            .flatten()
            .zip(other.rows.iter().flatten())
            .all(|(a, b)| (a - b).abs() <= eps)
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        Mat4::mul(&self, &rhs)
    }
}
