//! Math utilities for the software renderer
//!
//! Row-major 4x4 matrices acting on column vectors (`M * v`), 3D vectors,
//! LU-based inversion, and builders for camera and model matrices.

mod builders;
mod lu;
mod mat4;
mod quat;
mod vec3;

pub use builders::TRACKBALL_RADIUS;
pub use mat4::Mat4;
pub use quat::Quat;
pub use vec3::Vec3;

/// Whether right-handed coordinate conventions are in effect
///
/// Controlled at compile time by the `left-handed` feature.
pub const RIGHT_HANDED: bool = !cfg!(feature = "left-handed");
