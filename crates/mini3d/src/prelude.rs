//! Prelude module for common imports
//!
//! ```rust
//! use mini3d::prelude::*;
//! ```

// Math
pub use crate::math::{Mat4, Quat, Vec3, RIGHT_HANDED};

// Elements
pub use crate::element::{CompositeElement, Element, FlatTriangle, Line, LitTriangle, PickTag};

// Lights
pub use crate::lights::{Light, LightKind};

// Renderer
pub use crate::renderer::{Renderer, Scene, SceneStats};
pub use crate::settings::RendererSettings;

// Widgets
pub use crate::widgets::OrientationTriad;

// Core types
pub use mini3d_core::{Color, DrawSurface, Stroke};
