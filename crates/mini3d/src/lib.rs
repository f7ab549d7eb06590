//! # mini3d
//!
//! An immediate-mode software 3D renderer for small overlay widgets such as
//! orientation indicators, drawn through any 2D stroke/fill surface instead
//! of a GPU pipeline.
//!
//! This crate provides:
//! - **Math**: 3D vectors, 4x4 matrices with LU inversion, camera builders
//!   and a virtual trackball
//! - **Elements**: lines, flat and lit triangles, and composite groups
//! - **Renderer**: lighting, back-face culling, painter's sort and picking
//! - **Widgets**: a ready-made orientation triad
//!
//! ## Quick Start
//!
//! ```rust
//! use mini3d::prelude::*;
//! use mini3d_core::RecordingSurface;
//!
//! // The side that faces the default camera depends on the handedness build
//! let toward_viewer = if RIGHT_HANDED { Vec3::Z } else { -Vec3::Z };
//!
//! let mut renderer = Renderer::new(400, 300);
//! renderer.set_light(1, LightKind::Ambient, Vec3::ZERO, Color::gray(0.2));
//! renderer.set_light(2, LightKind::Directional, -toward_viewer, Color::WHITE);
//!
//! let triangle = LitTriangle::new(
//!     Vec3::ZERO,
//!     Vec3::X,
//!     Vec3::Y,
//!     toward_viewer,
//!     Color::RED,
//! )
//! .with_id(7);
//!
//! let mut surface = RecordingSurface::default();
//! let mut scene = renderer.begin_scene(&mut surface);
//! scene.submit(&triangle);
//! scene.end();
//!
//! // The triangle covers the pixel just right of and above the viewport center
//! assert_eq!(renderer.probe(210.0, 140.0), Some(7));
//! ```

// Math utilities
pub mod math;

// Renderable elements
pub mod element;

// Lighting
pub mod lights;

// Renderer and scene lifecycle
pub mod renderer;

// Serializable configuration
pub mod settings;

// Ready-made widgets
pub mod widgets;

pub mod error;

// Prelude for common imports
pub mod prelude;

// Re-export core types at crate root
pub use element::{CompositeElement, Element, FlatTriangle, Line, LitTriangle, PickTag};
pub use error::{RenderError, SettingsError};
pub use lights::{Light, LightKind, LightRig, MAX_LIGHTS};
pub use math::{Mat4, Quat, Vec3};
pub use renderer::{Renderer, Scene, SceneStats, Submission};
pub use settings::RendererSettings;
pub use widgets::OrientationTriad;
