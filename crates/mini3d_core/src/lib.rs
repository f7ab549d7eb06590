//! mini3d core types
//!
//! The foundational types shared by the mini3d crates:
//!
//! - **Geometry**: 2D points and sizes in device space
//! - **Color**: RGB colors with the channel arithmetic used by lighting
//! - **Draw Surface**: the stroke/fill primitive provider a renderer draws into
//! - **Recording Surface**: a surface that records commands for later replay
//!
//! # Example
//!
//! ```rust
//! use mini3d_core::{Color, DrawSurface, Point, RecordingSurface, Size, Stroke};
//!
//! let mut surface = RecordingSurface::new(Size::new(400.0, 300.0));
//!
//! surface.set_stroke(Color::RED, &Stroke::new(2.0));
//! surface.draw_line(Point::new(0.0, 0.0), Point::new(100.0, 100.0));
//!
//! surface.set_fill(Color::BLUE);
//! surface.fill_polygon(&[
//!     Point::new(0.0, 0.0),
//!     Point::new(50.0, 0.0),
//!     Point::new(0.0, 50.0),
//! ]);
//!
//! assert_eq!(surface.commands().len(), 4);
//! ```

pub mod color;
pub mod draw;
pub mod geometry;

pub use color::Color;
pub use draw::{DrawCommand, DrawSurface, LineCap, RecordingSurface, Stroke};
pub use geometry::{Point, Size};
