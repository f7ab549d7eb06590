//! mini3d paint surfaces
//!
//! Drawing surfaces that turn a rendered frame into something outside the
//! process. [`SvgCanvas`] records one frame through the
//! [`DrawSurface`](mini3d_core::DrawSurface) trait and writes it out as an
//! SVG document.
//!
//! # Example
//!
//! ```rust
//! use mini3d_core::{Color, DrawSurface, Point, Stroke};
//! use mini3d_paint::SvgCanvas;
//!
//! let mut canvas = SvgCanvas::new(100.0, 100.0).with_background(Color::BLACK);
//! canvas.set_stroke(Color::RED, &Stroke::new(2.0));
//! canvas.draw_line(Point::new(10.0, 10.0), Point::new(90.0, 90.0));
//!
//! let svg = canvas.to_svg();
//! assert!(svg.contains("<line"));
//! ```

pub mod error;
pub mod svg;

pub use error::SvgError;
pub use svg::SvgCanvas;
