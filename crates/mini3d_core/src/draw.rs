//! Draw Surface - the 2D primitive provider renderers draw into
//!
//! A [`DrawSurface`] is supplied by the embedding application for the
//! duration of one scene. It exposes the four primitives a painter's
//! algorithm renderer needs:
//!
//! - set the current stroke color and style
//! - set the current fill color
//! - draw a line between two device-space points
//! - fill a closed polygon given its device-space corners in order
//!
//! [`RecordingSurface`] records these calls as [`DrawCommand`]s so they can be
//! replayed into another backend (SVG, a widget toolkit) or inspected.

use smallvec::SmallVec;

use crate::color::Color;
use crate::geometry::{Point, Size};

// ─────────────────────────────────────────────────────────────────────────────
// Stroke Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Line cap style
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineCap {
    /// Flat cap at the endpoint
    #[default]
    Butt,
    /// Rounded cap extending past the endpoint
    Round,
    /// Square cap extending past the endpoint
    Square,
}

/// Stroke style configuration
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    /// Line width in device pixels
    pub width: f32,
    /// Line cap style
    pub cap: LineCap,
    /// Dash pattern (empty for solid line)
    pub dash: Vec<f32>,
    /// Dash offset
    pub dash_offset: f32,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            width: 1.0,
            cap: LineCap::Butt,
            dash: Vec::new(),
            dash_offset: 0.0,
        }
    }
}

impl Stroke {
    /// Create a new solid stroke with the given width
    pub fn new(width: f32) -> Self {
        Self {
            width,
            ..Default::default()
        }
    }

    /// Dashed stroke (dash length four times the width)
    pub fn dashed(width: f32) -> Self {
        Self::new(width).with_dash(vec![width * 4.0, width * 2.0], 0.0)
    }

    /// Dotted stroke
    pub fn dotted(width: f32) -> Self {
        Self::new(width)
            .with_cap(LineCap::Round)
            .with_dash(vec![0.0, width * 2.0], 0.0)
    }

    /// Set line cap style
    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }

    /// Set dash pattern
    pub fn with_dash(mut self, pattern: Vec<f32>, offset: f32) -> Self {
        self.dash = pattern;
        self.dash_offset = offset;
        self
    }

    pub fn is_solid(&self) -> bool {
        self.dash.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Draw Surface Trait
// ─────────────────────────────────────────────────────────────────────────────

/// The drawing primitives a renderer needs from its host
///
/// All coordinates are device-space pixels. Implementations keep a current
/// stroke and fill state; `draw_line` uses the stroke state and
/// `fill_polygon` the fill state.
pub trait DrawSurface {
    /// Set the color and style used by subsequent `draw_line` calls
    fn set_stroke(&mut self, color: Color, stroke: &Stroke);

    /// Set the color used by subsequent `fill_polygon` calls
    fn set_fill(&mut self, color: Color);

    /// Draw a line between two points
    fn draw_line(&mut self, from: Point, to: Point);

    /// Fill the closed polygon through `points`, in order
    fn fill_polygon(&mut self, points: &[Point]);

    /// Size of the drawable area, if known
    fn viewport_size(&self) -> Size {
        Size::ZERO
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Recording Surface
// ─────────────────────────────────────────────────────────────────────────────

/// A draw command that can be recorded and replayed
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    SetStroke { color: Color, stroke: Stroke },
    SetFill(Color),
    Line { from: Point, to: Point },
    Polygon(SmallVec<[Point; 4]>),
}

/// A draw surface that records commands for later execution
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    viewport: Size,
}

impl RecordingSurface {
    /// Create a new recording surface
    pub fn new(viewport: Size) -> Self {
        Self {
            commands: Vec::new(),
            viewport,
        }
    }

    /// Get the recorded commands
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Clear all recorded commands
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Filled polygons in draw order, paired with the fill color in effect
    pub fn polygons(&self) -> Vec<(Color, &[Point])> {
        let mut fill = Color::BLACK;
        let mut out = Vec::new();
        for command in &self.commands {
            match command {
                DrawCommand::SetFill(color) => fill = *color,
                DrawCommand::Polygon(points) => out.push((fill, points.as_slice())),
                _ => {}
            }
        }
        out
    }

    /// Stroked lines in draw order, paired with the stroke color in effect
    pub fn lines(&self) -> Vec<(Color, Point, Point)> {
        let mut stroke = Color::BLACK;
        let mut out = Vec::new();
        for command in &self.commands {
            match command {
                DrawCommand::SetStroke { color, .. } => stroke = *color,
                DrawCommand::Line { from, to } => out.push((stroke, *from, *to)),
                _ => {}
            }
        }
        out
    }
}

impl DrawSurface for RecordingSurface {
    fn set_stroke(&mut self, color: Color, stroke: &Stroke) {
        self.commands.push(DrawCommand::SetStroke {
            color,
            stroke: stroke.clone(),
        });
    }

    fn set_fill(&mut self, color: Color) {
        self.commands.push(DrawCommand::SetFill(color));
    }

    fn draw_line(&mut self, from: Point, to: Point) {
        self.commands.push(DrawCommand::Line { from, to });
    }

    fn fill_polygon(&mut self, points: &[Point]) {
        if points.len() < 3 {
            tracing::trace!(len = points.len(), "skipping degenerate polygon");
            return;
        }
        self.commands
            .push(DrawCommand::Polygon(SmallVec::from_slice(points)));
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }
}
