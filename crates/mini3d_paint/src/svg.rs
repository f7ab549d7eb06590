//! SVG canvas
//!
//! SvgCanvas wraps a RecordingSurface to record one frame, then replays the
//! recorded commands as SVG elements in draw order. Later elements paint over
//! earlier ones, which is exactly what a painter's algorithm frame needs.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use mini3d_core::{Color, DrawCommand, DrawSurface, LineCap, Point, RecordingSurface, Size, Stroke};

use crate::error::SvgError;

/// A drawing surface that produces an SVG document
#[derive(Debug)]
pub struct SvgCanvas {
    recording: RecordingSurface,
    background: Option<Color>,
}

impl SvgCanvas {
    /// Create a canvas with the given viewport size
    pub fn new(width: f32, height: f32) -> Self {
        Self::from_size(Size::new(width, height))
    }

    /// Create from a Size
    pub fn from_size(size: Size) -> Self {
        Self {
            recording: RecordingSurface::new(size),
            background: None,
        }
    }

    /// Paint the whole viewport in `color` before anything else
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Get all recorded commands
    pub fn commands(&self) -> &[DrawCommand] {
        self.recording.commands()
    }

    /// Drop the recorded frame, keeping size and background
    pub fn clear(&mut self) {
        self.recording.clear();
    }

    /// Render the recorded frame as an SVG document
    pub fn to_svg(&self) -> String {
        let size = self.recording.viewport_size();
        let mut out = String::new();

        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = num(size.width),
            h = num(size.height),
        );

        if let Some(background) = self.background {
            let _ = writeln!(
                out,
                r#"  <rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
                num(size.width),
                num(size.height),
                background.to_hex_string()
            );
        }

        let mut stroke_color = Color::BLACK;
        let mut stroke = Stroke::default();
        let mut fill = Color::BLACK;

        for command in self.recording.commands() {
            match command {
                DrawCommand::SetStroke { color, stroke: s } => {
                    stroke_color = *color;
                    stroke = s.clone();
                }
                DrawCommand::SetFill(color) => fill = *color,
                DrawCommand::Line { from, to } => {
                    let _ = writeln!(
                        out,
                        r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}"{}/>"#,
                        num(from.x),
                        num(from.y),
                        num(to.x),
                        num(to.y),
                        stroke_color.to_hex_string(),
                        stroke_attributes(&stroke)
                    );
                }
                DrawCommand::Polygon(points) => {
                    let _ = writeln!(
                        out,
                        r#"  <polygon points="{}" fill="{}"/>"#,
                        point_list(points),
                        fill.to_hex_string()
                    );
                }
            }
        }

        out.push_str("</svg>\n");
        out
    }

    /// Write the recorded frame to `path`
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SvgError> {
        let path = path.as_ref();
        fs::write(path, self.to_svg())?;
        tracing::debug!(
            path = %path.display(),
            commands = self.recording.commands().len(),
            "wrote svg"
        );
        Ok(())
    }
}

impl DrawSurface for SvgCanvas {
    fn set_stroke(&mut self, color: Color, stroke: &Stroke) {
        self.recording.set_stroke(color, stroke);
    }

    fn set_fill(&mut self, color: Color) {
        self.recording.set_fill(color);
    }

    fn draw_line(&mut self, from: Point, to: Point) {
        self.recording.draw_line(from, to);
    }

    fn fill_polygon(&mut self, points: &[Point]) {
        self.recording.fill_polygon(points);
    }

    fn viewport_size(&self) -> Size {
        self.recording.viewport_size()
    }
}

/// Compact number formatting: at most two decimals, no trailing zeros
fn num(v: f32) -> String {
    let s = format!("{:.2}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "-0" | "" => "0".to_string(),
        _ => s.to_string(),
    }
}

fn point_list(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", num(p.x), num(p.y)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn stroke_attributes(stroke: &Stroke) -> String {
    let mut attrs = format!(r#" stroke-width="{}""#, num(stroke.width));
    match stroke.cap {
        LineCap::Butt => {}
        LineCap::Round => attrs.push_str(r#" stroke-linecap="round""#),
        LineCap::Square => attrs.push_str(r#" stroke-linecap="square""#),
    }
    if !stroke.is_solid() {
        let dash = stroke
            .dash
            .iter()
            .map(|d| num(*d))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = write!(attrs, r#" stroke-dasharray="{}""#, dash);
        if stroke.dash_offset != 0.0 {
            let _ = write!(attrs, r#" stroke-dashoffset="{}""#, num(stroke.dash_offset));
        }
    }
    attrs
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_canvas() {
        let canvas = SvgCanvas::new(64.0, 32.0);
        let svg = canvas.to_svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"viewBox="0 0 64 32""#));
        assert!(!svg.contains("<rect"));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn test_background_is_painted_first() {
        let mut canvas = SvgCanvas::new(10.0, 10.0).with_background(Color::WHITE);
        canvas.set_fill(Color::RED);
        canvas.fill_polygon(&[
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(0.0, 5.0),
        ]);

        let svg = canvas.to_svg();
        let rect = svg.find("<rect").unwrap();
        let polygon = svg.find("<polygon").unwrap();
        assert!(rect < polygon);
        assert!(svg.contains(r##"fill="#ffffff""##));
        assert!(svg.contains(r##"<polygon points="0,0 5,0 0,5" fill="#ff0000"/>"##));
    }

    #[test]
    fn test_line_stroke_attributes() {
        let mut canvas = SvgCanvas::new(10.0, 10.0);
        canvas.set_stroke(Color::BLUE, &Stroke::dashed(1.5).with_cap(LineCap::Round));
        canvas.draw_line(Point::new(1.25, 2.0), Point::new(3.0, 4.0));

        let svg = canvas.to_svg();
        assert!(svg.contains(r#"x1="1.25" y1="2" x2="3" y2="4""#));
        assert!(svg.contains(r##"stroke="#0000ff""##));
        assert!(svg.contains(r#"stroke-width="1.5""#));
        assert!(svg.contains(r#"stroke-linecap="round""#));
        assert!(svg.contains(r#"stroke-dasharray="6 3""#));
    }

    #[test]
    fn test_num_formatting() {
        assert_eq!(num(3.0), "3");
        assert_eq!(num(0.5), "0.5");
        assert_eq!(num(-0.001), "0");
        assert_eq!(num(12.345), "12.35");
    }

    #[test]
    fn test_save_writes_document() {
        let mut canvas = SvgCanvas::new(8.0, 8.0);
        canvas.set_stroke(Color::GREEN, &Stroke::new(1.0));
        canvas.draw_line(Point::new(0.0, 0.0), Point::new(8.0, 8.0));

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("frame.svg");
        canvas.save(&path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, canvas.to_svg());
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("frame.svg");

        let err = SvgCanvas::new(4.0, 4.0).save(&path).unwrap_err();
        assert!(matches!(err, SvgError::Io(_)));
        assert!(!path.exists());
    }
}
