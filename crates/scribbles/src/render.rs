//! Drawing surfaces for finished point sequences.
//!
//! The generators never draw; they hand points to a [`RenderSink`]. The
//! bundled [`SvgCanvas`] uses turtle-style coordinates: the origin is the
//! center of the canvas and y grows upward.
//!
//! ## Rust Lesson #15: Traits as Seams
//!
//! Code that draws takes `&mut impl RenderSink` (or `&mut dyn RenderSink`),
//! so tests and other backends can stand in for the SVG canvas.

use std::fs;
use std::path::Path;

use crate::color::Rgb;
use crate::error::{Result, ScribbleError};
use crate::geometry::Point;

/// Extra canvas around the drawing in exported files, so strokes touching
/// the edge are not cut off by one pixel.
pub const DEFAULT_EXPORT_PADDING: f64 = 1.0;

/// Where the pen is and whether moving it leaves a line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenCursor {
    position: Point,
    pen_down: bool,
}

impl PenCursor {
    /// A raised pen at `position`.
    pub fn new(position: Point) -> Self {
        Self { position, pen_down: false }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn is_down(&self) -> bool {
        self.pen_down
    }

    pub fn lift(&mut self) {
        self.pen_down = false;
    }

    pub fn lower(&mut self) {
        self.pen_down = true;
    }

    /// Move to `p`, returning the segment drawn if the pen was down.
    pub fn goto(&mut self, p: Point) -> Option<(Point, Point)> {
        let from = std::mem::replace(&mut self.position, p);
        self.pen_down.then_some((from, p))
    }
}

impl Default for PenCursor {
    fn default() -> Self {
        Self::new(Point::ORIGIN)
    }
}

/// Pen color and width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Rgb,
    pub width: f64,
}

impl Stroke {
    pub fn new(color: Rgb, width: f64) -> Self {
        Self { color, width }
    }
}

impl Default for Stroke {
    fn default() -> Self {
        Self::new(Rgb::BLACK, 1.0)
    }
}

/// Anything that can draw point sequences and save the result.
pub trait RenderSink {
    /// Jump to the first point, then draw straight lines through the rest.
    fn draw_path(&mut self, points: &[Point], stroke: &Stroke);

    /// Like `draw_path`, plus a line back to the first point.
    fn draw_closed_path(&mut self, points: &[Point], stroke: &Stroke);

    /// Fill the polygon through `points` and outline it.
    fn fill_path(&mut self, points: &[Point], fill: Rgb, stroke: &Stroke);

    /// A filled circle.
    fn draw_dot(&mut self, center: Point, diameter: f64, color: Rgb);

    fn export(&self, path: &Path) -> Result<()>;
}

/// An SVG document built up in memory.
#[derive(Debug, Clone)]
pub struct SvgCanvas {
    width: f64,
    height: f64,
    background: Rgb,
    padding: f64,
    cursor: PenCursor,
    elements: Vec<String>,
}

impl SvgCanvas {
    /// A blank canvas of `width` × `height` pixels.
    pub fn new(width: f64, height: f64, background: Rgb) -> Result<Self> {
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(ScribbleError::InvalidCanvas { width, height });
        }
        Ok(Self {
            width,
            height,
            background,
            padding: DEFAULT_EXPORT_PADDING,
            cursor: PenCursor::default(),
            elements: Vec::new(),
        })
    }

    /// Padding added on every side of the exported image (negative values
    /// are treated as zero).
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = if padding.is_finite() { padding.max(0.0) } else { 0.0 };
        self
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    pub fn padding(&self) -> f64 {
        self.padding
    }

    pub fn cursor(&self) -> PenCursor {
        self.cursor
    }

    /// Number of drawn elements (the background is not counted).
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Canvas coordinates to SVG user units.
    #[inline]
    pub fn to_svg_coords(&self, p: Point) -> (f64, f64) {
        (p.x + self.width / 2.0, self.height / 2.0 - p.y)
    }

    /// Trace `points` with the pen and return the SVG coordinate list.
    ///
    /// Non-finite points cannot be written to SVG and are skipped.
    fn trace(&mut self, points: &[Point]) -> Vec<String> {
        let finite: Vec<Point> = points.iter().copied().filter(Point::is_finite).collect();
        if finite.len() < points.len() {
            log::debug!("skipping {} non-finite points", points.len() - finite.len());
        }
        let Some((&first, rest)) = finite.split_first() else {
            return Vec::new();
        };

        self.cursor.lift();
        self.cursor.goto(first);
        self.cursor.lower();
        let mut coords = vec![self.format_point(first)];
        for &p in rest {
            if let Some((_, to)) = self.cursor.goto(p) {
                coords.push(self.format_point(to));
            }
        }
        self.cursor.lift();
        coords
    }

    fn format_point(&self, p: Point) -> String {
        let (x, y) = self.to_svg_coords(p);
        format!("{:.2},{:.2}", x, y)
    }

    /// Render the whole document.
    pub fn to_svg(&self) -> String {
        let w = self.width + 2.0 * self.padding;
        let h = self.height + 2.0 * self.padding;
        // 0.0 - p, not -p: zero padding must print as "0.00", not "-0.00".
        let min = 0.0 - self.padding;
        let mut svg = String::new();
        svg.push_str(&format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{:.2}" height="{:.2}" viewBox="{:.2} {:.2} {:.2} {:.2}">
  <rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"/>
"#,
            w, h, min, min, w, h,
            min, min, w, h, self.background
        ));
        for element in &self.elements {
            svg.push_str("  ");
            svg.push_str(element);
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }
}

fn stroke_attrs(stroke: &Stroke) -> String {
    format!(
        r#"stroke="{}" stroke-width="{:.2}" stroke-linecap="round" stroke-linejoin="round""#,
        stroke.color, stroke.width
    )
}

impl RenderSink for SvgCanvas {
    fn draw_path(&mut self, points: &[Point], stroke: &Stroke) {
        let coords = self.trace(points);
        if coords.len() < 2 {
            return;
        }
        self.elements.push(format!(
            r#"<polyline points="{}" fill="none" {}/>"#,
            coords.join(" "),
            stroke_attrs(stroke)
        ));
    }

    fn draw_closed_path(&mut self, points: &[Point], stroke: &Stroke) {
        let coords = self.trace(points);
        if coords.len() < 2 {
            return;
        }
        self.elements.push(format!(
            r#"<polygon points="{}" fill="none" {}/>"#,
            coords.join(" "),
            stroke_attrs(stroke)
        ));
    }

    fn fill_path(&mut self, points: &[Point], fill: Rgb, stroke: &Stroke) {
        let coords = self.trace(points);
        if coords.len() < 3 {
            return;
        }
        self.elements.push(format!(
            r#"<polygon points="{}" fill="{}" {}/>"#,
            coords.join(" "),
            fill,
            stroke_attrs(stroke)
        ));
    }

    fn draw_dot(&mut self, center: Point, diameter: f64, color: Rgb) {
        if !(center.is_finite() && diameter > 0.0 && diameter.is_finite()) {
            return;
        }
        self.cursor.lift();
        self.cursor.goto(center);
        let (cx, cy) = self.to_svg_coords(center);
        self.elements.push(format!(
            r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}"/>"#,
            cx, cy, diameter / 2.0, color
        ));
    }

    fn export(&self, path: &Path) -> Result<()> {
        let io_err = |source| ScribbleError::Io { path: path.to_path_buf(), source };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, self.to_svg()).map_err(io_err)?;
        log::info!("Wrote {} ({} elements)", path.display(), self.elements.len());
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use quick_xml::events::Event;
    use quick_xml::reader::Reader;

    use super::*;

    type Element = (String, HashMap<String, String>);

    /// Every start/empty element with its attributes, in document order.
    fn elements(svg: &str) -> Vec<Element> {
        let mut reader = Reader::from_str(svg);
        reader.config_mut().trim_text(true);
        let mut out = Vec::new();
        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                    let name = String::from_utf8(e.name().as_ref().to_vec()).unwrap();
                    let attrs = e
                        .attributes()
                        .flatten()
                        .map(|a| {
                            let key = String::from_utf8(a.key.as_ref().to_vec()).unwrap();
                            let value = String::from_utf8(a.value.to_vec()).unwrap();
                            (key, value)
                        })
                        .collect();
                    out.push((name, attrs));
                }
                Ok(Event::Eof) => break,
                Err(e) => panic!("invalid SVG at {}: {}", reader.error_position(), e),
                _ => {}
            }
        }
        out
    }

    fn canvas() -> SvgCanvas {
        SvgCanvas::new(100.0, 80.0, Rgb::WHITE).unwrap()
    }

    #[test]
    fn pen_cursor_draws_only_when_down() {
        let mut pen = PenCursor::default();
        assert_eq!(pen.goto(Point::new(1.0, 1.0)), None);
        pen.lower();
        assert_eq!(
            pen.goto(Point::new(2.0, 3.0)),
            Some((Point::new(1.0, 1.0), Point::new(2.0, 3.0)))
        );
        pen.lift();
        assert!(!pen.is_down());
        assert_eq!(pen.position(), Point::new(2.0, 3.0));
    }

    #[test]
    fn rejects_empty_canvas() {
        assert!(matches!(
            SvgCanvas::new(0.0, 10.0, Rgb::WHITE),
            Err(ScribbleError::InvalidCanvas { .. })
        ));
        assert!(SvgCanvas::new(10.0, f64::NAN, Rgb::WHITE).is_err());
    }

    #[test]
    fn origin_is_canvas_center_with_y_up() {
        let c = canvas();
        assert_eq!(c.to_svg_coords(Point::ORIGIN), (50.0, 40.0));
        assert_eq!(c.to_svg_coords(Point::new(10.0, 10.0)), (60.0, 30.0));
    }

    #[test]
    fn empty_canvas_has_background_only() {
        let svg = canvas().to_svg();
        let els = elements(&svg);
        assert_eq!(els.len(), 2);
        assert_eq!(els[0].0, "svg");
        assert_eq!(els[0].1["viewBox"], "-1.00 -1.00 102.00 82.00");
        assert_eq!(els[1].0, "rect");
        assert_eq!(els[1].1["fill"], "#ffffff");
    }

    #[test]
    fn padding_is_configurable() {
        let svg = canvas().with_padding(0.0).to_svg();
        let els = elements(&svg);
        assert_eq!(els[0].1["viewBox"], "0.00 0.00 100.00 80.00");
        assert_eq!(els[0].1["width"], "100.00");
    }

    #[test]
    fn path_becomes_polyline() {
        let mut c = canvas();
        let stroke = Stroke::new(Rgb::new(255, 0, 0), 2.0);
        c.draw_path(&[Point::ORIGIN, Point::new(10.0, 10.0), Point::new(-10.0, 0.0)], &stroke);
        let els = elements(&c.to_svg());
        let (name, attrs) = &els[2];
        assert_eq!(name, "polyline");
        assert_eq!(attrs["points"], "50.00,40.00 60.00,30.00 40.00,40.00");
        assert_eq!(attrs["stroke"], "#ff0000");
        assert_eq!(attrs["stroke-width"], "2.00");
        assert_eq!(attrs["fill"], "none");
        assert!(!c.cursor().is_down());
    }

    #[test]
    fn short_input_draws_nothing() {
        let mut c = canvas();
        c.draw_path(&[], &Stroke::default());
        c.draw_path(&[Point::new(3.0, 3.0)], &Stroke::default());
        c.draw_closed_path(&[], &Stroke::default());
        c.fill_path(&[Point::ORIGIN, Point::new(1.0, 1.0)], Rgb::BLACK, &Stroke::default());
        c.draw_dot(Point::ORIGIN, 0.0, Rgb::BLACK);
        assert_eq!(c.element_count(), 0);
    }

    #[test]
    fn non_finite_points_are_skipped() {
        let mut c = canvas();
        c.draw_path(&[Point::ORIGIN, Point::new(f64::NAN, 1.0), Point::new(1.0, 0.0)], &Stroke::default());
        let els = elements(&c.to_svg());
        assert_eq!(els[2].1["points"], "50.00,40.00 51.00,40.00");
    }

    #[test]
    fn fill_and_dot() {
        let mut c = canvas();
        let triangle = [Point::ORIGIN, Point::new(10.0, 0.0), Point::new(0.0, 10.0)];
        c.fill_path(&triangle, Rgb::new(0, 0, 255), &Stroke::default());
        c.draw_dot(Point::new(-10.0, -10.0), 8.0, Rgb::new(0, 255, 0));
        c.draw_closed_path(&triangle, &Stroke::default());
        let els = elements(&c.to_svg());
        assert_eq!(els[2].0, "polygon");
        assert_eq!(els[2].1["fill"], "#0000ff");
        assert_eq!(els[3].0, "circle");
        assert_eq!(els[3].1["cx"], "40.00");
        assert_eq!(els[3].1["cy"], "50.00");
        assert_eq!(els[3].1["r"], "4.00");
        assert_eq!(els[4].0, "polygon");
        assert_eq!(els[4].1["fill"], "none");
    }

    #[test]
    fn export_creates_missing_folders() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("out.svg");
        let mut c = canvas();
        c.draw_path(&[Point::ORIGIN, Point::new(5.0, 5.0)], &Stroke::default());
        c.export(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, c.to_svg());
    }

    #[test]
    fn export_reports_the_failing_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();
        let path = blocker.join("out.svg");
        match canvas().export(&path) {
            Err(ScribbleError::Io { path: p, .. }) => assert!(p.ends_with("out.svg")),
            other => panic!("expected io error, got {:?}", other),
        }
    }
}
