//! Decoded glyphs.

/// A point in font design units.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Point {
    /// The horizontal coordinate.
    pub x: f32,
    /// The vertical coordinate.
    pub y: f32,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A drawing command with absolute coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Command {
    /// Start a new subpath.
    MoveTo(Point),
    /// A straight line to the point.
    LineTo(Point),
    /// A quadratic curve with one control point.
    QuadCurveTo(Point, Point),
    /// A cubic curve with two control points.
    CubicCurveTo(Point, Point, Point),
    /// Close the current subpath.
    ClosePath,
}

/// The advance of a glyph.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Metrics {
    /// Horizontal advance in font units.
    pub advance: f32,
}

/// A glyph decoded from its charstring.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    /// The glyph's PostScript name, or `None` if the charset does not name
    /// this glyph.
    pub name: Option<String>,
    /// The outline.
    pub path: Vec<Command>,
    /// The advance.
    pub metrics: Metrics,
}

/// Advance and bounding box of a glyph, in font units.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct GlyphMetrics {
    /// Horizontal advance.
    pub advance: f32,
    /// Left edge of the bounding box.
    pub bearing_x: f32,
    /// Top edge of the bounding box.
    pub bearing_y: f32,
    /// Width of the bounding box.
    pub width: f32,
    /// Height of the bounding box.
    pub height: f32,
}

impl Glyph {
    /// The bounding box of all points of the outline, control points
    /// included, as `(x_min, y_min, x_max, y_max)`.
    pub fn bounds(&self) -> Option<(f32, f32, f32, f32)> {
        let mut points = self.path.iter().flat_map(|command| match *command {
            Command::MoveTo(p) | Command::LineTo(p) => [Some(p), None, None],
            Command::QuadCurveTo(p1, p) => [Some(p1), Some(p), None],
            Command::CubicCurveTo(p1, p2, p) => [Some(p1), Some(p2), Some(p)],
            Command::ClosePath => [None, None, None],
        })
        .flatten();

        let first = points.next()?;
        let init = (first.x, first.y, first.x, first.y);
        Some(points.fold(init, |(x0, y0, x1, y1), p| {
            (x0.min(p.x), y0.min(p.y), x1.max(p.x), y1.max(p.y))
        }))
    }

    /// Advance and bounding box of the glyph.
    ///
    /// A glyph without area (no points, or all of them on one line) is
    /// treated as a box on the baseline spanning the advance.
    pub fn glyph_metrics(&self) -> GlyphMetrics {
        let advance = self.metrics.advance;
        match self.bounds() {
            Some((x_min, y_min, x_max, y_max)) if x_max > x_min && y_max > y_min => {
                GlyphMetrics {
                    advance,
                    bearing_x: x_min,
                    bearing_y: y_max,
                    width: x_max - x_min,
                    height: y_max - y_min,
                }
            }
            _ => GlyphMetrics {
                advance,
                bearing_x: 0.0,
                bearing_y: 0.0,
                width: advance,
                height: 0.0,
            },
        }
    }
}
