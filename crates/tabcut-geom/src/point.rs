//! Point helpers and quarter-turn rotations.

use crate::{Dim, GeomError, Line, Point2, Result, Tolerance, Vec2};

/// Draw a horizontal line of length `dist` starting at `from`.
pub fn draw_horiz(from: Point2, dist: &Dim, is_construction: bool) -> Line {
    let dest = Point2::new(from.x + dist.dist, from.y);
    Line::with_length(from, dest, is_construction, dist.clone())
}

/// Draw a vertical line of length `dist` starting at `from`.
pub fn draw_vert(from: Point2, dist: &Dim, is_construction: bool) -> Line {
    let dest = Point2::new(from.x, from.y + dist.dist);
    Line::with_length(from, dest, is_construction, dist.clone())
}

/// Midpoint of two points.
pub fn midpoint(a: Point2, b: Point2) -> Point2 {
    Point2::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Offset `p` by the coordinates of `origin` (treated as a vector).
pub fn relative_to(p: Point2, origin: Point2) -> Point2 {
    p + origin.coords
}

/// A counter-clockwise rotation by a multiple of 90 degrees.
///
/// Quarter turns use exact sine/cosine tables so rotated coordinates stay
/// bit-for-bit comparable with unrotated ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QuarterTurn {
    /// No rotation.
    #[default]
    None,
    /// 90 degrees counter-clockwise.
    Ccw90,
    /// 180 degrees.
    Half,
    /// 270 degrees counter-clockwise (90 clockwise).
    Ccw270,
}

impl QuarterTurn {
    /// Build from degrees. Negative angles and angles beyond a full turn
    /// wrap around.
    pub fn from_degrees(degrees: i32) -> Result<Self> {
        if degrees % 90 != 0 {
            return Err(GeomError::NotQuarterTurn(degrees));
        }
        Ok(match degrees.rem_euclid(360) {
            0 => QuarterTurn::None,
            90 => QuarterTurn::Ccw90,
            180 => QuarterTurn::Half,
            _ => QuarterTurn::Ccw270,
        })
    }

    /// Rotation in degrees, in `[0, 360)`.
    pub fn degrees(self) -> i32 {
        match self {
            QuarterTurn::None => 0,
            QuarterTurn::Ccw90 => 90,
            QuarterTurn::Half => 180,
            QuarterTurn::Ccw270 => 270,
        }
    }

    fn cos_sin(self) -> (f64, f64) {
        match self {
            QuarterTurn::None => (1.0, 0.0),
            QuarterTurn::Ccw90 => (0.0, 1.0),
            QuarterTurn::Half => (-1.0, 0.0),
            QuarterTurn::Ccw270 => (0.0, -1.0),
        }
    }

    /// Rotate a vector about the origin.
    pub fn rotate_vec(self, v: Vec2) -> Vec2 {
        let (c, s) = self.cos_sin();
        Vec2::new(c * v.x - s * v.y, s * v.x + c * v.y)
    }

    /// Rotate `p` about `around`.
    pub fn rotate_about(self, p: Point2, around: Point2) -> Point2 {
        if self == QuarterTurn::None {
            return p;
        }
        around + self.rotate_vec(p - around)
    }
}

/// A hashable key for a point, quantised to the default tolerance.
///
/// Used to deduplicate endpoints that are shared between lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointKey(i64, i64);

impl PointKey {
    /// Quantise a point.
    pub fn new(p: Point2) -> Self {
        let q = Tolerance::DEFAULT.linear;
        PointKey((p.x / q).round() as i64, (p.y / q).round() as i64)
    }
}

impl From<Point2> for PointKey {
    fn from(p: Point2) -> Self {
        PointKey::new(p)
    }
}
