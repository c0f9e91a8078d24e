//! Closed outlines and bounding rectangles.

use std::collections::HashMap;

use crate::{GeomError, Line, Point2, PointKey, Result, Tolerance};

/// An axis-aligned bounding rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Lower-left corner.
    pub min: Point2,
    /// Upper-right corner.
    pub max: Point2,
}

impl Bounds {
    /// Bounds of a set of points, or `None` if there are none.
    pub fn from_points<I: IntoIterator<Item = Point2>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut b = Bounds {
            min: first,
            max: first,
        };
        for p in iter {
            b.include(p);
        }
        Some(b)
    }

    /// Grow to contain `p`.
    pub fn include(&mut self, p: Point2) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    /// Smallest bounds containing both.
    pub fn union(&self, other: &Bounds) -> Bounds {
        let mut b = *self;
        b.include(other.min);
        b.include(other.max);
        b
    }

    /// Extent along X.
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Extent along Y.
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// A closed polygon. The closing edge from the last vertex back to the
/// first is implicit.
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    /// Vertices in order.
    pub points: Vec<Point2>,
}

impl Outline {
    /// Create an outline from ordered vertices.
    pub fn new(points: Vec<Point2>) -> Self {
        Self { points }
    }

    /// Chain the non-construction segments of `lines` into one closed loop.
    ///
    /// Segments may be listed in any order and direction. Every endpoint
    /// must be shared by exactly two drawn segments, and all drawn segments
    /// must belong to the same loop.
    pub fn from_lines<'a, I>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Line>,
    {
        let tol = Tolerance::DEFAULT;
        let segments: Vec<&Line> = lines
            .into_iter()
            .filter(|l| !l.is_construction && l.length() > tol.linear)
            .collect();
        if segments.is_empty() {
            return Err(GeomError::EmptyOutline);
        }

        let mut at: HashMap<PointKey, Vec<usize>> = HashMap::new();
        for (i, seg) in segments.iter().enumerate() {
            at.entry(PointKey::new(seg.source)).or_default().push(i);
            at.entry(PointKey::new(seg.dest)).or_default().push(i);
        }
        for (i, seg) in segments.iter().enumerate() {
            for p in seg.points() {
                let degree = at[&PointKey::new(p)].len();
                if degree != 2 {
                    return Err(GeomError::OpenOutline(format!(
                        "segment {i} endpoint ({:.4}, {:.4}) joins {degree} segments",
                        p.x, p.y
                    )));
                }
            }
        }

        let mut used = vec![false; segments.len()];
        let start = segments[0].source;
        let mut points = vec![start];
        let mut current = 0usize;
        let mut cursor = segments[0].dest;
        used[0] = true;
        let mut visited = 1usize;

        while PointKey::new(cursor) != PointKey::new(start) {
            points.push(cursor);
            let next = at[&PointKey::new(cursor)]
                .iter()
                .copied()
                .find(|&j| j != current && !used[j]);
            let Some(j) = next else {
                return Err(GeomError::OpenOutline(format!(
                    "dead end at ({:.4}, {:.4})",
                    cursor.x, cursor.y
                )));
            };
            used[j] = true;
            visited += 1;
            let seg = segments[j];
            cursor = if PointKey::new(seg.source) == PointKey::new(cursor) {
                seg.dest
            } else {
                seg.source
            };
            current = j;
        }

        if visited != segments.len() {
            return Err(GeomError::OpenOutline(format!(
                "{} of {} segments are not on the main loop",
                segments.len() - visited,
                segments.len()
            )));
        }

        Ok(Self { points })
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the outline has no vertices.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Signed area, positive for counter-clockwise winding.
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut area = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            area += self.points[i].x * self.points[j].y;
            area -= self.points[j].x * self.points[i].y;
        }
        area / 2.0
    }

    /// Unsigned area.
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Counter-clockwise winding?
    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Reverse the winding order if needed so the outline runs
    /// counter-clockwise.
    pub fn ensure_ccw(&mut self) {
        if !self.is_ccw() {
            self.points.reverse();
        }
    }

    /// Perimeter length including the closing edge.
    pub fn perimeter(&self) -> f64 {
        let n = self.points.len();
        if n < 2 {
            return 0.0;
        }
        (0..n)
            .map(|i| (self.points[(i + 1) % n] - self.points[i]).norm())
            .sum()
    }

    /// Bounding rectangle.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.points.iter().copied())
    }

    /// Copy with collinear intermediate vertices removed.
    pub fn simplify(&self) -> Outline {
        let tol = Tolerance::DEFAULT.linear;
        let n = self.points.len();
        if n < 4 {
            return self.clone();
        }
        let points = (0..n)
            .filter(|&i| {
                let prev = self.points[(i + n - 1) % n];
                let cur = self.points[i];
                let next = self.points[(i + 1) % n];
                let a = cur - prev;
                let b = next - cur;
                let cross = a.x * b.y - a.y * b.x;
                cross.abs() > tol || a.dot(&b) < 0.0
            })
            .map(|i| self.points[i])
            .collect();
        Outline { points }
    }
}
