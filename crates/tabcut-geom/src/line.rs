//! Line segments.

use crate::{Dim, Point2, QuarterTurn, Vec2};

/// A line segment between two points.
///
/// Construction lines are kept for reference (bounding boxes, joint
/// corners) but are not cut.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Start point.
    pub source: Point2,
    /// End point.
    pub dest: Point2,
    /// Whether this is a reference-only line.
    pub is_construction: bool,
    /// Dimension the line was drawn from, if any.
    pub length: Option<Dim>,
}

impl Line {
    /// A line without an associated dimension.
    pub fn new(source: Point2, dest: Point2, is_construction: bool) -> Self {
        Self {
            source,
            dest,
            is_construction,
            length: None,
        }
    }

    /// A line that remembers the dimension it was drawn with.
    pub fn with_length(source: Point2, dest: Point2, is_construction: bool, length: Dim) -> Self {
        Self {
            source,
            dest,
            is_construction,
            length: Some(length),
        }
    }

    /// Copy shifted by `dy` along Y.
    pub fn shift_vertically(&self, dy: f64) -> Line {
        self.translate(Vec2::new(0.0, dy))
    }

    /// Copy shifted by `dy` along Y with the construction flag flipped.
    pub fn toggle_construction_and_shift(&self, dy: f64) -> Line {
        let mut line = self.shift_vertically(dy);
        line.is_construction = !line.is_construction;
        line
    }

    /// Copy translated by `offset`.
    pub fn translate(&self, offset: Vec2) -> Line {
        Line {
            source: self.source + offset,
            dest: self.dest + offset,
            is_construction: self.is_construction,
            length: self.length.clone(),
        }
    }

    /// Copy rotated about `around`.
    pub fn rotate_about(&self, turn: QuarterTurn, around: Point2) -> Line {
        Line {
            source: turn.rotate_about(self.source, around),
            dest: turn.rotate_about(self.dest, around),
            is_construction: self.is_construction,
            length: self.length.clone(),
        }
    }

    /// Both endpoints.
    pub fn points(&self) -> [Point2; 2] {
        [self.source, self.dest]
    }

    /// `([x0, x1], [y0, y1])`, the shape a plotting routine wants.
    pub fn coords_for_plot(&self) -> ([f64; 2], [f64; 2]) {
        (
            [self.source.x, self.dest.x],
            [self.source.y, self.dest.y],
        )
    }

    /// Euclidean length.
    pub fn length(&self) -> f64 {
        (self.dest - self.source).norm()
    }
}
