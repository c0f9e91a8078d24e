//! Openings cut through a panel.

use serde::{Deserialize, Serialize};
use tabcut_geom::{midpoint, Bounds, Point2, QuarterTurn};

/// Shape of a cutout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CutoutKind {
    /// Circle inscribed in the corners' square. The horizontal corner
    /// distance sets the diameter.
    Circle,
    /// Axis-aligned rectangle between the corners.
    Rect,
}

impl CutoutKind {
    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            CutoutKind::Circle => "circle",
            CutoutKind::Rect => "rect",
        }
    }
}

/// Inner bounding-box corner a cutout is positioned from.
///
/// Coordinates are mirrored for northern and eastern anchors so that
/// positive offsets always point into the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    /// South-west (default).
    #[default]
    Sw,
    /// South-east.
    Se,
    /// North-east.
    Ne,
    /// North-west.
    Nw,
}

impl Anchor {
    /// Anchored on the north side?
    pub fn is_north(self) -> bool {
        matches!(self, Anchor::Ne | Anchor::Nw)
    }

    /// Anchored on the east side?
    pub fn is_east(self) -> bool {
        matches!(self, Anchor::Se | Anchor::Ne)
    }
}

/// A cutout placed on a side, in layout coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Cutout {
    /// Shape.
    pub kind: CutoutKind,
    /// Unique name (also used as the host sketch name).
    pub name: String,
    /// One corner.
    pub corner_1: Point2,
    /// The opposite corner.
    pub corner_2: Point2,
}

impl Cutout {
    /// Bounding rectangle of the two corners.
    pub fn bounds(&self) -> Bounds {
        let mut b = Bounds {
            min: self.corner_1,
            max: self.corner_1,
        };
        b.include(self.corner_2);
        b
    }

    /// Centre of the bounding rectangle.
    pub fn center(&self) -> Point2 {
        midpoint(self.corner_1, self.corner_2)
    }

    /// Endpoints of the circle's horizontal diameter, at the vertical
    /// midpoint of the corners.
    pub fn diameter_points(&self) -> (Point2, Point2) {
        let mid_y = (self.corner_1.y + self.corner_2.y) / 2.0;
        (
            Point2::new(self.corner_1.x, mid_y),
            Point2::new(self.corner_2.x, mid_y),
        )
    }

    /// Circle radius (half the horizontal corner distance).
    pub fn radius(&self) -> f64 {
        (self.corner_2.x - self.corner_1.x).abs() / 2.0
    }

    pub(crate) fn is_degenerate(&self) -> bool {
        let b = self.bounds();
        let eps = tabcut_geom::Tolerance::DEFAULT.linear;
        match self.kind {
            CutoutKind::Circle => b.width() < eps,
            CutoutKind::Rect => b.width() < eps || b.height() < eps,
        }
    }
}

/// A request to place a cutout, relative to an inner corner of a side.
#[derive(Debug, Clone, PartialEq)]
pub struct CutoutRequest {
    /// Shape.
    pub kind: CutoutKind,
    /// First corner, relative to the anchor.
    pub corner_1: Point2,
    /// Opposite corner, relative to the anchor.
    pub corner_2: Point2,
    /// Inner corner used as the origin.
    pub anchor: Anchor,
    /// Name; generated from the side when absent.
    pub name: Option<String>,
    /// Rotation about the anchor, applied last.
    pub rotate: QuarterTurn,
    /// Swap X and Y before placing.
    pub flip_xy: bool,
}

impl CutoutRequest {
    /// A cutout of `kind` between two corners, anchored south-west.
    pub fn new(kind: CutoutKind, corner_1: Point2, corner_2: Point2) -> Self {
        Self {
            kind,
            corner_1,
            corner_2,
            anchor: Anchor::Sw,
            name: None,
            rotate: QuarterTurn::None,
            flip_xy: false,
        }
    }

    /// A rectangular cutout.
    pub fn rect(corner_1: Point2, corner_2: Point2) -> Self {
        Self::new(CutoutKind::Rect, corner_1, corner_2)
    }

    /// A circular cutout.
    pub fn circle(corner_1: Point2, corner_2: Point2) -> Self {
        Self::new(CutoutKind::Circle, corner_1, corner_2)
    }

    /// Set the anchor corner.
    #[must_use]
    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Set the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Rotate about the anchor.
    #[must_use]
    pub fn with_rotation(mut self, rotate: QuarterTurn) -> Self {
        self.rotate = rotate;
        self
    }

    /// Swap X and Y.
    #[must_use]
    pub fn flipped(mut self) -> Self {
        self.flip_xy = true;
        self
    }

    /// Place the request relative to `origin` (the anchor's inner corner).
    pub(crate) fn place(&self, origin: Point2, name: String) -> Cutout {
        let orient = |p: Point2| {
            let x = if self.anchor.is_east() { -p.x } else { p.x };
            let y = if self.anchor.is_north() { -p.y } else { p.y };
            let p = if self.flip_xy {
                Point2::new(y, x)
            } else {
                Point2::new(x, y)
            };
            self.rotate.rotate_about(origin + p.coords, origin)
        };
        Cutout {
            kind: self.kind,
            name,
            corner_1: orient(self.corner_1),
            corner_2: orient(self.corner_2),
        }
    }
}
