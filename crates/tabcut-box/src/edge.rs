//! One edge of a panel, with its finger joint.

use tabcut_geom::{draw_horiz, Dim, Line, Point2, QuarterTurn};

/// Inputs for an [`Edge`].
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeInfo {
    /// Whether the edge's straight run extends to the bounding box.
    pub is_wide: bool,
    /// Whether the edge's corners extend to the bounding box. Tall edges
    /// receive fingers (notches); short edges carry them.
    pub is_tall: bool,
    /// Width of each tab or gap segment.
    pub notch_width: Dim,
    /// Depth of this edge's joint (material thickness).
    pub notch_height: Dim,
    /// Depth of the joining edges' joints.
    pub notch_height_other: Dim,
    /// Number of tabs.
    pub notch_count: u32,
}

/// Whether a finger sticks out of the panel or is cut into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabKind {
    /// Material protrudes past the inner line.
    Protrusion,
    /// Material is removed down to the inner line.
    Notch,
}

/// A finger position along an edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Tab {
    /// Start of the finger on the outer line.
    pub start: Point2,
    /// End of the finger on the outer line.
    pub end: Point2,
    /// Distance from the edge's outer start to `start`.
    pub offset: f64,
    /// Protrusion or notch.
    pub kind: TabKind,
}

impl Tab {
    /// Finger width.
    pub fn width(&self) -> f64 {
        (self.end - self.start).norm()
    }
}

/// Lines for one edge of a side.
///
/// Built as the south edge drawn left to right from `bb_left`, then
/// rotated counter-clockwise about `bb_left`. The outer line sits on the
/// bounding box; the inner line is `notch_height` further in. Which pieces
/// of each are real cuts depends on `is_wide` and `is_tall`.
#[derive(Debug, Clone)]
pub struct Edge {
    info: EdgeInfo,
    rotation: QuarterTurn,
    bb_left: Point2,
    bb_right: Point2,
    inner_bb_left: Point2,
    lines: Vec<Line>,
    tabs: Vec<Tab>,
}

impl Edge {
    /// Build an edge starting at the outer bounding-box point `bb_left`.
    pub fn new(info: EdgeInfo, bb_left: Point2, rotation: QuarterTurn) -> Self {
        let w = &info.notch_width;
        let h = info.notch_height.dist;
        let ho = &info.notch_height_other;
        let is_tall = info.is_tall;

        // Outer run: corner, gap, (tab, gap) * n, corner.
        let outer_corner_real = info.is_wide && is_tall;
        let outer_l = draw_horiz(bb_left, ho, !outer_corner_real);
        let mut middle = Vec::with_capacity(2 * info.notch_count as usize + 1);
        let mut next = draw_horiz(outer_l.dest, w, !is_tall);
        middle.push(next.clone());
        let mut tabs = Vec::with_capacity(info.notch_count as usize);
        let kind = if is_tall {
            TabKind::Notch
        } else {
            TabKind::Protrusion
        };
        for _ in 0..info.notch_count {
            next = draw_horiz(next.dest, w, is_tall);
            tabs.push(Tab {
                start: next.source,
                end: next.dest,
                offset: next.source.x - bb_left.x,
                kind,
            });
            middle.push(next.clone());
            next = draw_horiz(next.dest, w, !is_tall);
            middle.push(next.clone());
        }
        let outer_r = draw_horiz(next.dest, ho, !outer_corner_real);
        let bb_right = outer_r.dest;

        // Inner run mirrors the outer one with cuts and gaps swapped, except
        // at the corners.
        let inner_corner_real = info.is_wide && !is_tall;
        let mut inner_l = outer_l.shift_vertically(h);
        inner_l.is_construction = !inner_corner_real;
        let inner_bb_left = inner_l.dest;
        let mut inner_r = outer_r.shift_vertically(h);
        inner_r.is_construction = !inner_corner_real;

        let mut outer = Vec::with_capacity(middle.len() + 2);
        outer.push(outer_l);
        outer.extend(middle.iter().cloned());
        outer.push(outer_r);

        let mut inner = Vec::with_capacity(outer.len());
        inner.push(inner_l);
        inner.extend(middle.iter().map(|l| l.toggle_construction_and_shift(h)));
        inner.push(inner_r);

        // Joints: a vertical wherever a real line switches between inner
        // and outer.
        let verticals: Vec<Line> = (0..outer.len() - 1)
            .map(|i| {
                let step = (!inner[i].is_construction && !outer[i + 1].is_construction)
                    || (!outer[i].is_construction && !inner[i + 1].is_construction);
                Line::new(inner[i].dest, outer[i].dest, !step)
            })
            .collect();

        let mut lines = inner;
        lines.extend(outer);
        lines.extend(verticals);

        let mut edge = Self {
            info,
            rotation: QuarterTurn::None,
            bb_left,
            bb_right,
            inner_bb_left,
            lines,
            tabs,
        };
        edge.rotate(rotation);
        edge
    }

    fn rotate(&mut self, turn: QuarterTurn) {
        if turn == QuarterTurn::None {
            return;
        }
        let around = self.bb_left;
        for line in &mut self.lines {
            *line = line.rotate_about(turn, around);
        }
        for tab in &mut self.tabs {
            tab.start = turn.rotate_about(tab.start, around);
            tab.end = turn.rotate_about(tab.end, around);
        }
        self.bb_right = turn.rotate_about(self.bb_right, around);
        self.inner_bb_left = turn.rotate_about(self.inner_bb_left, around);
        self.rotation = turn;
    }

    /// Inputs this edge was built from.
    pub fn info(&self) -> &EdgeInfo {
        &self.info
    }

    /// Rotation applied after construction.
    pub fn rotation(&self) -> QuarterTurn {
        self.rotation
    }

    /// Outer bounding-box point the edge starts from.
    pub fn bb_left(&self) -> Point2 {
        self.bb_left
    }

    /// Outer bounding-box point the edge ends at.
    pub fn bb_right(&self) -> Point2 {
        self.bb_right
    }

    /// Inner bounding-box corner nearest `bb_left`.
    pub fn inner_bb_left(&self) -> Point2 {
        self.inner_bb_left
    }

    /// All lines, construction included.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Finger positions, in drawing order.
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    /// Outer length: both corners plus every segment.
    pub fn length(&self) -> f64 {
        2.0 * self.info.notch_height_other.dist
            + f64::from(2 * self.info.notch_count + 1) * self.info.notch_width.dist
    }
}
