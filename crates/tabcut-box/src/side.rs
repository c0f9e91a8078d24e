//! A panel of the box.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tabcut_geom::{Dim, Line, Outline, Point2, QuarterTurn};
use tracing::debug;

use crate::cutout::{Anchor, Cutout, CutoutRequest};
use crate::edge::{Edge, EdgeInfo, Tab};
use crate::{BoxError, Result};

/// The six sides of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SideName {
    /// Floor, `W x D`.
    Bottom,
    /// Right wall, `H x D`.
    Right,
    /// Back wall in the layout, `W x H`.
    Upper,
    /// Left wall, `H x D`.
    Left,
    /// Lid, `W x D`.
    Top,
    /// Front wall in the layout, `W x H`.
    Lower,
}

impl SideName {
    /// All sides in layout order.
    pub const ALL: [SideName; 6] = [
        SideName::Bottom,
        SideName::Right,
        SideName::Upper,
        SideName::Left,
        SideName::Top,
        SideName::Lower,
    ];

    /// Lowercase name, also the host sketch name.
    pub fn as_str(self) -> &'static str {
        match self {
            SideName::Bottom => "bottom",
            SideName::Right => "right",
            SideName::Upper => "upper",
            SideName::Left => "left",
            SideName::Top => "top",
            SideName::Lower => "lower",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SideName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for SideName {
    type Err = BoxError;

    fn from_str(s: &str) -> Result<Self> {
        SideName::ALL
            .into_iter()
            .find(|n| n.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| BoxError::UnknownSide(s.to_string()))
    }
}

/// Joint parameters for one pair of opposite edges.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeDims {
    /// Segment width.
    pub notch_width: Dim,
    /// Joint depth (material thickness).
    pub notch_height: Dim,
    /// Number of tabs.
    pub notch_count: u32,
}

/// Inputs for a [`Side`].
#[derive(Debug, Clone, PartialEq)]
pub struct SideInfo {
    /// South-west corner of the outer bounding box.
    pub bb_sw_corner: Point2,
    /// Whether the side's width extends to the bounding box.
    pub is_wide: bool,
    /// Whether the side's corner height extends to the bounding box.
    pub is_tall: bool,
    /// South and north edges.
    pub ew: EdgeDims,
    /// East and west edges.
    pub ns: EdgeDims,
}

/// The four corners of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corners {
    /// South-west.
    pub sw: Point2,
    /// South-east.
    pub se: Point2,
    /// North-east.
    pub ne: Point2,
    /// North-west.
    pub nw: Point2,
}

impl Corners {
    /// The corner for an anchor.
    pub fn get(&self, anchor: Anchor) -> Point2 {
        match anchor {
            Anchor::Sw => self.sw,
            Anchor::Se => self.se,
            Anchor::Ne => self.ne,
            Anchor::Nw => self.nw,
        }
    }

    /// Width along X (south edge).
    pub fn width(&self) -> f64 {
        self.se.x - self.sw.x
    }

    /// Height along Y (west edge).
    pub fn height(&self) -> f64 {
        self.nw.y - self.sw.y
    }
}

/// One panel: four edges drawn counter-clockwise from the south-west
/// corner, and the cutouts placed on it.
#[derive(Debug, Clone)]
pub struct Side {
    name: SideName,
    info: SideInfo,
    south: Edge,
    east: Edge,
    north: Edge,
    west: Edge,
    bounding_box: Corners,
    inner_bounding_box: Corners,
    cutouts: Vec<Cutout>,
}

impl Side {
    /// Build a side's edges.
    pub fn new(name: SideName, info: SideInfo) -> Self {
        // East/west edges swap the roles of wide and tall.
        let ns_info = EdgeInfo {
            is_wide: info.is_tall,
            is_tall: info.is_wide,
            notch_width: info.ns.notch_width.clone(),
            notch_height: info.ns.notch_height.clone(),
            notch_height_other: info.ew.notch_height.clone(),
            notch_count: info.ns.notch_count,
        };
        let ew_info = EdgeInfo {
            is_wide: info.is_wide,
            is_tall: info.is_tall,
            notch_width: info.ew.notch_width.clone(),
            notch_height: info.ew.notch_height.clone(),
            notch_height_other: info.ns.notch_height.clone(),
            notch_count: info.ew.notch_count,
        };

        let south = Edge::new(ew_info.clone(), info.bb_sw_corner, QuarterTurn::None);
        let east = Edge::new(ns_info.clone(), south.bb_right(), QuarterTurn::Ccw90);
        let north = Edge::new(ew_info, east.bb_right(), QuarterTurn::Half);
        let west = Edge::new(ns_info, north.bb_right(), QuarterTurn::Ccw270);

        let bounding_box = Corners {
            sw: info.bb_sw_corner,
            se: south.bb_right(),
            ne: east.bb_right(),
            nw: north.bb_right(),
        };
        let inner_bounding_box = Corners {
            sw: south.inner_bb_left(),
            se: east.inner_bb_left(),
            ne: north.inner_bb_left(),
            nw: west.inner_bb_left(),
        };

        Self {
            name,
            info,
            south,
            east,
            north,
            west,
            bounding_box,
            inner_bounding_box,
            cutouts: Vec::new(),
        }
    }

    /// Which side this is.
    pub fn name(&self) -> SideName {
        self.name
    }

    /// Inputs this side was built from.
    pub fn info(&self) -> &SideInfo {
        &self.info
    }

    /// Edges in drawing order: south, east, north, west.
    pub fn edges(&self) -> [&Edge; 4] {
        [&self.south, &self.east, &self.north, &self.west]
    }

    /// Outer bounding box.
    pub fn bounding_box(&self) -> &Corners {
        &self.bounding_box
    }

    /// Inner bounding box (the interior face of the panel).
    pub fn inner_bounding_box(&self) -> &Corners {
        &self.inner_bounding_box
    }

    /// Every line of every edge, construction included.
    pub fn all_lines(&self) -> impl Iterator<Item = &Line> {
        self.edges().into_iter().flat_map(|e| e.lines().iter())
    }

    /// Lines grouped by edge.
    pub fn edge_lines(&self) -> [&[Line]; 4] {
        self.edges().map(Edge::lines)
    }

    /// Finger positions on all four edges.
    pub fn tabs(&self) -> impl Iterator<Item = &Tab> {
        self.edges().into_iter().flat_map(|e| e.tabs().iter())
    }

    /// The cut outline as a single closed polygon.
    pub fn outline(&self) -> Result<Outline> {
        let outline = Outline::from_lines(self.all_lines())?;
        Ok(outline.simplify())
    }

    /// Cutouts placed on this side.
    pub fn cutouts(&self) -> &[Cutout] {
        &self.cutouts
    }

    /// Name the next cutout placed from `request` will get.
    pub(crate) fn cutout_name(&self, request: &CutoutRequest) -> String {
        request
            .name
            .clone()
            .unwrap_or_else(|| format!("{}_cutout_{}", self.name, self.cutouts.len()))
    }

    /// Place a cutout relative to one of the inner corners.
    ///
    /// Unnamed cutouts are called `<side>_cutout_<n>`.
    pub fn add_cutout(&mut self, request: CutoutRequest) -> Result<&Cutout> {
        let name = self.cutout_name(&request);
        if self.cutouts.iter().any(|c| c.name == name) {
            return Err(BoxError::DuplicateCutout(name));
        }
        let origin = self.inner_bounding_box.get(request.anchor);
        let cutout = request.place(origin, name);
        if cutout.is_degenerate() {
            return Err(BoxError::DegenerateCutout(cutout.name));
        }
        debug!(
            side = %self.name,
            name = %cutout.name,
            kind = cutout.kind.as_str(),
            "placed cutout"
        );
        self.cutouts.push(cutout);
        Ok(&self.cutouts[self.cutouts.len() - 1])
    }
}
