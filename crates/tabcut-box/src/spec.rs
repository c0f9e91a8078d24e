//! Box spec files (`*.toml`).

use std::path::Path;

use serde::{Deserialize, Serialize};
use tabcut_geom::{Point2, QuarterTurn};
use tracing::info;

use crate::cutout::{Anchor, CutoutKind, CutoutRequest};
use crate::side::SideName;
use crate::tabbed_box::{BoxParams, TabbedBox};
use crate::{BoxError, Result};

/// A box and its cutouts, as written in a spec file.
///
/// ```toml
/// [box]
/// width = 120.0
/// height = 100.0
/// depth = 220.0
/// thickness = 4.7625
///
/// [[cutout]]
/// side = "upper"
/// kind = "rect"
/// name = "cord"
/// corner_1 = [12.0, 9.0]
/// corner_2 = [36.0, 40.0]
/// anchor = "se"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxSpec {
    /// Box dimensions.
    #[serde(rename = "box")]
    pub params: BoxParams,

    /// Cutouts, placed in order.
    #[serde(default, rename = "cutout", skip_serializing_if = "Vec::is_empty")]
    pub cutouts: Vec<CutoutSpec>,
}

/// One `[[cutout]]` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutoutSpec {
    /// Side to cut.
    pub side: SideName,
    /// Shape.
    pub kind: CutoutKind,
    /// Optional unique name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// First corner relative to the anchor.
    pub corner_1: [f64; 2],
    /// Opposite corner relative to the anchor.
    pub corner_2: [f64; 2],
    /// Inner corner to measure from.
    #[serde(default)]
    pub anchor: Anchor,
    /// Rotation about the anchor in degrees (multiple of 90).
    #[serde(default)]
    pub rotate: i32,
    /// Swap X and Y.
    #[serde(default)]
    pub flip_xy: bool,
}

impl CutoutSpec {
    /// Convert to a placement request.
    pub fn to_request(&self) -> Result<CutoutRequest> {
        Ok(CutoutRequest {
            kind: self.kind,
            corner_1: Point2::new(self.corner_1[0], self.corner_1[1]),
            corner_2: Point2::new(self.corner_2[0], self.corner_2[1]),
            anchor: self.anchor,
            name: self.name.clone(),
            rotate: QuarterTurn::from_degrees(self.rotate)?,
            flip_xy: self.flip_xy,
        })
    }
}

impl BoxSpec {
    /// A spec with no cutouts.
    pub fn new(params: BoxParams) -> Self {
        Self {
            params,
            cutouts: Vec::new(),
        }
    }

    /// A starter spec: a 100 x 50 x 65 box in 3 mm stock with one round
    /// hole in the upper panel.
    pub fn sample() -> Self {
        Self {
            params: BoxParams::new(100.0, 50.0, 65.0, 3.0).with_spacing(2.0),
            cutouts: vec![CutoutSpec {
                side: SideName::Upper,
                kind: CutoutKind::Circle,
                name: Some("hole".to_string()),
                corner_1: [10.0, 10.0],
                corner_2: [18.0, 18.0],
                anchor: Anchor::Sw,
                rotate: 0,
                flip_xy: false,
            }],
        }
    }

    /// Load a spec from a file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| BoxError::Io {
            path: path.to_owned(),
            source: e,
        })?;
        Self::parse(&content, path)
    }

    /// Parse a spec. `path` is only used in error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let spec: BoxSpec = toml::from_str(content).map_err(|e| BoxError::Parse {
            path: path.to_owned(),
            source: e,
        })?;
        spec.params.validate()?;
        Ok(spec)
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Build the box and place every cutout.
    pub fn build(&self) -> Result<TabbedBox> {
        let mut tabbed = TabbedBox::new(self.params.clone())?;
        for cutout in &self.cutouts {
            tabbed.add_cutout(cutout.side, cutout.to_request()?)?;
        }
        info!(cutouts = self.cutouts.len(), "built box from spec");
        Ok(tabbed)
    }
}
