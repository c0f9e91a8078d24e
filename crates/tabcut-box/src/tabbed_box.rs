//! The six-sided box and its flat layout.

use serde::{Deserialize, Serialize};
use tabcut_geom::{draw_horiz, draw_vert, Bounds, Dim, Line, Point2};
use tracing::info;

use crate::cutout::{Cutout, CutoutRequest};
use crate::side::{EdgeDims, Side, SideInfo, SideName};
use crate::tabs::{tab_layout, TabLayout, TabPolicy};
use crate::{BoxError, Result};

fn default_spacing() -> f64 {
    2.0
}

/// Box inputs. Width, height and depth are interior dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxParams {
    /// Interior width (mm).
    pub width: f64,
    /// Interior height (mm).
    pub height: f64,
    /// Interior depth (mm).
    pub depth: f64,
    /// Material thickness (mm).
    pub thickness: f64,
    /// Gap between panels in the flat layout (mm).
    #[serde(default = "default_spacing")]
    pub spacing: f64,
    /// How tabs are counted.
    #[serde(default)]
    pub tabs: TabPolicy,
    /// South-west corner of the bottom panel.
    #[serde(default)]
    pub origin: [f64; 2],
}

impl BoxParams {
    /// Parameters with default spacing, automatic tabs and the origin at
    /// `(0, 0)`.
    pub fn new(width: f64, height: f64, depth: f64, thickness: f64) -> Self {
        Self {
            width,
            height,
            depth,
            thickness,
            spacing: default_spacing(),
            tabs: TabPolicy::Auto,
            origin: [0.0, 0.0],
        }
    }

    /// Set the layout spacing.
    #[must_use]
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set the tab policy.
    #[must_use]
    pub fn with_tabs(mut self, tabs: TabPolicy) -> Self {
        self.tabs = tabs;
        self
    }

    /// Set the layout origin.
    #[must_use]
    pub fn with_origin(mut self, x: f64, y: f64) -> Self {
        self.origin = [x, y];
        self
    }

    /// Check that every dimension is usable.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("depth", self.depth),
            ("thickness", self.thickness),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(BoxError::InvalidDimension { name, value });
            }
        }
        if !(self.spacing.is_finite() && self.spacing >= 0.0) {
            return Err(BoxError::InvalidDimension {
                name: "spacing",
                value: self.spacing,
            });
        }
        if !self.origin.iter().all(|v| v.is_finite()) {
            return Err(BoxError::InvalidDimension {
                name: "origin",
                value: self.origin[0],
            });
        }
        Ok(())
    }
}

/// Tab layouts for the three box axes.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLayouts {
    /// Along the width.
    pub width: TabLayout,
    /// Along the height.
    pub height: TabLayout,
    /// Along the depth.
    pub depth: TabLayout,
}

/// A finger-jointed box laid out flat.
///
/// ```text
///                    ----------
///          top ->    |  w x d |
///                    ----------
///                    ----------
///        upper ->    |  w x h |
///                    |        |
///                    ----------
///         ---------  ----------  ---------
///         | h x d |  |  w x d |  | h x d |
///         ---------  ----------  ---------
///                    ----------
///        lower ->    |  w x h |
///                    |        |
///                    ----------
/// ```
///
/// The left and right sides sit either side of the bottom, with the top to
/// the right of the right side. The bottom and top carry fingers on every
/// edge; left and right receive them on every edge; upper and lower
/// receive them from the bottom and top and carry them into the walls.
#[derive(Debug, Clone)]
pub struct TabbedBox {
    /// Interior width, labelled `W`.
    pub width: Dim,
    /// Interior height, labelled `H`.
    pub height: Dim,
    /// Interior depth, labelled `D`.
    pub depth: Dim,
    /// Material thickness, labelled `THICKNESS`.
    pub thickness: Dim,
    /// Layout spacing, labelled `SPACING`.
    pub spacing: Dim,
    params: BoxParams,
    layouts: AxisLayouts,
    sides: [Side; 6],
}

impl TabbedBox {
    /// Build all six sides.
    pub fn new(params: BoxParams) -> Result<Self> {
        params.validate()?;

        let width = Dim::labeled(params.width, "W");
        let height = Dim::labeled(params.height, "H");
        let depth = Dim::labeled(params.depth, "D");
        let thickness = Dim::labeled(params.thickness, "THICKNESS");
        let spacing = Dim::labeled(params.spacing, "SPACING");

        let layouts = AxisLayouts {
            width: tab_layout(&width, &thickness, &params.tabs)?,
            height: tab_layout(&height, &thickness, &params.tabs)?,
            depth: tab_layout(&depth, &thickness, &params.tabs)?,
        };
        let axis = |layout: &TabLayout| EdgeDims {
            notch_width: layout.segment.clone(),
            notch_height: thickness.clone(),
            notch_count: layout.count,
        };
        let (w, h, d) = (
            axis(&layouts.width),
            axis(&layouts.height),
            axis(&layouts.depth),
        );

        let side = |name, bb_sw_corner, is_wide, is_tall, ew: &EdgeDims, ns: &EdgeDims| {
            Side::new(
                name,
                SideInfo {
                    bb_sw_corner,
                    is_wide,
                    is_tall,
                    ew: ew.clone(),
                    ns: ns.clone(),
                },
            )
        };

        // The bottom is short and narrow so it matches the lid.
        let origin = Point2::new(params.origin[0], params.origin[1]);
        let bottom = side(SideName::Bottom, origin, false, false, &w, &d);

        // Beside a narrow side, so it must be wide; tall to oppose
        // upper and lower.
        let right_sw = draw_horiz(bottom.bounding_box().se, &spacing, true).dest;
        let right = side(SideName::Right, right_sw, true, true, &h, &d);

        // Against a short side, so it must be tall.
        let upper_sw = draw_vert(bottom.bounding_box().nw, &spacing, true).dest;
        let upper = side(SideName::Upper, upper_sw, false, true, &w, &h);

        let wall_offset = -(&(&spacing + &height) + &(&thickness * 2.0));
        let left_sw = draw_horiz(bottom.bounding_box().sw, &wall_offset, true).dest;
        let left = side(SideName::Left, left_sw, true, true, &h, &d);

        // Beside a wide side, so it must be narrow.
        let top_sw = draw_horiz(right.bounding_box().se, &spacing, true).dest;
        let top = side(SideName::Top, top_sw, false, false, &w, &d);

        let lower_sw = draw_vert(bottom.bounding_box().sw, &wall_offset, true).dest;
        let lower = side(SideName::Lower, lower_sw, false, true, &w, &h);

        info!(
            width = params.width,
            height = params.height,
            depth = params.depth,
            thickness = params.thickness,
            tabs_w = layouts.width.count,
            tabs_h = layouts.height.count,
            tabs_d = layouts.depth.count,
            "built tabbed box"
        );

        Ok(Self {
            width,
            height,
            depth,
            thickness,
            spacing,
            params,
            layouts,
            sides: [bottom, right, upper, left, top, lower],
        })
    }

    /// Inputs the box was built from.
    pub fn params(&self) -> &BoxParams {
        &self.params
    }

    /// Tab layouts per axis.
    pub fn layouts(&self) -> &AxisLayouts {
        &self.layouts
    }

    /// Sides in layout order: bottom, right, upper, left, top, lower.
    pub fn sides(&self) -> &[Side] {
        &self.sides
    }

    /// One side.
    pub fn side(&self, name: SideName) -> &Side {
        &self.sides[name.index()]
    }

    /// Place a cutout on a side. Cutout names are unique across the whole
    /// box and may not be a side name, since each cutout becomes its own
    /// host sketch next to the side sketches.
    pub fn add_cutout(&mut self, side: SideName, request: CutoutRequest) -> Result<&Cutout> {
        let target = &self.sides[side.index()];
        let name = target.cutout_name(&request);
        if name.parse::<SideName>().is_ok() {
            return Err(BoxError::ReservedCutoutName(name));
        }
        if self.cutouts().any(|(_, c)| c.name == name) {
            return Err(BoxError::DuplicateCutout(name));
        }
        self.sides[side.index()].add_cutout(request.with_name(name))
    }

    /// Every cutout with the side it belongs to.
    pub fn cutouts(&self) -> impl Iterator<Item = (SideName, &Cutout)> {
        self.sides
            .iter()
            .flat_map(|s| s.cutouts().iter().map(move |c| (s.name(), c)))
    }

    /// Every line of every side.
    pub fn all_lines(&self) -> impl Iterator<Item = &Line> {
        self.sides.iter().flat_map(Side::all_lines)
    }

    /// Named dimensions a host can store as user parameters.
    pub fn parameters(&self) -> [&Dim; 5] {
        [
            &self.width,
            &self.height,
            &self.depth,
            &self.thickness,
            &self.spacing,
        ]
    }

    /// Bounds of the whole flat layout.
    pub fn bounds(&self) -> Bounds {
        let mut b = Bounds {
            min: self.sides[0].bounding_box().sw,
            max: self.sides[0].bounding_box().ne,
        };
        for side in &self.sides {
            let bb = side.bounding_box();
            b.include(bb.sw);
            b.include(bb.ne);
        }
        b
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> TabbedBox {
        TabbedBox::new(BoxParams::new(100.0, 50.0, 65.0, 3.0)).unwrap()
    }

    #[test]
    fn test_panel_sizes_are_interior_plus_two_walls() {
        let b = sample();
        let expect = |name, w: f64, h: f64| {
            let bb = b.side(name).bounding_box();
            assert_relative_eq!(bb.width(), w + 6.0, epsilon = 1e-9);
            assert_relative_eq!(bb.height(), h + 6.0, epsilon = 1e-9);
        };
        expect(SideName::Bottom, 100.0, 65.0);
        expect(SideName::Top, 100.0, 65.0);
        expect(SideName::Right, 50.0, 65.0);
        expect(SideName::Left, 50.0, 65.0);
        expect(SideName::Upper, 100.0, 50.0);
        expect(SideName::Lower, 100.0, 50.0);
    }

    #[test]
    fn test_layout_positions() {
        let b = sample();
        let bottom = b.side(SideName::Bottom).bounding_box();
        assert_eq!(bottom.sw, Point2::new(0.0, 0.0));

        let right = b.side(SideName::Right).bounding_box();
        assert_relative_eq!(right.sw.x, 108.0);
        assert_relative_eq!(right.sw.y, 0.0);

        let upper = b.side(SideName::Upper).bounding_box();
        assert_relative_eq!(upper.sw.x, 0.0);
        assert_relative_eq!(upper.sw.y, 73.0);

        let left = b.side(SideName::Left).bounding_box();
        assert_relative_eq!(left.sw.x, -58.0);
        assert_relative_eq!(left.se.x, -2.0);

        let top = b.side(SideName::Top).bounding_box();
        assert_relative_eq!(top.sw.x, 108.0 + 56.0 + 2.0);

        let lower = b.side(SideName::Lower).bounding_box();
        assert_relative_eq!(lower.sw.y, -58.0);
        assert_relative_eq!(lower.nw.y, -2.0);
    }

    #[test]
    fn test_every_side_has_closed_outline() {
        let b = sample();
        for side in b.sides() {
            let outline = side.outline().unwrap();
            let bounds = outline.bounds().unwrap();
            let bb = side.bounding_box();
            assert!(bounds.width() <= bb.width() + 1e-9);
            assert!(bounds.height() <= bb.height() + 1e-9);
        }
    }

    #[test]
    fn test_mating_finger_counts_match() {
        let b = sample();
        let count = |name| b.side(name).tabs().count() as u32;
        let l = b.layouts();
        assert_eq!(count(SideName::Bottom), 2 * l.width.count + 2 * l.depth.count);
        assert_eq!(count(SideName::Right), 2 * l.height.count + 2 * l.depth.count);
        assert_eq!(count(SideName::Upper), 2 * l.width.count + 2 * l.height.count);
    }

    #[test]
    fn test_parameters_are_labelled() {
        let b = sample();
        let labels: Vec<_> = b.parameters().into_iter().filter_map(|d| d.label()).collect();
        assert_eq!(labels, ["W", "H", "D", "THICKNESS", "SPACING"]);
        assert_eq!(b.layouts().width.segment.label(), Some("(W / 11)"));
    }

    #[test]
    fn test_invalid_params() {
        assert!(matches!(
            TabbedBox::new(BoxParams::new(0.0, 50.0, 65.0, 3.0)),
            Err(BoxError::InvalidDimension { name: "width", .. })
        ));
        assert!(matches!(
            TabbedBox::new(BoxParams::new(100.0, 50.0, 65.0, f64::NAN)),
            Err(BoxError::InvalidDimension { name: "thickness", .. })
        ));
        assert!(TabbedBox::new(BoxParams::new(100.0, 50.0, 65.0, 3.0).with_spacing(-1.0)).is_err());
        assert!(matches!(
            TabbedBox::new(BoxParams::new(100.0, 8.0, 65.0, 3.0)),
            Err(BoxError::EdgeTooShort { .. })
        ));
    }

    #[test]
    fn test_cutout_names_unique_across_sides() {
        let mut b = sample();
        let req = CutoutRequest::rect(Point2::new(1.0, 1.0), Point2::new(5.0, 5.0))
            .with_name("vent");
        b.add_cutout(SideName::Upper, req.clone()).unwrap();
        assert!(matches!(
            b.add_cutout(SideName::Lower, req),
            Err(BoxError::DuplicateCutout(_))
        ));
        let all: Vec<_> = b.cutouts().map(|(s, c)| (s, c.name.clone())).collect();
        assert_eq!(all, vec![(SideName::Upper, "vent".to_string())]);
    }

    #[test]
    fn test_generated_cutout_name_is_checked_box_wide() {
        let mut b = sample();
        let rect = CutoutRequest::rect(Point2::new(1.0, 1.0), Point2::new(5.0, 5.0));
        b.add_cutout(SideName::Lower, rect.clone().with_name("upper_cutout_0"))
            .unwrap();
        assert!(matches!(
            b.add_cutout(SideName::Upper, rect.clone()),
            Err(BoxError::DuplicateCutout(name)) if name == "upper_cutout_0"
        ));
        assert_eq!(b.cutouts().count(), 1);

        b.add_cutout(SideName::Upper, rect.with_name("vent")).unwrap();
        let names: Vec<_> = b.cutouts().map(|(_, c)| c.name.clone()).collect();
        assert_eq!(names, ["upper_cutout_0", "vent"]);
    }

    #[test]
    fn test_cutout_may_not_take_a_side_name() {
        let mut b = sample();
        let rect = CutoutRequest::rect(Point2::new(1.0, 1.0), Point2::new(5.0, 5.0));
        for name in ["top", "Lower"] {
            assert!(matches!(
                b.add_cutout(SideName::Bottom, rect.clone().with_name(name)),
                Err(BoxError::ReservedCutoutName(_))
            ));
        }
        assert_eq!(b.cutouts().count(), 0);
    }

    #[test]
    fn test_zero_spacing_panels_touch() {
        let b = TabbedBox::new(BoxParams::new(100.0, 50.0, 65.0, 3.0).with_spacing(0.0)).unwrap();
        let bottom = b.side(SideName::Bottom).bounding_box();
        let right = b.side(SideName::Right).bounding_box();
        let upper = b.side(SideName::Upper).bounding_box();
        let left = b.side(SideName::Left).bounding_box();
        assert_relative_eq!(right.sw.x, bottom.se.x);
        assert_relative_eq!(upper.sw.y, bottom.nw.y);
        assert_relative_eq!(left.se.x, bottom.sw.x);
    }

    #[test]
    fn test_origin_shifts_layout() {
        let b = TabbedBox::new(BoxParams::new(100.0, 50.0, 65.0, 3.0).with_origin(10.0, 20.0))
            .unwrap();
        let bounds = b.bounds();
        let base = sample().bounds();
        assert_relative_eq!(bounds.min.x - base.min.x, 10.0);
        assert_relative_eq!(bounds.min.y - base.min.y, 20.0);
        assert_relative_eq!(bounds.width(), base.width());
    }
}
