//! Drawing a box into a CAD host.
//!
//! A host is anything that holds named 2D sketches and can extrude them:
//! see [`SketchHost`]. [`SketchDocument`] is an in-memory host that records
//! every call and serialises to JSON.
//!
//! [`BoxPlotter`] walks a [`TabbedBox`] and makes one sketch per side and
//! one per cutout. Sides can then be extruded into separate bodies and the
//! cutouts cut through them.

mod document;

pub use document::{Feature, Parameter, Sketch, SketchCircle, SketchDocument, SketchLine, SketchRect};

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tabcut_box::{Cutout, CutoutKind, Side, SideName, TabbedBox};
use tabcut_geom::{Line, Point2, PointKey};
use tracing::{debug, info};

use crate::PlotError;

/// Result type for host operations.
pub type Result<T> = std::result::Result<T, PlotError>;

/// What an extrusion does with the solid it sweeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureOperation {
    /// Make a new component holding a new body.
    NewComponent,
    /// Remove material from what it intersects.
    Cut,
}

/// A CAD application that holds named sketches.
///
/// Coordinates arrive already scaled to host units.
pub trait SketchHost {
    /// Host handle for a sketch point.
    type PointId: Copy;

    /// Create sketch `name`. If it exists, replace it when `overwrite` is
    /// set and reuse it otherwise.
    fn create_sketch(&mut self, name: &str, overwrite: bool) -> Result<()>;

    /// Look up an existing sketch.
    fn retrieve_sketch(&mut self, name: &str) -> Result<()>;

    /// Add a point to a sketch.
    fn add_point(&mut self, sketch: &str, at: Point2) -> Result<Self::PointId>;

    /// Join two points of a sketch.
    fn add_line(
        &mut self,
        sketch: &str,
        from: Self::PointId,
        to: Self::PointId,
        construction: bool,
    ) -> Result<()>;

    /// Add a circle through the two ends of a diameter.
    fn add_circle(&mut self, sketch: &str, diameter_start: Point2, diameter_end: Point2)
        -> Result<()>;

    /// Add an axis-aligned rectangle between opposite corners.
    fn add_rectangle(&mut self, sketch: &str, corner_1: Point2, corner_2: Point2) -> Result<()>;

    /// Extrude the sketch's last profile by `distance`. When `body_name`
    /// is given, the new body takes that name.
    fn extrude(
        &mut self,
        sketch: &str,
        distance: f64,
        operation: FeatureOperation,
        body_name: Option<&str>,
    ) -> Result<()>;

    /// Create or update a user parameter (millimetres).
    fn set_parameter(&mut self, name: &str, value: f64) -> Result<()>;
}

/// A host sketch plus the points already placed in it.
///
/// Points are shared between lines: plotting the same coordinates twice
/// reuses the first host point. Everything is multiplied by `scale` on the
/// way out, for hosts whose internal unit is not the millimetre.
#[derive(Debug, Clone)]
pub struct SketchContainer<P> {
    name: String,
    scale: f64,
    points: HashMap<PointKey, P>,
}

impl<P: Copy> SketchContainer<P> {
    /// Create (or reuse, without `overwrite`) a sketch in the host.
    pub fn create<H>(host: &mut H, name: &str, scale: f64, overwrite: bool) -> Result<Self>
    where
        H: SketchHost<PointId = P>,
    {
        host.create_sketch(name, overwrite)?;
        Ok(Self::attached(name, scale))
    }

    /// Attach to an existing sketch. The point cache starts empty.
    pub fn retrieve<H>(host: &mut H, name: &str, scale: f64) -> Result<Self>
    where
        H: SketchHost<PointId = P>,
    {
        host.retrieve_sketch(name)?;
        Ok(Self::attached(name, scale))
    }

    fn attached(name: &str, scale: f64) -> Self {
        Self {
            name: name.to_string(),
            scale,
            points: HashMap::new(),
        }
    }

    /// Sketch name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit conversion factor.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Number of distinct points placed through this container.
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    fn scaled(&self, p: Point2) -> Point2 {
        Point2::from(p.coords * self.scale)
    }

    /// Host points for `points`, creating the ones not seen yet.
    pub fn plot_points<H>(&mut self, host: &mut H, points: &[Point2]) -> Result<Vec<P>>
    where
        H: SketchHost<PointId = P>,
    {
        let mut plotted = Vec::with_capacity(points.len());
        for &p in points {
            let key = PointKey::from(p);
            let id = match self.points.get(&key) {
                Some(&id) => id,
                None => {
                    let id = host.add_point(&self.name, self.scaled(p))?;
                    self.points.insert(key, id);
                    id
                }
            };
            plotted.push(id);
        }
        Ok(plotted)
    }

    /// Draw one line.
    pub fn plot_line<H>(&mut self, host: &mut H, line: &Line) -> Result<()>
    where
        H: SketchHost<PointId = P>,
    {
        let ids = self.plot_points(host, &line.points())?;
        host.add_line(&self.name, ids[0], ids[1], line.is_construction)
    }

    /// Circle inside the square spanned by two corners. The horizontal
    /// distance sets the diameter.
    pub fn draw_circle_from_corners<H>(
        &self,
        host: &mut H,
        corner_1: Point2,
        corner_2: Point2,
    ) -> Result<()>
    where
        H: SketchHost<PointId = P>,
    {
        let mid_y = (corner_1.y + corner_2.y) / 2.0;
        host.add_circle(
            &self.name,
            self.scaled(Point2::new(corner_1.x, mid_y)),
            self.scaled(Point2::new(corner_2.x, mid_y)),
        )
    }

    /// Rectangle between two opposite corners.
    pub fn draw_rect_from_corners<H>(
        &self,
        host: &mut H,
        corner_1: Point2,
        corner_2: Point2,
    ) -> Result<()>
    where
        H: SketchHost<PointId = P>,
    {
        host.add_rectangle(&self.name, self.scaled(corner_1), self.scaled(corner_2))
    }

    /// Draw a cutout's shape.
    pub fn draw_cutout<H>(&self, host: &mut H, cutout: &Cutout) -> Result<()>
    where
        H: SketchHost<PointId = P>,
    {
        match cutout.kind {
            CutoutKind::Circle => {
                self.draw_circle_from_corners(host, cutout.corner_1, cutout.corner_2)
            }
            CutoutKind::Rect => self.draw_rect_from_corners(host, cutout.corner_1, cutout.corner_2),
        }
    }

    /// Draw every line of a side, skipping construction lines unless asked.
    pub fn draw_side<H>(&mut self, host: &mut H, side: &Side, draw_construction: bool) -> Result<()>
    where
        H: SketchHost<PointId = P>,
    {
        for line in side.all_lines() {
            if draw_construction || !line.is_construction {
                self.plot_line(host, line)?;
            }
        }
        Ok(())
    }

    /// Extrude this sketch by `thickness` (millimetres).
    pub fn extrude<H>(
        &self,
        host: &mut H,
        thickness: f64,
        operation: FeatureOperation,
        name_body: bool,
    ) -> Result<()>
    where
        H: SketchHost<PointId = P>,
    {
        let body = name_body.then_some(self.name.as_str());
        host.extrude(&self.name, thickness * self.scale, operation, body)
    }
}

/// Draws a [`TabbedBox`] into a [`SketchHost`].
///
/// Useful for retrieving side sketches too, when only cutouts need
/// redrawing and the rest of the box is already in the host.
pub struct BoxPlotter<'a, H: SketchHost> {
    host: H,
    tabbed: &'a TabbedBox,
    scale: f64,
    sketches: Vec<SketchContainer<H::PointId>>,
    cutout_sketches: Vec<SketchContainer<H::PointId>>,
}

fn upsert<P>(list: &mut Vec<SketchContainer<P>>, sketch: SketchContainer<P>) {
    match list.iter_mut().find(|s| s.name == sketch.name) {
        Some(slot) => *slot = sketch,
        None => list.push(sketch),
    }
}

impl<'a, H: SketchHost> BoxPlotter<'a, H> {
    /// A plotter over `tabbed` with a scale of 1.0.
    pub fn new(host: H, tabbed: &'a TabbedBox) -> Self {
        Self {
            host,
            tabbed,
            scale: 1.0,
            sketches: Vec::new(),
            cutout_sketches: Vec::new(),
        }
    }

    /// Set the unit conversion factor for sketches made from now on.
    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Give the host back.
    pub fn into_host(self) -> H {
        self.host
    }

    /// Side sketches created or retrieved so far.
    pub fn sketches(&self) -> &[SketchContainer<H::PointId>] {
        &self.sketches
    }

    /// Cutout sketches created so far.
    pub fn cutout_sketches(&self) -> &[SketchContainer<H::PointId>] {
        &self.cutout_sketches
    }

    /// Push the labelled box dimensions as host parameters.
    pub fn set_params(&mut self) -> Result<()> {
        for dim in self.tabbed.parameters() {
            if let Some(label) = dim.label() {
                self.host.set_parameter(label, dim.dist)?;
            }
        }
        Ok(())
    }

    /// One sketch per side, named after the side.
    pub fn sketch_sides(
        &mut self,
        draw: bool,
        draw_construction: bool,
        overwrite: bool,
    ) -> Result<()> {
        let tabbed = self.tabbed;
        for side in tabbed.sides() {
            let mut sketch =
                SketchContainer::create(&mut self.host, side.name().as_str(), self.scale, overwrite)?;
            if draw {
                sketch.draw_side(&mut self.host, side, draw_construction)?;
            }
            debug!(sketch = sketch.name(), points = sketch.point_count(), "sketched side");
            upsert(&mut self.sketches, sketch);
        }
        Ok(())
    }

    /// One sketch per cutout, named after the cutout.
    pub fn sketch_cutouts(&mut self, overwrite: bool) -> Result<()> {
        let tabbed = self.tabbed;
        for (side, cutout) in tabbed.cutouts() {
            let sketch = SketchContainer::create(&mut self.host, &cutout.name, self.scale, overwrite)?;
            sketch.draw_cutout(&mut self.host, cutout)?;
            debug!(sketch = sketch.name(), side = %side, kind = cutout.kind.as_str(), "sketched cutout");
            upsert(&mut self.cutout_sketches, sketch);
        }
        Ok(())
    }

    /// Attach to existing sketches by name.
    pub fn retrieve<I, S>(&mut self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            let sketch = SketchContainer::retrieve(&mut self.host, name.as_ref(), self.scale)?;
            upsert(&mut self.sketches, sketch);
        }
        Ok(())
    }

    /// Attach to the six side sketches.
    pub fn retrieve_sides(&mut self) -> Result<()> {
        self.retrieve(SideName::ALL.iter().map(|s| s.as_str()))
    }

    /// Extrude a side or cutout sketch by name.
    pub fn extrude_sketch(
        &mut self,
        name: &str,
        thickness: f64,
        operation: FeatureOperation,
        name_body: bool,
    ) -> Result<()> {
        let sketch = self
            .cutout_sketches
            .iter()
            .chain(self.sketches.iter())
            .find(|s| s.name == name)
            .ok_or_else(|| PlotError::UnknownSketch(name.to_string()))?;
        sketch.extrude(&mut self.host, thickness, operation, name_body)
    }

    /// Extrude sides into new components, one body each, as thick as the
    /// material. `None` extrudes all six.
    pub fn extrude_sides(&mut self, sides: Option<&[SideName]>) -> Result<()> {
        let sides = sides.unwrap_or(&SideName::ALL);
        let thickness = self.tabbed.thickness.dist;
        for side in sides {
            self.extrude_sketch(side.as_str(), thickness, FeatureOperation::NewComponent, true)?;
        }
        Ok(())
    }

    /// Cut every cutout sketch through the material.
    pub fn cut_sides(&mut self) -> Result<()> {
        let thickness = self.tabbed.thickness.dist;
        let names: Vec<String> = self.cutout_sketches.iter().map(|s| s.name.clone()).collect();
        for name in &names {
            self.cut_feature(name, thickness)?;
        }
        Ok(())
    }

    /// Cut one sketch `thickness` deep.
    pub fn cut_feature(&mut self, name: &str, thickness: f64) -> Result<()> {
        self.extrude_sketch(name, thickness, FeatureOperation::Cut, false)
    }

    /// Parameters, side sketches, cutout sketches, side bodies and cuts,
    /// overwriting whatever the host already has.
    pub fn plot_all(&mut self) -> Result<()> {
        self.set_params()?;
        self.sketch_sides(true, false, true)?;
        self.sketch_cutouts(true)?;
        self.extrude_sides(None)?;
        self.cut_sides()?;
        info!(
            sides = self.sketches.len(),
            cutouts = self.cutout_sketches.len(),
            "plotted box"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::HashSet;
    use tabcut_box::{BoxParams, CutoutRequest};

    fn sample() -> TabbedBox {
        let mut tabbed = TabbedBox::new(BoxParams::new(100.0, 50.0, 65.0, 3.0)).unwrap();
        tabbed
            .add_cutout(
                SideName::Lower,
                CutoutRequest::circle(Point2::new(5.0, 5.0), Point2::new(13.0, 13.0))
                    .with_name("led"),
            )
            .unwrap();
        tabbed
            .add_cutout(
                SideName::Upper,
                CutoutRequest::rect(Point2::new(5.0, 5.0), Point2::new(25.0, 15.0))
                    .with_name("vent"),
            )
            .unwrap();
        tabbed
    }

    #[test]
    fn test_points_are_shared_between_lines() {
        let tabbed = sample();
        let bottom = tabbed.side(SideName::Bottom);
        let mut doc = SketchDocument::new();
        let mut sketch = SketchContainer::create(&mut doc, "bottom", 1.0, true).unwrap();
        sketch.draw_side(&mut doc, bottom, false).unwrap();

        let real: Vec<_> = bottom.all_lines().filter(|l| !l.is_construction).collect();
        let distinct: HashSet<PointKey> = real
            .iter()
            .flat_map(|l| l.points())
            .map(PointKey::from)
            .collect();

        let recorded = doc.sketch("bottom").unwrap();
        assert_eq!(recorded.lines.len(), real.len());
        assert_eq!(recorded.points.len(), distinct.len());
        assert_eq!(sketch.point_count(), distinct.len());
        assert!(recorded.lines.iter().all(|l| !l.construction));
    }

    #[test]
    fn test_construction_lines_on_request() {
        let tabbed = sample();
        let bottom = tabbed.side(SideName::Bottom);
        let mut doc = SketchDocument::new();
        let mut sketch = SketchContainer::create(&mut doc, "bottom", 1.0, true).unwrap();
        sketch.draw_side(&mut doc, bottom, true).unwrap();
        let recorded = doc.sketch("bottom").unwrap();
        assert_eq!(recorded.lines.len(), bottom.all_lines().count());
        assert!(recorded.lines.iter().any(|l| l.construction));
    }

    #[test]
    fn test_scale_applies_to_points_and_depth() {
        let tabbed = sample();
        let mut plotter = BoxPlotter::new(SketchDocument::new(), &tabbed).with_scale(0.1);
        plotter.sketch_sides(true, false, true).unwrap();
        plotter.extrude_sides(Some(&[SideName::Right])).unwrap();

        let doc = plotter.into_host();
        let right = tabbed.side(SideName::Right).bounding_box();
        let sketch = doc.sketch("right").unwrap();
        let max_x = sketch.points.iter().map(|p| p[0]).fold(f64::MIN, f64::max);
        assert_relative_eq!(max_x, right.se.x * 0.1, epsilon = 1e-9);

        assert_eq!(doc.features.len(), 1);
        assert_relative_eq!(doc.features[0].distance, 0.3, epsilon = 1e-12);
        assert_eq!(doc.features[0].body.as_deref(), Some("right"));
    }

    #[test]
    fn test_plot_all() {
        let tabbed = sample();
        let mut plotter = BoxPlotter::new(SketchDocument::new(), &tabbed);
        plotter.plot_all().unwrap();
        assert_eq!(plotter.sketches().len(), 6);
        assert_eq!(plotter.cutout_sketches().len(), 2);

        let doc = plotter.into_host();
        assert_eq!(doc.sketches.len(), 8);
        let names: Vec<_> = doc.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["W", "H", "D", "THICKNESS", "SPACING"]);

        let cuts: Vec<_> = doc
            .features
            .iter()
            .filter(|f| f.operation == FeatureOperation::Cut)
            .map(|f| f.sketch.as_str())
            .collect();
        // Cutouts follow layout order: upper before lower.
        assert_eq!(cuts, ["vent", "led"]);
        let bodies = doc
            .features
            .iter()
            .filter(|f| f.operation == FeatureOperation::NewComponent)
            .count();
        assert_eq!(bodies, 6);
    }

    #[test]
    fn test_extrude_unknown_sketch() {
        let tabbed = sample();
        let mut plotter = BoxPlotter::new(SketchDocument::new(), &tabbed);
        assert_eq!(
            plotter.extrude_sides(None),
            Err(PlotError::UnknownSketch("bottom".to_string()))
        );
        assert_eq!(
            plotter.cut_feature("nope", 3.0),
            Err(PlotError::UnknownSketch("nope".to_string()))
        );
    }

    #[test]
    fn test_retrieve_requires_existing_sketches() {
        let tabbed = sample();
        let mut plotter = BoxPlotter::new(SketchDocument::new(), &tabbed);
        assert_eq!(
            plotter.retrieve_sides(),
            Err(PlotError::MissingSketch("bottom".to_string()))
        );

        plotter.sketch_sides(true, false, true).unwrap();
        let doc = plotter.into_host();

        // A second run only re-attaches to the existing sides.
        let mut plotter = BoxPlotter::new(doc, &tabbed);
        plotter.retrieve_sides().unwrap();
        plotter.extrude_sides(Some(&[SideName::Top, SideName::Bottom])).unwrap();
        let doc = plotter.into_host();
        let bodies: Vec<_> = doc.features.iter().filter_map(|f| f.body.as_deref()).collect();
        assert_eq!(bodies, ["top", "bottom"]);
    }

    #[test]
    fn test_sketch_sides_without_drawing() {
        let tabbed = sample();
        let mut plotter = BoxPlotter::new(SketchDocument::new(), &tabbed);
        plotter.sketch_sides(false, false, true).unwrap();
        let doc = plotter.into_host();
        assert_eq!(doc.sketches.len(), 6);
        assert!(doc.sketches.iter().all(|s| s.lines.is_empty()));
    }
}
