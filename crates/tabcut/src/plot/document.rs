//! In-memory sketch host.

use serde::{Deserialize, Serialize};
use tabcut_geom::Point2;

use super::{FeatureOperation, Result, SketchHost};
use crate::PlotError;

/// A user parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name, e.g. `THICKNESS`.
    pub name: String,
    /// Value in `unit`.
    pub value: f64,
    /// Unit name.
    pub unit: String,
}

/// A line between two sketch points, by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SketchLine {
    /// Index of the start point.
    pub start: usize,
    /// Index of the end point.
    pub end: usize,
    /// Reference only; not part of any profile.
    #[serde(default)]
    pub construction: bool,
}

/// A full circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SketchCircle {
    /// Centre.
    pub center: [f64; 2],
    /// Radius.
    pub radius: f64,
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SketchRect {
    /// One corner.
    pub corner_1: [f64; 2],
    /// The opposite corner.
    pub corner_2: [f64; 2],
}

/// A named 2D sketch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sketch {
    /// Sketch name.
    pub name: String,
    /// Points, referenced by index from `lines`.
    #[serde(default)]
    pub points: Vec<[f64; 2]>,
    /// Lines.
    #[serde(default)]
    pub lines: Vec<SketchLine>,
    /// Circles.
    #[serde(default)]
    pub circles: Vec<SketchCircle>,
    /// Rectangles.
    #[serde(default)]
    pub rectangles: Vec<SketchRect>,
}

impl Sketch {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Whether anything in the sketch could bound a region.
    pub fn has_profile(&self) -> bool {
        !self.circles.is_empty()
            || !self.rectangles.is_empty()
            || self.lines.iter().any(|l| !l.construction)
    }
}

/// An extrusion of a sketch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Sketch that was extruded.
    pub sketch: String,
    /// Extrusion distance in host units.
    pub distance: f64,
    /// New body or cut.
    pub operation: FeatureOperation,
    /// Name given to the new body, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// A [`SketchHost`] that records everything it is asked to do.
///
/// Useful for tests, and as a neutral JSON hand-off for tools that replay
/// the recorded sketches into a real CAD application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SketchDocument {
    /// User parameters in creation order.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Sketches in creation order.
    #[serde(default)]
    pub sketches: Vec<Sketch>,
    /// Extrusions in the order they were made.
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl SketchDocument {
    /// An empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a sketch.
    pub fn sketch(&self, name: &str) -> Option<&Sketch> {
        self.sketches.iter().find(|s| s.name == name)
    }

    /// Look up a parameter.
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    fn sketch_mut(&mut self, name: &str) -> Result<&mut Sketch> {
        self.sketches
            .iter_mut()
            .find(|s| s.name == name)
            .ok_or_else(|| PlotError::MissingSketch(name.to_string()))
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl SketchHost for SketchDocument {
    type PointId = usize;

    fn create_sketch(&mut self, name: &str, overwrite: bool) -> Result<()> {
        match self.sketches.iter().position(|s| s.name == name) {
            Some(_) if !overwrite => {}
            Some(i) => {
                // The replacement goes to the end, like a freshly added sketch.
                self.sketches.remove(i);
                self.sketches.push(Sketch::new(name));
            }
            None => self.sketches.push(Sketch::new(name)),
        }
        Ok(())
    }

    fn retrieve_sketch(&mut self, name: &str) -> Result<()> {
        self.sketch_mut(name).map(|_| ())
    }

    fn add_point(&mut self, sketch: &str, at: Point2) -> Result<usize> {
        let sketch = self.sketch_mut(sketch)?;
        sketch.points.push([at.x, at.y]);
        Ok(sketch.points.len() - 1)
    }

    fn add_line(&mut self, sketch: &str, from: usize, to: usize, construction: bool) -> Result<()> {
        let sketch = self.sketch_mut(sketch)?;
        if let Some(&point) = [from, to].iter().find(|&&i| i >= sketch.points.len()) {
            return Err(PlotError::InvalidPoint {
                sketch: sketch.name.clone(),
                point,
            });
        }
        sketch.lines.push(SketchLine {
            start: from,
            end: to,
            construction,
        });
        Ok(())
    }

    fn add_circle(&mut self, sketch: &str, diameter_start: Point2, diameter_end: Point2) -> Result<()> {
        let center = diameter_start + (diameter_end - diameter_start) / 2.0;
        let radius = (diameter_end - diameter_start).norm() / 2.0;
        self.sketch_mut(sketch)?.circles.push(SketchCircle {
            center: [center.x, center.y],
            radius,
        });
        Ok(())
    }

    fn add_rectangle(&mut self, sketch: &str, corner_1: Point2, corner_2: Point2) -> Result<()> {
        self.sketch_mut(sketch)?.rectangles.push(SketchRect {
            corner_1: [corner_1.x, corner_1.y],
            corner_2: [corner_2.x, corner_2.y],
        });
        Ok(())
    }

    fn extrude(
        &mut self,
        sketch: &str,
        distance: f64,
        operation: FeatureOperation,
        body_name: Option<&str>,
    ) -> Result<()> {
        if !self.sketch_mut(sketch)?.has_profile() {
            return Err(PlotError::NoProfile(sketch.to_string()));
        }
        self.features.push(Feature {
            sketch: sketch.to_string(),
            distance,
            operation,
            body: body_name.map(str::to_string),
        });
        Ok(())
    }

    fn set_parameter(&mut self, name: &str, value: f64) -> Result<()> {
        match self.parameters.iter_mut().find(|p| p.name == name) {
            Some(param) => param.value = value,
            None => self.parameters.push(Parameter {
                name: name.to_string(),
                value,
                unit: "mm".to_string(),
            }),
        }
        Ok(())
    }
}
