//! DXF export for laser cutting.
//!
//! Writes DXF R12 text with panel outlines on layer `0` and cutouts on
//! layer `CUTOUT`, so a cutting service can order the two (cutouts first,
//! then the outer profile).

use std::fmt::Display;
use std::io::{self, Write};
use std::path::Path;

use tabcut_box::{CutoutKind, TabbedBox};
use tabcut_geom::Point2;
use tracing::debug;

use super::write_file;
use crate::ExportError;

/// Layer for panel outlines.
pub const CUT_LAYER: &str = "0";
/// Layer for cutouts.
pub const CUTOUT_LAYER: &str = "CUTOUT";

/// A 2D entity in a [`DxfDocument`].
#[derive(Debug, Clone, PartialEq)]
pub enum DxfShape {
    /// Polyline through the given vertices.
    Polyline {
        /// Vertices in order.
        points: Vec<Point2>,
        /// Whether the last vertex joins the first.
        closed: bool,
        /// Layer name.
        layer: String,
    },
    /// Full circle.
    Circle {
        /// Centre.
        center: Point2,
        /// Radius.
        radius: f64,
        /// Layer name.
        layer: String,
    },
    /// Axis-aligned rectangle between two opposite corners.
    Rectangle {
        /// One corner.
        corner_1: Point2,
        /// The opposite corner.
        corner_2: Point2,
        /// Layer name.
        layer: String,
    },
    /// Single segment.
    Line {
        /// Start point.
        start: Point2,
        /// End point.
        end: Point2,
        /// Layer name.
        layer: String,
    },
}

impl DxfShape {
    fn layer(&self) -> &str {
        match self {
            DxfShape::Polyline { layer, .. }
            | DxfShape::Circle { layer, .. }
            | DxfShape::Rectangle { layer, .. }
            | DxfShape::Line { layer, .. } => layer,
        }
    }
}

/// DXF document builder.
#[derive(Debug, Clone, Default)]
pub struct DxfDocument {
    shapes: Vec<DxfShape>,
}

impl DxfDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add any shape.
    pub fn add_shape(&mut self, shape: DxfShape) {
        self.shapes.push(shape);
    }

    /// Add a polyline on `layer`.
    pub fn add_polyline(&mut self, points: Vec<Point2>, closed: bool, layer: &str) {
        self.shapes.push(DxfShape::Polyline {
            points,
            closed,
            layer: layer.to_string(),
        });
    }

    /// Add a circle on `layer`.
    pub fn add_circle(&mut self, center: Point2, radius: f64, layer: &str) {
        self.shapes.push(DxfShape::Circle {
            center,
            radius,
            layer: layer.to_string(),
        });
    }

    /// Add a rectangle from two opposite corners on `layer`.
    pub fn add_rectangle(&mut self, corner_1: Point2, corner_2: Point2, layer: &str) {
        self.shapes.push(DxfShape::Rectangle {
            corner_1,
            corner_2,
            layer: layer.to_string(),
        });
    }

    /// Add a line segment on `layer`.
    pub fn add_line(&mut self, start: Point2, end: Point2, layer: &str) {
        self.shapes.push(DxfShape::Line {
            start,
            end,
            layer: layer.to_string(),
        });
    }

    /// Shapes added so far.
    pub fn shapes(&self) -> &[DxfShape] {
        &self.shapes
    }

    /// Distinct layer names in first-use order.
    pub fn layers(&self) -> Vec<&str> {
        let mut layers: Vec<&str> = Vec::new();
        for shape in &self.shapes {
            if !layers.contains(&shape.layer()) {
                layers.push(shape.layer());
            }
        }
        layers
    }

    /// Export to a DXF file.
    pub fn export(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        let path = path.as_ref();
        let mut buf = Vec::new();
        self.export_to_writer(&mut buf)?;
        write_file(path, &buf)?;
        debug!(path = %path.display(), shapes = self.shapes.len(), "wrote DXF");
        Ok(())
    }

    /// Render the document as DXF text.
    pub fn to_dxf_string(&self) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.export_to_writer(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Write the document to any writer.
    pub fn export_to_writer(&self, writer: &mut impl Write) -> io::Result<()> {
        // Header: R12, millimetres.
        section(writer, "HEADER")?;
        group(writer, 9, "$ACADVER")?;
        group(writer, 1, "AC1009")?;
        group(writer, 9, "$INSUNITS")?;
        group(writer, 70, 4)?;
        group(writer, 0, "ENDSEC")?;

        let layers = self.layers();
        section(writer, "TABLES")?;
        group(writer, 0, "TABLE")?;
        group(writer, 2, "LAYER")?;
        group(writer, 70, layers.len())?;
        for (i, layer) in layers.iter().enumerate() {
            group(writer, 0, "LAYER")?;
            group(writer, 2, layer)?;
            group(writer, 70, 0)?;
            group(writer, 62, i + 7)?;
            group(writer, 6, "CONTINUOUS")?;
        }
        group(writer, 0, "ENDTAB")?;
        group(writer, 0, "ENDSEC")?;

        section(writer, "ENTITIES")?;
        for shape in &self.shapes {
            match shape {
                DxfShape::Polyline {
                    points,
                    closed,
                    layer,
                } => write_polyline(writer, points, *closed, layer)?,
                DxfShape::Circle {
                    center,
                    radius,
                    layer,
                } => {
                    group(writer, 0, "CIRCLE")?;
                    group(writer, 8, layer)?;
                    coord(writer, 10, *center)?;
                    group(writer, 40, format!("{:.6}", radius))?;
                }
                DxfShape::Rectangle {
                    corner_1,
                    corner_2,
                    layer,
                } => {
                    let (lo, hi) = (corner_1.inf(corner_2), corner_1.sup(corner_2));
                    let points = [
                        lo,
                        Point2::new(hi.x, lo.y),
                        hi,
                        Point2::new(lo.x, hi.y),
                    ];
                    write_polyline(writer, &points, true, layer)?;
                }
                DxfShape::Line { start, end, layer } => {
                    group(writer, 0, "LINE")?;
                    group(writer, 8, layer)?;
                    coord(writer, 10, *start)?;
                    coord(writer, 11, *end)?;
                }
            }
        }
        group(writer, 0, "ENDSEC")?;
        group(writer, 0, "EOF")?;
        Ok(())
    }
}

fn group(writer: &mut impl Write, code: u16, value: impl Display) -> io::Result<()> {
    writeln!(writer, "{}", code)?;
    writeln!(writer, "{}", value)
}

fn section(writer: &mut impl Write, name: &str) -> io::Result<()> {
    group(writer, 0, "SECTION")?;
    group(writer, 2, name)
}

// X uses `code`, Y uses `code + 10`.
fn coord(writer: &mut impl Write, code: u16, p: Point2) -> io::Result<()> {
    group(writer, code, format!("{:.6}", p.x))?;
    group(writer, code + 10, format!("{:.6}", p.y))
}

fn write_polyline(
    writer: &mut impl Write,
    points: &[Point2],
    closed: bool,
    layer: &str,
) -> io::Result<()> {
    group(writer, 0, "LWPOLYLINE")?;
    group(writer, 8, layer)?;
    group(writer, 90, points.len())?;
    group(writer, 70, u8::from(closed))?;
    for p in points {
        coord(writer, 10, *p)?;
    }
    Ok(())
}

/// Build a cut file for every panel of `tabbed`.
///
/// Each panel becomes one closed polyline on [`CUT_LAYER`]; circles and
/// rectangles for cutouts go on [`CUTOUT_LAYER`].
pub fn box_to_dxf(tabbed: &TabbedBox) -> Result<DxfDocument, ExportError> {
    let mut doc = DxfDocument::new();
    for side in tabbed.sides() {
        let outline = side.outline()?;
        debug!(side = %side.name(), vertices = outline.len(), "panel outline");
        doc.add_polyline(outline.points, true, CUT_LAYER);
    }
    for (_, cutout) in tabbed.cutouts() {
        match cutout.kind {
            CutoutKind::Circle => doc.add_circle(cutout.center(), cutout.radius(), CUTOUT_LAYER),
            CutoutKind::Rect => doc.add_rectangle(cutout.corner_1, cutout.corner_2, CUTOUT_LAYER),
        }
    }
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tabcut_box::{BoxParams, CutoutRequest, SideName};

    fn lines(content: &str) -> Vec<&str> {
        content.lines().collect()
    }

    #[test]
    fn test_dxf_rectangle() {
        let mut doc = DxfDocument::new();
        doc.add_rectangle(Point2::new(10.0, 5.0), Point2::new(0.0, 0.0), CUT_LAYER);

        let content = doc.to_dxf_string();
        assert!(content.contains("AC1009"));
        assert!(content.contains("LWPOLYLINE"));
        let l = lines(&content);
        let pos = l.iter().position(|s| *s == "LWPOLYLINE").unwrap();
        // layer, vertex count, closed flag
        assert_eq!(&l[pos + 1..pos + 7], ["8", "0", "90", "4", "70", "1"]);
        // starts from the lower-left corner whatever the corner order
        assert_eq!(&l[pos + 7..pos + 11], ["10", "0.000000", "20", "0.000000"]);
        assert!(content.ends_with("0\nEOF\n"));
    }

    #[test]
    fn test_dxf_circle_and_line() {
        let mut doc = DxfDocument::new();
        doc.add_circle(Point2::new(1.0, 2.0), 3.5, CUTOUT_LAYER);
        doc.add_line(Point2::new(0.0, 0.0), Point2::new(4.0, 0.0), CUT_LAYER);

        let content = doc.to_dxf_string();
        let l = lines(&content);
        let pos = l.iter().position(|s| *s == "CIRCLE").unwrap();
        assert_eq!(l[pos + 2], "CUTOUT");
        assert_eq!(l[pos + 8], "3.500000");
        assert!(l.contains(&"LINE"));
        assert!(l.contains(&"11"));
    }

    #[test]
    fn test_layer_table_lists_used_layers() {
        let mut doc = DxfDocument::new();
        doc.add_circle(Point2::new(0.0, 0.0), 1.0, CUTOUT_LAYER);
        doc.add_circle(Point2::new(5.0, 0.0), 1.0, CUTOUT_LAYER);
        doc.add_polyline(vec![Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)], false, CUT_LAYER);
        assert_eq!(doc.layers(), vec![CUTOUT_LAYER, CUT_LAYER]);

        let content = doc.to_dxf_string();
        assert!(content.contains("TABLES"));
        assert!(content.contains("ENDTAB"));
        assert_eq!(content.matches("CONTINUOUS").count(), 2);
    }

    #[test]
    fn test_box_to_dxf() {
        let mut tabbed = TabbedBox::new(BoxParams::new(100.0, 50.0, 65.0, 3.0)).unwrap();
        tabbed
            .add_cutout(
                SideName::Upper,
                CutoutRequest::circle(Point2::new(5.0, 5.0), Point2::new(13.0, 13.0)),
            )
            .unwrap();
        tabbed
            .add_cutout(
                SideName::Left,
                CutoutRequest::rect(Point2::new(5.0, 5.0), Point2::new(20.0, 10.0)),
            )
            .unwrap();

        let doc = box_to_dxf(&tabbed).unwrap();
        let polylines = doc
            .shapes()
            .iter()
            .filter(|s| matches!(s, DxfShape::Polyline { closed: true, .. }))
            .count();
        assert_eq!(polylines, 6);
        assert_eq!(doc.shapes().len(), 8);

        let path = std::env::temp_dir().join("tabcut_test_box.dxf");
        doc.export(&path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("LWPOLYLINE").count(), 7);
        assert_eq!(content.matches("CIRCLE").count(), 1);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_export_to_bad_path() {
        let doc = DxfDocument::new();
        let err = doc.export("/nonexistent/dir/out.dxf").unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
    }
}
