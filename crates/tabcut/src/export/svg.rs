//! SVG plot of a laid-out box, for eyeballing panels before cutting.

use std::fmt::Write;
use std::path::Path;

use tabcut_box::{CutoutKind, TabbedBox};

use super::write_file;
use crate::ExportError;

/// Parameters for SVG export.
#[derive(Debug, Clone)]
pub struct SvgParams {
    /// Width of the SVG in pixels.
    pub width: u32,
    /// Height of the SVG in pixels.
    pub height: u32,
    /// Padding around the content in pixels.
    pub padding: u32,
    /// Stroke width in pixels.
    pub stroke_width: f64,
    /// Colour of cut lines.
    pub cut_color: String,
    /// Colour of construction lines.
    pub construction_color: String,
    /// Colour of cutouts.
    pub cutout_color: String,
    /// Background colour.
    pub background_color: String,
    /// Draw construction lines (dashed).
    pub show_construction: bool,
}

impl Default for SvgParams {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 900,
            padding: 20,
            stroke_width: 1.0,
            cut_color: "#1f3b73".to_string(),
            construction_color: "#b0b0b0".to_string(),
            cutout_color: "#d9534f".to_string(),
            background_color: "#ffffff".to_string(),
            show_construction: false,
        }
    }
}

impl SvgParams {
    /// Set the image size.
    #[must_use]
    pub const fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Also draw construction lines.
    #[must_use]
    pub const fn with_construction(mut self, show: bool) -> Self {
        self.show_construction = show;
        self
    }
}

/// Plot every side and cutout of `tabbed`, scaled to fit.
///
/// Model Y points up; the group transform flips it for SVG.
#[must_use]
pub fn box_to_svg(tabbed: &TabbedBox, params: &SvgParams) -> String {
    let bounds = tabbed.bounds();
    let content_width = bounds.width();
    let content_height = bounds.height();

    let padding = f64::from(params.padding);
    let available_width = 2.0f64.mul_add(-padding, f64::from(params.width));
    let available_height = 2.0f64.mul_add(-padding, f64::from(params.height));

    let scale = if content_width > 0.0 && content_height > 0.0 {
        (available_width / content_width).min(available_height / content_height)
    } else {
        1.0
    };

    let offset_x = padding + content_width.mul_add(-scale, available_width) / 2.0;
    let offset_y = padding + content_height.mul_add(-scale, available_height) / 2.0;
    let stroke = params.stroke_width / scale;

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">
  <rect width="100%" height="100%" fill="{}"/>
  <g transform="translate({:.2},{:.2}) scale({:.6},{:.6})" fill="none" stroke-linecap="round">
"#,
        params.width,
        params.height,
        params.width,
        params.height,
        params.background_color,
        bounds.min.x.mul_add(-scale, offset_x),
        bounds.max.y.mul_add(scale, offset_y),
        scale,
        -scale
    );

    for side in tabbed.sides() {
        let _ = writeln!(svg, r#"    <g id="{}">"#, side.name());
        for line in side.all_lines() {
            let (color, dash) = if line.is_construction {
                if !params.show_construction {
                    continue;
                }
                (&params.construction_color, format!(r#" stroke-dasharray="{:.4}""#, 4.0 * stroke))
            } else {
                (&params.cut_color, String::new())
            };
            let ([x1, x2], [y1, y2]) = line.coords_for_plot();
            let _ = writeln!(
                svg,
                r#"      <line x1="{:.4}" y1="{:.4}" x2="{:.4}" y2="{:.4}" stroke="{}" stroke-width="{:.4}"{}/>"#,
                x1, y1, x2, y2, color, stroke, dash
            );
        }
        for cutout in side.cutouts() {
            match cutout.kind {
                CutoutKind::Circle => {
                    let c = cutout.center();
                    let _ = writeln!(
                        svg,
                        r#"      <circle id="{}" cx="{:.4}" cy="{:.4}" r="{:.4}" stroke="{}" stroke-width="{:.4}"/>"#,
                        cutout.name,
                        c.x,
                        c.y,
                        cutout.radius(),
                        params.cutout_color,
                        stroke
                    );
                }
                CutoutKind::Rect => {
                    let b = cutout.bounds();
                    let _ = writeln!(
                        svg,
                        r#"      <rect id="{}" x="{:.4}" y="{:.4}" width="{:.4}" height="{:.4}" stroke="{}" stroke-width="{:.4}"/>"#,
                        cutout.name,
                        b.min.x,
                        b.min.y,
                        b.width(),
                        b.height(),
                        params.cutout_color,
                        stroke
                    );
                }
            }
        }
        svg.push_str("    </g>\n");
    }
    svg.push_str("  </g>\n");

    let _ = write!(
        svg,
        "  <text x=\"10\" y=\"20\" font-family=\"monospace\" font-size=\"12\" fill=\"#666\">\n\
    {} x {} x {} mm, t={} mm\n\
  </text>\n",
        tabbed.width, tabbed.height, tabbed.depth, tabbed.thickness
    );
    svg.push_str("</svg>");
    svg
}

/// Write the plot to a file.
pub fn export_svg(
    tabbed: &TabbedBox,
    params: &SvgParams,
    path: impl AsRef<Path>,
) -> Result<(), ExportError> {
    write_file(path.as_ref(), box_to_svg(tabbed, params).as_bytes())
}
