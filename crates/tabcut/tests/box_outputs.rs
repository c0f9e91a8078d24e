//! End-to-end: spec file in, cut file / plot / host document out.

use std::fs;
use std::path::Path;

use approx::assert_relative_eq;
use tabcut::export::dxf::{box_to_dxf, DxfShape, CUTOUT_LAYER};
use tabcut::export::svg::{box_to_svg, SvgParams};
use tabcut::plot::{BoxPlotter, FeatureOperation, SketchDocument};
use tabcut::{BoxSpec, CutoutKind, SideName, TabPolicy};

const PSU: &str = r#"
[box]
width = 120.0
height = 100.0
depth = 220.0
thickness = 4.7625

[[cutout]]
side = "lower"
kind = "circle"
name = "led"
corner_1 = [5.0, 12.0]
corner_2 = [12.8, 19.8]
anchor = "nw"

[[cutout]]
side = "upper"
kind = "rect"
name = "cord"
corner_1 = [12.0, 9.0]
corner_2 = [36.0, 40.0]
anchor = "se"

[[cutout]]
side = "left"
kind = "rect"
name = "fan"
corner_1 = [38.0, 6.0]
corner_2 = [118.0, 86.0]
anchor = "ne"
flip_xy = true
"#;

fn psu() -> tabcut::TabbedBox {
    BoxSpec::parse(PSU, Path::new("psu.toml"))
        .unwrap()
        .build()
        .unwrap()
}

#[test]
fn cutouts_land_inside_their_panels() {
    let tabbed = psu();
    for (side, cutout) in tabbed.cutouts() {
        let inner = tabbed.side(side).inner_bounding_box();
        let b = cutout.bounds();
        assert!(b.min.x >= inner.sw.x && b.max.x <= inner.se.x, "{}", cutout.name);
        assert!(b.min.y >= inner.sw.y && b.max.y <= inner.nw.y, "{}", cutout.name);
    }
}

#[test]
fn anchors_measure_from_the_named_corner() {
    let tabbed = psu();

    let lower = tabbed.side(SideName::Lower);
    let nw = lower.inner_bounding_box().nw;
    let led = &lower.cutouts()[0];
    assert_relative_eq!(led.corner_1.x, nw.x + 5.0, epsilon = 1e-9);
    assert_relative_eq!(led.corner_1.y, nw.y - 12.0, epsilon = 1e-9);
    assert_relative_eq!(led.radius(), 3.9, epsilon = 1e-9);

    let upper = tabbed.side(SideName::Upper);
    let se = upper.inner_bounding_box().se;
    let cord = &upper.cutouts()[0];
    assert_relative_eq!(cord.corner_1.x, se.x - 12.0, epsilon = 1e-9);
    assert_relative_eq!(cord.corner_2.y, se.y + 40.0, epsilon = 1e-9);

    // Flipped: the first coordinate runs down from the north-east corner.
    let left = tabbed.side(SideName::Left);
    let ne = left.inner_bounding_box().ne;
    let fan = &left.cutouts()[0];
    assert_relative_eq!(fan.corner_1.x, ne.x - 6.0, epsilon = 1e-9);
    assert_relative_eq!(fan.corner_1.y, ne.y - 38.0, epsilon = 1e-9);
    assert_eq!(fan.kind, CutoutKind::Rect);
}

#[test]
fn dxf_has_a_closed_outline_per_panel() {
    let tabbed = psu();
    let doc = box_to_dxf(&tabbed).unwrap();

    let mut outline_areas = Vec::new();
    for shape in doc.shapes() {
        if let DxfShape::Polyline { points, closed, layer } = shape {
            assert!(*closed);
            assert_eq!(layer, "0");
            outline_areas.push(tabcut::Outline::new(points.clone()).area());
        }
    }
    assert_eq!(outline_areas.len(), 6);

    // Each panel is close to its nominal face: interior plus or minus the
    // fingers along its edges.
    let t = 4.7625;
    let nominal = [
        (120.0 + 2.0 * t) * (220.0 + 2.0 * t),
        (100.0 + 2.0 * t) * (220.0 + 2.0 * t),
        (120.0 + 2.0 * t) * (100.0 + 2.0 * t),
    ];
    for area in outline_areas {
        assert!(nominal.iter().any(|n| (area - n).abs() < 0.2 * n), "{area}");
    }

    let cutouts = doc
        .shapes()
        .iter()
        .filter(|s| match s {
            DxfShape::Circle { layer, .. } | DxfShape::Rectangle { layer, .. } => {
                layer == CUTOUT_LAYER
            }
            _ => false,
        })
        .count();
    assert_eq!(cutouts, 3);

    let path = std::env::temp_dir().join("tabcut_psu_test.dxf");
    doc.export(&path).unwrap();
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("CUTOUT"));
    let _ = fs::remove_file(&path);
}

#[test]
fn svg_plot_names_every_cutout() {
    let tabbed = psu();
    let svg = box_to_svg(&tabbed, &SvgParams::default());
    for (_, cutout) in tabbed.cutouts() {
        assert!(svg.contains(&format!("id=\"{}\"", cutout.name)));
    }
}

#[test]
fn host_document_records_the_full_run() {
    let tabbed = psu();
    let mut plotter = BoxPlotter::new(SketchDocument::new(), &tabbed).with_scale(0.1);
    plotter.plot_all().unwrap();
    let doc = plotter.into_host();

    assert_eq!(doc.sketches.len(), 9);
    assert_relative_eq!(doc.parameter("THICKNESS").unwrap().value, 4.7625);

    let cuts: Vec<_> = doc
        .features
        .iter()
        .filter(|f| f.operation == FeatureOperation::Cut)
        .collect();
    assert_eq!(cuts.len(), 3);
    for cut in cuts {
        assert_relative_eq!(cut.distance, 0.47625, epsilon = 1e-12);
        assert!(cut.body.is_none());
    }

    let json = doc.to_json().unwrap();
    let back = SketchDocument::from_json(&json).unwrap();
    assert_eq!(back, doc);
}

#[test]
fn tab_width_policy_controls_finger_count() {
    let text = PSU.replace(
        "thickness = 4.7625",
        "thickness = 4.7625\ntabs = { mode = \"width\", width = 10.0 }",
    );
    let spec = BoxSpec::parse(&text, Path::new("psu.toml")).unwrap();
    assert_eq!(spec.params.tabs, TabPolicy::Width { width: 10.0 });
    let tabbed = spec.build().unwrap();
    let layouts = tabbed.layouts();
    // 120 / 10 -> 11 segments, 100 / 10 -> 9, 220 / 10 -> 21
    assert_eq!(layouts.width.count, 5);
    assert_eq!(layouts.height.count, 4);
    assert_eq!(layouts.depth.count, 10);
    assert_relative_eq!(layouts.height.segment.dist, 100.0 / 9.0);
}
