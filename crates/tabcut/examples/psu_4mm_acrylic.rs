//! Enclosure for a bench power supply, cut from 3/16" (4.7625 mm) acrylic.
//!
//! Lower panel: seven banana-jack pairs, a rocker switch and an LED.
//! Upper panel: power cord and two vents. Left panel: fan opening.
//!
//! Writes `psu_4mm_acrylic.{dxf,svg,json}` to the directory given as the
//! first argument, or the system temp directory.
//!
//! ```sh
//! cargo run -p tabcut --example psu_4mm_acrylic -- out/
//! ```

use std::path::PathBuf;

use tabcut::export::{box_to_dxf, export_svg, SvgParams};
use tabcut::plot::{BoxPlotter, SketchDocument};
use tabcut::{
    midpoint, Anchor, BoxError, BoxParams, CutoutRequest, Point2, SideName, TabbedBox, Vec2,
};

const WIDTH: f64 = 120.0;

fn specify_box() -> Result<TabbedBox, BoxError> {
    let mut tabbed = TabbedBox::new(BoxParams::new(WIDTH, 100.0, 220.0, 4.7625).with_spacing(2.0))?;

    // Front panel. The lower side is drawn upside down, so measure from
    // its north-west inner corner.
    let banana_diam = 7.8;
    let banana_vert_dist = 19.05;
    let banana_sw = Point2::new(5.0, 12.0);
    let pairs = 7;
    let switch = Vec2::new(10.5, 29.0);
    let led_diam = 5.0;
    let led_spacing = 10.0;

    let spacing = (WIDTH - f64::from(pairs) * banana_diam - switch.x) / f64::from(pairs + 2);
    let jack = |p1: Point2, name: String| {
        CutoutRequest::circle(p1, p1 + Vec2::new(banana_diam, banana_diam))
            .with_anchor(Anchor::Nw)
            .with_name(name)
    };

    let mut last_pair = None;
    for i in 0..pairs {
        let bottom = banana_sw + Vec2::new(f64::from(i) * (spacing + banana_diam), 0.0);
        let top = bottom + Vec2::new(0.0, banana_vert_dist);
        tabbed.add_cutout(SideName::Lower, jack(bottom, format!("banana_lower_{i}")))?;
        tabbed.add_cutout(SideName::Lower, jack(top, format!("banana_upper_{i}")))?;
        last_pair = Some((top, bottom + Vec2::new(banana_diam, banana_diam)));
    }

    if let Some((top_p1, bottom_p2)) = last_pair {
        // Right of the last pair, centred between its jacks.
        let switch_p1 = midpoint(top_p1, bottom_p2)
            + Vec2::new(spacing + banana_diam / 2.0, -switch.y / 2.0);
        let switch_p2 = switch_p1 + switch;
        tabbed.add_cutout(
            SideName::Lower,
            CutoutRequest::rect(switch_p1, switch_p2)
                .with_anchor(Anchor::Nw)
                .with_name("switch"),
        )?;

        let led_p1 = midpoint(switch_p1, switch_p2)
            + Vec2::new(-led_diam / 2.0, switch.y / 2.0 + led_spacing);
        tabbed.add_cutout(
            SideName::Lower,
            CutoutRequest::circle(led_p1, led_p1 + Vec2::new(led_diam, led_diam))
                .with_anchor(Anchor::Nw)
                .with_name("led"),
        )?;
    }

    // Rear panel. The supply sits in the south-east corner.
    let vent_far_limit = 61.0;
    let rear = [
        ("cord", Point2::new(12.0, 9.0), Point2::new(36.0, 40.0)),
        ("small_vent", Point2::new(38.0, 5.0), Point2::new(vent_far_limit, 37.0)),
        ("big_vent", Point2::new(8.0, 49.0), Point2::new(vent_far_limit, 87.0)),
    ];
    for (name, p1, p2) in rear {
        tabbed.add_cutout(
            SideName::Upper,
            CutoutRequest::rect(p1, p2)
                .with_anchor(Anchor::Se)
                .with_name(name),
        )?;
    }

    // Fan on the left panel, which is drawn on its side.
    let fan_p1 = Point2::new(38.0, 6.0);
    tabbed.add_cutout(
        SideName::Left,
        CutoutRequest::rect(fan_p1, fan_p1 + Vec2::new(80.0, 80.0))
            .with_anchor(Anchor::Ne)
            .with_name("fan")
            .flipped(),
    )?;

    Ok(tabbed)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir);
    std::fs::create_dir_all(&out_dir)?;

    let tabbed = specify_box()?;
    println!(
        "{} panels, {} cutouts, layout {:.1} x {:.1} mm",
        tabbed.sides().len(),
        tabbed.cutouts().count(),
        tabbed.bounds().width(),
        tabbed.bounds().height()
    );

    let dxf = out_dir.join("psu_4mm_acrylic.dxf");
    box_to_dxf(&tabbed)?.export(&dxf)?;
    println!("Wrote {}", dxf.display());

    let svg = out_dir.join("psu_4mm_acrylic.svg");
    export_svg(&tabbed, &SvgParams::default(), &svg)?;
    println!("Wrote {}", svg.display());

    let mut plotter = BoxPlotter::new(SketchDocument::new(), &tabbed);
    plotter.plot_all()?;
    let json = out_dir.join("psu_4mm_acrylic.json");
    std::fs::write(&json, plotter.into_host().to_json()?)?;
    println!("Wrote {}", json.display());

    Ok(())
}
