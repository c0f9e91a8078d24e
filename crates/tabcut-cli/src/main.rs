//! tabcut CLI - laser-cut tabbed boxes from TOML specs
//!
//! Reads a box spec, builds the six panels and their cutouts, and writes a
//! cut file, a preview or a recorded CAD host document.

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tabcut::export::{box_to_dxf, export_svg, SvgParams};
use tabcut::plot::{BoxPlotter, SketchDocument};
use tabcut::{BoxSpec, TabbedBox};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tabcut")]
#[command(about = "Laser-cut tabbed box generator", long_about = None)]
struct Cli {
    /// Increase logging (-v info, -vv debug, -vvv trace). RUST_LOG wins.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a box spec and write it out
    Generate {
        /// Box spec (.toml)
        spec: PathBuf,
        /// Output file (format determined by extension: .dxf, .svg, .json)
        output: PathBuf,
        /// Include construction lines in SVG output
        #[arg(long)]
        construction: bool,
        /// Unit factor for the host document (0.1 for a centimetre host)
        #[arg(long, default_value_t = 1.0)]
        scale: f64,
    },
    /// Display dimensions, tab layout, panels and cutouts of a box spec
    Info {
        /// Box spec (.toml)
        spec: PathBuf,
    },
    /// Write a starter box spec
    New {
        /// Output .toml file
        output: PathBuf,
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate {
            spec,
            output,
            construction,
            scale,
        } => generate(&spec, &output, construction, scale)?,
        Commands::Info { spec } => show_info(&spec)?,
        Commands::New { output, force } => write_sample(&output, force)?,
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load(spec: &Path) -> Result<TabbedBox> {
    let spec = BoxSpec::from_file(spec)?;
    Ok(spec.build()?)
}

fn generate(spec: &Path, output: &Path, construction: bool, scale: f64) -> Result<()> {
    let tabbed = load(spec)?;

    let ext = output.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext.to_lowercase().as_str() {
        "dxf" => {
            box_to_dxf(&tabbed)?.export(output)?;
        }
        "svg" => {
            let params = SvgParams::default().with_construction(construction);
            export_svg(&tabbed, &params, output)?;
        }
        "json" => {
            if !(scale.is_finite() && scale > 0.0) {
                bail!("Scale must be positive, got {}", scale);
            }
            let mut plotter = BoxPlotter::new(SketchDocument::new(), &tabbed).with_scale(scale);
            plotter.plot_all()?;
            let json = plotter.into_host().to_json()?;
            std::fs::write(output, json)
                .with_context(|| format!("failed to write {}", output.display()))?;
        }
        _ => {
            bail!("Unknown output format: {}", ext);
        }
    }

    info!(spec = %spec.display(), output = %output.display(), "generated");
    println!("Wrote {}", output.display());
    Ok(())
}

fn show_info(spec: &Path) -> Result<()> {
    let tabbed = load(spec)?;
    let params = tabbed.params();

    println!("File: {}", spec.display());
    println!(
        "Box: {} x {} x {} mm (W x H x D), thickness {} mm, spacing {} mm",
        tabbed.width, tabbed.height, tabbed.depth, tabbed.thickness, tabbed.spacing
    );
    println!("Tabs: {:?}", params.tabs);

    let layouts = tabbed.layouts();
    println!();
    println!("Tab layout:");
    for (axis, layout) in [
        ("W", &layouts.width),
        ("H", &layouts.height),
        ("D", &layouts.depth),
    ] {
        println!(
            "  {}: {} tabs, {} segments of {:.3} mm",
            axis,
            layout.count,
            layout.segments(),
            layout.segment.dist
        );
    }

    println!();
    println!("Panels:");
    for side in tabbed.sides() {
        let bb = side.bounding_box();
        let area = side.outline()?.area();
        println!(
            "  {:<7} {:>8.2} x {:<8.2} at ({:.2}, {:.2})  area {:.1} mm²  {} fingers",
            side.name(),
            bb.width(),
            bb.height(),
            bb.sw.x,
            bb.sw.y,
            area,
            side.tabs().count()
        );
    }

    let cutouts: Vec<_> = tabbed.cutouts().collect();
    if !cutouts.is_empty() {
        println!();
        println!("Cutouts:");
        for (side, cutout) in cutouts {
            let b = cutout.bounds();
            println!(
                "  {:<16} {:<6} on {:<6} ({:.2}, {:.2}) - ({:.2}, {:.2})",
                cutout.name,
                cutout.kind.as_str(),
                side,
                b.min.x,
                b.min.y,
                b.max.x,
                b.max.y
            );
        }
    }

    let bounds = tabbed.bounds();
    println!();
    println!(
        "Layout: {:.2} x {:.2} mm",
        bounds.width(),
        bounds.height()
    );

    Ok(())
}

fn write_sample(output: &Path, force: bool) -> Result<()> {
    if output.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", output.display());
    }
    let text = BoxSpec::sample().to_toml()?;
    std::fs::write(output, text).with_context(|| format!("failed to write {}", output.display()))?;
    println!("Wrote {}", output.display());
    Ok(())
}
