#![warn(missing_docs)]

//! tabcut — laser-cut tabbed boxes
//!
//! Builds the six finger-jointed panels of a box laid out flat, places
//! cutouts on them, and hands the result to a laser cutter (DXF), a
//! browser (SVG) or a CAD host through the [`plot::SketchHost`] trait.
//!
//! # Example
//!
//! ```rust,no_run
//! use tabcut::{export::dxf::box_to_dxf, BoxParams, CutoutRequest, Point2, SideName, TabbedBox};
//!
//! let mut tabbed = TabbedBox::new(BoxParams::new(100.0, 50.0, 65.0, 3.0)).unwrap();
//! tabbed
//!     .add_cutout(
//!         SideName::Upper,
//!         CutoutRequest::circle(Point2::new(10.0, 10.0), Point2::new(18.0, 18.0)).with_name("jack"),
//!     )
//!     .unwrap();
//! box_to_dxf(&tabbed).unwrap().export("box.dxf").unwrap();
//! ```

use std::path::PathBuf;
use thiserror::Error;

pub mod export;
pub mod plot;

pub use tabcut_box::{
    tab_layout, Anchor, AxisLayouts, BoxError, BoxParams, BoxSpec, Corners, Cutout, CutoutKind,
    CutoutRequest, CutoutSpec, Edge, EdgeDims, EdgeInfo, Side, SideInfo, SideName, Tab,
    TabKind, TabLayout, TabPolicy, TabbedBox,
};
pub use tabcut_geom::{
    midpoint, Bounds, Dim, GeomError, Line, Outline, Point2, QuarterTurn, Tolerance, Vec2,
};

/// Errors returned by the exporters.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Writing an output file failed.
    #[error("failed to write {path}: {source}")]
    Io {
        /// Output path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// Writing to a stream failed.
    #[error("IO error: {0}")]
    Write(#[from] std::io::Error),
    /// A panel could not be turned into an outline.
    #[error(transparent)]
    Box(#[from] BoxError),
    /// Serialising a host document failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors returned while driving a sketch host.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlotError {
    /// The host has no sketch with this name.
    #[error("no sketch named '{0}'")]
    MissingSketch(String),
    /// The plotter never created or retrieved this sketch.
    #[error("sketch '{0}' has not been created or retrieved")]
    UnknownSketch(String),
    /// The sketch has nothing closed to extrude.
    #[error("sketch '{0}' has no profile to extrude")]
    NoProfile(String),
    /// A point handle that does not belong to the sketch.
    #[error("sketch '{sketch}' has no point {point}")]
    InvalidPoint {
        /// Sketch name.
        sketch: String,
        /// Offending handle.
        point: usize,
    },
    /// Any other host failure.
    #[error("host error: {0}")]
    Host(String),
}
