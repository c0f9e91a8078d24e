#![warn(missing_docs)]

//! Tabbed box geometry.
//!
//! A [`TabbedBox`] has six [`Side`]s laid out flat as a cross, ready for a
//! laser cutter. Each side has four [`Edge`]s carrying finger joints, plus
//! any number of rectangular or circular [`Cutout`]s.
//!
//! These are plain data; nothing here draws. Host adapters and exporters
//! read the lines and cutouts afterwards.
//!
//! # Example
//!
//! ```
//! use tabcut_box::{BoxParams, SideName, TabbedBox};
//!
//! let tabbed = TabbedBox::new(BoxParams::new(100.0, 50.0, 65.0, 3.0)).unwrap();
//! let bottom = tabbed.side(SideName::Bottom);
//!
//! // Outer size is the interior plus a wall on each side.
//! let bb = bottom.bounding_box();
//! assert!((bb.se.x - bb.sw.x - 106.0).abs() < 1e-9);
//! assert!(bottom.outline().is_ok());
//! ```

mod cutout;
mod edge;
mod side;
mod spec;
mod tabbed_box;
mod tabs;

pub use cutout::{Anchor, Cutout, CutoutKind, CutoutRequest};
pub use edge::{Edge, EdgeInfo, Tab, TabKind};
pub use side::{Corners, EdgeDims, Side, SideInfo, SideName};
pub use spec::{BoxSpec, CutoutSpec};
pub use tabbed_box::{AxisLayouts, BoxParams, TabbedBox};
pub use tabs::{tab_layout, TabLayout, TabPolicy};

use std::path::PathBuf;
use thiserror::Error;

pub use tabcut_geom;

/// Errors from building a box.
#[derive(Debug, Error)]
pub enum BoxError {
    /// A box dimension is not a positive finite number.
    #[error("invalid {name}: {value}")]
    InvalidDimension {
        /// Which dimension.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// An edge cannot hold even a single tab.
    #[error("edge of {length} mm is too short for tabs ({reason})")]
    EdgeTooShort {
        /// Interior edge length.
        length: f64,
        /// What went wrong.
        reason: String,
    },

    /// A cutout with zero width or height.
    #[error("cutout '{0}' has no area")]
    DegenerateCutout(String),

    /// Two cutouts with the same name.
    #[error("duplicate cutout name '{0}'")]
    DuplicateCutout(String),

    /// A cutout named after a side, whose sketch it would replace.
    #[error("cutout name '{0}' is taken by a side")]
    ReservedCutoutName(String),

    /// A side name that is not one of the six.
    #[error("unknown side '{0}'")]
    UnknownSide(String),

    /// Underlying geometry failed.
    #[error(transparent)]
    Geometry(#[from] tabcut_geom::GeomError),

    /// Reading a spec file failed.
    #[error("failed to read box spec at {path}: {source}")]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// A spec file is not valid TOML for a box.
    #[error("failed to parse box spec at {path}: {source}")]
    Parse {
        /// Path being parsed.
        path: PathBuf,
        /// Underlying error.
        source: toml::de::Error,
    },
}

/// Result type for box operations.
pub type Result<T> = std::result::Result<T, BoxError>;
