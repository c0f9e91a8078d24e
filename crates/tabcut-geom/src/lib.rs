#![warn(missing_docs)]

//! Plain 2D geometry for tabcut.
//!
//! Thin helpers around nalgebra: labelled dimensions ([`Dim`]), points and
//! quarter-turn rotations, line segments with a construction flag, and
//! closed [`Outline`]s assembled from those segments.
//!
//! Nothing here knows about boxes or CAD hosts; the types are plain data
//! that higher layers build once and then read.
//!
//! # Example
//!
//! ```
//! use tabcut_geom::{draw_horiz, Dim, Point2};
//!
//! let width = Dim::labeled(100.0, "W");
//! let line = draw_horiz(Point2::origin(), &width, false);
//! assert_eq!(line.dest, Point2::new(100.0, 0.0));
//! assert_eq!(line.length.unwrap().label(), Some("W"));
//! ```

mod dim;
mod line;
mod outline;
mod point;

pub use dim::Dim;
pub use line::Line;
pub use outline::{Bounds, Outline};
pub use point::{draw_horiz, draw_vert, midpoint, relative_to, PointKey, QuarterTurn};

use thiserror::Error;

/// A point in the sketch plane (millimetres).
pub type Point2 = nalgebra::Point2<f64>;

/// A vector in the sketch plane.
pub type Vec2 = nalgebra::Vector2<f64>;

/// Geometric tolerance used when comparing coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    /// Linear tolerance in millimetres.
    pub linear: f64,
}

impl Tolerance {
    /// Default tolerance: one nanometre is far below any laser kerf.
    pub const DEFAULT: Tolerance = Tolerance { linear: 1e-6 };
}

/// Errors from geometric construction.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GeomError {
    /// A rotation that is not a multiple of 90 degrees.
    #[error("rotation of {0} degrees is not a multiple of 90")]
    NotQuarterTurn(i32),

    /// Segments do not chain into a single closed loop.
    #[error("segments do not form a closed outline: {0}")]
    OpenOutline(String),

    /// No drawable segments were supplied.
    #[error("no segments to build an outline from")]
    EmptyOutline,
}

/// Result type for geometry operations.
pub type Result<T> = std::result::Result<T, GeomError>;
