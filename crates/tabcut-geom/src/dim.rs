//! Labelled dimensions.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg};

use serde::{Deserialize, Serialize};

/// A distance with an optional label.
///
/// The label is a user-parameter formula (`"W"`, `"(W / 7)"`, ...) carried
/// along through arithmetic so a host can bind sketch dimensions to named
/// parameters. Arithmetic on a labelled dim produces a combined formula;
/// once either operand loses its label the result is unlabelled.
///
/// Negative dims are fine for relative moves but have no meaning as a
/// standalone host parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dim {
    /// Distance in millimetres.
    pub dist: f64,
    /// Optional parameter formula.
    pub label: Option<String>,
}

impl Dim {
    /// An unlabelled dimension.
    pub fn new(dist: f64) -> Self {
        Self { dist, label: None }
    }

    /// A dimension bound to a parameter name or formula.
    pub fn labeled(dist: f64, label: impl Into<String>) -> Self {
        Self {
            dist,
            label: Some(label.into()),
        }
    }

    /// The label, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl From<f64> for Dim {
    fn from(dist: f64) -> Self {
        Dim::new(dist)
    }
}

impl fmt::Display for Dim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dist)
    }
}

impl Add<&Dim> for &Dim {
    type Output = Dim;

    fn add(self, rhs: &Dim) -> Dim {
        let label = match (&self.label, &rhs.label) {
            (Some(a), Some(b)) => Some(format!("{a} + {b}")),
            _ => None,
        };
        Dim {
            dist: self.dist + rhs.dist,
            label,
        }
    }
}

impl Add<Dim> for Dim {
    type Output = Dim;

    fn add(self, rhs: Dim) -> Dim {
        &self + &rhs
    }
}

impl Add<f64> for &Dim {
    type Output = Dim;

    fn add(self, rhs: f64) -> Dim {
        Dim {
            dist: self.dist + rhs,
            label: self.label.as_ref().map(|l| format!("{l} + {rhs}")),
        }
    }
}

impl Add<f64> for Dim {
    type Output = Dim;

    fn add(self, rhs: f64) -> Dim {
        &self + rhs
    }
}

impl Mul<f64> for &Dim {
    type Output = Dim;

    fn mul(self, rhs: f64) -> Dim {
        Dim {
            dist: self.dist * rhs,
            label: self.label.as_ref().map(|l| format!("({l} * {rhs})")),
        }
    }
}

impl Mul<f64> for Dim {
    type Output = Dim;

    fn mul(self, rhs: f64) -> Dim {
        &self * rhs
    }
}

impl Mul<&Dim> for f64 {
    type Output = Dim;

    fn mul(self, rhs: &Dim) -> Dim {
        rhs * self
    }
}

impl Div<f64> for &Dim {
    type Output = Dim;

    fn div(self, rhs: f64) -> Dim {
        Dim {
            dist: self.dist / rhs,
            label: self.label.as_ref().map(|l| format!("({l} / {rhs})")),
        }
    }
}

impl Div<f64> for Dim {
    type Output = Dim;

    fn div(self, rhs: f64) -> Dim {
        &self / rhs
    }
}

impl Neg for &Dim {
    type Output = Dim;

    fn neg(self) -> Dim {
        Dim {
            dist: -self.dist,
            label: self.label.as_ref().map(|l| format!("-({l})")),
        }
    }
}

impl Neg for Dim {
    type Output = Dim;

    fn neg(self) -> Dim {
        -&self
    }
}
