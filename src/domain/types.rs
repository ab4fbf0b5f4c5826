//! Shared domain types.
//!
//! These types are intentionally small `Copy` values so the controller can
//! hand them out by value, and serializable so they can be exported as JSON.

use serde::{Deserialize, Serialize};

/// One observation: `x` is the mid-parent height, `y` the adult child height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The line `ŷ = slope·x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitParameters {
    pub slope: f64,
    pub intercept: f64,
}

impl FitParameters {
    pub const fn new(slope: f64, intercept: f64) -> Self {
        Self { slope, intercept }
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit-quality measures for one `(Dataset, FitParameters)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Mean squared error.
    pub mse: f64,
    /// Root mean squared error.
    pub rmse: f64,
    /// Mean absolute error.
    pub mae: f64,
    /// Coefficient of determination; may be negative for a poor line.
    pub r_squared: f64,
    /// Pearson product-moment correlation of x and y (independent of the line).
    pub pearson_r: f64,
    /// Standard error of the estimate, `sqrt(SSE / (n - 2))`.
    pub standard_error: f64,
}

/// A single observation with its fitted value under some parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Residual {
    pub point: DataPoint,
    pub fitted: f64,
    pub residual: f64,
}
