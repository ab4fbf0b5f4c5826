//! Ordinary least squares for a straight line.
//!
//! We solve
//!
//! ```text
//! minimize Σ (y_i - (slope·x_i + intercept))^2
//! ```
//!
//! in closed form from centered sums:
//!
//! ```text
//! slope     = Σ (x_i − x̄)(y_i − ȳ) / Σ (x_i − x̄)^2
//! intercept = ȳ − slope·x̄
//! ```
//!
//! which equals the raw-sum form `(n·Σxy − Σx·Σy) / (n·Σx² − (Σx)²)` without
//! its cancellation when x sits far from zero.
//!
//! The problem has no unique solution when every x is the same. That case is
//! rejected with an input error instead of returning NaN/Infinity.

use crate::data::Dataset;
use crate::domain::FitParameters;
use crate::error::AppError;
use crate::math::metrics::is_constant;

/// Fit the least-squares line through `dataset`.
///
/// Fails if x has zero variance.
pub fn solve(dataset: &Dataset) -> Result<FitParameters, AppError> {
    let points = dataset.points();
    let mean_x = dataset.mean_x();
    let mean_y = dataset.mean_y();

    let (mut sxx, mut sxy) = (0.0, 0.0);
    for p in points {
        let dx = p.x - mean_x;
        sxx += dx * dx;
        sxy += dx * (p.y - mean_y);
    }

    if is_constant(points.iter().map(|p| p.x)) || sxx <= 0.0 {
        return Err(AppError::input(
            "Cannot fit a line: all x values are identical (zero x variance).",
        ));
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    Ok(FitParameters::new(slope, intercept))
}
