//! Reporting utilities: residuals and formatted terminal output.

pub mod format;

pub use format::*;

use crate::data::Dataset;
use crate::domain::{FitParameters, Residual};

/// Compute fitted values and residuals for each observation.
pub fn compute_residuals(dataset: &Dataset, params: FitParameters) -> Vec<Residual> {
    dataset
        .points()
        .iter()
        .map(|&point| {
            let fitted = params.predict(point.x);
            Residual {
                point,
                fitted,
                residual: point.y - fitted,
            }
        })
        .collect()
}

/// The `top_n` residuals with the largest magnitude, largest first.
pub fn largest_residuals(residuals: &[Residual], top_n: usize) -> Vec<Residual> {
    let mut sorted = residuals.to_vec();
    sorted.sort_by(|a, b| {
        b.residual
            .abs()
            .partial_cmp(&a.residual.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    sorted.truncate(top_n);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compute_residuals_basic() {
        let data = Dataset::from_pairs(&[(1.0, 100.0), (2.0, 101.0)]).unwrap();
        let residuals = compute_residuals(&data, FitParameters::new(0.0, 100.0));
        assert_eq!(residuals.len(), 2);
        assert!((residuals[0].residual - 0.0).abs() < 0.01);
        assert!((residuals[1].residual - 1.0).abs() < 0.01);
        assert_eq!(residuals[1].fitted, 100.0);
    }

    #[test]
    fn largest_residuals_orders_by_magnitude() {
        let data = Dataset::from_pairs(&[(1.0, 100.0), (2.0, 105.0), (3.0, 93.0)]).unwrap();
        let residuals = compute_residuals(&data, FitParameters::new(0.0, 100.0));
        let top = largest_residuals(&residuals, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].point.x, 3.0);
        assert_eq!(top[1].point.x, 2.0);
    }
}
