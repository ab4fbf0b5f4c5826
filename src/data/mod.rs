//! Observations the regression is fitted against.
//!
//! A [`Dataset`] is a non-empty, immutable, ordered list of finite points.
//! Emptiness is rejected at construction so nothing downstream has to define
//! what an `n = 0` mean or error would be.

pub mod galton;

pub use galton::{GALTON_HEIGHTS, INITIAL_PARAMS, X_LABEL, Y_LABEL};

use crate::domain::DataPoint;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    points: Vec<DataPoint>,
}

impl Dataset {
    /// Build a dataset, rejecting empty input and non-finite coordinates.
    pub fn new(points: Vec<DataPoint>) -> Result<Self, AppError> {
        if points.is_empty() {
            return Err(AppError::input("Dataset must contain at least one point."));
        }
        if let Some((idx, p)) = points
            .iter()
            .enumerate()
            .find(|(_, p)| !(p.x.is_finite() && p.y.is_finite()))
        {
            return Err(AppError::input(format!(
                "Non-finite data point at index {idx}: ({}, {}).",
                p.x, p.y
            )));
        }
        Ok(Self { points })
    }

    /// Convenience constructor from `(x, y)` tuples.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self, AppError> {
        Self::new(pairs.iter().map(|&(x, y)| DataPoint::new(x, y)).collect())
    }

    /// The built-in parent/child height sample.
    pub fn galton() -> Self {
        Self {
            points: GALTON_HEIGHTS.to_vec(),
        }
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    /// Number of observations; always at least 1.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn mean_x(&self) -> f64 {
        self.points.iter().map(|p| p.x).sum::<f64>() / self.len() as f64
    }

    pub fn mean_y(&self) -> f64 {
        self.points.iter().map(|p| p.y).sum::<f64>() / self.len() as f64
    }

    /// `(min, max)` of x.
    pub fn x_range(&self) -> (f64, f64) {
        min_max(self.points.iter().map(|p| p.x))
    }

    /// `(min, max)` of y.
    pub fn y_range(&self) -> (f64, f64) {
        min_max(self.points.iter().map(|p| p.y))
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_dataset_is_rejected() {
        let err = Dataset::new(Vec::new()).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_INPUT);
    }

    #[test]
    fn non_finite_point_is_rejected() {
        let err = Dataset::from_pairs(&[(1.0, 2.0), (f64::NAN, 3.0)]).unwrap_err();
        assert!(err.message().contains("index 1"), "{err}");
    }

    #[test]
    fn galton_sample_shape() {
        let data = Dataset::galton();
        assert_eq!(data.len(), 20);
        assert_eq!(data.x_range(), (64.0, 74.0));
        assert_eq!(data.y_range(), (63.0, 73.0));
        assert!((data.mean_x() - 68.775).abs() < 1e-12);
        assert!((data.mean_y() - 68.825).abs() < 1e-12);
    }
}
