//! Fit-quality metrics for a candidate line.
//!
//! Given a dataset and `(slope, intercept)` we compute, in one pass over the
//! points (after the means of x and y):
//!
//! ```text
//! SSE = Σ (y_i - ŷ_i)^2      SAE = Σ |y_i - ŷ_i|      SST = Σ (y_i - ȳ)^2
//! Sxx = Σ (x_i - x̄)^2        Sxy = Σ (x_i - x̄)(y_i - ȳ)
//! ```
//!
//! and derive all six metrics from them together. Pearson r is
//! `Sxy / sqrt(Sxx·SST)`, the centered form of the raw-sum formula; it keeps
//! full precision when the values sit far from zero.
//!
//! Degenerate columns fall back to zero instead of NaN:
//! - constant y (`SST == 0`) gives `R² = 0`
//! - constant x or y gives `r = 0`
//! - fewer than three points gives `standard_error = 0`
//!
//! A column is degenerate only when every value is exactly equal (see
//! [`is_constant`]). Any real spread, however small next to the values
//! themselves, is kept.

use crate::data::Dataset;
use crate::domain::{FitParameters, Metrics};

/// Compute every metric for `params` against `dataset`.
pub fn compute(dataset: &Dataset, params: FitParameters) -> Metrics {
    let points = dataset.points();
    let n = points.len() as f64;
    let mean_x = dataset.mean_x();
    let mean_y = dataset.mean_y();

    let mut sse = 0.0;
    let mut sae = 0.0;
    let mut sst = 0.0;
    let mut sxx = 0.0;
    let mut sxy = 0.0;

    for p in points {
        let error = p.y - params.predict(p.x);
        let (dx, dy) = (p.x - mean_x, p.y - mean_y);
        sse += error * error;
        sae += error.abs();
        sst += dy * dy;
        sxx += dx * dx;
        sxy += dx * dy;
    }

    let mse = sse / n;
    let rmse = mse.sqrt();
    let mae = sae / n;

    let constant_x = is_constant(points.iter().map(|p| p.x)) || sxx <= 0.0;
    let constant_y = is_constant(points.iter().map(|p| p.y)) || sst <= 0.0;

    let r_squared = if constant_y { 0.0 } else { 1.0 - sse / sst };

    let pearson_r = if constant_x || constant_y {
        0.0
    } else {
        // Rounding can overshoot the unit interval by an ulp.
        (sxy / (sxx * sst).sqrt()).clamp(-1.0, 1.0)
    };

    let standard_error = if points.len() > 2 {
        (sse / (n - 2.0)).sqrt()
    } else {
        0.0
    };

    Metrics {
        mse,
        rmse,
        mae,
        r_squared,
        pearson_r,
        standard_error,
    }
}

/// Sum of squared errors of `params` over `dataset`.
pub fn sse(dataset: &Dataset, params: FitParameters) -> f64 {
    dataset
        .points()
        .iter()
        .map(|p| {
            let e = p.y - params.predict(p.x);
            e * e
        })
        .sum()
}

/// `true` when every value equals the first one exactly.
///
/// Centered sums of a constant column can still come out as a tiny positive
/// number when the mean is not representable, so degeneracy is decided on the
/// values themselves.
pub(crate) fn is_constant(mut values: impl Iterator<Item = f64>) -> bool {
    match values.next() {
        Some(first) => values.all(|v| v == first),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::ols;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rand_distr::{Distribution, Normal};

    const TOL: f64 = 1e-9;

    fn random_dataset(rng: &mut StdRng, n: usize) -> Dataset {
        let noise = Normal::new(0.0, rng.gen_range(0.1..5.0)).unwrap();
        let slope = rng.gen_range(-3.0..3.0);
        let intercept = rng.gen_range(-50.0..50.0);
        let mut pairs = Vec::with_capacity(n);
        for _ in 0..n {
            let x: f64 = rng.gen_range(-20.0..80.0);
            pairs.push((x, slope * x + intercept + noise.sample(&mut *rng)));
        }
        Dataset::from_pairs(&pairs).unwrap()
    }

    fn random_params(rng: &mut StdRng) -> FitParameters {
        FitParameters::new(rng.gen_range(-5.0..5.0), rng.gen_range(-100.0..100.0))
    }

    #[test]
    fn perfect_line_scores_perfectly() {
        let data = Dataset::from_pairs(&[(1.0, 2.0), (2.0, 4.0), (3.0, 6.0)]).unwrap();
        let m = compute(&data, FitParameters::new(2.0, 0.0));
        assert_eq!(m.mse, 0.0);
        assert_eq!(m.rmse, 0.0);
        assert_eq!(m.mae, 0.0);
        assert!((m.r_squared - 1.0).abs() < TOL);
        assert!((m.pearson_r - 1.0).abs() < TOL);
        assert_eq!(m.standard_error, 0.0);
    }

    #[test]
    fn constant_y_falls_back_to_zero() {
        let data = Dataset::from_pairs(&[(1.0, 5.0), (2.0, 5.0), (3.0, 5.0)]).unwrap();
        for params in [
            FitParameters::new(0.0, 5.0),
            FitParameters::new(1.5, -2.0),
            FitParameters::new(-40.0, 1e6),
        ] {
            let m = compute(&data, params);
            assert_eq!(m.r_squared, 0.0);
            assert_eq!(m.pearson_r, 0.0);
            assert!(m.mse.is_finite() && m.standard_error.is_finite());
        }
    }

    #[test]
    fn constant_y_with_inexact_values_is_never_nan() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let y = rng.gen_range(-1000.0..1000.0);
            let n: usize = rng.gen_range(1..40);
            let mut pairs = Vec::with_capacity(n);
            for _ in 0..n {
                pairs.push((rng.gen_range(0.0..100.0), y));
            }
            let data = Dataset::from_pairs(&pairs).unwrap();
            let m = compute(&data, random_params(&mut rng));
            assert_eq!(m.r_squared, 0.0, "y={y} n={n}");
            assert_eq!(m.pearson_r, 0.0, "y={y} n={n}");
        }
    }

    #[test]
    fn constant_x_gives_zero_correlation() {
        let data = Dataset::from_pairs(&[(2.0, 1.0), (2.0, 3.0), (2.0, 8.0)]).unwrap();
        let m = compute(&data, FitParameters::new(1.0, 0.0));
        assert_eq!(m.pearson_r, 0.0);
        assert!(m.r_squared.is_finite());
    }

    #[test]
    fn small_samples_have_no_standard_error() {
        let one = Dataset::from_pairs(&[(1.0, 3.0)]).unwrap();
        let two = Dataset::from_pairs(&[(1.0, 3.0), (2.0, 1.0)]).unwrap();
        let params = FitParameters::new(0.3, 0.1);
        assert_eq!(compute(&one, params).standard_error, 0.0);
        assert_eq!(compute(&two, params).standard_error, 0.0);
        assert!(compute(&two, params).mse > 0.0);
    }

    #[test]
    fn galton_reference_values() {
        let data = Dataset::galton();
        let m = compute(&data, crate::data::INITIAL_PARAMS);
        assert!((m.mse - 21.565625).abs() < 1e-9);
        assert!((m.mae - 4.4375).abs() < 1e-9);
        assert!((m.r_squared - (-1.9514156188521081)).abs() < 1e-9);
        assert!((m.pearson_r - 0.9574692713783303).abs() < 1e-9);
        assert!((m.standard_error - 4.895079729233791).abs() < 1e-9);
    }

    #[test]
    fn random_properties_hold() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let n = rng.gen_range(3..60);
            let data = random_dataset(&mut rng, n);
            let params = random_params(&mut rng);
            let m = compute(&data, params);

            assert!((m.mse - m.rmse * m.rmse).abs() <= TOL * m.mse.max(1.0));
            assert!(m.r_squared <= 1.0);
            assert!(m.pearson_r >= -1.0 - TOL && m.pearson_r <= 1.0 + TOL);
            assert!((sse(&data, params) / n as f64 - m.mse).abs() <= TOL * m.mse.max(1.0));
        }
    }

    #[test]
    fn r_squared_at_least_fit_matches_squared_correlation() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let data = random_dataset(&mut rng, 25);
            let best = ols::solve(&data).unwrap();
            let m = compute(&data, best);
            assert!((m.r_squared - m.pearson_r * m.pearson_r).abs() < 1e-8);
        }
    }

    #[test]
    fn inexact_constant_column_is_degenerate() {
        // 0.1 is not representable, so the mean of three copies is not exactly 0.1.
        let data = Dataset::from_pairs(&[(1.0, 0.1), (2.0, 0.1), (3.0, 0.1)]).unwrap();
        let m = compute(&data, FitParameters::new(0.0, 0.1));
        assert_eq!(m.r_squared, 0.0);
        assert_eq!(m.pearson_r, 0.0);
        assert!(is_constant([0.1, 0.1, 0.1].into_iter()));
        assert!(!is_constant([1e6, 1e6 + 1.0].into_iter()));
    }

    #[test]
    fn small_spread_far_from_zero_is_kept() {
        let data = Dataset::from_pairs(&[(1.0, 1e6), (2.0, 1e6 + 1.0), (3.0, 1e6 + 2.0)]).unwrap();
        let fit = ols::solve(&data).unwrap();
        let m = compute(&data, fit);
        assert_eq!(m.mse, 0.0);
        assert!((m.r_squared - 1.0).abs() < TOL);
        assert!((m.pearson_r - 1.0).abs() < TOL);

        let shifted = Dataset::from_pairs(&[(1e6, 1.0), (1e6 + 1.0, 3.0), (1e6 + 2.0, 5.0)]).unwrap();
        let m = compute(&shifted, FitParameters::new(2.0, -1_999_999.0));
        assert!((m.r_squared - 1.0).abs() < TOL);
        assert!((m.pearson_r - 1.0).abs() < TOL);
    }

    #[test]
    fn metrics_are_deterministic() {
        let data = Dataset::galton();
        let p = FitParameters::new(0.73, 18.2);
        assert_eq!(compute(&data, p), compute(&data, p));
    }
}
