//! Interactive regression state shared by the CLI and TUI front-ends.
//!
//! `RegressionState` owns the current line and the metrics derived from it.
//! Every write recomputes the metrics before returning, so a read after a
//! write always sees numbers for the parameters just written.

use log::{debug, info};

use crate::data::Dataset;
use crate::domain::{FitParameters, Metrics, Residual};
use crate::error::AppError;
use crate::math;

#[derive(Debug, Clone)]
pub struct RegressionState {
    dataset: Dataset,
    params: FitParameters,
    metrics: Metrics,
}

impl RegressionState {
    pub fn new(dataset: Dataset, params: FitParameters) -> Self {
        let metrics = math::compute(&dataset, params);
        Self {
            dataset,
            params,
            metrics,
        }
    }

    /// Replace the current line. No range checks are applied here.
    pub fn set_parameters(&mut self, params: FitParameters) {
        self.params = params;
        self.metrics = math::compute(&self.dataset, params);
        debug!(
            "params slope={:.4} intercept={:.4} -> mse={:.4} r2={:.4}",
            params.slope, params.intercept, self.metrics.mse, self.metrics.r_squared
        );
    }

    /// Replace the line with the least-squares fit.
    ///
    /// On error (zero x variance) the current line is left untouched.
    pub fn auto_fit(&mut self) -> Result<FitParameters, AppError> {
        let fit = math::solve(&self.dataset)?;
        info!(
            "auto-fit slope={:.6} intercept={:.6}",
            fit.slope, fit.intercept
        );
        self.set_parameters(fit);
        Ok(fit)
    }

    pub fn parameters(&self) -> FitParameters {
        self.params
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Per-point residuals for the current line.
    pub fn residuals(&self) -> Vec<Residual> {
        crate::report::compute_residuals(&self.dataset, self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::INITIAL_PARAMS;

    #[test]
    fn metrics_follow_every_write() {
        let mut state = RegressionState::new(Dataset::galton(), INITIAL_PARAMS);
        assert_eq!(state.metrics(), math::compute(state.dataset(), INITIAL_PARAMS));

        let p = FitParameters::new(0.8, 12.5);
        state.set_parameters(p);
        assert_eq!(state.parameters(), p);
        assert_eq!(state.metrics(), math::compute(&Dataset::galton(), p));
    }

    #[test]
    fn setting_same_parameters_twice_is_idempotent() {
        let mut state = RegressionState::new(Dataset::galton(), INITIAL_PARAMS);
        let p = FitParameters::new(1.2, 3.0);
        state.set_parameters(p);
        let first = state.metrics();
        state.set_parameters(p);
        assert_eq!(first, state.metrics());
    }

    #[test]
    fn out_of_slider_range_values_are_accepted() {
        let mut state = RegressionState::new(Dataset::galton(), INITIAL_PARAMS);
        state.set_parameters(FitParameters::new(-7.0, 500.0));
        assert_eq!(state.parameters().slope, -7.0);
        assert!(state.metrics().r_squared < 0.0);
    }

    #[test]
    fn auto_fit_replaces_parameters() {
        let data = Dataset::from_pairs(&[(1.0, 2.0), (2.0, 4.0), (3.0, 6.0)]).unwrap();
        let mut state = RegressionState::new(data, FitParameters::new(0.0, 0.0));
        let fit = state.auto_fit().unwrap();
        assert_eq!(state.parameters(), fit);
        let m = state.metrics();
        assert!(m.mse < 1e-18);
        assert!((m.r_squared - 1.0).abs() < 1e-9);
    }

    #[test]
    fn failed_auto_fit_keeps_state() {
        let data = Dataset::from_pairs(&[(1.0, 2.0), (1.0, 4.0)]).unwrap();
        let start = FitParameters::new(0.5, 1.0);
        let mut state = RegressionState::new(data, start);
        let before = state.metrics();
        assert!(state.auto_fit().is_err());
        assert_eq!(state.parameters(), start);
        assert_eq!(state.metrics(), before);
    }

    #[test]
    fn residuals_track_current_line() {
        let data = Dataset::from_pairs(&[(0.0, 1.0), (1.0, 1.0)]).unwrap();
        let state = RegressionState::new(data, FitParameters::new(1.0, 0.0));
        let r = state.residuals();
        assert_eq!(r.len(), 2);
        assert_eq!(r[0].residual, 1.0);
        assert_eq!(r[1].residual, 0.0);
    }
}
