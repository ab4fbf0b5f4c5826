//! Formatted terminal output for `reglab fit` / `reglab eval`.
//!
//! We keep formatting code in one place so:
//! - the math code stays clean and testable
//! - output changes are localized

use crate::data::Dataset;
use crate::domain::{FitParameters, Metrics, Residual};

/// `ŷ = 0.8845x + 7.9923`, with the sign folded into the intercept.
pub fn format_equation(params: FitParameters) -> String {
    let sign = if params.intercept < 0.0 { '-' } else { '+' };
    format!(
        "ŷ = {:.4}x {sign} {:.4}",
        params.slope,
        params.intercept.abs()
    )
}

/// Metric rows as `(label, value)`; NaN is shown as zero like the dashboard does.
pub fn metric_rows(metrics: &Metrics) -> [(&'static str, f64); 6] {
    [
        ("MSE", metrics.mse),
        ("RMSE", metrics.rmse),
        ("MAE", metrics.mae),
        ("R²", metrics.r_squared),
        ("Pearson r", metrics.pearson_r),
        ("Std. error", metrics.standard_error),
    ]
    .map(|(label, v)| (label, if v.is_nan() { 0.0 } else { v }))
}

/// Format the run summary (dataset stats + line + metrics).
pub fn format_summary(dataset: &Dataset, params: FitParameters, metrics: &Metrics, title: &str) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== reglab - {title} ===\n"));
    out.push_str(&format!("Line: {}\n", format_equation(params)));
    let (x_min, x_max) = dataset.x_range();
    let (y_min, y_max) = dataset.y_range();
    out.push_str(&format!(
        "Points: n={} | x=[{x_min:.2}, {x_max:.2}] mean {:.2} | y=[{y_min:.2}, {y_max:.2}] mean {:.2}\n",
        dataset.len(),
        dataset.mean_x(),
        dataset.mean_y(),
    ));

    out.push_str("\nMetrics:\n");
    for (label, value) in metric_rows(metrics) {
        out.push_str(&format!("  {label:<12} {value:>12.4}\n"));
    }
    out.push('\n');

    out
}

/// Format the per-point residual table.
pub fn format_residual_table(rows: &[Residual]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>4} {:>10} {:>10} {:>10} {:>10}\n",
        "#", "x", "y", "fitted", "residual"
    ));
    out.push_str(&format!(
        "{:->4} {:->10} {:->10} {:->10} {:->10}\n",
        "", "", "", "", ""
    ));

    for (i, r) in rows.iter().enumerate() {
        out.push_str(&format!(
            "{:>4} {:>10.2} {:>10.2} {:>10.4} {:>10.4}\n",
            i + 1,
            r.point.x,
            r.point.y,
            r.fitted,
            r.residual
        ));
    }

    out
}
