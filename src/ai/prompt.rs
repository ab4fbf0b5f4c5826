//! Prompt construction and report framing for analysis requests.

use chrono::{DateTime, Local};

use crate::ai::provider::{ModelId, Provider};
use crate::data::Dataset;
use crate::domain::{FitParameters, Metrics};
use crate::report::format_equation;

/// System message for chat-style providers.
pub const SYSTEM_PROMPT: &str = "You are a senior statistician and data-modelling expert \
writing professional analysis reports for an interactive regression lab.";

/// Build the user prompt describing the current line and its metrics.
pub fn build_analysis_prompt(
    params: FitParameters,
    metrics: &Metrics,
    dataset: &Dataset,
    provider: Provider,
) -> String {
    let style = match provider {
        Provider::DeepSeek => "Answer as DeepSeek: give a deep, rigorous, mathematical analysis.",
        Provider::Gemini => "Answer as Gemini: give a professional, clear and approachable analysis.",
    };

    format!(
        "# Regression analysis expert report

## Dataset background
I am analysing Francis Galton's 1886 heredity data, which records the heights of 928 \
parent/child pairs and is where the \"regression toward the mean\" phenomenon was discovered.

## Current regression model
- **Equation**: {equation}
- **Sample size**: n = {n}
- **Mean parent height**: {mean_x:.2} in
- **Mean child height**: {mean_y:.2} in

## Fit metrics
1. **Coefficient of determination (R²)**: {r2:.4}
2. **Mean squared error (MSE)**: {mse:.4}
3. **Root mean squared error (RMSE)**: {rmse:.4}
4. **Mean absolute error (MAE)**: {mae:.4}
5. **Pearson correlation (r)**: {r:.4}
6. **Standard error of the estimate**: {se:.4}

## What to cover
{style}

### 1. Model quality
- Judge the current fit from the metrics above
- Explain what R² and the correlation coefficient mean in practice

### 2. Regression toward the mean
- Explain the meaning of the slope {slope:.4}
- Describe the statistics behind \"regression toward the mean\"

### 3. Tuning suggestions
- Should the parameters change? In which direction?
- How could the model be improved?

### 4. Expert insight
- Limitations of this model
- Modern statistical methods that improve on it

Use precise academic language while staying friendly to beginners.
",
        equation = format_equation(params),
        n = dataset.len(),
        mean_x = dataset.mean_x(),
        mean_y = dataset.mean_y(),
        r2 = metrics.r_squared,
        mse = metrics.mse,
        rmse = metrics.rmse,
        mae = metrics.mae,
        r = metrics.pearson_r,
        se = metrics.standard_error,
        slope = params.slope,
    )
}

/// Wrap provider output in the report header and footer.
pub fn format_report(content: &str, provider: Provider, model: ModelId, at: DateTime<Local>) -> String {
    let name = provider.display_name();
    format!(
        "# AI regression analysis report

**Provider**: {name}
**Model**: {model}
**Generated**: {time}

---

{content}

---

*Generated by {name} {model}; for reference and learning only.*",
        model = model.id(),
        time = at.format("%Y-%m-%d %H:%M:%S"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn prompt_embeds_line_and_metrics() {
        let data = Dataset::galton();
        let params = FitParameters::new(0.5, 30.0);
        let metrics = crate::math::compute(&data, params);
        let prompt = build_analysis_prompt(params, &metrics, &data, Provider::Gemini);

        assert!(prompt.contains("ŷ = 0.5000x + 30.0000"));
        assert!(prompt.contains("n = 20"));
        assert!(prompt.contains(&format!("{:.2} in", data.mean_x())));
        assert!(prompt.contains(&format!("{:.2} in", data.mean_y())));
        assert!(prompt.contains(&format!("{:.4}", metrics.mse)));
        assert!(prompt.contains(&format!("{:.4}", metrics.r_squared)));
        assert!(prompt.contains("Answer as Gemini"));

        let deep = build_analysis_prompt(params, &metrics, &data, Provider::DeepSeek);
        assert!(deep.contains("Answer as DeepSeek"));
    }

    #[test]
    fn report_frames_content() {
        let at = Local.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap();
        let report = format_report("body text", Provider::DeepSeek, ModelId::DeepSeekChat, at);
        assert!(report.contains("**Provider**: DeepSeek"));
        assert!(report.contains("**Model**: deepseek-chat"));
        assert!(report.contains("2025-03-01 09:30:00"));
        assert!(report.contains("\n\nbody text\n\n"));
        assert!(report.ends_with("for reference and learning only.*"));
    }
}
