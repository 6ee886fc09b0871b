use crate::data::observation::Observation;
use crate::processing::statistics::StatisticsBundle;

/// Render the series as `index: value` pairs.
pub fn series_summary(series: &[Observation]) -> String {
    series
        .iter()
        .enumerate()
        .map(|(i, o)| format!("{i}: {}", o.value))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn build_prompt(series: &[Observation], stats: &StatisticsBundle) -> String {
    format!(
        "Act as a senior data scientist specialising in time-series analysis and regression.

Time-series data:
[{data}]

Model comparison:
1. LINEAR MODEL (straight trend):
   - Slope: {slope:.4}
   - Fit (R²): {lin_r2:.4}

2. QUADRATIC MODEL (second derivative / curve):
   - Curvature coefficient (a): {quad_a:.6} (positive = concave up / accelerating; negative = concave down / decelerating)
   - Fit (R²): {quad_r2:.4}
   - Average acceleration (finite differences): {avg_acc:.4}

Task: write a short Markdown report covering:
1. **Trend diagnosis**: is the movement a steady line or is there meaningful curvature? Which model (linear or quadratic) has the better R²?
2. **Second-derivative analysis**: what does the curvature indicate? Is growth exploding, saturating towards a peak, or falling at an accelerating rate?
3. **Comparative projection**: based on the better model, what should be expected in the near future? Warn about risks if the curve is turning down.

Be technical but accessible.",
        data = series_summary(series),
        slope = stats.slope(),
        lin_r2 = stats.lin_r_squared(),
        quad_a = stats.quad_a(),
        quad_r2 = stats.quad_r_squared(),
        avg_acc = stats.avg_acceleration(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::observation::from_values;
    use crate::processing::engine::analyze;

    #[test]
    fn test_prompt_contains_data_and_statistics() {
        let series = from_values(&[10.0, 20.0, 30.0]);
        let stats = analyze(&series).statistics();
        let prompt = build_prompt(&series, &stats);

        assert!(prompt.contains("[0: 10, 1: 20, 2: 30]"));
        assert!(prompt.contains("Slope: 10.0000"));
        assert!(prompt.contains("Fit (R²): 1.0000"));
        assert!(prompt.contains("Average acceleration (finite differences): 0.0000"));
    }

    #[test]
    fn test_series_summary_keeps_order() {
        let series = from_values(&[3.5, -1.0]);
        assert_eq!(series_summary(&series), "0: 3.5, 1: -1");
    }
}
