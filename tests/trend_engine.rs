use approx::{assert_abs_diff_eq, assert_relative_eq};

use trendplot::data::observation::{from_values, Observation};
use trendplot::data::presets::DataPreset;
use trendplot::processing::engine::{analyze, analyze_with_horizon, DEFAULT_HORIZON};
use trendplot::processing::statistics::{Concavity, FitStatus};

#[test]
fn test_sales_trend_is_increasing() {
    let series = DataPreset::Sales.observations();
    let analysis = analyze(&series);
    let stats = analysis.statistics();

    assert!(stats.slope() > 0.0);
    assert!(stats.lin_r_squared() > 0.0 && stats.lin_r_squared() < 1.0);
    assert!(stats.quad_r_squared() >= stats.lin_r_squared() - 1e-12);
    assert_eq!(analysis.merged.len(), 12);
    assert_eq!(analysis.forecast.len(), DEFAULT_HORIZON);
}

#[test]
fn test_exactly_linear_series() {
    let analysis = analyze(&from_values(&[10.0, 20.0, 30.0]));

    assert_relative_eq!(analysis.linear.slope, 10.0, epsilon = 1e-9);
    assert_relative_eq!(analysis.linear.intercept, 10.0, epsilon = 1e-9);
    assert_relative_eq!(analysis.linear.r_squared, 1.0, epsilon = 1e-9);

    assert_eq!(analysis.quadratic.status, FitStatus::Fitted);
    assert_abs_diff_eq!(analysis.quadratic.a, 0.0, epsilon = 1e-9);
    assert_relative_eq!(analysis.quadratic.b, 10.0, epsilon = 1e-9);
    assert_relative_eq!(analysis.quadratic.c, 10.0, epsilon = 1e-9);
    assert_relative_eq!(analysis.quadratic.r_squared, 1.0, epsilon = 1e-9);
    assert_eq!(analysis.statistics().concavity(), Concavity::Linear);
}

#[test]
fn test_constant_second_difference() {
    let analysis = analyze(&from_values(&[1.0, 2.0, 4.0, 7.0, 11.0]));
    let acc: Vec<f64> = analysis
        .merged
        .iter()
        .map(|p| p.acceleration.unwrap_or(f64::NAN))
        .collect();

    assert_eq!(acc[2], acc[3]);
    assert_eq!(acc[3], acc[4]);
    assert_relative_eq!(analysis.avg_acceleration, acc[2]);
    assert_relative_eq!(analysis.avg_acceleration, 1.0);
}

#[test]
fn test_exact_parabola_is_recovered() {
    // y = 2x^2 - 3x + 5
    let values: Vec<f64> = (0..8)
        .map(|x| {
            let x = x as f64;
            2.0 * x * x - 3.0 * x + 5.0
        })
        .collect();
    let analysis = analyze(&from_values(&values));

    assert_relative_eq!(analysis.quadratic.a, 2.0, epsilon = 1e-6);
    assert_relative_eq!(analysis.quadratic.b, -3.0, epsilon = 1e-6);
    assert_relative_eq!(analysis.quadratic.c, 5.0, epsilon = 1e-6);
    assert_relative_eq!(analysis.quadratic.r_squared, 1.0, epsilon = 1e-9);
    assert_relative_eq!(analysis.avg_acceleration, 4.0, epsilon = 1e-9);
    assert_eq!(analysis.statistics().concavity(), Concavity::Convex);
    assert!(analysis.statistics().quadratic_preferred());
}

#[test]
fn test_constant_series() {
    let analysis = analyze(&from_values(&[7.0; 6]));

    assert_abs_diff_eq!(analysis.linear.slope, 0.0);
    assert_relative_eq!(analysis.linear.intercept, 7.0);
    assert_eq!(analysis.linear.r_squared, 1.0);
    assert_eq!(analysis.quadratic.r_squared, 1.0);
    assert_abs_diff_eq!(analysis.avg_acceleration, 0.0);
    assert!(analysis.merged.iter().all(|p| p.velocity == Some(0.0)));
    assert!(analysis.merged.iter().all(|p| p.acceleration == Some(0.0)));
    for p in &analysis.forecast {
        assert_relative_eq!(p.projection, 7.0, epsilon = 1e-9);
        assert_relative_eq!(p.quadratic_projection, 7.0, epsilon = 1e-9);
    }
}

#[test]
fn test_degenerate_lengths() {
    let empty = analyze(&[]);
    assert!(empty.merged.is_empty());
    assert_eq!(empty.linear.status, FitStatus::InsufficientData);
    assert_eq!(empty.quadratic.status, FitStatus::InsufficientData);
    assert_eq!(empty.forecast.len(), DEFAULT_HORIZON);
    assert!(empty.forecast.iter().all(|p| p.projection == 0.0));

    let single = analyze(&[Observation::new("only", 42.0)]);
    assert_eq!(single.merged.len(), 1);
    assert_eq!(single.merged[0].velocity, None);
    assert_eq!(single.linear.slope, 0.0);

    let pair = analyze(&from_values(&[1.0, 3.0]));
    assert_eq!(pair.linear.status, FitStatus::Fitted);
    assert_eq!(pair.quadratic.status, FitStatus::InsufficientData);
    assert_eq!(pair.avg_acceleration, 0.0);
}

#[test]
fn test_projection_continues_the_fits() {
    let series = DataPreset::Crypto.observations();
    let analysis = analyze_with_horizon(&series, 3);
    let n = series.len();

    let labels: Vec<&str> = analysis.forecast.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, ["Proj 1", "Proj 2", "Proj 3"]);
    for (k, p) in analysis.forecast.iter().enumerate() {
        let x = (n + k) as f64;
        assert_relative_eq!(p.projection, analysis.linear.evaluate(x));
        assert_relative_eq!(p.quadratic_projection, analysis.quadratic.evaluate(x));
    }

    let last = analysis.merged.last().and_then(|p| p.regression_value).unwrap();
    assert_relative_eq!(
        analysis.forecast[0].projection - last,
        analysis.linear.slope,
        epsilon = 1e-6
    );
    assert!(analysis.linear.slope < 0.0);
}

#[test]
fn test_differences_reconstruct_the_series() {
    let series = DataPreset::WebsiteTraffic.observations();
    let analysis = analyze(&series);

    let mut value = series[0].value;
    for (i, p) in analysis.merged.iter().enumerate().skip(1) {
        value += p.velocity.unwrap();
        assert_relative_eq!(value, series[i].value, epsilon = 1e-9);
    }
    for i in 2..analysis.merged.len() {
        let expected =
            analysis.merged[i].velocity.unwrap() - analysis.merged[i - 1].velocity.unwrap();
        assert_relative_eq!(analysis.merged[i].acceleration.unwrap(), expected);
    }
    assert_eq!(analysis.merged[0].velocity, Some(0.0));
    assert_eq!(analysis.merged[1].acceleration, Some(0.0));
}

#[test]
fn test_observations_are_preserved() {
    let series = DataPreset::Sales.observations();
    let analysis = analyze(&series);

    for (obs, derived) in series.iter().zip(&analysis.merged) {
        assert_eq!(obs.label, derived.label);
        assert_eq!(obs.value, derived.value);
    }
}
