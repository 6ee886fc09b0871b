use serde::Serialize;

use crate::data::observation::Observation;
use crate::processing::linear::LinearFit;
use crate::processing::quadratic::QuadraticFit;

/// Below this absolute curvature the trend is reported as linear.
pub const LINEAR_CURVATURE_THRESHOLD: f64 = 1e-3;

/// Whether a fit carries real coefficients or the zero-valued default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FitStatus {
    Fitted,
    /// The series is shorter than the model needs.
    InsufficientData,
    /// The normal equations had no unique solution.
    Singular,
}

/// Total variance below `mean² · n` times this is rounding noise.
const FLAT_VARIANCE_RELATIVE: f64 = 1e-20;

/// Coefficient of determination `1 - SSres / SStot` of `model` against the
/// observed values, with `x` the sequence index.
///
/// A series whose values are all identical, or differ only by rounding
/// noise, has no variance to explain and scores 1.
pub fn r_squared(series: &[Observation], model: impl Fn(f64) -> f64) -> f64 {
    let Some(first) = series.first() else {
        return 0.0;
    };
    if series.iter().all(|o| o.value == first.value) {
        return 1.0;
    }

    let mean = series.iter().map(|o| o.value).sum::<f64>() / series.len() as f64;
    let mut ss_tot = 0.0;
    let mut ss_res = 0.0;
    for (i, obs) in series.iter().enumerate() {
        let predicted = model(i as f64);
        ss_tot += (obs.value - mean).powi(2);
        ss_res += (obs.value - predicted).powi(2);
    }

    if ss_tot <= FLAT_VARIANCE_RELATIVE * mean * mean * series.len() as f64 {
        return 1.0;
    }
    1.0 - ss_res / ss_tot
}

/// Snapshot of both fits and the mean acceleration, handed to the narrative
/// generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatisticsBundle {
    pub linear: LinearFit,
    pub quadratic: QuadraticFit,
    pub avg_acceleration: f64,
}

impl StatisticsBundle {
    pub fn slope(&self) -> f64 {
        self.linear.slope
    }

    pub fn lin_r_squared(&self) -> f64 {
        self.linear.r_squared
    }

    pub fn quad_a(&self) -> f64 {
        self.quadratic.a
    }

    pub fn quad_r_squared(&self) -> f64 {
        self.quadratic.r_squared
    }

    pub fn avg_acceleration(&self) -> f64 {
        self.avg_acceleration
    }

    pub fn concavity(&self) -> Concavity {
        Concavity::classify(self.quadratic.a)
    }

    /// True when the curve explains more variance than the line.
    pub fn quadratic_preferred(&self) -> bool {
        self.quadratic.r_squared > self.linear.r_squared
    }
}

/// Shape of the quadratic trend, judged from its leading coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Concavity {
    Linear,
    Convex,
    Concave,
}

impl Concavity {
    pub fn classify(a: f64) -> Self {
        if a.abs() < LINEAR_CURVATURE_THRESHOLD {
            Concavity::Linear
        } else if a > 0.0 {
            Concavity::Convex
        } else {
            Concavity::Concave
        }
    }

    pub fn diagnosis(&self) -> &'static str {
        match self {
            Concavity::Linear => "Linear trend (negligible acceleration)",
            Concavity::Convex => "Convex growth (accelerating)",
            Concavity::Concave => "Concave growth (saturating or falling)",
        }
    }
}

/// Descriptive statistics of the observed values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl SeriesSummary {
    pub fn compute(series: &[Observation]) -> Option<Self> {
        if series.is_empty() {
            return None;
        }

        let count = series.len();
        let values = series.iter().map(|o| o.value);
        let min = values.clone().fold(f64::INFINITY, f64::min);
        let max = values.clone().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.clone().sum::<f64>() / count as f64;
        let variance = values.map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;

        Some(SeriesSummary {
            count,
            min,
            max,
            mean,
            std_dev: variance.sqrt(),
        })
    }

    /// Format as a multi-line report string.
    pub fn report(&self, label: &str) -> String {
        format!(
            "{}:\n  Count: {}\n  Min: {:.3}\n  Max: {:.3}\n  Mean: {:.3}\n  Std Dev: {:.3}\n",
            label, self.count, self.min, self.max, self.mean, self.std_dev
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::observation::from_values;
    use approx::assert_relative_eq;

    #[test]
    fn test_r_squared_perfect_and_mean_model() {
        let series = from_values(&[1.0, 3.0, 5.0]);
        assert_relative_eq!(r_squared(&series, |x| 2.0 * x + 1.0), 1.0);
        // Predicting the mean explains nothing.
        assert_relative_eq!(r_squared(&series, |_| 3.0), 0.0);
    }

    #[test]
    fn test_r_squared_constant_series() {
        let series = from_values(&[0.1, 0.1, 0.1]);
        assert_eq!(r_squared(&series, |_| 0.0), 1.0);
    }

    #[test]
    fn test_r_squared_rounding_noise_is_flat() {
        let series = from_values(&[0.1 + 0.2, 0.3, 0.30000000000000004]);
        assert_eq!(r_squared(&series, |_| 0.3), 1.0);
        assert_eq!(QuadraticFit::fit(&series).r_squared, 1.0);
        assert_eq!(LinearFit::fit(&series).r_squared, 1.0);

        // Small but real variation is still scored.
        let series = from_values(&[1.0, 1.000001, 1.0]);
        assert!(r_squared(&series, |_| 1.0) < 1.0);
    }

    #[test]
    fn test_r_squared_empty() {
        assert_eq!(r_squared(&[], |_| 0.0), 0.0);
    }

    #[test]
    fn test_concavity_thresholds() {
        assert_eq!(Concavity::classify(0.0005), Concavity::Linear);
        assert_eq!(Concavity::classify(-0.0009), Concavity::Linear);
        assert_eq!(Concavity::classify(0.5), Concavity::Convex);
        assert_eq!(Concavity::classify(-2.0), Concavity::Concave);
    }

    #[test]
    fn test_summary() {
        let s = SeriesSummary::compute(&from_values(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]))
            .unwrap();
        assert_eq!(s.count, 8);
        assert_eq!(s.min, 2.0);
        assert_eq!(s.max, 9.0);
        assert_relative_eq!(s.mean, 5.0);
        assert_relative_eq!(s.std_dev, 2.0);
        assert!(s.report("Sales").starts_with("Sales:\n  Count: 8"));
        assert!(SeriesSummary::compute(&[]).is_none());
    }
}
