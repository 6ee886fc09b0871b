use serde::Serialize;

use crate::data::observation::Observation;
use crate::processing::statistics::{r_squared, FitStatus};

/// Least-squares line `y = slope * x + intercept` over the sequence index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub status: FitStatus,
}

impl Default for LinearFit {
    fn default() -> Self {
        Self {
            slope: 0.0,
            intercept: 0.0,
            r_squared: 0.0,
            status: FitStatus::InsufficientData,
        }
    }
}

impl LinearFit {
    pub fn evaluate(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Ordinary least squares of value against index.
    ///
    /// Fewer than two observations give the all-zero fit.
    pub fn fit(series: &[Observation]) -> Self {
        let n = series.len();
        if n < 2 {
            return Self::default();
        }

        let mut sum_x = 0.0;
        let mut sum_y = 0.0;
        let mut sum_xy = 0.0;
        let mut sum_xx = 0.0;
        for (i, obs) in series.iter().enumerate() {
            let x = i as f64;
            sum_x += x;
            sum_y += obs.value;
            sum_xy += x * obs.value;
            sum_xx += x * x;
        }

        let nf = n as f64;
        let slope = (nf * sum_xy - sum_x * sum_y) / (nf * sum_xx - sum_x * sum_x);
        let intercept = (sum_y - slope * sum_x) / nf;
        let r_squared = r_squared(series, |x| slope * x + intercept);

        tracing::debug!(n, slope, intercept, r_squared, "linear fit");

        Self {
            slope,
            intercept,
            r_squared,
            status: FitStatus::Fitted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::observation::from_values;
    use approx::assert_relative_eq;

    #[test]
    fn test_exact_line() {
        let values: Vec<f64> = (0..8).map(|i| -2.5 * i as f64 + 40.0).collect();
        let fit = LinearFit::fit(&from_values(&values));
        assert_relative_eq!(fit.slope, -2.5, epsilon = 1e-10);
        assert_relative_eq!(fit.intercept, 40.0, epsilon = 1e-10);
        assert_relative_eq!(fit.r_squared, 1.0, epsilon = 1e-10);
        assert_eq!(fit.status, FitStatus::Fitted);
    }

    #[test]
    fn test_three_points() {
        let fit = LinearFit::fit(&from_values(&[10.0, 20.0, 30.0]));
        assert_relative_eq!(fit.slope, 10.0, epsilon = 1e-12);
        assert_relative_eq!(fit.intercept, 10.0, epsilon = 1e-12);
        assert_relative_eq!(fit.r_squared, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_too_short_is_zero() {
        for values in [&[][..], &[42.0][..]] {
            let fit = LinearFit::fit(&from_values(values));
            assert_eq!(fit.slope, 0.0);
            assert_eq!(fit.intercept, 0.0);
            assert_eq!(fit.r_squared, 0.0);
            assert_eq!(fit.status, FitStatus::InsufficientData);
        }
    }

    #[test]
    fn test_constant_series_is_perfect_fit() {
        let fit = LinearFit::fit(&from_values(&[7.0, 7.0, 7.0, 7.0]));
        assert_eq!(fit.slope, 0.0);
        assert_relative_eq!(fit.intercept, 7.0, epsilon = 1e-12);
        assert_eq!(fit.r_squared, 1.0);
    }

    #[test]
    fn test_two_points_pass_through_both() {
        let fit = LinearFit::fit(&from_values(&[3.0, 8.0]));
        assert_relative_eq!(fit.evaluate(0.0), 3.0, epsilon = 1e-12);
        assert_relative_eq!(fit.evaluate(1.0), 8.0, epsilon = 1e-12);
    }
}
