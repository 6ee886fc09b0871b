use serde::Serialize;

use crate::data::observation::Observation;
use crate::processing::solver::{solve3, Solution};
use crate::processing::statistics::{r_squared, FitStatus};

/// Least-squares parabola `y = a*x^2 + b*x + c` over the sequence index.
///
/// `a` carries the curvature: positive is accelerating growth, negative is
/// decelerating or declining.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuadraticFit {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub r_squared: f64,
    pub status: FitStatus,
}

impl Default for QuadraticFit {
    fn default() -> Self {
        Self {
            a: 0.0,
            b: 0.0,
            c: 0.0,
            r_squared: 0.0,
            status: FitStatus::InsufficientData,
        }
    }
}

impl QuadraticFit {
    pub fn evaluate(&self, x: f64) -> f64 {
        self.a * x * x + self.b * x + self.c
    }

    /// Solve the normal equations for `(c, b, a)`.
    ///
    /// Fewer than three observations give the all-zero fit. A singular system
    /// gives zero coefficients tagged `FitStatus::Singular`.
    pub fn fit(series: &[Observation]) -> Self {
        let n = series.len();
        if n < 3 {
            return Self::default();
        }

        let (mut sum_x, mut sum_x2, mut sum_x3, mut sum_x4) = (0.0, 0.0, 0.0, 0.0);
        let (mut sum_y, mut sum_xy, mut sum_x2y) = (0.0, 0.0, 0.0);
        for (i, obs) in series.iter().enumerate() {
            let x = i as f64;
            let x2 = x * x;
            let y = obs.value;

            sum_x += x;
            sum_x2 += x2;
            sum_x3 += x2 * x;
            sum_x4 += x2 * x2;

            sum_y += y;
            sum_xy += x * y;
            sum_x2y += x2 * y;
        }

        let matrix = [
            [n as f64, sum_x, sum_x2],
            [sum_x, sum_x2, sum_x3],
            [sum_x2, sum_x3, sum_x4],
        ];
        let rhs = [sum_y, sum_xy, sum_x2y];

        let solution = solve3(&matrix, &rhs);
        let status = match solution {
            Solution::Unique(_) => FitStatus::Fitted,
            Solution::Singular => {
                tracing::warn!(n, "quadratic normal equations are singular");
                FitStatus::Singular
            }
        };
        let [c, b, a] = solution.values();
        let r_squared = r_squared(series, |x| a * x * x + b * x + c);

        tracing::debug!(n, a, b, c, r_squared, "quadratic fit");

        Self {
            a,
            b,
            c,
            r_squared,
            status,
        }
    }
}
