use serde::Serialize;

use crate::data::observation::{DerivedObservation, Observation, ProjectionPoint};
use crate::processing::differences::finite_differences;
use crate::processing::linear::LinearFit;
use crate::processing::projection::project;
use crate::processing::quadratic::QuadraticFit;
use crate::processing::statistics::StatisticsBundle;

/// Number of periods projected past the observed data by default.
pub const DEFAULT_HORIZON: usize = 5;

/// Everything the engine derives from one series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    /// Observations annotated with differences and both fitted curves.
    pub merged: Vec<DerivedObservation>,
    pub forecast: Vec<ProjectionPoint>,
    pub linear: LinearFit,
    pub quadratic: QuadraticFit,
    pub avg_acceleration: f64,
}

impl Analysis {
    pub fn statistics(&self) -> StatisticsBundle {
        StatisticsBundle {
            linear: self.linear,
            quadratic: self.quadratic,
            avg_acceleration: self.avg_acceleration,
        }
    }
}

pub fn analyze(series: &[Observation]) -> Analysis {
    analyze_with_horizon(series, DEFAULT_HORIZON)
}

/// Fit both models, annotate the series and project `periods` steps ahead.
pub fn analyze_with_horizon(series: &[Observation], periods: usize) -> Analysis {
    let linear = LinearFit::fit(series);
    let quadratic = QuadraticFit::fit(series);
    let derivatives = finite_differences(series);

    let merged = derivatives
        .series
        .into_iter()
        .enumerate()
        .map(|(i, point)| {
            let x = i as f64;
            point.with_fitted(linear.evaluate(x), quadratic.evaluate(x))
        })
        .collect();

    let forecast = project(series.len(), &linear, &quadratic, periods);

    Analysis {
        merged,
        forecast,
        linear,
        quadratic,
        avg_acceleration: derivatives.avg_acceleration,
    }
}
