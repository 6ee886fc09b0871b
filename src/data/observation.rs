use serde::{Deserialize, Serialize};

/// One labelled sample. Its position in the containing slice is the time
/// index used by every model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub label: String,
    pub value: f64,
}

impl Observation {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Build observations from bare values, labelled by their 1-based position.
pub fn from_values(values: &[f64]) -> Vec<Observation> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| Observation::new(format!("{}", i + 1), v))
        .collect()
}

/// An observation copy annotated with values computed by the engine.
///
/// The annotations are for presentation only; nothing reads them back as
/// input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedObservation {
    pub label: String,
    pub value: f64,
    pub velocity: Option<f64>,
    pub acceleration: Option<f64>,
    pub regression_value: Option<f64>,
    pub quadratic_value: Option<f64>,
}

impl DerivedObservation {
    pub fn with_derivatives(mut self, velocity: f64, acceleration: f64) -> Self {
        self.velocity = Some(velocity);
        self.acceleration = Some(acceleration);
        self
    }

    pub fn with_fitted(mut self, regression: f64, quadratic: f64) -> Self {
        self.regression_value = Some(regression);
        self.quadratic_value = Some(quadratic);
        self
    }
}

impl From<&Observation> for DerivedObservation {
    fn from(obs: &Observation) -> Self {
        Self {
            label: obs.label.clone(),
            value: obs.value,
            velocity: None,
            acceleration: None,
            regression_value: None,
            quadratic_value: None,
        }
    }
}

/// A forecast point past the end of the observed series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionPoint {
    /// Synthesized as `Proj 1`, `Proj 2`, ...
    pub label: String,
    pub projection: f64,
    pub quadratic_projection: f64,
}
