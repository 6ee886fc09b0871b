use crate::data::observation::ProjectionPoint;
use crate::processing::linear::LinearFit;
use crate::processing::quadratic::QuadraticFit;

/// Extend both models `periods` steps past the `observed` points.
///
/// The first projected index is `observed`, so point `k` sits at
/// `observed + k`.
pub fn project(
    observed: usize,
    linear: &LinearFit,
    quadratic: &QuadraticFit,
    periods: usize,
) -> Vec<ProjectionPoint> {
    (0..periods)
        .map(|k| {
            let x = (observed + k) as f64;
            ProjectionPoint {
                label: format!("Proj {}", k + 1),
                projection: linear.evaluate(x),
                quadratic_projection: quadratic.evaluate(x),
            }
        })
        .collect()
}
