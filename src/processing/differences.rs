use crate::data::observation::{DerivedObservation, Observation};

/// Series annotated with discrete first and second differences.
#[derive(Debug, Clone, PartialEq)]
pub struct Derivatives {
    pub series: Vec<DerivedObservation>,
    /// Mean of the second difference over indices 2.. only.
    pub avg_acceleration: f64,
}

/// Compute per-point velocity (first difference) and acceleration (second
/// difference).
///
/// With fewer than three observations the copies carry no derivative fields
/// and the average acceleration is zero. Index 0 has zero velocity and
/// indices 0 and 1 have zero acceleration; those leading zeros are excluded
/// from the average.
pub fn finite_differences(series: &[Observation]) -> Derivatives {
    if series.len() < 3 {
        return Derivatives {
            series: series.iter().map(DerivedObservation::from).collect(),
            avg_acceleration: 0.0,
        };
    }

    let mut derived = Vec::with_capacity(series.len());
    let mut prev_velocity = 0.0;
    let mut acceleration_sum = 0.0;

    for (i, obs) in series.iter().enumerate() {
        let velocity = if i > 0 {
            obs.value - series[i - 1].value
        } else {
            0.0
        };
        let acceleration = if i > 1 { velocity - prev_velocity } else { 0.0 };
        if i > 1 {
            acceleration_sum += acceleration;
        }

        derived.push(DerivedObservation::from(obs).with_derivatives(velocity, acceleration));
        prev_velocity = velocity;
    }

    Derivatives {
        series: derived,
        avg_acceleration: acceleration_sum / (series.len() - 2) as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::observation::from_values;

    #[test]
    fn test_constant_second_difference() {
        let d = finite_differences(&from_values(&[1.0, 2.0, 4.0, 7.0, 11.0]));
        let velocity: Vec<f64> = d.series.iter().filter_map(|p| p.velocity).collect();
        let acceleration: Vec<f64> = d.series.iter().filter_map(|p| p.acceleration).collect();

        assert_eq!(velocity, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(acceleration, vec![0.0, 0.0, 1.0, 1.0, 1.0]);
        assert_eq!(d.avg_acceleration, 1.0);
    }

    #[test]
    fn test_leading_zeros_do_not_dilute_average() {
        // Second differences: 4, 4 -> average 4, not 8/4.
        let d = finite_differences(&from_values(&[0.0, 1.0, 6.0, 15.0]));
        assert_eq!(d.avg_acceleration, 4.0);
    }

    #[test]
    fn test_short_series_unchanged() {
        let input = from_values(&[3.0, 9.0]);
        let d = finite_differences(&input);
        assert_eq!(d.avg_acceleration, 0.0);
        assert_eq!(d.series.len(), 2);
        assert!(d.series.iter().all(|p| p.velocity.is_none() && p.acceleration.is_none()));
        assert_eq!(d.series[1].value, 9.0);
    }

    #[test]
    fn test_constant_series() {
        let d = finite_differences(&from_values(&[5.0; 6]));
        assert!(d.series.iter().all(|p| p.velocity == Some(0.0)));
        assert!(d.series.iter().all(|p| p.acceleration == Some(0.0)));
        assert_eq!(d.avg_acceleration, 0.0);
    }
}
