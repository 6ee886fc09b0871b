/// Below this absolute determinant the system is treated as singular.
pub const SINGULAR_EPSILON: f64 = 1e-9;

/// Outcome of solving a 3x3 system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Solution {
    Unique([f64; 3]),
    /// No unique solution. `values()` reports the zero vector.
    Singular,
}

impl Solution {
    /// Solution vector, or `[0, 0, 0]` when singular.
    pub fn values(&self) -> [f64; 3] {
        match self {
            Solution::Unique(x) => *x,
            Solution::Singular => [0.0; 3],
        }
    }

    pub fn is_singular(&self) -> bool {
        matches!(self, Solution::Singular)
    }
}

pub fn determinant(m: &[[f64; 3]; 3]) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

/// Solve `a * x = b` with Cramer's rule.
pub fn solve3(a: &[[f64; 3]; 3], b: &[f64; 3]) -> Solution {
    let det = determinant(a);
    if det.abs() < SINGULAR_EPSILON {
        return Solution::Singular;
    }

    let mut x = [0.0; 3];
    for (col, xi) in x.iter_mut().enumerate() {
        let mut replaced = *a;
        for row in 0..3 {
            replaced[row][col] = b[row];
        }
        *xi = determinant(&replaced) / det;
    }
    Solution::Unique(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_returns_rhs() {
        let a = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        let x = solve3(&a, &[4.0, -2.0, 7.5]).values();
        assert_eq!(x, [4.0, -2.0, 7.5]);
    }

    #[test]
    fn test_general_system() {
        // 2x + y - z = 8, -3x - y + 2z = -11, -2x + y + 2z = -3
        let a = [[2.0, 1.0, -1.0], [-3.0, -1.0, 2.0], [-2.0, 1.0, 2.0]];
        let sol = solve3(&a, &[8.0, -11.0, -3.0]);
        assert!(!sol.is_singular());
        let x = sol.values();
        assert_relative_eq!(x[0], 2.0, epsilon = 1e-12);
        assert_relative_eq!(x[1], 3.0, epsilon = 1e-12);
        assert_relative_eq!(x[2], -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_singular_yields_zero_vector() {
        // Second row is twice the first.
        let a = [[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [0.0, 1.0, 5.0]];
        let sol = solve3(&a, &[1.0, 2.0, 3.0]);
        assert_eq!(sol, Solution::Singular);
        assert_eq!(sol.values(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_near_singular_threshold() {
        let a = [[1e-4, 0.0, 0.0], [0.0, 1e-4, 0.0], [0.0, 0.0, 1e-4]];
        // det = 1e-12, below the threshold.
        assert!(solve3(&a, &[1.0, 1.0, 1.0]).is_singular());
    }
}
