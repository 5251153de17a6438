//! Quadrature strategies
//!
//! Four independent rules share one contract: given an integrand, bounds and
//! a target sample count, return the estimate, the points sampled for
//! plotting and an optional error estimate.
//!
//! The returned sample count is not always the requested one:
//!
//! | Method      | Samples returned           | Error estimate needs |
//! |-------------|----------------------------|----------------------|
//! | trapezoidal | `n`                        | `n > 2`              |
//! | simpson     | `n`, or `n + 1` if even    | `n > 4`              |
//! | midpoint    | `n + 1` boundary points    | `n > 2`              |
//! | monte_carlo | `n`, sorted by x           | always               |
//!
//! Reversed bounds give the negated integral; equal bounds give zero.

mod midpoint;
mod monte_carlo;
mod simpson;
mod trapezoidal;

use crate::error::{Error, Result};
use crate::rng::RandomSource;
use serde::{Deserialize, Serialize};

/// Output of a single quadrature run
#[derive(Debug, Clone, PartialEq)]
pub struct Quadrature {
    pub value: f64,
    pub x_values: Vec<f64>,
    pub y_values: Vec<f64>,
    /// `None` when there are too few samples to estimate the error
    pub error_estimate: Option<f64>,
}

/// Integration method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Composite trapezoidal rule on evenly spaced nodes
    Trapezoidal,
    /// Composite Simpson 1/3 rule on an odd number of nodes
    Simpson,
    /// Composite midpoint rule
    Midpoint,
    /// Uniform random sampling
    MonteCarlo,
}

impl Default for Method {
    fn default() -> Self {
        Self::Trapezoidal
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trapezoidal => write!(f, "trapezoidal"),
            Self::Simpson => write!(f, "simpson"),
            Self::Midpoint => write!(f, "midpoint"),
            Self::MonteCarlo => write!(f, "monte_carlo"),
        }
    }
}

impl std::str::FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trapezoidal" | "trapezoid" => Ok(Self::Trapezoidal),
            "simpson" => Ok(Self::Simpson),
            "midpoint" => Ok(Self::Midpoint),
            "monte_carlo" | "monte-carlo" | "montecarlo" => Ok(Self::MonteCarlo),
            _ => Err(format!("Unknown integration method: {}", s)),
        }
    }
}

impl Method {
    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Trapezoidal => "Trapezoidal rule on n evenly spaced nodes",
            Self::Simpson => "Simpson's 1/3 rule on an odd number of nodes",
            Self::Midpoint => "Midpoint rule on n equal subintervals",
            Self::MonteCarlo => "Monte Carlo estimate from n uniform random samples",
        }
    }

    /// Smallest sample count the rule can run with
    pub fn min_points(&self) -> usize {
        match self {
            Self::Trapezoidal | Self::Simpson => 2,
            Self::Midpoint | Self::MonteCarlo => 1,
        }
    }

    /// Smallest sample count that yields an error estimate
    pub fn min_points_for_error(&self) -> usize {
        match self {
            Self::Trapezoidal | Self::Midpoint => 3,
            Self::Simpson => 5,
            Self::MonteCarlo => 1,
        }
    }

    /// Integrate `f` over `[a, b]` with this method
    ///
    /// `rng` is only consumed by Monte Carlo.
    pub fn integrate<F>(
        &self,
        f: F,
        a: f64,
        b: f64,
        n: usize,
        rng: &dyn RandomSource,
    ) -> Result<Quadrature>
    where
        F: Fn(f64) -> Result<f64>,
    {
        if n < self.min_points() {
            return Err(Error::InvalidRequest(format!(
                "{} needs at least {} points, got {}",
                self,
                self.min_points(),
                n
            )));
        }

        match self {
            Self::Trapezoidal => trapezoidal::integrate(f, a, b, n),
            Self::Simpson => simpson::integrate(f, a, b, n),
            Self::Midpoint => midpoint::integrate(f, a, b, n),
            Self::MonteCarlo => monte_carlo::integrate(f, a, b, n, rng),
        }
    }
}

/// List all available methods
pub fn available_methods() -> Vec<Method> {
    vec![
        Method::Trapezoidal,
        Method::Simpson,
        Method::Midpoint,
        Method::MonteCarlo,
    ]
}

/// `n` evenly spaced points from `start` to `stop` inclusive
///
/// The last point is exactly `stop`. Works for `stop < start`.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut points: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            points[n - 1] = stop;
            points
        }
    }
}

/// Evaluate `f` at every point, stopping at the first failure
pub(crate) fn sample<F>(f: &F, xs: &[f64]) -> Result<Vec<f64>>
where
    F: Fn(f64) -> Result<f64>,
{
    xs.iter().map(|&x| f(x)).collect()
}

/// Absolute second forward difference of the first three samples
pub(crate) fn second_difference(y: &[f64]) -> f64 {
    (y[2] - 2.0 * y[1] + y[0]).abs()
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::rng::pseudo::SeededSource;
    use approx::assert_relative_eq;
    use std::str::FromStr;

    #[test]
    fn test_linspace() {
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(1.0, 0.0, 3), vec![1.0, 0.5, 0.0]);
        assert_eq!(linspace(2.0, 2.0, 3), vec![2.0, 2.0, 2.0]);
        assert_eq!(linspace(3.0, 4.0, 1), vec![3.0]);
        assert!(linspace(3.0, 4.0, 0).is_empty());
    }

    #[test]
    fn test_method_from_str() {
        assert_eq!(Method::from_str("trapezoidal").unwrap(), Method::Trapezoidal);
        assert_eq!(Method::from_str("Simpson").unwrap(), Method::Simpson);
        assert_eq!(Method::from_str("midpoint").unwrap(), Method::Midpoint);
        assert_eq!(Method::from_str("monte-carlo").unwrap(), Method::MonteCarlo);
        assert!(Method::from_str("romberg").is_err());
    }

    #[test]
    fn test_method_serde_names() {
        for method in available_methods() {
            let json = serde_json::to_string(&method).unwrap();
            assert_eq!(json, format!("\"{}\"", method));
        }
        let parsed: Method = serde_json::from_str("\"monte_carlo\"").unwrap();
        assert_eq!(parsed, Method::MonteCarlo);
    }

    #[test]
    fn test_constant_over_all_methods() {
        let rng = SeededSource::new(42);
        for method in available_methods() {
            let q = method.integrate(constant(5.0), 1.0, 3.0, 100, &rng).unwrap();
            assert_relative_eq!(q.value, 10.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_zero_width_interval() {
        let rng = SeededSource::new(1);
        for method in available_methods() {
            for n in [10, 11, 100] {
                let q = method.integrate(poly(&[1.0, 0.0, 1.0]), 1.5, 1.5, n, &rng).unwrap();
                assert_eq!(q.value, 0.0, "{} with n = {}", method, n);
            }
        }
    }

    #[test]
    fn test_bound_swap_negates() {
        for method in available_methods() {
            for n in [10, 25, 100] {
                let forward = method
                    .integrate(poly(&[0.5, -1.0, 3.0]), -1.0, 2.0, n, &SeededSource::new(9))
                    .unwrap();
                let backward = method
                    .integrate(poly(&[0.5, -1.0, 3.0]), 2.0, -1.0, n, &SeededSource::new(9))
                    .unwrap();
                assert_relative_eq!(forward.value, -backward.value, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_samples_have_equal_length() {
        let rng = SeededSource::new(3);
        for method in available_methods() {
            let q = method.integrate(poly(&[0.0, 1.0]), 0.0, 1.0, 50, &rng).unwrap();
            assert_eq!(q.x_values.len(), q.y_values.len());
        }
    }

    #[test]
    fn test_too_few_points() {
        let rng = SeededSource::new(3);
        assert!(Method::Trapezoidal
            .integrate(constant(1.0), 0.0, 1.0, 1, &rng)
            .is_err());
        assert!(Method::MonteCarlo
            .integrate(constant(1.0), 0.0, 1.0, 0, &rng)
            .is_err());

        for method in available_methods() {
            let below = method.min_points() - 1;
            assert!(matches!(
                method.integrate(constant(1.0), 0.0, 1.0, below, &rng),
                Err(Error::InvalidRequest(_))
            ));
            assert!(method
                .integrate(constant(1.0), 0.0, 1.0, method.min_points(), &rng)
                .is_ok());
        }
    }

    #[test]
    fn test_evaluation_error_propagates() {
        let rng = SeededSource::new(3);
        let failing = |x: f64| {
            if x > 0.5 {
                Err(Error::Evaluation {
                    x,
                    message: "out of domain".to_string(),
                })
            } else {
                Ok(x)
            }
        };
        for method in available_methods() {
            let result = method.integrate(failing, 0.0, 1.0, 20, &rng);
            assert!(matches!(result, Err(Error::Evaluation { x, .. }) if x > 0.5));
        }
    }
}
