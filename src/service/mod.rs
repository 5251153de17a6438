//! Integration service
//!
//! Ties the evaluator and the quadrature strategies together: compile the
//! expression, run the requested method and assemble the result record.
//!
//! Note: `num_points` in the result echoes the *requested* count. Simpson
//! (even requests) and midpoint return a different number of samples, so
//! clients must use the length of `x_values` to know how many were plotted.

use crate::constants::limits::{DEFAULT_POINTS, MAX_POINTS, MIN_POINTS};
use crate::error::{Error, Result};
use crate::expr;
use crate::quadrature::Method;
use crate::rng::RandomSource;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Integration request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationRequest {
    /// Expression over `x`, e.g. `x**2`
    pub function: String,
    pub lower_bound: f64,
    pub upper_bound: f64,
    /// Target sample count, within [10, 10000]
    #[serde(default = "default_points")]
    pub num_points: usize,
    #[serde(default)]
    pub method: Method,
}

fn default_points() -> usize {
    DEFAULT_POINTS
}

impl IntegrationRequest {
    /// Create a request with the given method and sample count
    pub fn new(
        function: impl Into<String>,
        lower_bound: f64,
        upper_bound: f64,
        num_points: usize,
        method: Method,
    ) -> Self {
        Self {
            function: function.into(),
            lower_bound,
            upper_bound,
            num_points,
            method,
        }
    }

    /// Validate the request before it reaches [`compute`]
    ///
    /// Bounds must be finite and `num_points` must lie in [10, 10000].
    /// The expression itself is checked by compilation, not here.
    pub fn validate(&self) -> Result<()> {
        if !self.lower_bound.is_finite() || !self.upper_bound.is_finite() {
            return Err(Error::InvalidRequest(format!(
                "Bounds must be finite numbers, got [{}, {}]",
                self.lower_bound, self.upper_bound
            )));
        }
        if !(MIN_POINTS..=MAX_POINTS).contains(&self.num_points) {
            return Err(Error::InvalidRequest(format!(
                "num_points {} is out of range [{}, {}]",
                self.num_points, MIN_POINTS, MAX_POINTS
            )));
        }
        Ok(())
    }
}

/// Integration result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationResult {
    pub value: f64,
    pub method: Method,
    /// The requested sample count (see module docs)
    pub num_points: usize,
    pub x_values: Vec<f64>,
    pub y_values: Vec<f64>,
    pub error_estimate: Option<f64>,
}

/// Compute the integral described by `request`
///
/// Fails with [`Error::InvalidExpression`] when the expression does not
/// compile and with [`Error::Evaluation`] when it fails at a sampled point.
pub fn compute(request: &IntegrationRequest, rng: &dyn RandomSource) -> Result<IntegrationResult> {
    let function = expr::compile(&request.function)?;

    debug!(
        "Integrating '{}' over [{}, {}] with {} ({} points)",
        function.source(),
        request.lower_bound,
        request.upper_bound,
        request.method,
        request.num_points
    );

    let quadrature = request.method.integrate(
        |x| function.eval(x),
        request.lower_bound,
        request.upper_bound,
        request.num_points,
        rng,
    )?;

    // Finite samples can still sum past f64::MAX
    let estimate_finite = quadrature.error_estimate.map_or(true, f64::is_finite);
    if !quadrature.value.is_finite() || !estimate_finite {
        return Err(Error::InvalidRequest(format!(
            "Integral of '{}' over [{}, {}] overflows",
            function.source(),
            request.lower_bound,
            request.upper_bound
        )));
    }

    Ok(IntegrationResult {
        value: quadrature.value,
        method: request.method,
        num_points: request.num_points,
        x_values: quadrature.x_values,
        y_values: quadrature.y_values,
        error_estimate: quadrature.error_estimate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quadrature::available_methods;
    use crate::rng::pseudo::SeededSource;

    fn run(function: &str, a: f64, b: f64, n: usize, method: Method) -> Result<IntegrationResult> {
        compute(
            &IntegrationRequest::new(function, a, b, n, method),
            &SeededSource::new(42),
        )
    }

    #[test]
    fn test_trapezoidal_quadratic() {
        let result = run("x**2", 0.0, 1.0, 1000, Method::Trapezoidal).unwrap();
        assert!((result.value - 1.0 / 3.0).abs() < 0.001);
        assert_eq!(result.x_values.len(), 1000);
        assert_eq!(result.y_values.len(), 1000);
        assert_eq!(result.method, Method::Trapezoidal);
        assert_eq!(result.num_points, 1000);
    }

    #[test]
    fn test_simpson_cubic() {
        let result = run("x**3", 0.0, 2.0, 101, Method::Simpson).unwrap();
        assert!((result.value - 4.0).abs() < 0.001);
    }

    #[test]
    fn test_reversed_bounds() {
        let result = run("x", 1.0, 0.0, 100, Method::Trapezoidal).unwrap();
        assert!((result.value + 0.5).abs() < 0.01);
    }

    #[test]
    fn test_zero_interval() {
        let result = run("x**2", 1.0, 1.0, 10, Method::Trapezoidal).unwrap();
        assert_eq!(result.value, 0.0);
    }

    #[test]
    fn test_negative_bounds() {
        let result = run("x", -1.0, 1.0, 100, Method::Trapezoidal).unwrap();
        assert!(result.value.abs() < 0.01);
    }

    #[test]
    fn test_all_methods_reasonable() {
        for method in available_methods() {
            let result = run("x", 0.0, 1.0, 100, method).unwrap();
            assert!(
                (result.value - 0.5).abs() < 0.1,
                "Failed for method {}",
                method
            );
        }
    }

    #[test]
    fn test_requested_points_are_echoed() {
        let simpson = run("x", 0.0, 1.0, 100, Method::Simpson).unwrap();
        assert_eq!(simpson.num_points, 100);
        assert_eq!(simpson.x_values.len(), 101);

        let midpoint = run("x", 0.0, 1.0, 100, Method::Midpoint).unwrap();
        assert_eq!(midpoint.num_points, 100);
        assert_eq!(midpoint.x_values.len(), 101);
    }

    #[test]
    fn test_invalid_expression_propagates() {
        let err = run("import os", 0.0, 1.0, 100, Method::Trapezoidal).unwrap_err();
        assert!(matches!(err, Error::InvalidExpression(_)));
    }

    #[test]
    fn test_evaluation_error_carries_point() {
        // fine at the smoke point, fails once the grid crosses x = 1
        let err = run("log(1 - x)", 0.0, 2.0, 11, Method::Trapezoidal).unwrap_err();
        match err {
            Error::Evaluation { x, .. } => assert!(x >= 1.0),
            other => panic!("expected evaluation error, got {:?}", other),
        }
    }

    #[test]
    fn test_overflowing_sum_is_rejected() {
        // every sample is finite, the accumulated sum is not
        for method in [Method::Trapezoidal, Method::Simpson, Method::Midpoint] {
            let err = run("exp(x)", 0.0, 709.0, 10_000, method).unwrap_err();
            assert!(matches!(err, Error::InvalidRequest(_)), "{}: {:?}", method, err);
        }
    }

    #[test]
    fn test_validate() {
        let mut request = IntegrationRequest::new("x", 0.0, 1.0, 100, Method::Simpson);
        assert!(request.validate().is_ok());

        request.num_points = 9;
        assert!(matches!(request.validate(), Err(Error::InvalidRequest(_))));
        request.num_points = 10_001;
        assert!(request.validate().is_err());
        request.num_points = 10_000;
        assert!(request.validate().is_ok());

        request.upper_bound = f64::INFINITY;
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_request_defaults() {
        let request: IntegrationRequest = serde_json::from_str(
            r#"{"function": "x", "lower_bound": 0, "upper_bound": 1}"#,
        )
        .unwrap();
        assert_eq!(request.num_points, 100);
        assert_eq!(request.method, Method::Trapezoidal);
    }

    #[test]
    fn test_unknown_method_rejected_at_parse() {
        let parsed = serde_json::from_str::<IntegrationRequest>(
            r#"{"function": "x", "lower_bound": 0, "upper_bound": 1, "method": "romberg"}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn test_result_serialization() {
        let result = run("x", 0.0, 1.0, 10, Method::MonteCarlo).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["method"], "monte_carlo");
        assert_eq!(json["num_points"], 10);
        assert!(json["error_estimate"].is_number());

        let simpson = run("x", 0.0, 1.0, 10, Method::Simpson).unwrap();
        let json = serde_json::to_value(&simpson).unwrap();
        assert!(json.get("error_estimate").is_some());
    }
}
