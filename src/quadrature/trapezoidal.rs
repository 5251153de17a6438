//! Composite trapezoidal rule

use crate::error::Result;
use crate::quadrature::{linspace, sample, second_difference, Quadrature};

/// Integrate `f` over `[a, b]` on `n` evenly spaced nodes (endpoints included)
///
/// Exact for polynomials of degree 1. The error estimate uses the second
/// difference of the first three nodes and is `None` for `n <= 2`. `n` must
/// be at least 2.
pub(crate) fn integrate<F>(f: F, a: f64, b: f64, n: usize) -> Result<Quadrature>
where
    F: Fn(f64) -> Result<f64>,
{
    let x = linspace(a, b, n);
    let y = sample(&f, &x)?;
    let h = (b - a) / (n - 1) as f64;

    let interior: f64 = y[1..n - 1].iter().sum();
    let value = h * (0.5 * y[0] + interior + 0.5 * y[n - 1]);

    // (b-a)^3 * |y2 - 2y1 + y0| / h^2 / (12 n^2), with h^2 expanded so a
    // zero-width interval gives 0 instead of 0/0
    let error_estimate = (n > 2).then(|| {
        let steps = (n - 1) as f64;
        let n = n as f64;
        (b - a).abs() * steps * steps * second_difference(&y) / (12.0 * n * n)
    });

    Ok(Quadrature {
        value,
        x_values: x,
        y_values: y,
        error_estimate,
    })
}
