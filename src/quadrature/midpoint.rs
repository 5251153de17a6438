//! Composite midpoint rule

use crate::error::Result;
use crate::quadrature::{linspace, sample, second_difference, Quadrature};

/// Integrate `f` over `[a, b]` by sampling the midpoints of `n` equal cells
///
/// The estimate only uses the midpoints, but the returned samples are the
/// `n + 1` cell boundaries, evaluated separately for plotting. The error
/// estimate uses the second difference of the first three boundaries and is
/// `None` for `n <= 2`.
pub(crate) fn integrate<F>(f: F, a: f64, b: f64, n: usize) -> Result<Quadrature>
where
    F: Fn(f64) -> Result<f64>,
{
    let h = (b - a) / n as f64;
    let x_mid: Vec<f64> = (0..n).map(|i| a + (i as f64 + 0.5) * h).collect();
    let y_mid = sample(&f, &x_mid)?;
    let value = h * y_mid.iter().sum::<f64>();

    let x = linspace(a, b, n + 1);
    let y = sample(&f, &x)?;

    // (b-a)^3 * |y2 - 2y1 + y0| / h^2 / (24 n^2); (b-a)^3 / h^2 is (b-a) n^2
    let error_estimate = (n > 2).then(|| (b - a).abs() * second_difference(&y) / 24.0);

    Ok(Quadrature {
        value,
        x_values: x,
        y_values: y,
        error_estimate,
    })
}
