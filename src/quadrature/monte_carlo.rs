//! Monte Carlo integration

use crate::error::Result;
use crate::quadrature::{sample, Quadrature};
use crate::rng::RandomSource;

/// Integrate `f` over `[a, b]` from `n` uniform random samples
///
/// Estimate is `(b - a) * mean(y)`; the error estimate is the standard error
/// `|b - a| * std(y) / sqrt(n)` (population standard deviation) and is always
/// present. Samples are drawn over the interval regardless of orientation, so
/// the same source state gives exactly negated results for swapped bounds.
/// The returned samples are sorted by x.
pub(crate) fn integrate<F>(f: F, a: f64, b: f64, n: usize, rng: &dyn RandomSource) -> Result<Quadrature>
where
    F: Fn(f64) -> Result<f64>,
{
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let x: Vec<f64> = rng
        .floats(n)?
        .into_iter()
        .map(|u| lo + (hi - lo) * u)
        .collect();
    let y = sample(&f, &x)?;

    let count = n as f64;
    let mean = y.iter().sum::<f64>() / count;
    let variance = y.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count;
    let value = (b - a) * mean;
    let std_error = (b - a).abs() * variance.sqrt() / count.sqrt();

    let mut points: Vec<(f64, f64)> = x.into_iter().zip(y).collect();
    points.sort_by(|p, q| p.0.total_cmp(&q.0));
    let (x_values, y_values) = points.into_iter().unzip();

    Ok(Quadrature {
        value,
        x_values,
        y_values,
        error_estimate: Some(std_error),
    })
}
