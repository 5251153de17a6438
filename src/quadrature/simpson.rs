//! Composite Simpson's 1/3 rule

use crate::error::Result;
use crate::quadrature::{linspace, sample, Quadrature};

/// Integrate `f` over `[a, b]` with Simpson's 1/3 rule
///
/// The rule needs an odd node count, so an even `n` is bumped to `n + 1`
/// and the returned samples have that length. Exact for polynomials up to
/// degree 3. The error estimate uses the fourth difference of the first five
/// nodes and is `None` for `n <= 4`. `n` must be at least 2.
pub(crate) fn integrate<F>(f: F, a: f64, b: f64, n: usize) -> Result<Quadrature>
where
    F: Fn(f64) -> Result<f64>,
{
    let n = if n % 2 == 0 { n + 1 } else { n };

    let x = linspace(a, b, n);
    let y = sample(&f, &x)?;
    let h = (b - a) / (n - 1) as f64;

    let odd: f64 = y[1..n - 1].iter().step_by(2).sum();
    let even: f64 = y[2..n - 1].iter().step_by(2).sum();
    let value = h / 3.0 * (y[0] + y[n - 1] + 4.0 * odd + 2.0 * even);

    // (b-a)^5 * |fourth difference| / h^4 / (180 n^4), h^4 expanded
    let error_estimate = (n > 4).then(|| {
        let fourth = (y[4] - 4.0 * y[3] + 6.0 * y[2] - 4.0 * y[1] + y[0]).abs();
        let steps = ((n - 1) as f64).powi(4);
        (b - a).abs() * steps * fourth / (180.0 * (n as f64).powi(4))
    });

    Ok(Quadrature {
        value,
        x_values: x,
        y_values: y,
        error_estimate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quadrature::testing::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cubic() {
        // integral of x^3 over [0, 2] is 4
        let q = integrate(poly(&[0.0, 0.0, 0.0, 1.0]), 0.0, 2.0, 101).unwrap();
        assert!((q.value - 4.0).abs() < 0.001);
        assert_eq!(q.x_values.len(), 101);
    }

    #[test]
    fn test_exact_for_cubics_regardless_of_n() {
        // 1 - 2x + 3x^2 + x^3 over [-1, 2]: [x - x^2 + x^3 + x^4/4]
        let exact = (2.0 - 4.0 + 8.0 + 4.0) - (-1.0 - 1.0 - 1.0 + 0.25);
        for n in [3, 4, 5, 10, 33, 1000] {
            let q = integrate(poly(&[1.0, -2.0, 3.0, 1.0]), -1.0, 2.0, n).unwrap();
            assert_relative_eq!(q.value, exact, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_even_count_is_bumped() {
        let q = integrate(poly(&[0.0, 1.0]), 0.0, 1.0, 100).unwrap();
        assert_eq!(q.x_values.len(), 101);
        assert_eq!(q.y_values.len(), 101);

        let q = integrate(poly(&[0.0, 1.0]), 0.0, 1.0, 2).unwrap();
        assert_eq!(q.x_values.len(), 3);
    }

    #[test]
    fn test_odd_count_is_kept() {
        let q = integrate(poly(&[0.0, 1.0]), 0.0, 1.0, 11).unwrap();
        assert_eq!(q.x_values.len(), 11);
    }

    #[test]
    fn test_error_estimate_threshold() {
        let f = poly(&[0.0, 0.0, 0.0, 0.0, 1.0]);
        // 4 becomes 5, which is enough
        assert!(integrate(&f, 0.0, 1.0, 4).unwrap().error_estimate.is_some());
        assert!(integrate(&f, 0.0, 1.0, 3).unwrap().error_estimate.is_none());
        assert!(integrate(&f, 0.0, 1.0, 2).unwrap().error_estimate.is_none());

        let q = integrate(&f, 0.0, 1.0, 5).unwrap();
        assert!(q.error_estimate.unwrap() > 0.0);
    }

    #[test]
    fn test_error_estimate_matches_formula() {
        let (a, b) = (0.0, 1.0);
        let q = integrate(|x: f64| Ok(x.exp()), a, b, 20).unwrap();

        let n = 21.0_f64;
        let h = (b - a) / (n - 1.0);
        let y = &q.y_values;
        let fourth = (y[4] - 4.0 * y[3] + 6.0 * y[2] - 4.0 * y[1] + y[0]).abs();
        let expected = (b - a).powi(5) * fourth / h.powi(4) / (180.0 * n.powi(4));
        assert_relative_eq!(q.error_estimate.unwrap(), expected, max_relative = 1e-9);
    }
}
