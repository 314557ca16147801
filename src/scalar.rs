//! Tolerance-based comparison of complex scalars.
//!
//! Arithmetic and formatting of matrix elements come straight from
//! [`num_complex::Complex64`]. What this module adds is the per-component
//! absolute tolerance comparison used everywhere a pivot is tested for zero:
//! elimination keeps dividing by entries that drift slightly away from their
//! exact values, so exact `==` on `f64` components would misclassify pivots
//! and derail both elimination families.
//!
//! Division by a zero-modulus divisor is not guarded here; it produces NaN
//! components per IEEE semantics, and the engines rely on pivot tests to
//! avoid it.

use num_complex::Complex64;
use num_traits::Zero;

/// Per-component absolute tolerance for scalar equality and pivot tests.
pub const EPSILON: f64 = 1e-6;

/// Tolerance equality: `|Δre| < EPSILON && |Δim| < EPSILON`.
#[inline]
pub fn approx_eq(a: Complex64, b: Complex64) -> bool {
    (a.re - b.re).abs() < EPSILON && (a.im - b.im).abs() < EPSILON
}

/// Pivot-is-zero test: tolerance equality against `0 + 0i`.
#[inline]
pub fn is_zero(z: Complex64) -> bool {
    approx_eq(z, Complex64::zero())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approx_eq_within_tolerance() {
        let a = Complex64::new(1.0 + 1e-7, 0.0);
        let b = Complex64::new(1.0, 0.0);
        assert!(approx_eq(a, b));
    }

    #[test]
    fn test_approx_eq_outside_tolerance() {
        let a = Complex64::new(1.0 + 1e-5, 0.0);
        let b = Complex64::new(1.0, 0.0);
        assert!(!approx_eq(a, b));
    }

    #[test]
    fn test_approx_eq_imag_component() {
        let a = Complex64::new(1.0, 2.0 + 1e-7);
        let b = Complex64::new(1.0, 2.0);
        assert!(approx_eq(a, b));
        assert!(!approx_eq(a, Complex64::new(1.0, 2.0 + 1e-5)));
    }

    #[test]
    fn test_is_zero() {
        assert!(is_zero(Complex64::zero()));
        assert!(is_zero(Complex64::new(1e-8, -1e-8)));
        assert!(!is_zero(Complex64::new(1e-3, 0.0)));
        assert!(!is_zero(Complex64::new(0.0, 1.0)));
    }

    #[test]
    fn test_zero_divisor_yields_nan() {
        let q = Complex64::new(1.0, 1.0) / Complex64::zero();
        assert!(q.re.is_nan() || q.re.is_infinite());
    }
}
