use crate::core::shapes::DoublePair;
use crate::error::{Error, Result};

/// Shared numeric tolerance applied to every geometric and temporal
/// comparison in the crate, so that a contact classified as "touching" in
/// one computation is never re-classified as "penetrating" or "missed" in a
/// related one.
pub const EPS: f64 = 1e-10;

/// Sentinel contact time meaning "never collides under the given motion and
/// search horizon". Part of the observable contract: predictors return this
/// value, never a negative or NaN time.
pub const NO_COLLISION: f64 = f64::INFINITY;

fn ensure_finite_coeffs(a: f64, b: f64, c: f64) -> Result<()> {
    for (name, v) in [("a", a), ("b", b), ("c", c)] {
        if !v.is_finite() {
            return Err(Error::InvalidParam(format!(
                "quadratic coefficient {name} must be finite, got {v}"
            )));
        }
    }
    Ok(())
}

/// Solve `a·t² + b·t + c = 0` over the reals.
///
/// Returns `None` when no real solution exists: complex roots, or the
/// degenerate case where both `a` and `b` vanish (a zero polynomial is not
/// silently treated as having a root at 0). A double root is returned as an
/// equal pair. No ordering is guaranteed on the pair.
///
/// The two-root case uses the cancellation-free form: one root from
/// `q = -(b + sign(b)·√D)/2`, the other from `c/q`, avoiding the
/// subtraction of nearly equal magnitudes when `|4ac| ≪ b²`.
///
/// Errors:
/// - `Error::InvalidParam` if any coefficient is NaN or infinite.
pub fn quadratic_solution(a: f64, b: f64, c: f64) -> Result<Option<DoublePair>> {
    ensure_finite_coeffs(a, b, c)?;

    if a.abs() < EPS {
        // Degenerate to linear: b·t + c = 0.
        if b.abs() < EPS {
            return Ok(None);
        }
        let t = -c / b;
        return Ok(Some(DoublePair::new(t, t)));
    }

    let disc = b * b - 4.0 * a * c;
    if disc < -EPS {
        return Ok(None);
    }
    if disc.abs() <= EPS {
        // Numerically stable double root.
        let t = -b / (2.0 * a);
        return Ok(Some(DoublePair::new(t, t)));
    }

    // q is nonzero here: b = 0 implies disc = -4ac > EPS, so √disc > 0.
    let q = -0.5 * (b + b.signum() * disc.sqrt());
    Ok(Some(DoublePair::new(q / a, c / q)))
}

/// The smallest nonnegative root of `a·t² + b·t + c = 0`, or
/// [`NO_COLLISION`] when no root is ≥ 0. A root within [`EPS`] of zero
/// counts as zero. Never returns a negative value or NaN.
pub fn min_quadratic_solution(a: f64, b: f64, c: f64) -> Result<f64> {
    let Some(roots) = quadratic_solution(a, b, c)? else {
        return Ok(NO_COLLISION);
    };
    let mut best = NO_COLLISION;
    for root in [roots.d1, roots.d2] {
        let t = if root.abs() <= EPS { 0.0 } else { root };
        if t >= 0.0 && t < best {
            best = t;
        }
    }
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_distinct_roots() -> Result<()> {
        // (t - 2)(t - 5) = t² - 7t + 10
        let roots = quadratic_solution(1.0, -7.0, 10.0)?.expect("real roots");
        let (lo, hi) = (roots.d1.min(roots.d2), roots.d1.max(roots.d2));
        assert!((lo - 2.0).abs() < 1e-12);
        assert!((hi - 5.0).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn double_root() -> Result<()> {
        // (t - 3)² = t² - 6t + 9
        let roots = quadratic_solution(1.0, -6.0, 9.0)?.expect("double root");
        assert!((roots.d1 - 3.0).abs() < 1e-9);
        assert_eq!(roots.d1, roots.d2);
        Ok(())
    }

    #[test]
    fn complex_roots_are_none() -> Result<()> {
        // t² + 1 = 0
        assert!(quadratic_solution(1.0, 0.0, 1.0)?.is_none());
        Ok(())
    }

    #[test]
    fn linear_degenerate() -> Result<()> {
        // 0·t² + 2t - 8 = 0 → t = 4
        let roots = quadratic_solution(0.0, 2.0, -8.0)?.expect("linear root");
        assert!((roots.d1 - 4.0).abs() < 1e-12);
        assert_eq!(roots.d1, roots.d2);
        Ok(())
    }

    #[test]
    fn zero_polynomial_has_no_solution() -> Result<()> {
        assert!(quadratic_solution(0.0, 0.0, 0.0)?.is_none());
        assert!(quadratic_solution(0.0, 0.0, 3.0)?.is_none());
        Ok(())
    }

    #[test]
    fn cancellation_resistant_small_root() -> Result<()> {
        // t² - 1e8·t + 1 = 0 has roots ≈ 1e8 and ≈ 1e-8; the naive formula
        // loses the small root to cancellation.
        let roots = quadratic_solution(1.0, -1e8, 1.0)?.expect("real roots");
        let small = roots.d1.min(roots.d2);
        assert!((small - 1e-8).abs() / 1e-8 < 1e-9);
        Ok(())
    }

    #[test]
    fn rejects_non_finite_coefficients() {
        assert!(quadratic_solution(f64::NAN, 1.0, 1.0).is_err());
        assert!(quadratic_solution(1.0, f64::INFINITY, 1.0).is_err());
    }

    #[test]
    fn min_solution_picks_smallest_nonnegative() -> Result<()> {
        // Roots 2 and 5.
        assert!((min_quadratic_solution(1.0, -7.0, 10.0)? - 2.0).abs() < 1e-12);
        // Roots -3 and 4: the negative one is skipped.
        assert!((min_quadratic_solution(1.0, -1.0, -12.0)? - 4.0).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn min_solution_sentinel_when_all_negative() -> Result<()> {
        // (t + 2)(t + 5) = t² + 7t + 10
        assert_eq!(min_quadratic_solution(1.0, 7.0, 10.0)?, NO_COLLISION);
        // No real roots at all.
        assert_eq!(min_quadratic_solution(1.0, 0.0, 1.0)?, NO_COLLISION);
        Ok(())
    }

    #[test]
    fn min_solution_clamps_near_zero_root() -> Result<()> {
        // Roots at -1e-12 (within EPS of zero) and 7.
        let t = min_quadratic_solution(1.0, -(7.0 - 1e-12), 7.0 * -1e-12)?;
        assert_eq!(t, 0.0);
        Ok(())
    }
}
