use crate::core::solver::EPS;
use crate::core::vect::{ensure_finite, Angle, Vect};
use crate::error::{Error, Result};

/// A finite wall segment with distinct endpoints.
///
/// The endpoints are kept private so the non-degeneracy invariant holds for
/// the lifetime of the value; derived quantities (`direction`, `normal`)
/// rely on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    p1: Vect,
    p2: Vect,
}

impl LineSegment {
    /// Create a segment after validating its invariants.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if either endpoint is non-finite or the
    ///   endpoints coincide (closer than the crate epsilon).
    pub fn new(p1: Vect, p2: Vect) -> Result<Self> {
        ensure_finite("segment endpoint p1", p1)?;
        ensure_finite("segment endpoint p2", p2)?;
        if p1.distance_squared(p2) <= EPS * EPS {
            return Err(Error::InvalidParam(format!(
                "segment endpoints must be distinct, got ({}, {}) twice",
                p1.x, p1.y
            )));
        }
        Ok(Self { p1, p2 })
    }

    #[inline]
    pub fn p1(&self) -> Vect {
        self.p1
    }

    #[inline]
    pub fn p2(&self) -> Vect {
        self.p2
    }

    /// Unit direction vector from `p1` toward `p2`.
    #[inline]
    pub fn direction(&self) -> Vect {
        (self.p2 - self.p1).normalized()
    }

    /// Unit normal, the counterclockwise perpendicular of `direction`.
    #[inline]
    pub fn normal(&self) -> Vect {
        self.direction().perp()
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.p1.distance_to(self.p2)
    }

    #[inline]
    pub fn length_squared(&self) -> f64 {
        self.p1.distance_squared(self.p2)
    }

    /// Rigid rotation about `center`: both endpoints rotate independently.
    /// Rotation preserves endpoint separation, so the result needs no
    /// re-validation.
    pub fn rotated_about(&self, center: Vect, angle: Angle) -> Self {
        Self {
            p1: self.p1.rotated_about(center, angle),
            p2: self.p2.rotated_about(center, angle),
        }
    }
}

/// A circle: a circular obstacle, or a ball when paired with a velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    center: Vect,
    radius: f64,
}

impl Circle {
    /// Create a circle after validating its invariants.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if the center is non-finite or the radius is
    ///   not strictly positive and finite.
    pub fn new(center: Vect, radius: f64) -> Result<Self> {
        ensure_finite("circle center", center)?;
        if !radius.is_finite() || radius <= 0.0 {
            return Err(Error::InvalidParam(format!(
                "radius must be finite and > 0, got {radius}"
            )));
        }
        Ok(Self { center, radius })
    }

    #[inline]
    pub fn center(&self) -> Vect {
        self.center
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Rigid rotation about `center`: only the circle's center moves, the
    /// radius is invariant.
    pub fn rotated_about(&self, center: Vect, angle: Angle) -> Self {
        Self {
            center: self.center.rotated_about(center, angle),
            radius: self.radius,
        }
    }
}

/// Two real numbers: the roots of a quadratic (possibly equal), or a pair of
/// candidate times. No ordering is guaranteed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoublePair {
    pub d1: f64,
    pub d2: f64,
}

impl DoublePair {
    pub const fn new(d1: f64, d2: f64) -> Self {
        Self { d1, d2 }
    }
}

/// The two post-collision velocities of a two-ball collision, in
/// (ball1, ball2) order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectPair {
    pub v1: Vect,
    pub v2: Vect,
}

impl VectPair {
    pub const fn new(v1: Vect, v2: Vect) -> Self {
        Self { v1, v2 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_rejects_coincident_endpoints() {
        let p = Vect::new(1.0, 2.0);
        let err = LineSegment::new(p, p).unwrap_err();
        assert!(err.to_string().contains("distinct"));
    }

    #[test]
    fn segment_rejects_non_finite_endpoint() {
        let err = LineSegment::new(Vect::new(f64::NAN, 0.0), Vect::new(1.0, 0.0)).unwrap_err();
        assert!(err.to_string().contains("finite"));
    }

    #[test]
    fn segment_derived_quantities() -> Result<()> {
        let seg = LineSegment::new(Vect::new(0.0, 0.0), Vect::new(3.0, 4.0))?;
        assert!((seg.length() - 5.0).abs() < 1e-12);
        assert!((seg.length_squared() - 25.0).abs() < 1e-12);
        let d = seg.direction();
        assert!((d.x - 0.6).abs() < 1e-12);
        assert!((d.y - 0.8).abs() < 1e-12);
        // Normal is perpendicular to the direction and unit length.
        assert!(seg.normal().dot(d).abs() < 1e-12);
        assert!((seg.normal().length() - 1.0).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn segment_rotation_preserves_length() -> Result<()> {
        let seg = LineSegment::new(Vect::new(1.0, 0.0), Vect::new(4.0, 0.0))?;
        let rot = seg.rotated_about(Vect::new(2.0, 2.0), Angle::from_degrees(37.0)?);
        assert!((rot.length() - seg.length()).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn circle_rejects_bad_radius() {
        assert!(Circle::new(Vect::ZERO, 0.0).is_err());
        assert!(Circle::new(Vect::ZERO, -1.0).is_err());
        assert!(Circle::new(Vect::ZERO, f64::INFINITY).is_err());
        assert!(Circle::new(Vect::ZERO, 1.0).is_ok());
    }

    #[test]
    fn circle_rotation_moves_center_only() -> Result<()> {
        let c = Circle::new(Vect::new(2.0, 0.0), 0.5)?;
        let r = c.rotated_about(Vect::ZERO, Angle::from_degrees(90.0)?);
        assert!((r.center().x).abs() < 1e-12);
        assert!((r.center().y - 2.0).abs() < 1e-12);
        assert_eq!(r.radius(), 0.5);
        Ok(())
    }
}
