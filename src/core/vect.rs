use std::f64::consts::TAU;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::error::{Error, Result};

/// An immutable 2D vector, used both as a position and as a free vector
/// (velocity, displacement).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vect {
    pub x: f64,
    pub y: f64,
}

impl Vect {
    pub const ZERO: Vect = Vect { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Dot product.
    #[inline]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Scalar 2D cross product (z-component of the 3D cross product).
    #[inline]
    pub fn cross(self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Squared magnitude (avoids sqrt for comparisons).
    #[inline]
    pub fn length_squared(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Magnitude (length) of the vector.
    #[inline]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Unit vector in the same direction, or `ZERO` for a near-zero input.
    /// Callers that require a true contact normal must check the length
    /// themselves and report degenerate geometry.
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len < 1e-12 {
            Self::ZERO
        } else {
            self / len
        }
    }

    /// Counterclockwise perpendicular: `(x, y) -> (-y, x)`.
    #[inline]
    pub fn perp(self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Projection of this vector onto `other`, or `ZERO` if `other` is
    /// near-zero.
    pub fn project_onto(self, other: Self) -> Self {
        let len_sq = other.length_squared();
        if len_sq < 1e-12 {
            Self::ZERO
        } else {
            other * (self.dot(other) / len_sq)
        }
    }

    /// Squared Euclidean distance to `other`.
    #[inline]
    pub fn distance_squared(self, other: Self) -> f64 {
        (self - other).length_squared()
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance_to(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// True when both components are finite (neither NaN nor infinite).
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Rigid rotation of this point by `angle` about `center`.
    pub fn rotated_about(self, center: Vect, angle: Angle) -> Self {
        let (sin, cos) = angle.sin_cos();
        rotate_raw(self, center, sin, cos)
    }
}

/// Rotation with a precomputed sine/cosine pair. The rotating-obstacle
/// sweep evaluates this in a loop and must not re-normalize an [`Angle`]
/// per sample.
#[inline]
pub(crate) fn rotate_raw(p: Vect, center: Vect, sin: f64, cos: f64) -> Vect {
    let d = p - center;
    Vect::new(
        center.x + d.x * cos - d.y * sin,
        center.y + d.x * sin + d.y * cos,
    )
}

/// Reject a non-finite vector argument with a descriptive error.
pub(crate) fn ensure_finite(name: &str, v: Vect) -> Result<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidParam(format!(
            "{name} must have finite components, got ({}, {})",
            v.x, v.y
        )))
    }
}

impl Add for Vect {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vect {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Vect {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }
}

impl Div<f64> for Vect {
    type Output = Self;
    fn div(self, scalar: f64) -> Self {
        Self::new(self.x / scalar, self.y / scalar)
    }
}

impl Neg for Vect {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

/// A rotation measure normalized to the canonical range `[0, 2π)`.
///
/// Addition and negation stay within the range. Positive angles rotate
/// counterclockwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Angle(f64);

impl Angle {
    pub const ZERO: Angle = Angle(0.0);

    /// Construct from radians, normalizing into `[0, 2π)`.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if `radians` is NaN or infinite.
    pub fn from_radians(radians: f64) -> Result<Self> {
        if !radians.is_finite() {
            return Err(Error::InvalidParam(format!(
                "angle must be finite, got {radians}"
            )));
        }
        Ok(Self(radians.rem_euclid(TAU)))
    }

    /// Construct from degrees, normalizing into `[0, 2π)`.
    pub fn from_degrees(degrees: f64) -> Result<Self> {
        Self::from_radians(degrees.to_radians())
    }

    /// The normalized measure in radians, within `[0, 2π)`.
    #[inline]
    pub fn radians(self) -> f64 {
        self.0
    }

    /// Simultaneous sine and cosine of the angle.
    #[inline]
    pub fn sin_cos(self) -> (f64, f64) {
        self.0.sin_cos()
    }
}

impl Add for Angle {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        // Both operands are already in [0, 2π); the sum stays finite.
        Self((self.0 + other.0).rem_euclid(TAU))
    }
}

impl Neg for Angle {
    type Output = Self;
    fn neg(self) -> Self {
        Self((-self.0).rem_euclid(TAU))
    }
}
