//! Contact prediction and reflection against obstacles rotating about a
//! fixed pivot at constant angular velocity.
//!
//! No closed-form polynomial exists for the contact time here: the
//! obstacle's surface position is trigonometric in `t` while the ball's is
//! linear. The predictors instead work in the obstacle's co-rotating frame,
//! where the obstacle is fixed and the ball's center traces
//! `rotate(center + t·velocity, pivot, −ω·t)`. The gap between that curve
//! and the obstacle's surface is sampled across a bounded horizon and any
//! sign change is refined by bisection, a tolerance-bounded search in place
//! of the exact root available for translating obstacles.

use crate::core::shapes::{Circle, LineSegment};
use crate::core::solver::{EPS, NO_COLLISION};
use crate::core::statics::{
    self, nearest_point_on_segment, reflect_circle, reflect_wall,
};
use crate::core::vect::{ensure_finite, rotate_raw, Angle, Vect};
use crate::error::{Error, Result};

/// Bounded-search parameters for the rotating-obstacle predictors.
///
/// The fields stay private so a constructed config is always valid. The
/// horizon is required (contact beyond it is reported as no collision),
/// while the remaining knobs default to [`SweepConfig::DEFAULT_SAMPLES`]
/// uniform samples, refinement to [`SweepConfig::DEFAULT_TOLERANCE`] seconds,
/// and at most [`SweepConfig::DEFAULT_MAX_BISECTIONS`] bisection steps.
///
/// Sample spacing must stay fine relative to the angular velocity and ball
/// speed: each step should sweep only a small arc, or a contact window
/// narrower than one step can be missed. For a moving ball the
/// frozen-orientation probe recovers many windows the uniform grid brackets
/// poorly; a stationary ball has no frozen-orientation prediction, so
/// callers pairing a fast spinner with a long horizon must raise `samples`
/// until one step spans less than the narrowest window they care about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepConfig {
    horizon: f64,
    samples: usize,
    tolerance: f64,
    max_bisections: usize,
}

impl SweepConfig {
    pub const DEFAULT_SAMPLES: usize = 256;
    pub const DEFAULT_TOLERANCE: f64 = 1e-9;
    pub const DEFAULT_MAX_BISECTIONS: usize = 64;

    /// Create a search config over `[0, horizon]` with default sampling and
    /// refinement parameters.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if `horizon` is not finite and > 0.
    pub fn new(horizon: f64) -> Result<Self> {
        if !horizon.is_finite() || horizon <= 0.0 {
            return Err(Error::InvalidParam(format!(
                "search horizon must be finite and > 0, got {horizon}"
            )));
        }
        Ok(Self {
            horizon,
            samples: Self::DEFAULT_SAMPLES,
            tolerance: Self::DEFAULT_TOLERANCE,
            max_bisections: Self::DEFAULT_MAX_BISECTIONS,
        })
    }

    /// Override the number of uniform samples across the horizon.
    pub fn with_samples(mut self, samples: usize) -> Result<Self> {
        if samples < 2 {
            return Err(Error::InvalidParam(format!(
                "samples must be at least 2, got {samples}"
            )));
        }
        self.samples = samples;
        Ok(self)
    }

    /// Override the bisection time tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Result<Self> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(Error::InvalidParam(format!(
                "tolerance must be finite and > 0, got {tolerance}"
            )));
        }
        self.tolerance = tolerance;
        Ok(self)
    }

    /// Override the bisection iteration cap.
    pub fn with_max_bisections(mut self, max_bisections: usize) -> Result<Self> {
        if max_bisections == 0 {
            return Err(Error::InvalidParam(
                "max_bisections must be at least 1".into(),
            ));
        }
        self.max_bisections = max_bisections;
        Ok(self)
    }

    #[inline]
    pub fn horizon(&self) -> f64 {
        self.horizon
    }

    #[inline]
    pub fn samples(&self) -> usize {
        self.samples
    }

    #[inline]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    #[inline]
    pub fn max_bisections(&self) -> usize {
        self.max_bisections
    }
}

fn ensure_angular_velocity(angular_velocity: f64) -> Result<()> {
    if !angular_velocity.is_finite() {
        return Err(Error::InvalidParam(format!(
            "angular velocity must be finite, got {angular_velocity}"
        )));
    }
    Ok(())
}

/// The ball's center at time `t`, expressed in the obstacle's co-rotating
/// frame (where the obstacle is fixed at its initial orientation).
#[inline]
fn corotated_center(center: Vect, velocity: Vect, pivot: Vect, angular_velocity: f64, t: f64) -> Vect {
    let (sin, cos) = (-angular_velocity * t).sin_cos();
    rotate_raw(center + velocity * t, pivot, sin, cos)
}

/// Cap a static prediction at the search horizon so the static fast path
/// honors the same contract as the sweep.
fn capped(t: f64, cfg: &SweepConfig) -> f64 {
    if t <= cfg.horizon() {
        t
    } else {
        NO_COLLISION
    }
}

/// Shared sweep: sample `gap` across `[0, horizon]`, bracket the first sign
/// change, refine by bisection. `frozen_time` gives the contact time the
/// static predictor reports for the obstacle frozen at its orientation at a
/// sample; probing it catches thin contact windows that dip below zero and
/// recover between two adjacent samples.
fn sweep_for_contact<G, P>(gap: G, frozen_time: P, cfg: &SweepConfig) -> Result<f64>
where
    G: Fn(f64) -> f64,
    P: Fn(f64) -> Result<f64>,
{
    if gap(0.0) <= EPS {
        // Already touching at the start of the window.
        return Ok(0.0);
    }

    let step = cfg.horizon() / cfg.samples() as f64;
    let mut t_prev = 0.0;
    for k in 1..=cfg.samples() {
        let t = step * k as f64;
        if gap(t) <= 0.0 {
            return Ok(bisect(&gap, t_prev, t, cfg));
        }

        // Both edges clear: probe the frozen-orientation prediction inside
        // the interval.
        let frozen = frozen_time(t_prev)?;
        if frozen.is_finite() {
            let probe = t_prev + frozen;
            if probe > t_prev && probe < t && gap(probe) <= 0.0 {
                return Ok(bisect(&gap, t_prev, probe, cfg));
            }
        }
        t_prev = t;
    }

    Ok(NO_COLLISION)
}

/// Bisection refinement on a bracket with `gap(lo) > 0 ≥ gap(hi)`. Returns
/// the upper edge, the first time at which contact is certain, once the
/// bracket is narrower than the tolerance or the iteration cap is reached.
fn bisect<G: Fn(f64) -> f64>(gap: &G, mut lo: f64, mut hi: f64, cfg: &SweepConfig) -> f64 {
    for _ in 0..cfg.max_bisections() {
        if hi - lo <= cfg.tolerance() {
            break;
        }
        let mid = 0.5 * (lo + hi);
        if gap(mid) <= 0.0 {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    hi
}

/// Earliest time within the horizon at which a linearly moving ball touches
/// a wall segment rotating about `pivot` at `angular_velocity` rad/s
/// (positive counterclockwise), or [`NO_COLLISION`].
///
/// Deterministic for identical inputs; a search that fails to bracket a
/// root within the horizon degrades to the sentinel, never an error.
pub fn time_until_rotating_wall_collision(
    line: &LineSegment,
    pivot: Vect,
    angular_velocity: f64,
    ball: &Circle,
    velocity: Vect,
    cfg: &SweepConfig,
) -> Result<f64> {
    ensure_finite("pivot", pivot)?;
    ensure_finite("velocity", velocity)?;
    ensure_angular_velocity(angular_velocity)?;

    if angular_velocity.abs() <= EPS {
        // Effectively static over any horizon.
        let t = statics::time_until_wall_collision(line, ball, velocity)?;
        return Ok(capped(t, cfg));
    }

    let gap = |t: f64| {
        let c = corotated_center(ball.center(), velocity, pivot, angular_velocity, t);
        c.distance_to(nearest_point_on_segment(line, c)) - ball.radius()
    };
    let frozen_time = |t: f64| -> Result<f64> {
        let angle = Angle::from_radians(angular_velocity * t)?;
        let frozen_line = line.rotated_about(pivot, angle);
        let ball_at = Circle::new(ball.center() + velocity * t, ball.radius())?;
        statics::time_until_wall_collision(&frozen_line, &ball_at, velocity)
    };
    sweep_for_contact(gap, frozen_time, cfg)
}

/// Earliest time within the horizon at which a linearly moving ball touches
/// a circular obstacle revolving about `pivot`, or [`NO_COLLISION`].
pub fn time_until_rotating_circle_collision(
    circle: &Circle,
    pivot: Vect,
    angular_velocity: f64,
    ball: &Circle,
    velocity: Vect,
    cfg: &SweepConfig,
) -> Result<f64> {
    ensure_finite("pivot", pivot)?;
    ensure_finite("velocity", velocity)?;
    ensure_angular_velocity(angular_velocity)?;

    if angular_velocity.abs() <= EPS {
        let t = statics::time_until_circle_collision(circle, ball, velocity)?;
        return Ok(capped(t, cfg));
    }

    let combined = ball.radius() + circle.radius();
    let gap = |t: f64| {
        let c = corotated_center(ball.center(), velocity, pivot, angular_velocity, t);
        c.distance_to(circle.center()) - combined
    };
    let frozen_time = |t: f64| -> Result<f64> {
        let angle = Angle::from_radians(angular_velocity * t)?;
        let frozen_circle = circle.rotated_about(pivot, angle);
        let ball_at = Circle::new(ball.center() + velocity * t, ball.radius())?;
        statics::time_until_circle_collision(&frozen_circle, &ball_at, velocity)
    };
    sweep_for_contact(gap, frozen_time, cfg)
}

/// Instantaneous velocity of the obstacle's material point at `contact`:
/// `ω × r` for the 2D scalar ω, i.e. `ω · perp(contact − pivot)`.
#[inline]
fn surface_velocity(pivot: Vect, angular_velocity: f64, contact: Vect) -> Vect {
    (contact - pivot).perp() * angular_velocity
}

/// Reflect a ball's velocity off a rotating wall at the instant of contact.
///
/// The wall's material point at the contact carries velocity `ω × r`; the
/// ball's velocity is moved into that point's rest frame, reflected
/// statically, and moved back: the rest-frame transform that handles any
/// instantaneously moving surface.
pub fn reflect_rotating_wall(
    line: &LineSegment,
    pivot: Vect,
    angular_velocity: f64,
    ball: &Circle,
    velocity: Vect,
    coeff: f64,
) -> Result<Vect> {
    ensure_finite("pivot", pivot)?;
    ensure_finite("velocity", velocity)?;
    ensure_angular_velocity(angular_velocity)?;

    let contact = nearest_point_on_segment(line, ball.center());
    let surface = surface_velocity(pivot, angular_velocity, contact);
    let reflected = reflect_wall(line, velocity - surface, coeff)?;
    Ok(reflected + surface)
}

/// Reflect a ball's velocity off a revolving circular obstacle at the
/// instant of contact, via the same rest-frame transform.
///
/// Errors:
/// - `Error::MathError` if the obstacle and ball centers coincide (no
///   contact point exists).
pub fn reflect_rotating_circle(
    circle: &Circle,
    pivot: Vect,
    angular_velocity: f64,
    ball: &Circle,
    velocity: Vect,
    coeff: f64,
) -> Result<Vect> {
    ensure_finite("pivot", pivot)?;
    ensure_finite("velocity", velocity)?;
    ensure_angular_velocity(angular_velocity)?;

    let span = ball.center() - circle.center();
    if span.length_squared() <= EPS * EPS {
        return Err(Error::MathError(
            "degenerate contact point: obstacle and ball centers coincide".into(),
        ));
    }
    let contact = circle.center() + span / span.length() * circle.radius();
    let surface = surface_velocity(pivot, angular_velocity, contact);
    let reflected = reflect_circle(circle.center(), ball.center(), velocity - surface, coeff)?;
    Ok(reflected + surface)
}
