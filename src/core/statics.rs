//! Contact-time prediction and velocity reflection against stationary
//! obstacles, plus the two-ball momentum-conserving resolver.
//!
//! Predictors return `Ok(NO_COLLISION)` when the given motion never produces
//! contact; an `Err` always means the inputs themselves were invalid.

use ordered_float::NotNan;

use crate::core::shapes::{Circle, LineSegment, VectPair};
use crate::core::solver::{min_quadratic_solution, EPS, NO_COLLISION};
use crate::core::vect::{ensure_finite, Vect};
use crate::error::{Error, Result};

/// Squared Euclidean distance between two points given by raw coordinates.
#[inline]
pub fn distance_squared(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let dx = x2 - x1;
    let dy = y2 - y1;
    dx * dx + dy * dy
}

/// Projection of `point` onto the infinite line through `line`, ignoring the
/// finite segment's endpoints.
pub fn perpendicular_point_whole_line(line: &LineSegment, point: Vect) -> Vect {
    let dir = line.direction();
    line.p1() + dir * (point - line.p1()).dot(dir)
}

/// Projection of `point` onto the infinite line through `line`, but only
/// when the foot of the perpendicular falls within the finite segment's
/// span; `None` otherwise.
pub fn perpendicular_point(line: &LineSegment, point: Vect) -> Option<Vect> {
    let foot = perpendicular_point_whole_line(line, point);
    let along = (foot - line.p1()).dot(line.direction());
    if (-EPS..=line.length() + EPS).contains(&along) {
        Some(foot)
    } else {
        None
    }
}

/// Closest point to `point` on the finite segment: the perpendicular foot
/// clamped to the span, else the nearer endpoint.
pub(crate) fn nearest_point_on_segment(line: &LineSegment, point: Vect) -> Vect {
    let along = (point - line.p1())
        .dot(line.direction())
        .clamp(0.0, line.length());
    line.p1() + line.direction() * along
}

/// Time until a moving ball first touches a stationary wall segment.
///
/// The ball's center moves linearly at `velocity`. Contact against the face
/// happens when the perpendicular distance to the line equals the ball's
/// radius and the contact point lies within the segment's span; past the
/// span, each endpoint acts as a point obstacle (zero-radius circle).
///
/// Returns [`NO_COLLISION`] when the ball is not approaching the line or
/// misses both the face and the endpoints.
pub fn time_until_wall_collision(line: &LineSegment, ball: &Circle, velocity: Vect) -> Result<f64> {
    ensure_finite("velocity", velocity)?;

    let normal = line.normal();
    // Signed perpendicular offset of the center from the infinite line.
    let offset = (ball.center() - line.p1()).dot(normal);
    // Closing speed toward the line; negative means moving away.
    let closing = -velocity.dot(normal) * offset.signum();
    if closing <= EPS {
        return Ok(NO_COLLISION);
    }

    // Linear solve for perpendicular distance = radius. A center already
    // within one radius of the line counts as touching now.
    let t_face = (offset.abs() - ball.radius()).max(0.0) / closing;
    let center_at_contact = ball.center() + velocity * t_face;
    if perpendicular_point(line, center_at_contact).is_some() {
        return Ok(t_face);
    }

    // The face contact lands past the span; only the endpoint caps remain.
    let candidates = [
        time_until_point_collision(line.p1(), ball, velocity)?,
        time_until_point_collision(line.p2(), ball, velocity)?,
    ];
    let best = candidates
        .into_iter()
        .filter_map(|t| NotNan::new(t).ok())
        .min()
        .map_or(NO_COLLISION, NotNan::into_inner);
    Ok(best)
}

/// Time until a moving ball first touches a stationary point obstacle
/// (a zero-radius circle). Shared by the wall predictor's endpoint fallback.
pub fn time_until_point_collision(point: Vect, ball: &Circle, velocity: Vect) -> Result<f64> {
    ensure_finite("point", point)?;
    ensure_finite("velocity", velocity)?;

    let rel = ball.center() - point;
    let a = velocity.dot(velocity);
    let b = 2.0 * rel.dot(velocity);
    let c = rel.dot(rel) - ball.radius() * ball.radius();
    min_quadratic_solution(a, b, c)
}

/// Time until a moving ball first touches a stationary circular obstacle:
/// the smallest nonnegative root of `|rel + t·velocity| = r_ball + r_circle`.
///
/// A stationary ball never collides, even if the two already overlap: an
/// already-penetrating static pair never improves by waiting.
pub fn time_until_circle_collision(circle: &Circle, ball: &Circle, velocity: Vect) -> Result<f64> {
    ensure_finite("velocity", velocity)?;

    let rel = ball.center() - circle.center();
    let combined = ball.radius() + circle.radius();
    let a = velocity.dot(velocity);
    let b = 2.0 * rel.dot(velocity);
    let c = rel.dot(rel) - combined * combined;
    min_quadratic_solution(a, b, c)
}

/// Time until two moving balls first touch: ball2's rest frame turns this
/// into the circle problem with relative velocity `v1 - v2` and the combined
/// radius.
pub fn time_until_ball_ball_collision(
    ball1: &Circle,
    velocity1: Vect,
    ball2: &Circle,
    velocity2: Vect,
) -> Result<f64> {
    ensure_finite("velocity1", velocity1)?;
    ensure_finite("velocity2", velocity2)?;

    let rel = ball1.center() - ball2.center();
    let rel_vel = velocity1 - velocity2;
    let combined = ball1.radius() + ball2.radius();
    let a = rel_vel.dot(rel_vel);
    let b = 2.0 * rel.dot(rel_vel);
    let c = rel.dot(rel) - combined * combined;
    min_quadratic_solution(a, b, c)
}

fn ensure_coeff(coeff: f64) -> Result<()> {
    if !coeff.is_finite() || !(0.0..=1.0).contains(&coeff) {
        return Err(Error::InvalidParam(format!(
            "reflection coefficient must lie in [0, 1], got {coeff}"
        )));
    }
    Ok(())
}

/// Scale a reflection between "no change" and the ideal elastic outcome:
/// `incident + coeff·(ideal_reflected − incident)`.
///
/// Every reflect operation in the crate is computed first as ideal
/// (`coeff = 1`) and then passed through here. Coefficients outside
/// `[0, 1]` are rejected rather than extrapolated.
pub fn apply_reflection_coeff(incident: Vect, ideal_reflected: Vect, coeff: f64) -> Result<Vect> {
    ensure_finite("incident velocity", incident)?;
    ensure_finite("ideal reflected velocity", ideal_reflected)?;
    ensure_coeff(coeff)?;
    Ok(incident + (ideal_reflected - incident) * coeff)
}

/// Reflect a velocity off a stationary wall: the component perpendicular to
/// the segment's direction is negated, the parallel component is kept, and
/// the coefficient scales the change.
pub fn reflect_wall(line: &LineSegment, velocity: Vect, coeff: f64) -> Result<Vect> {
    ensure_finite("velocity", velocity)?;
    let along = velocity.project_onto(line.direction());
    // parallel − perpendicular = 2·parallel − velocity
    let ideal = along * 2.0 - velocity;
    apply_reflection_coeff(velocity, ideal, coeff)
}

/// Reflect a ball's velocity off a stationary circular obstacle at contact.
/// The contact normal runs from the obstacle's center to the ball's center;
/// only the normal component is negated.
///
/// Errors:
/// - `Error::MathError` if the centers coincide (no contact normal exists).
pub fn reflect_circle(
    obstacle_center: Vect,
    ball_center: Vect,
    velocity: Vect,
    coeff: f64,
) -> Result<Vect> {
    ensure_finite("obstacle center", obstacle_center)?;
    ensure_finite("ball center", ball_center)?;
    ensure_finite("velocity", velocity)?;

    let span = ball_center - obstacle_center;
    if span.length_squared() <= EPS * EPS {
        return Err(Error::MathError(
            "degenerate contact normal: obstacle and ball centers coincide".into(),
        ));
    }
    let normal = span / span.length();
    let ideal = velocity - normal * (2.0 * velocity.dot(normal));
    apply_reflection_coeff(velocity, ideal, coeff)
}

/// Exact two-body elastic collision between balls of arbitrary mass.
///
/// Velocities are decomposed along the center-to-center axis; the
/// tangential components pass through unchanged and the normal components
/// follow the 1-D elastic closed form, so total momentum and kinetic energy
/// are conserved to floating-point precision. Equal masses exactly swap
/// their normal components.
///
/// Errors:
/// - `Error::InvalidParam` for non-finite inputs or non-positive masses.
/// - `Error::MathError` if the centers coincide.
pub fn reflect_balls(
    center1: Vect,
    mass1: f64,
    velocity1: Vect,
    center2: Vect,
    mass2: f64,
    velocity2: Vect,
) -> Result<VectPair> {
    ensure_finite("center1", center1)?;
    ensure_finite("center2", center2)?;
    ensure_finite("velocity1", velocity1)?;
    ensure_finite("velocity2", velocity2)?;
    for (name, mass) in [("mass1", mass1), ("mass2", mass2)] {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(Error::InvalidParam(format!(
                "{name} must be finite and > 0, got {mass}"
            )));
        }
    }

    let span = center2 - center1;
    if span.length_squared() <= EPS * EPS {
        return Err(Error::MathError(
            "degenerate contact normal: ball centers coincide".into(),
        ));
    }
    let normal = span / span.length();
    let tangent = normal.perp();

    let u1n = velocity1.dot(normal);
    let u1t = velocity1.dot(tangent);
    let u2n = velocity2.dot(normal);
    let u2t = velocity2.dot(tangent);

    let total = mass1 + mass2;
    let v1n = ((mass1 - mass2) * u1n + 2.0 * mass2 * u2n) / total;
    let v2n = ((mass2 - mass1) * u2n + 2.0 * mass1 * u1n) / total;

    Ok(VectPair::new(
        normal * v1n + tangent * u1t,
        normal * v2n + tangent * u2t,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> LineSegment {
        LineSegment::new(Vect::new(x1, y1), Vect::new(x2, y2)).expect("valid segment")
    }

    fn ball(x: f64, y: f64, r: f64) -> Circle {
        Circle::new(Vect::new(x, y), r).expect("valid circle")
    }

    #[test]
    fn raw_distance_squared() {
        assert!((distance_squared(0.0, 0.0, 3.0, 4.0) - 25.0).abs() < 1e-12);
    }

    #[test]
    fn perpendicular_point_within_span() {
        let line = seg(0.0, 0.0, 10.0, 0.0);
        let foot = perpendicular_point(&line, Vect::new(4.0, 7.0)).expect("within span");
        assert!((foot.x - 4.0).abs() < 1e-12);
        assert!(foot.y.abs() < 1e-12);
    }

    #[test]
    fn perpendicular_point_outside_span() {
        let line = seg(0.0, 0.0, 10.0, 0.0);
        assert!(perpendicular_point(&line, Vect::new(12.0, 7.0)).is_none());
        // The whole-line variant still answers.
        let foot = perpendicular_point_whole_line(&line, Vect::new(12.0, 7.0));
        assert!((foot.x - 12.0).abs() < 1e-12);
    }

    #[test]
    fn wall_collision_head_on() -> Result<()> {
        // Ball radius 1 at the origin moving +x into a vertical wall at
        // x = 5: surface contact when the center reaches x = 4.
        let line = seg(5.0, -10.0, 5.0, 10.0);
        let t = time_until_wall_collision(&line, &ball(0.0, 0.0, 1.0), Vect::new(1.0, 0.0))?;
        assert!((t - 4.0).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn wall_collision_moving_away() -> Result<()> {
        let line = seg(5.0, -10.0, 5.0, 10.0);
        let t = time_until_wall_collision(&line, &ball(0.0, 0.0, 1.0), Vect::new(-1.0, 0.0))?;
        assert_eq!(t, NO_COLLISION);
        Ok(())
    }

    #[test]
    fn wall_collision_stationary_ball() -> Result<()> {
        let line = seg(5.0, -10.0, 5.0, 10.0);
        let t = time_until_wall_collision(&line, &ball(0.0, 0.0, 1.0), Vect::ZERO)?;
        assert_eq!(t, NO_COLLISION);
        Ok(())
    }

    #[test]
    fn wall_collision_endpoint_cap() -> Result<()> {
        // Segment along x = 0 spanning y ∈ [5, 10]; the ball passes below
        // the lower endpoint and grazes it. Against the point (0, 5):
        // rel = (-5, -0.6), roots of t² - 10t + 24.36 are 4.2 and 5.8.
        let line = seg(0.0, 5.0, 0.0, 10.0);
        let t = time_until_wall_collision(&line, &ball(-5.0, 4.4, 1.0), Vect::new(1.0, 0.0))?;
        assert!((t - 4.2).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn wall_collision_misses_past_endpoint() -> Result<()> {
        // Same segment, but the ball travels too far below to touch either
        // endpoint.
        let line = seg(0.0, 5.0, 0.0, 10.0);
        let t = time_until_wall_collision(&line, &ball(-5.0, 0.0, 1.0), Vect::new(1.0, 0.0))?;
        assert_eq!(t, NO_COLLISION);
        Ok(())
    }

    #[test]
    fn circle_collision_head_on() -> Result<()> {
        // Centers close from 10 apart to 3 apart at unit speed.
        let obstacle = ball(10.0, 0.0, 2.0);
        let t = time_until_circle_collision(&obstacle, &ball(0.0, 0.0, 1.0), Vect::new(1.0, 0.0))?;
        assert!((t - 7.0).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn circle_collision_stationary_overlapping() -> Result<()> {
        // Zero velocity with centers already overlapping: waiting never
        // helps, so this is "no collision".
        let obstacle = ball(0.5, 0.0, 1.0);
        let t = time_until_circle_collision(&obstacle, &ball(0.0, 0.0, 1.0), Vect::ZERO)?;
        assert_eq!(t, NO_COLLISION);
        Ok(())
    }

    #[test]
    fn ball_ball_collision_symmetric_approach() -> Result<()> {
        // Gap of 8 between surfaces closes at relative speed 2.
        let b1 = ball(0.0, 0.0, 1.0);
        let b2 = ball(10.0, 0.0, 1.0);
        let t = time_until_ball_ball_collision(&b1, Vect::new(1.0, 0.0), &b2, Vect::new(-1.0, 0.0))?;
        assert!((t - 4.0).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn ball_ball_collision_same_velocity() -> Result<()> {
        let b1 = ball(0.0, 0.0, 1.0);
        let b2 = ball(10.0, 0.0, 1.0);
        let v = Vect::new(3.0, -2.0);
        assert_eq!(time_until_ball_ball_collision(&b1, v, &b2, v)?, NO_COLLISION);
        Ok(())
    }

    #[test]
    fn reflect_wall_full_elastic() -> Result<()> {
        let line = seg(5.0, -10.0, 5.0, 10.0);
        let out = reflect_wall(&line, Vect::new(1.0, 0.0), 1.0)?;
        assert!((out.x + 1.0).abs() < 1e-12);
        assert!(out.y.abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn reflect_wall_keeps_parallel_component() -> Result<()> {
        let line = seg(0.0, 0.0, 10.0, 0.0);
        let out = reflect_wall(&line, Vect::new(3.0, -2.0), 1.0)?;
        assert!((out.x - 3.0).abs() < 1e-12);
        assert!((out.y - 2.0).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn reflect_wall_zero_coeff_is_identity() -> Result<()> {
        let line = seg(0.0, 0.0, 10.0, 0.0);
        let v = Vect::new(3.0, -2.0);
        assert_eq!(reflect_wall(&line, v, 0.0)?, v);
        Ok(())
    }

    #[test]
    fn reflect_rejects_out_of_range_coeff() {
        let line = seg(0.0, 0.0, 10.0, 0.0);
        assert!(reflect_wall(&line, Vect::new(1.0, -1.0), 1.5).is_err());
        assert!(reflect_wall(&line, Vect::new(1.0, -1.0), -0.1).is_err());
        assert!(reflect_wall(&line, Vect::new(1.0, -1.0), f64::NAN).is_err());
    }

    #[test]
    fn reflect_circle_normal_incidence() -> Result<()> {
        // Ball directly left of the obstacle moving +x: velocity reverses.
        let out = reflect_circle(Vect::new(2.0, 0.0), Vect::new(0.0, 0.0), Vect::new(1.0, 0.0), 1.0)?;
        assert!((out.x + 1.0).abs() < 1e-12);
        assert!(out.y.abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn reflect_circle_coincident_centers_is_math_error() {
        let err =
            reflect_circle(Vect::new(1.0, 1.0), Vect::new(1.0, 1.0), Vect::new(1.0, 0.0), 1.0)
                .unwrap_err();
        assert!(err.to_string().contains("numerical error"));
    }

    #[test]
    fn apply_coeff_interpolates() -> Result<()> {
        let incident = Vect::new(2.0, 0.0);
        let ideal = Vect::new(-2.0, 0.0);
        let half = apply_reflection_coeff(incident, ideal, 0.5)?;
        assert_eq!(half, Vect::ZERO);
        Ok(())
    }

    #[test]
    fn reflect_balls_equal_mass_head_on_swaps() -> Result<()> {
        let out = reflect_balls(
            Vect::new(0.0, 0.0),
            1.0,
            Vect::new(1.0, 0.0),
            Vect::new(2.0, 0.0),
            1.0,
            Vect::new(-1.0, 0.0),
        )?;
        assert!((out.v1.x + 1.0).abs() < 1e-12);
        assert!((out.v2.x - 1.0).abs() < 1e-12);
        assert!(out.v1.y.abs() < 1e-12);
        assert!(out.v2.y.abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn reflect_balls_heavy_light() -> Result<()> {
        // A heavy ball striking a light stationary one: 1-D closed form
        // gives v1' = (m1-m2)/(m1+m2)·u1, v2' = 2m1/(m1+m2)·u1.
        let out = reflect_balls(
            Vect::new(0.0, 0.0),
            3.0,
            Vect::new(2.0, 0.0),
            Vect::new(1.0, 0.0),
            1.0,
            Vect::ZERO,
        )?;
        assert!((out.v1.x - 1.0).abs() < 1e-12); // (3-1)/4 · 2
        assert!((out.v2.x - 3.0).abs() < 1e-12); // 2·3/4 · 2
        Ok(())
    }

    #[test]
    fn reflect_balls_rejects_bad_mass() {
        let err = reflect_balls(
            Vect::ZERO,
            0.0,
            Vect::ZERO,
            Vect::new(1.0, 0.0),
            1.0,
            Vect::ZERO,
        )
        .unwrap_err();
        assert!(err.to_string().contains("mass1"));
    }

    #[test]
    fn reflect_balls_coincident_centers_is_math_error() {
        let err = reflect_balls(
            Vect::new(1.0, 1.0),
            1.0,
            Vect::new(1.0, 0.0),
            Vect::new(1.0, 1.0),
            1.0,
            Vect::ZERO,
        )
        .unwrap_err();
        assert!(err.to_string().contains("coincide"));
    }
}
