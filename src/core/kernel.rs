//! The injectable operation-set facade.
//!
//! A scheduler receives one [`CollisionGeometry`] implementation explicitly,
//! constructed once and passed in rather than reached through a global, so the
//! core stays testable in isolation and a different implementation (say, a
//! higher-precision search) can be swapped in without touching call sites.

use crate::core::rotating::{self, SweepConfig};
use crate::core::shapes::{Circle, DoublePair, LineSegment, VectPair};
use crate::core::statics;
use crate::core::vect::Vect;
use crate::error::Result;

/// The complete stateless operation set of the collision core.
pub trait CollisionGeometry {
    fn quadratic_solution(&self, a: f64, b: f64, c: f64) -> Result<Option<DoublePair>>;
    fn min_quadratic_solution(&self, a: f64, b: f64, c: f64) -> Result<f64>;

    fn distance_squared(&self, x1: f64, y1: f64, x2: f64, y2: f64) -> f64;
    fn perpendicular_point(&self, line: &LineSegment, point: Vect) -> Option<Vect>;
    fn perpendicular_point_whole_line(&self, line: &LineSegment, point: Vect) -> Vect;

    fn time_until_wall_collision(
        &self,
        line: &LineSegment,
        ball: &Circle,
        velocity: Vect,
    ) -> Result<f64>;
    fn time_until_circle_collision(
        &self,
        circle: &Circle,
        ball: &Circle,
        velocity: Vect,
    ) -> Result<f64>;
    fn time_until_point_collision(&self, point: Vect, ball: &Circle, velocity: Vect)
        -> Result<f64>;
    fn time_until_ball_ball_collision(
        &self,
        ball1: &Circle,
        velocity1: Vect,
        ball2: &Circle,
        velocity2: Vect,
    ) -> Result<f64>;

    fn apply_reflection_coeff(
        &self,
        incident: Vect,
        ideal_reflected: Vect,
        coeff: f64,
    ) -> Result<Vect>;
    fn reflect_wall(&self, line: &LineSegment, velocity: Vect, coeff: f64) -> Result<Vect>;
    fn reflect_circle(
        &self,
        obstacle_center: Vect,
        ball_center: Vect,
        velocity: Vect,
        coeff: f64,
    ) -> Result<Vect>;

    fn time_until_rotating_wall_collision(
        &self,
        line: &LineSegment,
        pivot: Vect,
        angular_velocity: f64,
        ball: &Circle,
        velocity: Vect,
    ) -> Result<f64>;
    fn time_until_rotating_circle_collision(
        &self,
        circle: &Circle,
        pivot: Vect,
        angular_velocity: f64,
        ball: &Circle,
        velocity: Vect,
    ) -> Result<f64>;
    fn reflect_rotating_wall(
        &self,
        line: &LineSegment,
        pivot: Vect,
        angular_velocity: f64,
        ball: &Circle,
        velocity: Vect,
        coeff: f64,
    ) -> Result<Vect>;
    fn reflect_rotating_circle(
        &self,
        circle: &Circle,
        pivot: Vect,
        angular_velocity: f64,
        ball: &Circle,
        velocity: Vect,
        coeff: f64,
    ) -> Result<Vect>;

    fn reflect_balls(
        &self,
        center1: Vect,
        mass1: f64,
        velocity1: Vect,
        center2: Vect,
        mass2: f64,
        velocity2: Vect,
    ) -> Result<VectPair>;
}

/// Default [`CollisionGeometry`] implementation backed by the module
/// functions. Plain data (just the sweep configuration), so it is trivially
/// `Send + Sync` and cheap to copy into whatever owns the scheduler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    sweep: SweepConfig,
}

impl Geometry {
    /// Build a geometry whose rotating-obstacle predictors search with the
    /// given bounded-sweep configuration.
    pub fn new(sweep: SweepConfig) -> Self {
        Self { sweep }
    }

    #[inline]
    pub fn sweep(&self) -> &SweepConfig {
        &self.sweep
    }
}

impl CollisionGeometry for Geometry {
    fn quadratic_solution(&self, a: f64, b: f64, c: f64) -> Result<Option<DoublePair>> {
        crate::core::solver::quadratic_solution(a, b, c)
    }

    fn min_quadratic_solution(&self, a: f64, b: f64, c: f64) -> Result<f64> {
        crate::core::solver::min_quadratic_solution(a, b, c)
    }

    fn distance_squared(&self, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
        statics::distance_squared(x1, y1, x2, y2)
    }

    fn perpendicular_point(&self, line: &LineSegment, point: Vect) -> Option<Vect> {
        statics::perpendicular_point(line, point)
    }

    fn perpendicular_point_whole_line(&self, line: &LineSegment, point: Vect) -> Vect {
        statics::perpendicular_point_whole_line(line, point)
    }

    fn time_until_wall_collision(
        &self,
        line: &LineSegment,
        ball: &Circle,
        velocity: Vect,
    ) -> Result<f64> {
        statics::time_until_wall_collision(line, ball, velocity)
    }

    fn time_until_circle_collision(
        &self,
        circle: &Circle,
        ball: &Circle,
        velocity: Vect,
    ) -> Result<f64> {
        statics::time_until_circle_collision(circle, ball, velocity)
    }

    fn time_until_point_collision(
        &self,
        point: Vect,
        ball: &Circle,
        velocity: Vect,
    ) -> Result<f64> {
        statics::time_until_point_collision(point, ball, velocity)
    }

    fn time_until_ball_ball_collision(
        &self,
        ball1: &Circle,
        velocity1: Vect,
        ball2: &Circle,
        velocity2: Vect,
    ) -> Result<f64> {
        statics::time_until_ball_ball_collision(ball1, velocity1, ball2, velocity2)
    }

    fn apply_reflection_coeff(
        &self,
        incident: Vect,
        ideal_reflected: Vect,
        coeff: f64,
    ) -> Result<Vect> {
        statics::apply_reflection_coeff(incident, ideal_reflected, coeff)
    }

    fn reflect_wall(&self, line: &LineSegment, velocity: Vect, coeff: f64) -> Result<Vect> {
        statics::reflect_wall(line, velocity, coeff)
    }

    fn reflect_circle(
        &self,
        obstacle_center: Vect,
        ball_center: Vect,
        velocity: Vect,
        coeff: f64,
    ) -> Result<Vect> {
        statics::reflect_circle(obstacle_center, ball_center, velocity, coeff)
    }

    fn time_until_rotating_wall_collision(
        &self,
        line: &LineSegment,
        pivot: Vect,
        angular_velocity: f64,
        ball: &Circle,
        velocity: Vect,
    ) -> Result<f64> {
        rotating::time_until_rotating_wall_collision(
            line,
            pivot,
            angular_velocity,
            ball,
            velocity,
            &self.sweep,
        )
    }

    fn time_until_rotating_circle_collision(
        &self,
        circle: &Circle,
        pivot: Vect,
        angular_velocity: f64,
        ball: &Circle,
        velocity: Vect,
    ) -> Result<f64> {
        rotating::time_until_rotating_circle_collision(
            circle,
            pivot,
            angular_velocity,
            ball,
            velocity,
            &self.sweep,
        )
    }

    fn reflect_rotating_wall(
        &self,
        line: &LineSegment,
        pivot: Vect,
        angular_velocity: f64,
        ball: &Circle,
        velocity: Vect,
        coeff: f64,
    ) -> Result<Vect> {
        rotating::reflect_rotating_wall(line, pivot, angular_velocity, ball, velocity, coeff)
    }

    fn reflect_rotating_circle(
        &self,
        circle: &Circle,
        pivot: Vect,
        angular_velocity: f64,
        ball: &Circle,
        velocity: Vect,
        coeff: f64,
    ) -> Result<Vect> {
        rotating::reflect_rotating_circle(circle, pivot, angular_velocity, ball, velocity, coeff)
    }

    fn reflect_balls(
        &self,
        center1: Vect,
        mass1: f64,
        velocity1: Vect,
        center2: Vect,
        mass2: f64,
        velocity2: Vect,
    ) -> Result<VectPair> {
        statics::reflect_balls(center1, mass1, velocity1, center2, mass2, velocity2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::solver::NO_COLLISION;
    use crate::core::vect::Vect;

    fn geometry() -> Geometry {
        Geometry::new(SweepConfig::new(10.0).expect("valid horizon"))
    }

    #[test]
    fn facade_delegates_to_static_predictor() -> Result<()> {
        let geo = geometry();
        let line = LineSegment::new(Vect::new(5.0, -10.0), Vect::new(5.0, 10.0))?;
        let ball = Circle::new(Vect::ZERO, 1.0)?;
        let t = geo.time_until_wall_collision(&line, &ball, Vect::new(1.0, 0.0))?;
        assert!((t - 4.0).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn facade_is_injectable_as_trait_object() -> Result<()> {
        // A scheduler holding `&dyn CollisionGeometry` never needs to know
        // which implementation it was handed.
        let geo = geometry();
        let dispatch: &dyn CollisionGeometry = &geo;
        let ball = Circle::new(Vect::ZERO, 1.0)?;
        let t = dispatch.time_until_point_collision(Vect::new(10.0, 0.0), &ball, Vect::ZERO)?;
        assert_eq!(t, NO_COLLISION);
        Ok(())
    }

    #[test]
    fn facade_carries_its_sweep_config() -> Result<()> {
        let cfg = SweepConfig::new(2.5)?;
        let geo = Geometry::new(cfg);
        assert_eq!(geo.sweep().horizon(), 2.5);
        Ok(())
    }
}
