//! The collision geometry core: primitive types, the scalar root solver,
//! static and rotating contact predictors, reflectors, and the injectable
//! operation-set facade.

pub mod kernel;
pub mod rotating;
pub mod shapes;
pub mod solver;
pub mod statics;
pub mod vect;

pub use kernel::{CollisionGeometry, Geometry};
pub use rotating::{
    reflect_rotating_circle, reflect_rotating_wall, time_until_rotating_circle_collision,
    time_until_rotating_wall_collision, SweepConfig,
};
pub use shapes::{Circle, DoublePair, LineSegment, VectPair};
pub use solver::{min_quadratic_solution, quadratic_solution, EPS, NO_COLLISION};
pub use statics::{
    apply_reflection_coeff, distance_squared, perpendicular_point, perpendicular_point_whole_line,
    reflect_balls, reflect_circle, reflect_wall, time_until_ball_ball_collision,
    time_until_circle_collision, time_until_point_collision, time_until_wall_collision,
};
pub use vect::{Angle, Vect};
