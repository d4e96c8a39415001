//! # carom
//!
//! Stateless 2D collision geometry for ball-and-obstacle simulations
//! (billiards, pinball, and friends).
//!
//! Given moving circular bodies and static or rotating obstacles, the crate
//! predicts the exact time of next contact and computes post-collision
//! velocities, optionally with energy loss. Every operation is a pure
//! function of its arguments: no shared state, no I/O, safe to call from
//! any number of threads. The simulation loop that enumerates candidate
//! pairs and advances time lives with the caller; this crate answers one
//! pair at a time.
//!
//! ## Architecture
//!
//! - `core::vect`: the `Vect` and `Angle` value types
//! - `core::shapes`: validated `LineSegment` and `Circle` primitives
//! - `core::solver`: quadratic root solving, the foundation of every
//!   time-of-contact computation
//! - `core::statics`: predictors and reflectors for stationary obstacles,
//!   plus the two-ball elastic resolver
//! - `core::rotating`: the bounded-horizon search against rotating
//!   obstacles and its rest-frame reflectors
//! - `core::kernel`: the `CollisionGeometry` trait a scheduler receives by
//!   injection
//!
//! ## Contract
//!
//! Predictors return [`NO_COLLISION`] (`f64::INFINITY`) when the given
//! motion never produces contact; that is data, not an error. Errors are
//! reserved for invalid inputs. All comparisons share the single tolerance
//! [`EPS`].
//!
//! ```
//! use carom::{Circle, CollisionGeometry, Geometry, LineSegment, SweepConfig, Vect};
//!
//! # fn main() -> carom::Result<()> {
//! let geometry = Geometry::new(SweepConfig::new(10.0)?);
//! let wall = LineSegment::new(Vect::new(5.0, -10.0), Vect::new(5.0, 10.0))?;
//! let ball = Circle::new(Vect::new(0.0, 0.0), 1.0)?;
//!
//! let t = geometry.time_until_wall_collision(&wall, &ball, Vect::new(1.0, 0.0))?;
//! assert_eq!(t, 4.0);
//!
//! let bounced = geometry.reflect_wall(&wall, Vect::new(1.0, 0.0), 1.0)?;
//! assert_eq!(bounced, Vect::new(-1.0, 0.0));
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod error;

pub use crate::core::{
    apply_reflection_coeff, distance_squared, min_quadratic_solution, perpendicular_point,
    perpendicular_point_whole_line, quadratic_solution, reflect_balls, reflect_circle,
    reflect_rotating_circle, reflect_rotating_wall, reflect_wall, time_until_ball_ball_collision,
    time_until_circle_collision, time_until_point_collision, time_until_rotating_circle_collision,
    time_until_rotating_wall_collision, time_until_wall_collision, Angle, Circle,
    CollisionGeometry, DoublePair, Geometry, LineSegment, SweepConfig, Vect, VectPair, EPS,
    NO_COLLISION,
};
pub use crate::error::{Error, Result};
