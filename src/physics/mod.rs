//! Per-frame animation simulation.
//!
//! Everything here is deterministic and allocation-bounded: the same
//! emotional state and frame counter always produce the same drawable
//! parameters.

pub mod animator;
pub mod easing;
pub mod expression;
pub mod gesture;
pub mod particles;

pub use animator::{FrameParams, PetAnimator};
pub use expression::{EyeKind, EyeShape, MouthKind, MouthShape};
pub use gesture::{Gesture, GestureCompletion, GesturePlayer, GestureTransform};
pub use particles::{Particle, ParticleKind};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpringState {
    pub position: f64,
    pub velocity: f64,
}

/// One explicit Euler step of a damped spring pulling `current` to `target`.
pub fn spring(
    current: f64,
    target: f64,
    velocity: f64,
    stiffness: f64,
    damping: f64,
    dt: f64,
) -> SpringState {
    let force = (target - current) * stiffness - velocity * damping;
    let velocity = velocity + force * dt;
    SpringState {
        position: current + velocity * dt,
        velocity,
    }
}

pub fn gravity(velocity: f64, g: f64, dt: f64) -> f64 {
    velocity + g * dt
}

/// Reflect a falling body off the ground, losing energy by `bounce_dampen`.
///
/// Positions and velocities are measured upward. Anything not at or below
/// the ground while falling passes through unchanged.
pub fn ground_collision(
    position: f64,
    velocity: f64,
    ground: f64,
    bounce_dampen: f64,
) -> SpringState {
    if position <= ground && velocity < 0.0 {
        SpringState {
            position: ground,
            velocity: velocity.abs() * bounce_dampen,
        }
    } else {
        SpringState { position, velocity }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_spring_step() {
        let s = spring(0.0, 1.0, 0.0, 100.0, 10.0, 0.01);
        // force = 100, v = 1.0, x = 0.01
        assert_relative_eq!(s.velocity, 1.0);
        assert_relative_eq!(s.position, 0.01);
    }

    #[test]
    fn test_spring_settles_on_target() {
        let mut state = SpringState { position: 0.0, velocity: 0.0 };
        for _ in 0..600 {
            state = spring(state.position, 1.0, state.velocity, 120.0, 12.0, 1.0 / 60.0);
        }
        assert_relative_eq!(state.position, 1.0, epsilon = 1e-3);
        assert_relative_eq!(state.velocity, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn test_gravity() {
        assert_relative_eq!(gravity(2.0, -10.0, 0.1), 1.0);
    }

    #[test]
    fn test_ground_collision() {
        let bounced = ground_collision(-0.5, -10.0, 0.0, 0.4);
        assert_eq!(bounced.position, 0.0);
        assert_relative_eq!(bounced.velocity, 4.0);

        // Rising through the ground is not a collision
        let rising = ground_collision(-0.5, 3.0, 0.0, 0.4);
        assert_eq!(rising, SpringState { position: -0.5, velocity: 3.0 });

        // Airborne
        let falling = ground_collision(5.0, -3.0, 0.0, 0.4);
        assert_eq!(falling, SpringState { position: 5.0, velocity: -3.0 });
    }
}
