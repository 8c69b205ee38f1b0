use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use crate::core::emotion::EmotionalState;
use crate::physics::expression::{eyes, mouth, EyeShape, MouthShape};
use crate::physics::gesture::{Gesture, GestureCompletion, GesturePlayer};
use crate::physics::particles::{maybe_spawn, update_particles, Particle};
use crate::physics::{gravity, ground_collision, spring, SpringState};

const FRAME_DT: f64 = 1.0 / 60.0;

const SCALE_STIFFNESS: f64 = 120.0;
const SCALE_DAMPING: f64 = 12.0;

/// px/s², measured upward
const HOP_GRAVITY: f64 = -900.0;
const HOP_IMPULSE: f64 = 240.0;
const HOP_BOUNCE: f64 = 0.35;
const HOP_REST_SPEED: f64 = 30.0;
/// Frames between spontaneous hops while excited
const HOP_INTERVAL: u64 = 90;

/// Particle emitter position relative to the body center.
const EMITTER_Y: f64 = -30.0;

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameParams {
    pub frame: u64,
    pub state: EmotionalState,
    pub offset_x: f64,
    /// Screen space, negative is up
    pub offset_y: f64,
    pub rotation: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub eyes: EyeShape,
    pub mouth: MouthShape,
    pub particles: Vec<Particle>,
    pub gesture: Option<Gesture>,
}

fn target_scale(state: EmotionalState) -> f64 {
    match state {
        EmotionalState::Happy | EmotionalState::Excited | EmotionalState::Petting => 1.05,
        EmotionalState::Hungry => 0.95,
        EmotionalState::Dead => 0.9,
        _ => 1.0,
    }
}

/// Vertical stretch from breathing. Sleeping breathes slower and deeper.
fn breathing(state: EmotionalState, frame: u64) -> f64 {
    let (period, depth) = match state {
        EmotionalState::Dead => return 1.0,
        EmotionalState::Sleeping => (240.0, 0.04),
        _ => (120.0, 0.02),
    };
    1.0 + depth * (frame as f64 * TAU / period).sin()
}

/// Frame-by-frame pet animation.
///
/// Owns its frame counter, particles, in-flight gesture and body springs.
/// Each [`tick`](PetAnimator::tick) does a bounded amount of work.
#[derive(Debug)]
pub struct PetAnimator {
    frame: u64,
    gestures: GesturePlayer,
    particles: Vec<Particle>,
    scale: SpringState,
    /// Height above ground and vertical speed, upward
    hop: SpringState,
}

impl Default for PetAnimator {
    fn default() -> Self {
        Self::new()
    }
}

impl PetAnimator {
    pub fn new() -> Self {
        PetAnimator {
            frame: 0,
            gestures: GesturePlayer::new(),
            particles: Vec::new(),
            scale: SpringState {
                position: 1.0,
                velocity: 0.0,
            },
            hop: SpringState::default(),
        }
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// See [`GesturePlayer::start`].
    pub fn start_gesture(
        &mut self,
        gesture: Gesture,
    ) -> Option<oneshot::Receiver<GestureCompletion>> {
        self.gestures.start(gesture)
    }

    pub fn gesture_active(&self) -> bool {
        self.gestures.is_active()
    }

    pub fn tick(&mut self, state: EmotionalState) -> FrameParams {
        let frame = self.frame;
        let gesture = self.gestures.current();
        let transform = self.gestures.advance();

        self.scale = spring(
            self.scale.position,
            target_scale(state),
            self.scale.velocity,
            SCALE_STIFFNESS,
            SCALE_DAMPING,
            FRAME_DT,
        );

        self.step_hop(state, frame);

        update_particles(&mut self.particles);
        maybe_spawn(&mut self.particles, state, frame, 0.0, EMITTER_Y);

        self.frame += 1;

        FrameParams {
            frame,
            state,
            offset_x: transform.offset_x,
            offset_y: transform.offset_y - self.hop.position,
            rotation: transform.rotation,
            scale_x: self.scale.position * transform.scale_x,
            scale_y: self.scale.position * transform.scale_y * breathing(state, frame),
            eyes: eyes(state, frame),
            mouth: mouth(state, frame),
            particles: self.particles.clone(),
            gesture,
        }
    }

    fn step_hop(&mut self, state: EmotionalState, frame: u64) {
        let grounded = self.hop.position <= 0.0 && self.hop.velocity == 0.0;
        if grounded {
            if state == EmotionalState::Excited && frame % HOP_INTERVAL == 0 {
                self.hop.velocity = HOP_IMPULSE;
            } else {
                return;
            }
        }

        let velocity = gravity(self.hop.velocity, HOP_GRAVITY, FRAME_DT);
        let position = self.hop.position + velocity * FRAME_DT;
        let mut next = ground_collision(position, velocity, 0.0, HOP_BOUNCE);

        if next.position <= 0.0 && next.velocity.abs() < HOP_REST_SPEED {
            next = SpringState::default();
        }
        self.hop = next;
    }
}
