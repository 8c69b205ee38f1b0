use serde::{Deserialize, Serialize};

use crate::core::emotion::EmotionalState;

pub const PARTICLE_GRAVITY: f64 = 0.05;
pub const PARTICLE_FRICTION: f64 = 0.98;
pub const LIFE_DECAY: f64 = 0.02;
/// Frames between bursts while celebrating.
pub const SPAWN_INTERVAL: u64 = 12;
pub const BURST_SIZE: usize = 3;
pub const MAX_PARTICLES: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticleKind {
    Heart,
    Sparkle,
    Star,
}

impl ParticleKind {
    /// Only celebratory states emit particles.
    pub fn for_state(state: EmotionalState) -> Option<Self> {
        if !state.is_celebratory() {
            return None;
        }
        Some(match state {
            EmotionalState::Petting => ParticleKind::Heart,
            EmotionalState::Happy => ParticleKind::Sparkle,
            _ => ParticleKind::Star,
        })
    }
}

/// Position and velocity in pixels (y down) per frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// 1.0 at spawn, removed at or below zero
    pub life: f64,
    #[serde(rename = "type")]
    pub kind: ParticleKind,
}

/// Advance one frame. `None` once the particle has expired.
pub fn update_particle(particle: &Particle) -> Option<Particle> {
    let life = particle.life - LIFE_DECAY;
    if life <= 0.0 {
        return None;
    }
    Some(Particle {
        x: particle.x + particle.vx,
        y: particle.y + particle.vy,
        vx: particle.vx * PARTICLE_FRICTION,
        vy: (particle.vy + PARTICLE_GRAVITY) * PARTICLE_FRICTION,
        life,
        kind: particle.kind,
    })
}

pub fn update_particles(particles: &mut Vec<Particle>) {
    let next: Vec<Particle> = particles.iter().filter_map(update_particle).collect();
    *particles = next;
}

/// A small upward fan of particles. The spread is derived from the frame
/// counter so replays are identical.
pub fn spawn_burst(kind: ParticleKind, origin_x: f64, origin_y: f64, frame: u64) -> Vec<Particle> {
    (0..BURST_SIZE)
        .map(|i| {
            let angle = frame as f64 * 0.7 + i as f64 * 2.1;
            Particle {
                x: origin_x,
                y: origin_y,
                vx: angle.cos() * 1.2,
                vy: -1.5 - 0.5 * angle.sin().abs(),
                life: 1.0,
                kind,
            }
        })
        .collect()
}

/// Spawn a burst on cadence frames for celebratory states, respecting
/// [`MAX_PARTICLES`].
pub fn maybe_spawn(
    particles: &mut Vec<Particle>,
    state: EmotionalState,
    frame: u64,
    origin_x: f64,
    origin_y: f64,
) {
    if frame % SPAWN_INTERVAL != 0 {
        return;
    }
    let Some(kind) = ParticleKind::for_state(state) else {
        return;
    };
    let room = MAX_PARTICLES.saturating_sub(particles.len());
    particles.extend(spawn_burst(kind, origin_x, origin_y, frame).into_iter().take(room));
}
