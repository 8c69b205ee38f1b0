use std::f64::consts::{PI, TAU};

use log::trace;
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use crate::physics::easing::{bounce_out, elastic_out, smoothstep};

const BOUNCE_HEIGHT: f64 = 18.0;
const JUMP_HEIGHT: f64 = 40.0;
const NOD_DEPTH: f64 = 5.0;

/// One-shot body gestures, each a fixed number of frames at 60fps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gesture {
    Bounce,
    Wiggle,
    Jump,
    Spin,
    Nod,
}

impl Gesture {
    pub fn duration_frames(&self) -> u32 {
        match self {
            Gesture::Bounce => 40,
            Gesture::Wiggle => 30,
            Gesture::Jump => 50,
            Gesture::Spin => 30,
            Gesture::Nod => 30,
        }
    }

    /// Body transform at progress `t` in [0, 1].
    pub fn transform(&self, t: f64) -> GestureTransform {
        let t = t.clamp(0.0, 1.0);
        let fade = 1.0 - t;

        match self {
            Gesture::Bounce => {
                let squash = 0.08 * (TAU * t).sin() * fade;
                GestureTransform {
                    offset_y: -BOUNCE_HEIGHT * (PI * bounce_out(t)).sin(),
                    scale_x: 1.0 - squash,
                    scale_y: 1.0 + squash,
                    ..GestureTransform::IDENTITY
                }
            }
            Gesture::Wiggle => GestureTransform {
                rotation: 0.2 * (3.0 * TAU * t).sin() * fade,
                ..GestureTransform::IDENTITY
            },
            Gesture::Jump => {
                let arc = 4.0 * t * fade;
                let stretch = (PI * t).sin();
                GestureTransform {
                    offset_y: -JUMP_HEIGHT * arc,
                    scale_x: 1.0 - 0.06 * stretch,
                    scale_y: 1.0 + 0.12 * stretch,
                    ..GestureTransform::IDENTITY
                }
            }
            Gesture::Spin => GestureTransform {
                rotation: TAU * elastic_out(t),
                ..GestureTransform::IDENTITY
            },
            Gesture::Nod => {
                let dip = (2.0 * TAU * t).sin();
                GestureTransform {
                    offset_y: NOD_DEPTH * dip.abs() * (1.0 - smoothstep(t)),
                    rotation: 0.12 * dip * fade,
                    ..GestureTransform::IDENTITY
                }
            }
        }
    }
}

/// Offsets in pixels (screen space, y down), rotation in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GestureTransform {
    pub offset_x: f64,
    pub offset_y: f64,
    pub rotation: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl GestureTransform {
    pub const IDENTITY: GestureTransform = GestureTransform {
        offset_x: 0.0,
        offset_y: 0.0,
        rotation: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
    };
}

impl Default for GestureTransform {
    fn default() -> Self {
        GestureTransform::IDENTITY
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureCompletion {
    pub gesture: Gesture,
    pub frames: u32,
}

#[derive(Debug)]
struct ActiveGesture {
    gesture: Gesture,
    frame: u32,
    done: oneshot::Sender<GestureCompletion>,
}

/// `idle -> gesture -> idle` state machine.
///
/// Completion is delivered through the receiver returned by [`start`],
/// resolved exactly once when the last frame has been played.
///
/// [`start`]: GesturePlayer::start
#[derive(Debug, Default)]
pub struct GesturePlayer {
    active: Option<ActiveGesture>,
}

impl GesturePlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin `gesture`. Returns `None` and leaves the running gesture alone
    /// if one is already in flight.
    pub fn start(&mut self, gesture: Gesture) -> Option<oneshot::Receiver<GestureCompletion>> {
        if self.active.is_some() {
            return None;
        }
        trace!("gesture {:?} started", gesture);
        let (done, receiver) = oneshot::channel();
        self.active = Some(ActiveGesture {
            gesture,
            frame: 0,
            done,
        });
        Some(receiver)
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn current(&self) -> Option<Gesture> {
        self.active.as_ref().map(|a| a.gesture)
    }

    /// Play one frame and return its transform.
    pub fn advance(&mut self) -> GestureTransform {
        let Some(active) = self.active.as_mut() else {
            return GestureTransform::IDENTITY;
        };

        let duration = active.gesture.duration_frames();
        let transform = active.gesture.transform(active.frame as f64 / duration as f64);
        active.frame += 1;

        if active.frame >= duration {
            if let Some(finished) = self.active.take() {
                trace!("gesture {:?} finished", finished.gesture);
                // The caller may have dropped the receiver; nothing to notify then.
                let _ = finished.done.send(GestureCompletion {
                    gesture: finished.gesture,
                    frames: duration,
                });
            }
        }

        transform
    }
}
