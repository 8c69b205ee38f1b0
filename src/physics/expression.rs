use serde::{Deserialize, Serialize};

use crate::core::emotion::EmotionalState;

/// Frames between the start of two blinks.
pub const BLINK_INTERVAL: u64 = 180;
/// Length of one blink in frames.
pub const BLINK_FRAMES: u64 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EyeKind {
    Open,
    Wide,
    /// Upturned arcs
    Happy,
    Closed,
    Cross,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EyeShape {
    pub kind: EyeKind,
    pub width: f64,
    pub height: f64,
    pub pupil_offset_x: f64,
    pub pupil_offset_y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouthKind {
    Smile,
    Frown,
    Flat,
    Surprised,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MouthShape {
    pub kind: MouthKind,
    /// 0-1
    pub intensity: f64,
}

/// Eyelid openness during a blink window, 1.0 outside it.
pub fn blink_openness(frame: u64) -> f64 {
    let phase = frame % BLINK_INTERVAL;
    if phase >= BLINK_FRAMES {
        return 1.0;
    }
    let mid = (BLINK_FRAMES - 1) as f64 / 2.0;
    (phase as f64 - mid).abs() / mid
}

pub fn eyes(state: EmotionalState, frame: u64) -> EyeShape {
    let f = frame as f64;
    let shape = match state {
        EmotionalState::Idle => EyeShape {
            kind: EyeKind::Open,
            width: 10.0,
            height: 12.0,
            pupil_offset_x: 2.0 * (f * 0.02).sin(),
            pupil_offset_y: 0.0,
        },
        EmotionalState::Happy => EyeShape {
            kind: EyeKind::Happy,
            width: 12.0,
            height: 6.0,
            pupil_offset_x: 0.0,
            pupil_offset_y: 0.0,
        },
        EmotionalState::Excited => EyeShape {
            kind: EyeKind::Wide,
            width: 12.0,
            height: 14.0,
            pupil_offset_x: 0.0,
            pupil_offset_y: (f * 0.3).sin(),
        },
        EmotionalState::Hungry => EyeShape {
            kind: EyeKind::Open,
            width: 10.0,
            height: 9.0,
            pupil_offset_x: 0.0,
            pupil_offset_y: 2.0,
        },
        EmotionalState::Sleeping => EyeShape {
            kind: EyeKind::Closed,
            width: 12.0,
            height: 1.0,
            pupil_offset_x: 0.0,
            pupil_offset_y: 0.0,
        },
        EmotionalState::Dead => EyeShape {
            kind: EyeKind::Cross,
            width: 10.0,
            height: 10.0,
            pupil_offset_x: 0.0,
            pupil_offset_y: 0.0,
        },
        EmotionalState::Bored => EyeShape {
            kind: EyeKind::Open,
            width: 10.0,
            height: 6.0,
            pupil_offset_x: 3.0 * (f * 0.01).sin(),
            pupil_offset_y: 1.0,
        },
        EmotionalState::Petting => EyeShape {
            kind: EyeKind::Happy,
            width: 12.0,
            height: 5.0,
            pupil_offset_x: 0.0,
            pupil_offset_y: 0.0,
        },
    };

    // Only open eyes blink
    match shape.kind {
        EyeKind::Open | EyeKind::Wide => EyeShape {
            height: shape.height * blink_openness(frame),
            ..shape
        },
        _ => shape,
    }
}

pub fn mouth(state: EmotionalState, frame: u64) -> MouthShape {
    let f = frame as f64;
    match state {
        EmotionalState::Idle => MouthShape {
            kind: MouthKind::Smile,
            intensity: 0.3,
        },
        EmotionalState::Happy => MouthShape {
            kind: MouthKind::Smile,
            intensity: 0.8 + 0.1 * (f * 0.1).sin(),
        },
        EmotionalState::Excited => {
            // Alternate between a wide grin and a gasp every half second
            let kind = if (frame / 30) % 2 == 0 {
                MouthKind::Open
            } else {
                MouthKind::Surprised
            };
            MouthShape {
                kind,
                intensity: 0.6 + 0.4 * (f * 0.2).sin().abs(),
            }
        }
        EmotionalState::Hungry => MouthShape {
            kind: MouthKind::Frown,
            intensity: 0.6,
        },
        EmotionalState::Sleeping => MouthShape {
            kind: MouthKind::Flat,
            intensity: 0.1,
        },
        EmotionalState::Dead => MouthShape {
            kind: MouthKind::Frown,
            intensity: 1.0,
        },
        EmotionalState::Bored => MouthShape {
            kind: MouthKind::Flat,
            intensity: 0.5,
        },
        EmotionalState::Petting => MouthShape {
            kind: MouthKind::Smile,
            intensity: 1.0,
        },
    }
}
