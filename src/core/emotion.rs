use serde::{Deserialize, Serialize};

const DEAD_BELOW: f64 = 5.0;
const HUNGRY_BELOW: f64 = 30.0;
const HAPPY_ABOVE: f64 = 70.0;
/// How long a confirmed transaction keeps the pet celebrating.
pub const RECENT_SUCCESS_SECS: u64 = 10;
/// A session younger than this still counts as a fresh arrival.
pub const FRESH_SESSION_SECS: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionalState {
    #[default]
    Idle,
    Happy,
    Excited,
    Hungry,
    Sleeping,
    Dead,
    Bored,
    Petting,
}

impl EmotionalState {
    /// Unknown names fall back to `Idle`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "happy" => EmotionalState::Happy,
            "excited" => EmotionalState::Excited,
            "hungry" => EmotionalState::Hungry,
            "sleeping" => EmotionalState::Sleeping,
            "dead" => EmotionalState::Dead,
            "bored" => EmotionalState::Bored,
            "petting" => EmotionalState::Petting,
            _ => EmotionalState::Idle,
        }
    }

    pub fn is_celebratory(&self) -> bool {
        matches!(
            self,
            EmotionalState::Happy | EmotionalState::Excited | EmotionalState::Petting
        )
    }
}

impl std::fmt::Display for EmotionalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EmotionalState::Idle => "idle",
            EmotionalState::Happy => "happy",
            EmotionalState::Excited => "excited",
            EmotionalState::Hungry => "hungry",
            EmotionalState::Sleeping => "sleeping",
            EmotionalState::Dead => "dead",
            EmotionalState::Bored => "bored",
            EmotionalState::Petting => "petting",
        };
        write!(f, "{}", name)
    }
}

/// Inputs to [`classify`]. Percentages are 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionSignals {
    pub health: f64,
    pub happiness: f64,
    /// A transaction is pending or confirming
    pub transaction_pending: bool,
    pub seconds_since_success: Option<u64>,
    pub seconds_since_session_start: Option<u64>,
    pub has_active_pet: bool,
}

/// First matching rule wins:
///
/// 1. health < 5 → dead
/// 2. health < 30 → hungry
/// 3. transaction in flight → excited
/// 4. recent success → excited
/// 5. happiness > 70 → happy
/// 6. session under a minute old → excited
/// 7. no active pet → sleeping
/// 8. `fallback` (idle, bored or petting, chosen by the caller's gesture input)
pub fn classify(signals: &EmotionSignals, fallback: EmotionalState) -> EmotionalState {
    if signals.health < DEAD_BELOW {
        return EmotionalState::Dead;
    }
    if signals.health < HUNGRY_BELOW {
        return EmotionalState::Hungry;
    }
    if signals.transaction_pending {
        return EmotionalState::Excited;
    }
    if signals
        .seconds_since_success
        .is_some_and(|secs| secs < RECENT_SUCCESS_SECS)
    {
        return EmotionalState::Excited;
    }
    if signals.happiness > HAPPY_ABOVE {
        return EmotionalState::Happy;
    }
    if signals
        .seconds_since_session_start
        .is_some_and(|secs| secs < FRESH_SESSION_SECS)
    {
        return EmotionalState::Excited;
    }
    if !signals.has_active_pet {
        return EmotionalState::Sleeping;
    }
    fallback
}

#[cfg(test)]
mod tests {
    use super::*;

    fn healthy() -> EmotionSignals {
        EmotionSignals {
            health: 60.0,
            happiness: 50.0,
            transaction_pending: false,
            seconds_since_success: None,
            seconds_since_session_start: Some(3_600),
            has_active_pet: true,
        }
    }

    #[test]
    fn test_dead_beats_everything() {
        let signals = EmotionSignals {
            health: 2.0,
            happiness: 90.0,
            transaction_pending: true,
            seconds_since_success: Some(1),
            seconds_since_session_start: Some(1),
            has_active_pet: true,
        };
        assert_eq!(classify(&signals, EmotionalState::Idle), EmotionalState::Dead);
    }

    #[test]
    fn test_hungry_beats_transaction() {
        let signals = EmotionSignals {
            health: 20.0,
            transaction_pending: true,
            ..healthy()
        };
        assert_eq!(classify(&signals, EmotionalState::Idle), EmotionalState::Hungry);
    }

    #[test]
    fn test_excited_paths() {
        let pending = EmotionSignals {
            transaction_pending: true,
            happiness: 95.0,
            ..healthy()
        };
        assert_eq!(classify(&pending, EmotionalState::Idle), EmotionalState::Excited);

        let success = EmotionSignals {
            seconds_since_success: Some(3),
            ..healthy()
        };
        assert_eq!(classify(&success, EmotionalState::Idle), EmotionalState::Excited);

        let stale_success = EmotionSignals {
            seconds_since_success: Some(RECENT_SUCCESS_SECS),
            ..healthy()
        };
        assert_eq!(classify(&stale_success, EmotionalState::Idle), EmotionalState::Idle);

        let fresh = EmotionSignals {
            seconds_since_session_start: Some(30),
            ..healthy()
        };
        assert_eq!(classify(&fresh, EmotionalState::Idle), EmotionalState::Excited);
    }

    #[test]
    fn test_happy_beats_fresh_session() {
        let signals = EmotionSignals {
            happiness: 71.0,
            seconds_since_session_start: Some(5),
            ..healthy()
        };
        assert_eq!(classify(&signals, EmotionalState::Idle), EmotionalState::Happy);
    }

    #[test]
    fn test_sleeping_and_fallback() {
        let no_pet = EmotionSignals {
            has_active_pet: false,
            ..healthy()
        };
        assert_eq!(classify(&no_pet, EmotionalState::Bored), EmotionalState::Sleeping);
        assert_eq!(classify(&healthy(), EmotionalState::Petting), EmotionalState::Petting);
    }

    #[test]
    fn test_names() {
        assert_eq!(EmotionalState::from_name("HUNGRY"), EmotionalState::Hungry);
        assert_eq!(EmotionalState::from_name("confused"), EmotionalState::Idle);
        assert_eq!(EmotionalState::Excited.to_string(), "excited");
    }
}
