use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::core::care::decay;
use crate::core::earnings::{retirement_eligible, retirement_tier, RetirementTier};
use crate::core::emotion::{classify, EmotionSignals, EmotionalState};
use crate::core::genetics::{viability, BreedingViability};
use crate::core::lifecycle::{lifecycle_info, LifecycleInfo};
use crate::core::traits::{generate, Traits};

/// Raw values supplied by the chain-read layer and local clocks.
/// Timestamps are unix seconds.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetInputs {
    pub identifier: Vec<u8>,
    pub created_at: i64,
    pub last_fed: i64,
    pub last_interaction: i64,
    pub now: i64,
    pub transaction_pending: bool,
    pub last_success_at: Option<i64>,
    pub session_started_at: Option<i64>,
}

/// Derived state for one pet at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetSnapshot {
    /// Generated traits with care stats decayed to `now`
    pub traits: Traits,
    pub lifecycle: LifecycleInfo,
    pub viability: BreedingViability,
    pub emotion: EmotionalState,
    pub retirement_tier: Option<RetirementTier>,
    pub retirement_eligible: bool,
}

fn seconds_since(then: Option<i64>, now: i64) -> Option<u64> {
    then.map(|t| now.saturating_sub(t).max(0) as u64)
}

/// Run the whole derivation pipeline. `None` means "no pet" for a null
/// identifier.
///
/// `fallback` is the emotion shown when no rule of the classifier
/// applies, typically driven by the caller's latest gesture.
pub fn snapshot(
    inputs: &PetInputs,
    config: &Config,
    fallback: EmotionalState,
) -> Option<PetSnapshot> {
    let base = generate(&inputs.identifier)?;
    let traits = decay(
        &base,
        inputs.last_interaction,
        inputs.last_fed,
        inputs.now,
        &config.decay,
    );
    let lifecycle = lifecycle_info(inputs.created_at, inputs.now);

    let signals = EmotionSignals {
        health: traits.satisfaction,
        happiness: traits.energy,
        transaction_pending: inputs.transaction_pending,
        seconds_since_success: seconds_since(inputs.last_success_at, inputs.now),
        seconds_since_session_start: seconds_since(inputs.session_started_at, inputs.now),
        has_active_pet: true,
    };

    Some(PetSnapshot {
        viability: viability(&traits),
        emotion: classify(&signals, fallback),
        retirement_tier: retirement_tier(lifecycle.age_in_days),
        retirement_eligible: retirement_eligible(lifecycle.age_in_days),
        traits,
        lifecycle,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lifecycle::{LifecycleStage, SECONDS_PER_DAY};
    use crate::core::traits::parse_identifier;
    use std::path::PathBuf;

    fn inputs(now: i64) -> PetInputs {
        PetInputs {
            identifier: parse_identifier("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed").unwrap(),
            created_at: 0,
            last_fed: now,
            last_interaction: now,
            now,
            ..PetInputs::default()
        }
    }

    #[test]
    fn test_null_identifier_has_no_snapshot() {
        let config = Config::default_config(PathBuf::new());
        let empty = PetInputs::default();
        assert!(snapshot(&empty, &config, EmotionalState::Idle).is_none());
    }

    #[test]
    fn test_fresh_care_keeps_generated_traits() {
        let config = Config::default_config(PathBuf::new());
        let now = 40 * SECONDS_PER_DAY;
        let snap = snapshot(&inputs(now), &config, EmotionalState::Idle).unwrap();

        let base = generate(&inputs(now).identifier).unwrap();
        assert_eq!(snap.traits, base);
        assert_eq!(snap.lifecycle.stage, LifecycleStage::Prime);
        assert!(snap.lifecycle.can_breed);
        assert!(snap.retirement_tier.is_none());
    }

    #[test]
    fn test_neglect_starves_the_pet() {
        let config = Config::default_config(PathBuf::new());
        let now = 200 * SECONDS_PER_DAY;
        let neglected = PetInputs {
            last_fed: 0,
            last_interaction: 0,
            ..inputs(now)
        };
        let snap = snapshot(&neglected, &config, EmotionalState::Idle).unwrap();
        assert_eq!(snap.traits.satisfaction, 0.0);
        assert_eq!(snap.emotion, EmotionalState::Dead);
        assert!(!snap.viability.can_breed);
        assert_eq!(snap.retirement_tier, Some(RetirementTier::Legendary));
    }

    #[test]
    fn test_pending_transaction_excites() {
        let config = Config::default_config(PathBuf::new());
        let now = 5 * SECONDS_PER_DAY;
        let pending = PetInputs {
            transaction_pending: true,
            ..inputs(now)
        };
        let snap = snapshot(&pending, &config, EmotionalState::Idle).unwrap();
        // Generated health can land in the hungry band, which outranks a pending transaction
        let expected = if snap.traits.satisfaction < 30.0 {
            EmotionalState::Hungry
        } else {
            EmotionalState::Excited
        };
        assert_eq!(snap.emotion, expected);
    }
}
