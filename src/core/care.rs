use serde::{Deserialize, Serialize};

use crate::core::traits::{clamp_stat, Traits};

/// Decay tuning for the three care stats.
///
/// Each stat is left untouched inside its grace window, then multiplied by
/// `max(0, 1 - rate * periods)` where `periods = elapsed / period_secs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayConfig {
    pub period_secs: u64,
    pub satisfaction_grace_secs: u64,
    pub satisfaction_rate: f64,
    pub energy_grace_secs: u64,
    pub energy_rate: f64,
    pub grooming_grace_secs: u64,
    pub grooming_rate: f64,
}

impl Default for DecayConfig {
    fn default() -> Self {
        DecayConfig {
            period_secs: 30 * 60,
            satisfaction_grace_secs: 5 * 60,
            satisfaction_rate: 0.005,
            energy_grace_secs: 5 * 60,
            energy_rate: 0.01,
            grooming_grace_secs: 2 * 60,
            grooming_rate: 0.02,
        }
    }
}

/// Care actions a player can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interaction {
    Feed,
    Play,
    Pet,
    Poke,
}

/// Additive stat changes for one interaction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CareDelta {
    pub grooming: f64,
    pub energy: f64,
    pub satisfaction: f64,
}

impl Interaction {
    pub fn delta(&self) -> CareDelta {
        match self {
            Interaction::Feed => CareDelta {
                satisfaction: 15.0,
                ..CareDelta::default()
            },
            Interaction::Play => CareDelta {
                energy: 10.0,
                satisfaction: 5.0,
                ..CareDelta::default()
            },
            Interaction::Pet => CareDelta {
                grooming: 10.0,
                satisfaction: 5.0,
                ..CareDelta::default()
            },
            Interaction::Poke => CareDelta {
                energy: 8.0,
                ..CareDelta::default()
            },
        }
    }

    /// Feeding resets the satisfaction clock, every other action the
    /// interaction clock.
    pub fn resets_fed_clock(&self) -> bool {
        matches!(self, Interaction::Feed)
    }

    pub fn name(&self) -> &str {
        match self {
            Interaction::Feed => "feed",
            Interaction::Play => "play",
            Interaction::Pet => "pet",
            Interaction::Poke => "poke",
        }
    }
}

/// Multiplier left after `elapsed_secs` for one stat.
fn decay_factor(elapsed_secs: i64, grace_secs: u64, rate: f64, period_secs: u64) -> f64 {
    // A zero period would divide by zero; treat it as decay disabled.
    if period_secs == 0 || elapsed_secs <= grace_secs as i64 {
        return 1.0;
    }
    let periods = elapsed_secs as f64 / period_secs as f64;
    (1.0 - rate * periods).max(0.0)
}

/// Age the care stats of `traits` to `now`.
///
/// All times are unix seconds. Timestamps in the future count as zero
/// elapsed time. Returns a new value; the fixed traits pass through.
pub fn decay(
    traits: &Traits,
    last_interaction: i64,
    last_fed: i64,
    now: i64,
    config: &DecayConfig,
) -> Traits {
    let since_fed = now.saturating_sub(last_fed).max(0);
    let since_interaction = now.saturating_sub(last_interaction).max(0);

    let satisfaction_factor = decay_factor(
        since_fed,
        config.satisfaction_grace_secs,
        config.satisfaction_rate,
        config.period_secs,
    );
    let energy_factor = decay_factor(
        since_interaction,
        config.energy_grace_secs,
        config.energy_rate,
        config.period_secs,
    );
    let grooming_factor = decay_factor(
        since_interaction,
        config.grooming_grace_secs,
        config.grooming_rate,
        config.period_secs,
    );

    Traits {
        satisfaction: clamp_stat(traits.satisfaction * satisfaction_factor),
        energy: clamp_stat(traits.energy * energy_factor),
        grooming: clamp_stat(traits.grooming * grooming_factor),
        ..*traits
    }
}

/// Apply one interaction. Stats saturate at 100.
pub fn apply_interaction(traits: &Traits, interaction: Interaction) -> Traits {
    let delta = interaction.delta();
    Traits {
        grooming: clamp_stat(traits.grooming + delta.grooming),
        energy: clamp_stat(traits.energy + delta.energy),
        satisfaction: clamp_stat(traits.satisfaction + delta.satisfaction),
        ..*traits
    }
}
