use serde::{Deserialize, Serialize};

pub const SECONDS_PER_DAY: i64 = 86_400;

const GROWTH_START_DAY: u32 = 1;
const PRIME_START_DAY: u32 = 30;
const TWILIGHT_START_DAY: u32 = 90;
const GROWTH_SPAN_DAYS: f64 = (PRIME_START_DAY - GROWTH_START_DAY) as f64;

const BASE_MULTIPLIER: f64 = 0.5;
const FULL_MULTIPLIER: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleStage {
    Birth,
    Growth,
    Prime,
    Twilight,
}

impl LifecycleStage {
    pub fn from_age(age_in_days: u32) -> Self {
        match age_in_days {
            a if a >= TWILIGHT_START_DAY => LifecycleStage::Twilight,
            a if a >= PRIME_START_DAY => LifecycleStage::Prime,
            a if a >= GROWTH_START_DAY => LifecycleStage::Growth,
            _ => LifecycleStage::Birth,
        }
    }

    pub fn can_breed(&self) -> bool {
        matches!(self, LifecycleStage::Prime)
    }

    pub fn emoji(&self) -> &str {
        match self {
            LifecycleStage::Birth => "🥚",
            LifecycleStage::Growth => "🐣",
            LifecycleStage::Prime => "🐥",
            LifecycleStage::Twilight => "🦉",
        }
    }

    pub fn name(&self) -> &str {
        match self {
            LifecycleStage::Birth => "Birth",
            LifecycleStage::Growth => "Growth",
            LifecycleStage::Prime => "Prime",
            LifecycleStage::Twilight => "Twilight",
        }
    }

    pub fn description(&self) -> &str {
        match self {
            LifecycleStage::Birth => "Freshly hatched. Mining at half strength.",
            LifecycleStage::Growth => "Growing up. Mining power ramps up every day.",
            LifecycleStage::Prime => "In its prime. Full mining power and ready to breed.",
            LifecycleStage::Twilight => "A wise elder. Eligible for an honored retirement.",
        }
    }
}

/// Derived lifecycle view, computed from `(created_at, now)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleInfo {
    pub stage: LifecycleStage,
    pub age_in_days: u32,
    pub dps_multiplier: f64,
    pub can_breed: bool,
    pub description: String,
    pub emoji: String,
}

/// Whole days between two unix timestamps, floored, never negative.
pub fn age_in_days(created_at: i64, now: i64) -> u32 {
    let elapsed = now.saturating_sub(created_at).max(0);
    (elapsed / SECONDS_PER_DAY).min(u32::MAX as i64) as u32
}

pub fn stage(age_in_days: u32) -> LifecycleStage {
    LifecycleStage::from_age(age_in_days)
}

/// Mining multiplier: 0.5 at birth, a linear ramp to 1.0 across growth,
/// then flat.
pub fn dps_multiplier(stage: LifecycleStage, age_in_days: u32) -> f64 {
    match stage {
        LifecycleStage::Birth => BASE_MULTIPLIER,
        LifecycleStage::Growth => {
            let days_grown = age_in_days.saturating_sub(GROWTH_START_DAY) as f64;
            let progress = days_grown.min(GROWTH_SPAN_DAYS) / GROWTH_SPAN_DAYS;
            BASE_MULTIPLIER + progress * (FULL_MULTIPLIER - BASE_MULTIPLIER)
        }
        // Twilight keeps the full multiplier; no end-of-life curve exists yet.
        LifecycleStage::Prime | LifecycleStage::Twilight => FULL_MULTIPLIER,
    }
}

pub fn lifecycle_info(created_at: i64, now: i64) -> LifecycleInfo {
    let age = age_in_days(created_at, now);
    let stage = stage(age);

    LifecycleInfo {
        stage,
        age_in_days: age,
        dps_multiplier: dps_multiplier(stage, age),
        can_breed: stage.can_breed(),
        description: stage.description().to_string(),
        emoji: stage.emoji().to_string(),
    }
}
