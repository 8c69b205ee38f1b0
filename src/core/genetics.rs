use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::lifecycle::LifecycleStage;
use crate::core::traits::{clamp_earning_potential, clamp_stat, Coloring, Personality, Traits};

/// Viability bucket. UI color coding keys off these names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreedingStatus {
    Excellent,
    Good,
    Normal,
    Poor,
    Impossible,
}

impl BreedingStatus {
    pub fn from_rate(success_rate: f64) -> Self {
        match success_rate {
            r if r >= 70.0 => BreedingStatus::Excellent,
            r if r >= 50.0 => BreedingStatus::Good,
            r if r >= 30.0 => BreedingStatus::Normal,
            r if r > 0.0 => BreedingStatus::Poor,
            _ => BreedingStatus::Impossible,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            BreedingStatus::Excellent => "Your pet is in perfect shape for breeding!",
            BreedingStatus::Good => "Good breeding condition. Success is likely.",
            BreedingStatus::Normal => "Average condition. Feed and groom to improve the odds.",
            BreedingStatus::Poor => "Poor condition. Breeding will probably fail.",
            BreedingStatus::Impossible => "Your pet is too weak to breed. Take care of it first.",
        }
    }
}

impl std::fmt::Display for BreedingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BreedingStatus::Excellent => write!(f, "excellent"),
            BreedingStatus::Good => write!(f, "good"),
            BreedingStatus::Normal => write!(f, "normal"),
            BreedingStatus::Poor => write!(f, "poor"),
            BreedingStatus::Impossible => write!(f, "impossible"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreedingViability {
    pub can_breed: bool,
    pub success_rate: f64,
    pub status: BreedingStatus,
    pub message: String,
}

/// Single-pet viability from health and cleanliness.
///
/// Lifecycle stage and cooldown are not checked here, see
/// [`breeding_eligibility`].
pub fn viability(traits: &Traits) -> BreedingViability {
    let success_rate = (traits.satisfaction + traits.grooming) / 2.0;
    let status = BreedingStatus::from_rate(success_rate);

    BreedingViability {
        can_breed: status != BreedingStatus::Impossible,
        success_rate,
        status,
        message: status.message().to_string(),
    }
}

/// How two parents' satisfaction feeds the pair success rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreedingFormula {
    /// Both parents' satisfaction is averaged.
    #[default]
    Symmetric,
    /// Only the first parent's satisfaction counts.
    Legacy,
}

/// Pair success rate: half satisfaction, half mean grooming.
pub fn breeding_success_rate(
    parent_a: &Traits,
    parent_b: &Traits,
    formula: BreedingFormula,
) -> f64 {
    let grooming = (parent_a.grooming + parent_b.grooming) / 2.0;
    let satisfaction = match formula {
        BreedingFormula::Symmetric => (parent_a.satisfaction + parent_b.satisfaction) / 2.0,
        BreedingFormula::Legacy => parent_a.satisfaction,
    };
    (satisfaction + grooming) / 2.0
}

/// Stage and cooldown gate applied before a breeding request goes out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum BreedingEligibility {
    Eligible,
    NotPrime { stage: LifecycleStage },
    CoolingDown { remaining_secs: u64 },
}

pub fn breeding_eligibility(
    stage: LifecycleStage,
    last_bred_at: Option<i64>,
    now: i64,
    cooldown_secs: u64,
) -> BreedingEligibility {
    if !stage.can_breed() {
        return BreedingEligibility::NotPrime { stage };
    }

    if let Some(last_bred_at) = last_bred_at {
        let elapsed = now.saturating_sub(last_bred_at).max(0) as u64;
        if elapsed < cooldown_secs {
            return BreedingEligibility::CoolingDown {
                remaining_secs: cooldown_secs - elapsed,
            };
        }
    }

    BreedingEligibility::Eligible
}

/// Largest usable stat jitter: the full 0-100 stat range.
pub const MAX_STAT_JITTER: f64 = 100.0;
/// Largest usable earning jitter: the full earning potential range.
pub const MAX_EARNING_JITTER: f64 = 0.1;

/// Offspring preview tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticsConfig {
    /// Chance per categorical trait of mutating away from both parents
    pub mutation_rate: f64,
    /// Max +/- jitter on 0-100 stats around the parental mean
    pub stat_jitter: f64,
    /// Max +/- jitter on earning potential around the parental mean
    pub earning_jitter: f64,
    pub breeding_formula: BreedingFormula,
}

impl Default for GeneticsConfig {
    fn default() -> Self {
        GeneticsConfig {
            mutation_rate: 0.10,
            stat_jitter: 10.0,
            earning_jitter: 0.02,
            breeding_formula: BreedingFormula::Symmetric,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RarityTier {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl RarityTier {
    /// `score` is a 0-100 percentage.
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 60.0 => RarityTier::Legendary,
            s if s >= 45.0 => RarityTier::Epic,
            s if s >= 30.0 => RarityTier::Rare,
            s if s >= 15.0 => RarityTier::Uncommon,
            _ => RarityTier::Common,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            RarityTier::Common => "COMMON",
            RarityTier::Uncommon => "UNCOMMON",
            RarityTier::Rare => "RARE",
            RarityTier::Epic => "EPIC",
            RarityTier::Legendary => "LEGENDARY",
        }
    }

    pub fn color(&self) -> &str {
        match self {
            RarityTier::Common => "#9ca3af",
            RarityTier::Uncommon => "#22c55e",
            RarityTier::Rare => "#3b82f6",
            RarityTier::Epic => "#a855f7",
            RarityTier::Legendary => "#f59e0b",
        }
    }

    pub fn emoji(&self) -> &str {
        match self {
            RarityTier::Common => "⚪",
            RarityTier::Uncommon => "🟢",
            RarityTier::Rare => "🔵",
            RarityTier::Epic => "🟣",
            RarityTier::Legendary => "🟡",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MutatedTrait {
    Personality,
    Coloring,
}

/// One speculative child. Not a committed identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OffspringPreview {
    pub traits: Traits,
    pub generation: u32,
    pub rarity: RarityTier,
    /// 0-100
    pub rarity_score: f64,
    pub mutations: Vec<MutatedTrait>,
}

/// Draw `count` independent offspring previews.
///
/// Categorical traits come from either parent with equal odds, or with
/// probability `mutation_rate` from a value neither parent has. Numeric
/// traits are the parental mean plus bounded uniform jitter.
pub fn preview_offspring<R: Rng + ?Sized>(
    parent_a: &Traits,
    parent_b: &Traits,
    generation_a: u32,
    generation_b: u32,
    count: usize,
    config: &GeneticsConfig,
    rng: &mut R,
) -> Vec<OffspringPreview> {
    let generation = generation_a.max(generation_b).saturating_add(1);
    debug!(
        "previewing {} offspring at generation {} (mutation rate {:.2})",
        count, generation, config.mutation_rate
    );

    (0..count)
        .map(|_| draw_offspring(parent_a, parent_b, generation, config, rng))
        .collect()
}

fn draw_offspring<R: Rng + ?Sized>(
    parent_a: &Traits,
    parent_b: &Traits,
    generation: u32,
    config: &GeneticsConfig,
    rng: &mut R,
) -> OffspringPreview {
    let mutation_rate = sanitize_probability(config.mutation_rate);
    let stat_jitter = sanitize_jitter(config.stat_jitter, MAX_STAT_JITTER);
    let earning_jitter = sanitize_jitter(config.earning_jitter, MAX_EARNING_JITTER);

    let mut mutations = Vec::new();

    let (personality, mutated) = inherit(
        parent_a.personality,
        parent_b.personality,
        &Personality::ALL,
        mutation_rate,
        rng,
    );
    if mutated {
        mutations.push(MutatedTrait::Personality);
    }

    let (coloring, mutated) = inherit(
        parent_a.coloring,
        parent_b.coloring,
        &Coloring::ALL,
        mutation_rate,
        rng,
    );
    if mutated {
        mutations.push(MutatedTrait::Coloring);
    }

    let earning_potential = clamp_earning_potential(
        blend(parent_a.earning_potential, parent_b.earning_potential, earning_jitter, rng),
    );
    let social_score = clamp_stat(
        blend(parent_a.social_score as f64, parent_b.social_score as f64, stat_jitter, rng).round(),
    ) as u8;

    let traits = Traits {
        personality,
        coloring,
        earning_potential,
        social_score,
        grooming: clamp_stat(blend(parent_a.grooming, parent_b.grooming, stat_jitter, rng)),
        energy: clamp_stat(blend(parent_a.energy, parent_b.energy, stat_jitter, rng)),
        satisfaction: clamp_stat(blend(
            parent_a.satisfaction,
            parent_b.satisfaction,
            stat_jitter,
            rng,
        )),
    };

    let rarity_score = rarity_score(
        &traits,
        parent_a,
        parent_b,
        mutations.len(),
        stat_jitter,
        earning_jitter,
    );

    OffspringPreview {
        traits,
        generation,
        rarity: RarityTier::from_score(rarity_score),
        rarity_score,
        mutations,
    }
}

fn inherit<T: Copy + PartialEq, R: Rng + ?Sized>(
    a: T,
    b: T,
    pool: &[T],
    mutation_rate: f64,
    rng: &mut R,
) -> (T, bool) {
    if rng.gen_bool(mutation_rate) {
        let outsiders: Vec<T> = pool.iter().copied().filter(|v| *v != a && *v != b).collect();
        if let Some(value) = outsiders.choose(rng) {
            return (*value, true);
        }
    }
    if rng.gen_bool(0.5) {
        (a, false)
    } else {
        (b, false)
    }
}

fn blend<R: Rng + ?Sized>(a: f64, b: f64, jitter: f64, rng: &mut R) -> f64 {
    let mean = (a + b) / 2.0;
    if jitter == 0.0 {
        return mean;
    }
    mean + rng.gen_range(-jitter..=jitter)
}

fn sanitize_probability(p: f64) -> f64 {
    if p.is_finite() {
        p.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn sanitize_jitter(j: f64, max: f64) -> f64 {
    if j.is_finite() {
        j.abs().min(max)
    } else {
        0.0
    }
}

/// Percentage of the best possible favorable deviation from the parental
/// mean. Each mutation counts as one full stat jitter.
fn rarity_score(
    child: &Traits,
    parent_a: &Traits,
    parent_b: &Traits,
    mutation_count: usize,
    stat_jitter: f64,
    earning_jitter: f64,
) -> f64 {
    if stat_jitter == 0.0 {
        return if mutation_count > 0 { 100.0 * mutation_count as f64 / 2.0 } else { 0.0 };
    }

    let gain = |c: f64, a: f64, b: f64| (c - (a + b) / 2.0).max(0.0);

    let mut favorable = gain(child.grooming, parent_a.grooming, parent_b.grooming)
        + gain(child.energy, parent_a.energy, parent_b.energy)
        + gain(child.satisfaction, parent_a.satisfaction, parent_b.satisfaction)
        + gain(
            child.social_score as f64,
            parent_a.social_score as f64,
            parent_b.social_score as f64,
        );
    let mut ceiling = 4.0 * stat_jitter;

    if earning_jitter > 0.0 {
        let earning_gain = gain(
            child.earning_potential,
            parent_a.earning_potential,
            parent_b.earning_potential,
        );
        favorable += earning_gain / earning_jitter * stat_jitter;
        ceiling += stat_jitter;
    }

    favorable += mutation_count as f64 * stat_jitter;
    ceiling += 2.0 * stat_jitter;

    (favorable / ceiling * 100.0).clamp(0.0, 100.0)
}
