use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use colored::*;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use minerpet::config::{load_or_default, Config};
use minerpet::core::earnings::{
    from_base_units, retirement_eligible, retirement_tier, EarningsProjection,
};
use minerpet::core::genetics::{
    breeding_eligibility, breeding_success_rate, preview_offspring, BreedingEligibility,
};
use minerpet::core::{
    apply_interaction, decay, generate, parse_identifier, EmotionalState, Interaction, Traits,
};
use minerpet::physics::{Gesture, PetAnimator};
use minerpet::{snapshot, PetInputs};

use crate::status;

pub use commands::{Args, Commands};

mod commands;

fn now_or(now: Option<i64>) -> i64 {
    now.unwrap_or_else(|| chrono::Utc::now().timestamp())
}

fn load_traits(address: &str) -> Result<Traits> {
    let identifier = parse_identifier(address)?;
    generate(&identifier).with_context(|| format!("No pet at address {}", address))
}

pub fn handle_traits(address: String, json: bool) -> Result<()> {
    let traits = load_traits(&address)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&traits)?);
    } else {
        status::print_traits(&traits);
    }
    Ok(())
}

pub struct StatusRequest {
    pub address: String,
    pub created_at: i64,
    pub last_fed: i64,
    pub last_interaction: i64,
    pub now: Option<i64>,
    pub tx_pending: bool,
    pub last_success: Option<i64>,
    pub session_started: Option<i64>,
    pub last_bred: Option<i64>,
    pub fallback: EmotionalState,
    pub json: bool,
}

pub fn handle_status(request: StatusRequest, data_dir: Option<PathBuf>) -> Result<()> {
    let config = load_or_default(data_dir.as_deref());
    let now = now_or(request.now);

    let inputs = PetInputs {
        identifier: parse_identifier(&request.address)?,
        created_at: request.created_at,
        last_fed: request.last_fed,
        last_interaction: request.last_interaction,
        now,
        transaction_pending: request.tx_pending,
        last_success_at: request.last_success,
        session_started_at: request.session_started,
    };

    let Some(snap) = snapshot(&inputs, &config, request.fallback) else {
        if request.json {
            println!("null");
        } else {
            println!("{}", "No pet at this address.".yellow());
        }
        return Ok(());
    };

    let eligibility = breeding_eligibility(
        snap.lifecycle.stage,
        request.last_bred,
        now,
        config.breeding_cooldown_secs,
    );

    if request.json {
        let value = serde_json::json!({
            "snapshot": snap,
            "breedingEligibility": eligibility,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    status::print_snapshot(&snap);
    if let BreedingEligibility::CoolingDown { remaining_secs } = eligibility {
        let cooldown = format!(
            "Breeding cooldown: {}h {}m left",
            remaining_secs / 3600,
            remaining_secs % 3600 / 60
        );
        println!("{}", cooldown.yellow());
    }
    Ok(())
}

pub fn handle_interact(
    action: Interaction,
    address: String,
    last_fed: i64,
    last_interaction: i64,
    now: Option<i64>,
    data_dir: Option<PathBuf>,
) -> Result<()> {
    let config = load_or_default(data_dir.as_deref());
    let now = now_or(now);

    let base = load_traits(&address)?;
    let current = decay(&base, last_interaction, last_fed, now, &config.decay);
    let updated = apply_interaction(&current, action);
    info!("{} applied to {}", action.name(), address);

    let (last_fed, last_interaction) = if action.resets_fed_clock() {
        (now, last_interaction)
    } else {
        (last_fed, now)
    };

    let value = serde_json::json!({
        "interaction": action,
        "traits": updated,
        "lastFed": last_fed,
        "lastInteraction": last_interaction,
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

pub struct BreedRequest {
    pub parent_a: String,
    pub parent_b: String,
    pub gen_a: u32,
    pub gen_b: u32,
    pub count: usize,
    pub seed: Option<u64>,
    pub json: bool,
}

pub fn handle_breed(request: BreedRequest, data_dir: Option<PathBuf>) -> Result<()> {
    let config = load_or_default(data_dir.as_deref());
    let parent_a = load_traits(&request.parent_a)?;
    let parent_b = load_traits(&request.parent_b)?;

    let mut rng = match request.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let rate = breeding_success_rate(&parent_a, &parent_b, config.genetics.breeding_formula);
    let previews = preview_offspring(
        &parent_a,
        &parent_b,
        request.gen_a,
        request.gen_b,
        request.count,
        &config.genetics,
        &mut rng,
    );

    if request.json {
        let value = serde_json::json!({
            "successRate": rate,
            "offspring": previews,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{} {:.1}%", "Pair success rate:".cyan().bold(), rate);
    status::print_previews(&previews);
    Ok(())
}

pub struct EarningsRequest {
    pub initial: String,
    pub current: String,
    pub rate: f64,
    pub elapsed: f64,
    pub age_days: Option<u32>,
    pub base_units: bool,
    pub json: bool,
}

fn parse_balance(value: &str, base_units: bool, decimals: u8) -> Result<f64> {
    if base_units {
        let raw: u128 = value
            .parse()
            .with_context(|| format!("Invalid base unit amount '{}'", value))?;
        Ok(from_base_units(raw, decimals))
    } else {
        value
            .parse()
            .with_context(|| format!("Invalid balance '{}'", value))
    }
}

pub fn handle_earnings(request: EarningsRequest, data_dir: Option<PathBuf>) -> Result<()> {
    let config = load_or_default(data_dir.as_deref());
    let decimals = config.earnings.token_decimals;
    let initial = parse_balance(&request.initial, request.base_units, decimals)?;
    let current = parse_balance(&request.current, request.base_units, decimals)?;

    let projection = EarningsProjection::compute(
        initial,
        current,
        request.rate,
        request.elapsed,
        &config.earnings,
    );
    let tier = request.age_days.and_then(retirement_tier);
    let eligible = request.age_days.map(retirement_eligible);

    if request.json {
        let value = serde_json::json!({
            "projection": projection,
            "retirementTier": tier,
            "retirementEligible": eligible,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    status::print_earnings(&projection);
    match (tier, eligible) {
        (Some(tier), _) => println!("Retirement tier: {}", tier.name().yellow().bold()),
        (None, Some(false)) => println!("{}", "Not yet eligible for retirement".dimmed()),
        _ => {}
    }
    Ok(())
}

/// Drive the animator in real time, printing one JSON frame per line.
pub async fn handle_animate(
    state: EmotionalState,
    gesture: Option<Gesture>,
    frames: u64,
    fps: u32,
) -> Result<()> {
    let mut animator = PetAnimator::new();

    let watcher = gesture
        .and_then(|g| animator.start_gesture(g))
        .map(|done| tokio::spawn(async move { done.await.ok() }));

    let mut ticker = tokio::time::interval(Duration::from_secs_f64(1.0 / fps.max(1) as f64));
    for _ in 0..frames {
        ticker.tick().await;
        let params = animator.tick(state);
        println!("{}", serde_json::to_string(&params)?);
    }

    // Dropping the animator closes an unfinished gesture's channel
    drop(animator);

    if let Some(watcher) = watcher {
        match watcher.await.context("Gesture watcher panicked")? {
            Some(done) => info!("{:?} finished after {} frames", done.gesture, done.frames),
            None => warn!("Gesture did not finish within {} frames", frames),
        }
    }
    Ok(())
}

pub fn handle_config(init: bool, data_dir: Option<PathBuf>) -> Result<()> {
    let config = if init {
        let config = Config::default_config(data_dir.unwrap_or_else(Config::default_data_dir));
        std::fs::create_dir_all(&config.data_dir).context("Failed to create data directory")?;
        config.save()?;
        println!("{} {}", "✓ Wrote".green(), config.config_path().display());
        config
    } else {
        Config::new(data_dir)?
    };

    println!("{}", config.config_path().display().to_string().dimmed());
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
