use colored::*;

use minerpet::core::earnings::EarningsProjection;
use minerpet::core::genetics::{BreedingStatus, OffspringPreview, RarityTier};
use minerpet::core::Traits;
use minerpet::PetSnapshot;

const BAR_WIDTH: usize = 20;

/// `[██████░░░░] 60%` for a 0-100 value.
pub fn format_bar(value: f64) -> String {
    let value = value.clamp(0.0, 100.0);
    let filled = ((value / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!(
        "[{}{}] {:.0}%",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled),
        value
    )
}

fn stat_line(label: &str, value: f64) -> String {
    let bar = format_bar(value);
    let bar = match value {
        v if v < 30.0 => bar.red(),
        v if v < 60.0 => bar.yellow(),
        _ => bar.green(),
    };
    format!("{:<14}{}", label, bar)
}

fn rarity_label(tier: RarityTier) -> ColoredString {
    let label = format!("{} {}", tier.emoji(), tier.name());
    match tier {
        RarityTier::Common => label.normal(),
        RarityTier::Uncommon => label.green(),
        RarityTier::Rare => label.blue(),
        RarityTier::Epic => label.magenta(),
        RarityTier::Legendary => label.yellow().bold(),
    }
}

fn status_label(status: BreedingStatus) -> ColoredString {
    let label = status.to_string();
    match status {
        BreedingStatus::Excellent => label.green().bold(),
        BreedingStatus::Good => label.green(),
        BreedingStatus::Normal => label.yellow(),
        BreedingStatus::Poor => label.red(),
        BreedingStatus::Impossible => label.red().bold(),
    }
}

pub fn print_traits(traits: &Traits) {
    println!(
        "{} {} {}",
        traits.personality.emoji(),
        traits.personality.name().cyan().bold(),
        format!("({} {})", traits.coloring.name(), traits.coloring.hex()).dimmed()
    );
    println!("{:<14}x{:.2}", "Earning", traits.earning_potential);
    println!("{:<14}{}", "Social", traits.social_score);
    println!("{}", stat_line("Health", traits.satisfaction));
    println!("{}", stat_line("Happiness", traits.energy));
    println!("{}", stat_line("Cleanliness", traits.grooming));
}

pub fn print_snapshot(snapshot: &PetSnapshot) {
    println!("{}", "Pet Status".cyan().bold());
    print_traits(&snapshot.traits);

    let lifecycle = &snapshot.lifecycle;
    println!("\n{}", "Lifecycle".cyan().bold());
    println!(
        "{} {} - day {}",
        lifecycle.emoji,
        lifecycle.stage.name(),
        lifecycle.age_in_days
    );
    println!("{}", lifecycle.description.dimmed());
    println!("Mining multiplier: x{:.3}", lifecycle.dps_multiplier);

    println!("\n{}", "Breeding".cyan().bold());
    println!(
        "{} ({:.1}%) - {}",
        status_label(snapshot.viability.status),
        snapshot.viability.success_rate,
        snapshot.viability.message
    );
    if !lifecycle.can_breed {
        println!("{}", "Only pets in their prime can breed.".yellow());
    }

    println!("\nMood: {}", snapshot.emotion.to_string().bold());

    match snapshot.retirement_tier {
        Some(tier) => {
            println!("{} {}", "🏅 Retirement tier:".yellow(), tier.name().yellow().bold())
        }
        None if snapshot.retirement_eligible => {
            println!("{}", "🏅 Eligible for retirement".yellow())
        }
        None => {}
    }
}

pub fn print_previews(previews: &[OffspringPreview]) {
    for (i, preview) in previews.iter().enumerate() {
        let t = &preview.traits;
        println!(
            "#{:<3} {} {:>5.1}%  gen {}  {} {}  x{:.2}  social {}  H{:.0} J{:.0} C{:.0}{}",
            i + 1,
            rarity_label(preview.rarity),
            preview.rarity_score,
            preview.generation,
            t.personality.name(),
            t.coloring.name(),
            t.earning_potential,
            t.social_score,
            t.satisfaction,
            t.energy,
            t.grooming,
            if preview.mutations.is_empty() {
                String::new()
            } else {
                format!("  ✨ mutation: {:?}", preview.mutations)
            }
        );
    }
}

pub fn print_earnings(projection: &EarningsProjection) {
    println!("{}", "Earnings".cyan().bold());
    println!("Session:        {:.4}", projection.session_earnings);
    if projection.daily_rate > 0.0 {
        println!("Daily rate:     {:.4} / day", projection.daily_rate);
    } else {
        println!("Daily rate:     {}", "sampling...".dimmed());
    }
    println!("Next milestone: {:.4} to go", projection.tokens_until_milestone);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bar() {
        let bar = format_bar(60.0);
        assert!(bar.contains("60%"));
        assert_eq!(bar.matches('█').count(), 12);
        assert!(format_bar(150.0).contains("100%"));
        assert!(format_bar(-5.0).contains("0%"));
    }
}
