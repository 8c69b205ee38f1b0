use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};

use crate::core::error::{PetError, Result};

/// Pet temperament, fixed at generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Personality {
    Friendly,
    Energetic,
    Lazy,
    Stubborn,
}

impl Personality {
    /// Hash byte order. Indices must stay stable for existing pets.
    pub const ALL: [Personality; 4] = [
        Personality::Friendly,
        Personality::Energetic,
        Personality::Lazy,
        Personality::Stubborn,
    ];

    /// Unknown names fall back to `Friendly`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "energetic" => Personality::Energetic,
            "lazy" => Personality::Lazy,
            "stubborn" => Personality::Stubborn,
            _ => Personality::Friendly,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Personality::Friendly => "Friendly",
            Personality::Energetic => "Energetic",
            Personality::Lazy => "Lazy",
            Personality::Stubborn => "Stubborn",
        }
    }

    pub fn emoji(&self) -> &str {
        match self {
            Personality::Friendly => "😊",
            Personality::Energetic => "⚡",
            Personality::Lazy => "😴",
            Personality::Stubborn => "😤",
        }
    }
}

/// Body color, fixed at generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coloring {
    Pink,
    Blue,
    Purple,
    Yellow,
    Orange,
    Green,
}

impl Coloring {
    pub const ALL: [Coloring; 6] = [
        Coloring::Pink,
        Coloring::Blue,
        Coloring::Purple,
        Coloring::Yellow,
        Coloring::Orange,
        Coloring::Green,
    ];

    /// Unknown names fall back to `Pink`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "blue" => Coloring::Blue,
            "purple" => Coloring::Purple,
            "yellow" => Coloring::Yellow,
            "orange" => Coloring::Orange,
            "green" => Coloring::Green,
            _ => Coloring::Pink,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Coloring::Pink => "Pink",
            Coloring::Blue => "Blue",
            Coloring::Purple => "Purple",
            Coloring::Yellow => "Yellow",
            Coloring::Orange => "Orange",
            Coloring::Green => "Green",
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            Coloring::Pink => "#f9a8d4",
            Coloring::Blue => "#93c5fd",
            Coloring::Purple => "#c4b5fd",
            Coloring::Yellow => "#fde68a",
            Coloring::Orange => "#fdba74",
            Coloring::Green => "#86efac",
        }
    }
}

/// The full trait set of one pet.
///
/// `personality`, `coloring`, `earning_potential` and `social_score` never
/// change after generation. The three care stats are recomputed from the
/// generated base on every read, see [`crate::core::care`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Traits {
    pub personality: Personality,
    pub coloring: Coloring,
    /// Mining yield multiplier in [0.95, 1.05]
    pub earning_potential: f64,
    /// 0-100
    pub social_score: u8,
    /// Cleanliness, 0-100
    pub grooming: f64,
    /// Happiness, 0-100
    pub energy: f64,
    /// Health, 0-100
    pub satisfaction: f64,
}

pub const STAT_MIN: f64 = 0.0;
pub const STAT_MAX: f64 = 100.0;
pub const EARNING_POTENTIAL_MIN: f64 = 0.95;
pub const EARNING_POTENTIAL_MAX: f64 = 1.05;

pub fn clamp_stat(value: f64) -> f64 {
    if value.is_nan() {
        return STAT_MIN;
    }
    value.clamp(STAT_MIN, STAT_MAX)
}

pub fn clamp_earning_potential(value: f64) -> f64 {
    if value.is_nan() {
        return 1.0;
    }
    value.clamp(EARNING_POTENTIAL_MIN, EARNING_POTENTIAL_MAX)
}

impl Traits {
    /// Re-apply every range invariant.
    pub fn clamped(self) -> Self {
        Traits {
            earning_potential: clamp_earning_potential(self.earning_potential),
            social_score: self.social_score.min(100),
            grooming: clamp_stat(self.grooming),
            energy: clamp_stat(self.energy),
            satisfaction: clamp_stat(self.satisfaction),
            ..self
        }
    }
}

/// Decode an account address (`0x`-prefixed or bare hex) into raw bytes.
pub fn parse_identifier(input: &str) -> Result<Vec<u8>> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.is_empty() {
        return Err(PetError::InvalidIdentifier("empty identifier".to_string()));
    }

    // Odd-length addresses are left-padded so "0xabc" reads as 0x0abc.
    let padded = if digits.len() % 2 == 1 {
        format!("0{}", digits)
    } else {
        digits.to_string()
    };

    hex::decode(&padded).map_err(|e| PetError::InvalidIdentifier(format!("{}: {}", input, e)))
}

/// Empty or all-zero identifiers mean "no pet".
pub fn is_null_identifier(identifier: &[u8]) -> bool {
    identifier.iter().all(|b| *b == 0)
}

/// Derive the trait set for an identifier.
///
/// The Keccak-256 digest of the raw identifier bytes is read one byte per
/// field, in order: personality, coloring, earning potential, social score,
/// grooming, energy, satisfaction. Returns `None` for a null identifier.
pub fn generate(identifier: &[u8]) -> Option<Traits> {
    if is_null_identifier(identifier) {
        return None;
    }

    let digest = Keccak256::digest(identifier);
    let bytes = &digest[..8];

    let personality = Personality::ALL[(bytes[0] % 4) as usize];
    let coloring = Coloring::ALL[(bytes[1] % 6) as usize];
    let earning_potential = 1.0 + ((bytes[2] % 11) as i32 - 5) as f64 / 100.0;
    let social_score = bytes[3] % 101;

    Some(
        Traits {
            personality,
            coloring,
            earning_potential,
            social_score,
            grooming: care_stat_from_byte(bytes[4]),
            energy: care_stat_from_byte(bytes[5]),
            satisfaction: care_stat_from_byte(bytes[6]),
        }
        .clamped(),
    )
}

fn care_stat_from_byte(byte: u8) -> f64 {
    clamp_stat(((byte % 51) as i32 - 25 + 50) as f64)
}
