use serde::{Deserialize, Serialize};

const SECONDS_PER_DAY: f64 = 86_400.0;
/// Below this many seconds of sampling the daily rate is too noisy to show.
pub const MIN_SAMPLE_SECS: f64 = 60.0;

pub const RETIREMENT_AGE_DAYS: u32 = 90;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EarningsConfig {
    /// Smallest purchasable unit, in display tokens
    pub milestone_granularity: f64,
    /// Decimals of the on-chain token
    pub token_decimals: u8,
}

impl Default for EarningsConfig {
    fn default() -> Self {
        EarningsConfig {
            milestone_granularity: 10.0,
            token_decimals: 18,
        }
    }
}

/// Convert an integer on-chain amount into display units.
pub fn from_base_units(raw: u128, decimals: u8) -> f64 {
    raw as f64 / 10f64.powi(decimals as i32)
}

pub fn session_earnings(initial: f64, current: f64) -> f64 {
    (current - initial).max(0.0)
}

pub fn daily_rate(rate_per_second: f64, elapsed_seconds: f64) -> f64 {
    if elapsed_seconds < MIN_SAMPLE_SECS {
        return 0.0;
    }
    rate_per_second * SECONDS_PER_DAY
}

/// Whole tokens still needed to reach the next multiple of `granularity`
/// above the floored earnings. A non-positive granularity has no milestones.
pub fn tokens_until_milestone(current_earnings: f64, granularity: f64) -> f64 {
    if !(granularity > 0.0) || !current_earnings.is_finite() {
        return 0.0;
    }
    let floored = current_earnings.max(0.0).floor();
    let next = ((floored / granularity).floor() + 1.0) * granularity;
    next - floored
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RetirementTier {
    Cherished,
    Honored,
    Legendary,
}

impl RetirementTier {
    pub fn name(&self) -> &str {
        match self {
            RetirementTier::Cherished => "CHERISHED",
            RetirementTier::Honored => "HONORED",
            RetirementTier::Legendary => "LEGENDARY",
        }
    }
}

pub fn retirement_tier(age_in_days: u32) -> Option<RetirementTier> {
    match age_in_days {
        a if a >= 120 => Some(RetirementTier::Legendary),
        a if a >= 100 => Some(RetirementTier::Honored),
        a if a >= RETIREMENT_AGE_DAYS => Some(RetirementTier::Cherished),
        _ => None,
    }
}

pub fn retirement_eligible(age_in_days: u32) -> bool {
    age_in_days >= RETIREMENT_AGE_DAYS
}

/// Everything the earnings panel shows for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsProjection {
    pub session_earnings: f64,
    pub daily_rate: f64,
    pub tokens_until_milestone: f64,
}

impl EarningsProjection {
    pub fn compute(
        initial: f64,
        current: f64,
        rate_per_second: f64,
        elapsed_seconds: f64,
        config: &EarningsConfig,
    ) -> Self {
        let session = session_earnings(initial, current);
        EarningsProjection {
            session_earnings: session,
            daily_rate: daily_rate(rate_per_second, elapsed_seconds),
            tokens_until_milestone: tokens_until_milestone(session, config.milestone_granularity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_session_earnings_never_negative() {
        assert_eq!(session_earnings(10.0, 15.5), 5.5);
        assert_eq!(session_earnings(10.0, 4.0), 0.0);
    }

    #[test]
    fn test_daily_rate_needs_a_minute() {
        assert_eq!(daily_rate(0.5, 59.0), 0.0);
        assert_relative_eq!(daily_rate(0.5, 60.0), 43_200.0);
    }

    #[test]
    fn test_milestone_countdown() {
        assert_relative_eq!(tokens_until_milestone(0.0, 10.0), 10.0);
        assert_relative_eq!(tokens_until_milestone(3.25, 10.0), 7.0);
        assert_relative_eq!(tokens_until_milestone(10.0, 10.0), 10.0);
        assert_relative_eq!(tokens_until_milestone(19.5, 10.0), 1.0);
        assert_relative_eq!(tokens_until_milestone(2.5, 1.0), 1.0);
        assert_eq!(tokens_until_milestone(5.0, 0.0), 0.0);
    }

    #[test]
    fn test_milestone_ignores_fractional_tokens() {
        // Anything between 13 and 14 counts as 13 whole tokens
        for earned in [13.0, 13.01, 13.5, 13.99] {
            assert_relative_eq!(tokens_until_milestone(earned, 10.0), 7.0);
        }
        let config = EarningsConfig::default();
        let projection = EarningsProjection::compute(0.0, 9.75, 0.0, 0.0, &config);
        assert_relative_eq!(projection.tokens_until_milestone, 1.0);
    }

    #[test]
    fn test_base_units() {
        assert_relative_eq!(from_base_units(1_500_000_000_000_000_000, 18), 1.5);
        assert_relative_eq!(from_base_units(250, 2), 2.5);
    }

    #[test]
    fn test_retirement_tiers() {
        assert_eq!(retirement_tier(89), None);
        assert_eq!(retirement_tier(90), Some(RetirementTier::Cherished));
        assert_eq!(retirement_tier(100), Some(RetirementTier::Honored));
        assert_eq!(retirement_tier(120), Some(RetirementTier::Legendary));
        assert!(!retirement_eligible(89));
        assert!(retirement_eligible(90));
    }

    #[test]
    fn test_projection() {
        let config = EarningsConfig::default();
        let projection = EarningsProjection::compute(100.0, 112.0, 0.01, 600.0, &config);
        assert_relative_eq!(projection.session_earnings, 12.0);
        assert_relative_eq!(projection.daily_rate, 864.0);
        assert_relative_eq!(projection.tokens_until_milestone, 8.0);
    }
}
