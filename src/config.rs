use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::core::care::DecayConfig;
use crate::core::earnings::EarningsConfig;
use crate::core::error::PetError;
use crate::core::genetics::{GeneticsConfig, MAX_EARNING_JITTER, MAX_STAT_JITTER};

const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip)]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub decay: DecayConfig,
    #[serde(default)]
    pub genetics: GeneticsConfig,
    #[serde(default)]
    pub earnings: EarningsConfig,
    #[serde(default = "default_breeding_cooldown")]
    pub breeding_cooldown_secs: u64,
}

fn default_breeding_cooldown() -> u64 {
    24 * 60 * 60
}

impl Config {
    pub fn default_data_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("minerpet")
    }

    /// Load `config.json` from `data_dir` (or the platform config directory),
    /// writing the defaults there on first run.
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.unwrap_or_else(Self::default_data_dir);

        std::fs::create_dir_all(&data_dir)
            .context("Failed to create data directory")?;

        let config_path = data_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config_str = std::fs::read_to_string(&config_path)
                .context("Failed to read config.json")?;

            if config_str.trim().is_empty() {
                warn!("Config file {} is empty, using defaults", config_path.display());
            } else {
                match serde_json::from_str::<Config>(&config_str) {
                    Ok(mut config) => {
                        config.data_dir = data_dir;
                        config.validate()?;
                        debug!("Loaded config from {}", config_path.display());
                        return Ok(config);
                    }
                    Err(e) => {
                        warn!("Failed to parse {}: {}, using defaults", config_path.display(), e);
                    }
                }
            }
            return Ok(Self::default_config(data_dir));
        }

        let config = Self::default_config(data_dir);
        config.save()?;
        debug!("Wrote default config to {}", config_path.display());
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let json_str = serde_json::to_string_pretty(self)
            .context("Failed to serialize config")?;
        std::fs::write(self.config_path(), json_str)
            .context("Failed to write config.json")?;
        Ok(())
    }

    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE)
    }

    pub fn default_config(data_dir: PathBuf) -> Self {
        Config {
            data_dir,
            decay: DecayConfig::default(),
            genetics: GeneticsConfig::default(),
            earnings: EarningsConfig::default(),
            breeding_cooldown_secs: default_breeding_cooldown(),
        }
    }

    /// Reject tunables that would divide by zero or leave their ranges.
    pub fn validate(&self) -> std::result::Result<(), PetError> {
        if self.decay.period_secs == 0 {
            return Err(PetError::Config("decay.period_secs must be positive".to_string()));
        }
        for (name, rate) in [
            ("decay.satisfaction_rate", self.decay.satisfaction_rate),
            ("decay.energy_rate", self.decay.energy_rate),
            ("decay.grooming_rate", self.decay.grooming_rate),
        ] {
            if !rate.is_finite() || rate < 0.0 {
                return Err(PetError::Config(format!("{} must be a non-negative number", name)));
            }
        }

        let mutation_rate = self.genetics.mutation_rate;
        if !(0.0..=1.0).contains(&mutation_rate) {
            return Err(PetError::Config(format!(
                "genetics.mutation_rate must be within [0, 1], got {}",
                mutation_rate
            )));
        }
        for (name, jitter, max) in [
            ("genetics.stat_jitter", self.genetics.stat_jitter, MAX_STAT_JITTER),
            ("genetics.earning_jitter", self.genetics.earning_jitter, MAX_EARNING_JITTER),
        ] {
            if !(0.0..=max).contains(&jitter) {
                return Err(PetError::Config(format!(
                    "{} must be within [0, {}], got {}",
                    name, max, jitter
                )));
            }
        }

        let granularity = self.earnings.milestone_granularity;
        if !granularity.is_finite() || granularity <= 0.0 {
            return Err(PetError::Config(
                "earnings.milestone_granularity must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Like [`Config::new`], but an unusable config only costs a warning.
pub fn load_or_default(data_dir: Option<&Path>) -> Config {
    match Config::new(data_dir.map(Path::to_path_buf)) {
        Ok(config) => config,
        Err(e) => {
            warn!("Falling back to built-in defaults: {:#}", e);
            let data_dir = data_dir
                .map(Path::to_path_buf)
                .unwrap_or_else(Config::default_data_dir);
            Config::default_config(data_dir)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::genetics::BreedingFormula;

    #[test]
    fn test_first_run_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(Some(dir.path().to_path_buf())).unwrap();

        assert!(dir.path().join(CONFIG_FILE).exists());
        assert_eq!(config.decay, DecayConfig::default());
        assert_eq!(config.breeding_cooldown_secs, 86_400);
        assert_eq!(config.genetics.breeding_formula, BreedingFormula::Symmetric);
    }

    #[test]
    fn test_round_trip_keeps_changes() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::new(Some(dir.path().to_path_buf())).unwrap();
        config.genetics.mutation_rate = 0.25;
        config.genetics.breeding_formula = BreedingFormula::Legacy;
        config.save().unwrap();

        let reloaded = Config::new(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{ "breeding_cooldown_secs": 60 }"#,
        )
        .unwrap();

        let config = Config::new(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(config.breeding_cooldown_secs, 60);
        assert_eq!(config.earnings, EarningsConfig::default());
    }

    #[test]
    fn test_garbage_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "not json").unwrap();
        let config = Config::new(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(config.genetics, GeneticsConfig::default());
    }

    #[test]
    fn test_zero_period_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default_config(dir.path().to_path_buf());
        config.decay.period_secs = 0;
        assert!(matches!(config.validate(), Err(PetError::Config(_))));

        config.save().unwrap();
        assert!(Config::new(Some(dir.path().to_path_buf())).is_err());

        let fallback = load_or_default(Some(dir.path()));
        assert_eq!(fallback.decay, DecayConfig::default());
        assert_eq!(fallback.data_dir, dir.path());
    }

    #[test]
    fn test_bad_mutation_rate_is_rejected() {
        let mut config = Config::default_config(PathBuf::new());
        config.genetics.mutation_rate = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oversized_jitter_is_rejected() {
        let mut config = Config::default_config(PathBuf::new());
        config.genetics.stat_jitter = 1e308;
        assert!(matches!(config.validate(), Err(PetError::Config(_))));

        let mut config = Config::default_config(PathBuf::new());
        config.genetics.earning_jitter = 0.5;
        assert!(config.validate().is_err());

        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{ "genetics": { "stat_jitter": 1e308 } }"#,
        )
        .unwrap();
        assert!(Config::new(Some(dir.path().to_path_buf())).is_err());
        let fallback = load_or_default(Some(dir.path()));
        assert_eq!(fallback.genetics.stat_jitter, GeneticsConfig::default().stat_jitter);
    }
}
