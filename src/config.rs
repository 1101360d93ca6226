//! Game configuration
//!
//! Combat tuning knobs, loadable from a RON file with hardcoded defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::combat::AttackTier;

/// Errors raised while loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("{field} must not be negative (got {value})")]
    NegativeCost { field: &'static str, value: i32 },
}

/// Tunable combat and flow settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Stamina spent by a light attack
    pub light_attack_cost: i32,
    /// Stamina spent by a medium attack
    pub medium_attack_cost: i32,
    /// Stamina spent by a heavy attack
    pub heavy_attack_cost: i32,
    /// Stamina spent on a flee attempt
    pub flee_cost: i32,
    /// Chance (0-100) that a flee attempt from a regular enemy succeeds
    pub flee_chance_percent: u32,
    /// Default lifetime of buffs and debuffs, in owner turns
    pub status_duration: u32,
    /// Pause between the end of the player's turn and the enemy's answer
    pub enemy_turn_delay_ms: u64,
    /// Fixed RNG seed; entropy when absent
    pub seed: Option<u64>,
    /// Directory with `enemies.ron` / `floors.ron` overrides
    pub data_dir: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            light_attack_cost: 10,
            medium_attack_cost: 15,
            heavy_attack_cost: 25,
            flee_cost: 5,
            flee_chance_percent: 30,
            status_duration: 3,
            enemy_turn_delay_ms: 1000,
            seed: None,
            data_dir: None,
        }
    }
}

impl GameConfig {
    /// Load a configuration from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject stamina costs that would refill the pool instead of draining it
    pub fn validate(&self) -> Result<(), ConfigError> {
        let costs = [
            ("light_attack_cost", self.light_attack_cost),
            ("medium_attack_cost", self.medium_attack_cost),
            ("heavy_attack_cost", self.heavy_attack_cost),
            ("flee_cost", self.flee_cost),
        ];
        match costs.into_iter().find(|(_, value)| *value < 0) {
            Some((field, value)) => Err(ConfigError::NegativeCost { field, value }),
            None => Ok(()),
        }
    }

    /// Load a configuration, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            log::warn!("{}. Using default configuration.", e);
            Self::default()
        })
    }

    /// Same settings with a fixed seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Stamina cost of an attack tier
    pub fn attack_cost(&self, tier: AttackTier) -> i32 {
        match tier {
            AttackTier::Light => self.light_attack_cost,
            AttackTier::Medium => self.medium_attack_cost,
            AttackTier::Heavy => self.heavy_attack_cost,
        }
    }

    pub fn enemy_turn_delay(&self) -> Duration {
        Duration::from_millis(self.enemy_turn_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stamina_table() {
        let config = GameConfig::default();
        assert_eq!(config.attack_cost(AttackTier::Light), 10);
        assert_eq!(config.attack_cost(AttackTier::Medium), 15);
        assert_eq!(config.attack_cost(AttackTier::Heavy), 25);
        assert_eq!(config.flee_cost, 5);
        assert_eq!(config.enemy_turn_delay(), Duration::from_millis(1000));
    }

    #[test]
    fn test_partial_ron_keeps_defaults() {
        let config: GameConfig = ron::from_str("(heavy_attack_cost: 30, seed: Some(7))").unwrap();
        assert_eq!(config.heavy_attack_cost, 30);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.light_attack_cost, 10);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = GameConfig::load("definitely/not/here.ron").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert_eq!(GameConfig::load_or_default("definitely/not/here.ron"), GameConfig::default());
    }

    #[test]
    fn test_negative_cost_is_rejected() {
        let path = std::env::temp_dir().join(format!("bloodline-config-{}.ron", std::process::id()));
        fs::write(&path, "(flee_cost: -5)").unwrap();
        let err = GameConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::NegativeCost { field: "flee_cost", value: -5 }));
        assert_eq!(GameConfig::load_or_default(&path), GameConfig::default());
        let _ = fs::remove_file(&path);

        assert!(GameConfig::default().validate().is_ok());
    }
}
