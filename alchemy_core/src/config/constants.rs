//! Valuation constants - the numbers behind the power factor and gold curve

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::ConfigError;

/// Tunable valuation constants
///
/// Defaults reproduce the in-game alchemy formulas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationConstants {
    /// Power factor before any skill or perk scaling
    #[serde(default = "default_base_power")]
    pub base_power: f64,
    /// Fraction of alchemy skill that feeds the power factor
    #[serde(default = "default_skill_factor")]
    pub skill_factor: f64,
    /// Percentage granted by the Physician, Benefactor and Poisoner perks
    #[serde(default = "default_perk_bonus")]
    pub perk_bonus: f64,
    /// Alchemist perk bonus percentage indexed by perk rank (0-5)
    #[serde(default = "default_alchemist_steps")]
    pub alchemist_steps: Vec<f64>,
    /// Exponent of the gold curve
    #[serde(default = "default_gold_exponent")]
    pub gold_exponent: f64,
    /// Duration is divided by this before entering the gold curve
    #[serde(default = "default_duration_divisor")]
    pub duration_divisor: f64,
    /// Effects boosted by the Physician perk
    #[serde(default = "default_physician_effects")]
    pub physician_effects: Vec<String>,
}

impl Default for ValuationConstants {
    fn default() -> Self {
        ValuationConstants {
            base_power: default_base_power(),
            skill_factor: default_skill_factor(),
            perk_bonus: default_perk_bonus(),
            alchemist_steps: default_alchemist_steps(),
            gold_exponent: default_gold_exponent(),
            duration_divisor: default_duration_divisor(),
            physician_effects: default_physician_effects(),
        }
    }
}

impl ValuationConstants {
    /// Load constants from a TOML file
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let constants: ValuationConstants = super::load_toml(path)?;
        constants.validate()?;
        Ok(constants)
    }

    /// Check the constants can produce a sane power factor and gold curve
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_power.is_finite() && self.base_power > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "base_power must be positive, got {}",
                self.base_power
            )));
        }
        if !(self.duration_divisor.is_finite() && self.duration_divisor > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "duration_divisor must be positive, got {}",
                self.duration_divisor
            )));
        }
        if self.alchemist_steps.iter().any(|step| !step.is_finite()) {
            return Err(ConfigError::ValidationError(
                "alchemist_steps must be finite".to_string(),
            ));
        }
        Ok(())
    }

    /// Bonus percentage for an Alchemist perk rank
    ///
    /// Ranks that are not a whole number within the step table grant nothing.
    pub fn alchemist_bonus(&self, perk_level: f64) -> f64 {
        if perk_level < 0.0 || perk_level.fract() != 0.0 {
            return 0.0;
        }
        self.alchemist_steps
            .get(perk_level as usize)
            .copied()
            .unwrap_or(0.0)
    }

    pub fn is_physician_effect(&self, effect_name: &str) -> bool {
        self.physician_effects.iter().any(|name| name == effect_name)
    }
}

fn default_base_power() -> f64 {
    4.0
}
fn default_skill_factor() -> f64 {
    0.5
}
fn default_perk_bonus() -> f64 {
    25.0
}
fn default_alchemist_steps() -> Vec<f64> {
    vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]
}
fn default_gold_exponent() -> f64 {
    1.1
}
fn default_duration_divisor() -> f64 {
    10.0
}
fn default_physician_effects() -> Vec<String> {
    vec![
        "Restore Health".to_string(),
        "Restore Stamina".to_string(),
        "Restore Magicka".to_string(),
    ]
}
