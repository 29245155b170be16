//! Potion valuation - turning a surviving effect list into a named, priced potion

mod power;
mod valuation;

pub use power::{power_factor, EffectPerkBonus};
pub use valuation::{calculate_effect_value, EffectValue};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::ValuationConstants;
use crate::effect::EffectInstance;

/// Name given to a brew with no surviving effects
pub const FAILED_POTION_NAME: &str = "Potion Failed";

/// Character build parameters for one valuation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BrewSettings {
    /// Alchemy skill level, typically 0-100
    #[serde(default)]
    pub skill: f64,
    /// Alchemist perk rank, 0-5
    #[serde(default)]
    pub alchemist_perk_level: f64,
    #[serde(default)]
    pub physician: bool,
    #[serde(default)]
    pub benefactor: bool,
    #[serde(default)]
    pub poisoner: bool,
    /// Fortify Alchemy percentage from gear
    #[serde(default)]
    pub fortify_alchemy: f64,
}

impl BrewSettings {
    /// Settings with the given skill and no perks
    pub fn new(skill: f64) -> Self {
        BrewSettings {
            skill,
            ..Default::default()
        }
    }

    pub fn with_alchemist_perk(mut self, level: f64) -> Self {
        self.alchemist_perk_level = level;
        self
    }

    pub fn with_physician(mut self, enabled: bool) -> Self {
        self.physician = enabled;
        self
    }

    pub fn with_benefactor(mut self, enabled: bool) -> Self {
        self.benefactor = enabled;
        self
    }

    pub fn with_poisoner(mut self, enabled: bool) -> Self {
        self.poisoner = enabled;
        self
    }

    pub fn with_fortify_alchemy(mut self, percent: f64) -> Self {
        self.fortify_alchemy = percent;
        self
    }
}

/// Result of valuing one effect list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Potion {
    /// "Potion of X", "Poison of X" or "Potion Failed"
    pub name: String,
    pub did_succeed: bool,
    /// Rendered effect descriptions, comma separated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effects: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gold: Option<u64>,
}

impl Potion {
    /// The result of brewing with nothing in common
    pub fn failed() -> Self {
        Potion {
            name: FAILED_POTION_NAME.to_string(),
            did_succeed: false,
            effects: None,
            gold: None,
        }
    }

    pub fn is_poison(&self) -> bool {
        self.name.starts_with("Poison of ")
    }
}

impl fmt::Display for Potion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(gold) = self.gold {
            write!(f, " ({} gold)", gold)?;
        }
        if let Some(ref effects) = self.effects {
            write!(f, ": {}", effects)?;
        }
        Ok(())
    }
}

/// Values effect lists for one character build
///
/// Built once per request; `brew` can then be applied to every candidate
/// combination. Holds no mutable state.
#[derive(Debug, Clone)]
pub struct PotionBuilder {
    settings: BrewSettings,
    constants: ValuationConstants,
    alchemist_bonus: f64,
}

impl PotionBuilder {
    /// Create a builder using the default valuation constants
    pub fn new(settings: BrewSettings) -> Self {
        Self::with_constants(settings, ValuationConstants::default())
    }

    /// Create a builder with explicit valuation constants
    pub fn with_constants(settings: BrewSettings, constants: ValuationConstants) -> Self {
        let alchemist_bonus = constants.alchemist_bonus(settings.alchemist_perk_level);
        PotionBuilder {
            settings,
            constants,
            alchemist_bonus,
        }
    }

    pub fn settings(&self) -> &BrewSettings {
        &self.settings
    }

    /// The effect with the strictly highest calculated cost (first wins ties)
    pub fn dominant_effect(effects: &[EffectInstance]) -> Option<&EffectInstance> {
        let (first, rest) = effects.split_first()?;
        let mut strongest = first;
        for effect in rest {
            if effect.calculated_cost() > strongest.calculated_cost() {
                strongest = effect;
            }
        }
        Some(strongest)
    }

    /// Per-effect numbers, or None if there is nothing to brew
    pub fn value_effects(&self, effects: &[EffectInstance]) -> Option<(bool, Vec<EffectValue>)> {
        let is_poison = Self::dominant_effect(effects)?.harmful();
        Some((is_poison, self.value_each(effects, is_poison)))
    }

    fn value_each(&self, effects: &[EffectInstance], is_poison: bool) -> Vec<EffectValue> {
        effects
            .iter()
            .map(|effect| {
                let bonus = EffectPerkBonus::for_effect(&self.settings, &self.constants, effect, is_poison);
                let power = power_factor(&self.settings, &self.constants, self.alchemist_bonus, bonus);
                calculate_effect_value(effect, power, &self.constants)
            })
            .collect()
    }

    /// Brew a potion from a surviving effect list
    pub fn brew(&self, effects: &[EffectInstance]) -> Potion {
        let Some(dominant) = Self::dominant_effect(effects) else {
            tracing::debug!("no surviving effects, brew failed");
            return Potion::failed();
        };
        let is_poison = dominant.harmful();
        let name = if is_poison {
            format!("Poison of {}", dominant.name())
        } else {
            format!("Potion of {}", dominant.name())
        };

        let values = self.value_each(effects, is_poison);

        let gold: u64 = values.iter().map(|v| v.value).sum();
        let descriptions: Vec<String> = values.iter().map(|v| v.rendered_description()).collect();

        tracing::debug!(potion = %name, gold, effects = values.len(), "brewed potion");

        Potion {
            name,
            did_succeed: true,
            effects: Some(descriptions.join(", ")),
            gold: Some(gold),
        }
    }
}

/// Create a valuation function for one character build
pub fn create_potion_builder(
    skill: f64,
    alchemist_perk_level: f64,
    has_physician: bool,
    has_benefactor: bool,
    has_poisoner: bool,
    fortify_alchemy: f64,
) -> impl Fn(&[EffectInstance]) -> Potion {
    let builder = PotionBuilder::new(BrewSettings {
        skill,
        alchemist_perk_level,
        physician: has_physician,
        benefactor: has_benefactor,
        poisoner: has_poisoner,
        fortify_alchemy,
    });
    move |effects| builder.brew(effects)
}
