//! Ingredients and the pairwise/three-way mixing rules

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::effect::{EffectCatalog, EffectInstance};
use crate::AlchemyError;

/// Maximum number of effects an ingredient can carry
pub const MAX_EFFECTS: usize = 4;

/// Source content an ingredient ships with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Dlc {
    #[default]
    Vanilla,
    Dawnguard,
    Dragonborn,
    Hearthfire,
}

impl Dlc {
    /// Get all DLC variants
    pub fn all() -> &'static [Dlc] {
        &[Dlc::Vanilla, Dlc::Dawnguard, Dlc::Dragonborn, Dlc::Hearthfire]
    }
}

impl fmt::Display for Dlc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dlc::Vanilla => write!(f, "Vanilla"),
            Dlc::Dawnguard => write!(f, "Dawnguard"),
            Dlc::Dragonborn => write!(f, "Dragonborn"),
            Dlc::Hearthfire => write!(f, "Hearthfire"),
        }
    }
}

/// Plain record an ingredient is built from (as stored in data files)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientRecord {
    pub name: String,
    pub gold_value: f64,
    pub weight: f64,
    #[serde(default)]
    pub dlc: Dlc,
    pub effects: Vec<EffectSpec>,
}

/// Reference to a catalog effect plus this ingredient's multipliers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectSpec {
    pub name: String,
    #[serde(default = "default_multiplier")]
    pub cost_multiplier: f64,
    #[serde(default = "default_multiplier")]
    pub magnitude_multiplier: f64,
    #[serde(default = "default_multiplier")]
    pub duration_multiplier: f64,
}

fn default_multiplier() -> f64 {
    1.0
}

impl EffectSpec {
    /// Spec with all multipliers at 1
    pub fn new(name: impl Into<String>) -> Self {
        EffectSpec {
            name: name.into(),
            cost_multiplier: 1.0,
            magnitude_multiplier: 1.0,
            duration_multiplier: 1.0,
        }
    }

    pub fn with_magnitude(mut self, multiplier: f64) -> Self {
        self.magnitude_multiplier = multiplier;
        self
    }

    pub fn with_cost(mut self, multiplier: f64) -> Self {
        self.cost_multiplier = multiplier;
        self
    }

    pub fn with_duration(mut self, multiplier: f64) -> Self {
        self.duration_multiplier = multiplier;
        self
    }
}

/// An immutable, validated ingredient
#[derive(Debug, Clone, PartialEq)]
pub struct Ingredient {
    name: String,
    gold_value: f64,
    weight: f64,
    dlc: Dlc,
    effects: Vec<EffectInstance>,
}

impl Ingredient {
    /// Build an ingredient from already-resolved effect instances
    pub fn new(
        name: impl Into<String>,
        gold_value: f64,
        weight: f64,
        dlc: Dlc,
        effects: Vec<EffectInstance>,
    ) -> Result<Self, AlchemyError> {
        let name = name.into();
        let invalid = |message: String| AlchemyError::Validation {
            ingredient: name.clone(),
            message,
        };

        if name.trim().is_empty() {
            return Err(invalid("name is required".to_string()));
        }
        if effects.is_empty() {
            return Err(invalid("at least one effect is required".to_string()));
        }
        if effects.len() > MAX_EFFECTS {
            return Err(invalid(format!(
                "has {} effects, at most {} allowed",
                effects.len(),
                MAX_EFFECTS
            )));
        }

        for (i, effect) in effects.iter().enumerate() {
            for (label, value) in [
                ("cost", effect.cost_multiplier),
                ("magnitude", effect.magnitude_multiplier),
                ("duration", effect.duration_multiplier),
            ] {
                if !value.is_finite() || value <= 0.0 {
                    return Err(invalid(format!(
                        "{} multiplier of '{}' must be positive, got {}",
                        label,
                        effect.name(),
                        value
                    )));
                }
            }
            if effects[..i].iter().any(|e| e.name() == effect.name()) {
                return Err(invalid(format!("effect '{}' listed twice", effect.name())));
            }
        }

        Ok(Ingredient {
            name,
            gold_value,
            weight,
            dlc,
            effects,
        })
    }

    /// Build an ingredient from a plain record, resolving effects against the catalog
    pub fn from_record(record: &IngredientRecord, catalog: &EffectCatalog) -> Result<Self, AlchemyError> {
        let effects = record
            .effects
            .iter()
            .map(|spec| {
                catalog.require(&spec.name).map(|effect| {
                    EffectInstance::with_multipliers(
                        effect,
                        spec.cost_multiplier,
                        spec.magnitude_multiplier,
                        spec.duration_multiplier,
                    )
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(
            record.name.clone(),
            record.gold_value,
            record.weight,
            record.dlc,
            effects,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gold_value(&self) -> f64 {
        self.gold_value
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn dlc(&self) -> Dlc {
        self.dlc
    }

    pub fn effects(&self) -> &[EffectInstance] {
        &self.effects
    }

    pub fn first_effect(&self) -> Option<&EffectInstance> {
        self.effects.first()
    }

    pub fn second_effect(&self) -> Option<&EffectInstance> {
        self.effects.get(1)
    }

    pub fn third_effect(&self) -> Option<&EffectInstance> {
        self.effects.get(2)
    }

    pub fn fourth_effect(&self) -> Option<&EffectInstance> {
        self.effects.get(3)
    }

    /// Effect names in insertion order
    pub fn effect_names(&self) -> impl Iterator<Item = &str> {
        self.effects.iter().map(|e| e.name())
    }

    /// Get this ingredient's instance of an effect by name
    pub fn effect(&self, effect_name: &str) -> Option<&EffectInstance> {
        self.effects.iter().find(|e| e.name() == effect_name)
    }

    pub fn has_effect(&self, effect_name: &str) -> bool {
        self.effect(effect_name).is_some()
    }

    /// Effects shared with `other`, each resolved to the stronger instance
    ///
    /// This ingredient's instance is kept only when its magnitude is strictly
    /// greater; on a tie `other`'s instance wins. Order follows `self`.
    pub fn mix_two(&self, other: &Ingredient) -> Vec<EffectInstance> {
        let mixed: Vec<EffectInstance> = self
            .effects
            .iter()
            .filter_map(|mine| {
                other.effect(mine.name()).map(|theirs| {
                    if mine.calculated_magnitude() > theirs.calculated_magnitude() {
                        mine.clone()
                    } else {
                        theirs.clone()
                    }
                })
            })
            .collect();

        tracing::trace!(
            first = %self.name,
            second = %other.name,
            shared = mixed.len(),
            "mixed two ingredients"
        );
        mixed
    }

    /// Effects surviving a three-ingredient mix
    ///
    /// The three pairwise mixes are concatenated and collapsed by effect name,
    /// keeping the strictly strongest instance (first seen wins ties).
    pub fn mix_three(&self, second: &Ingredient, third: &Ingredient) -> Vec<EffectInstance> {
        let pairwise = self
            .mix_two(second)
            .into_iter()
            .chain(self.mix_two(third))
            .chain(second.mix_two(third));

        let mut collapsed: Vec<EffectInstance> = Vec::new();
        for candidate in pairwise {
            match collapsed.iter_mut().find(|e| e.name() == candidate.name()) {
                Some(existing) => {
                    if candidate.calculated_magnitude() > existing.calculated_magnitude() {
                        *existing = candidate;
                    }
                }
                None => collapsed.push(candidate),
            }
        }

        tracing::trace!(
            first = %self.name,
            second = %second.name,
            third = %third.name,
            shared = collapsed.len(),
            "mixed three ingredients"
        );
        collapsed
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.effect_names().collect();
        write!(f, "{} [{}]", self.name, names.join(", "))
    }
}
