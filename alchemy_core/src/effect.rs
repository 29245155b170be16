//! Effects - the catalog entries and their per-ingredient instances

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::AlchemyError;

/// A named magical effect from the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    /// Unique identifier, e.g. "Restore Health"
    pub name: String,
    /// Template text; `<mag>` and `<dur>` are replaced when a potion is valued
    pub description: String,
    pub base_cost: f64,
    pub base_magnitude: f64,
    pub base_duration: f64,
    /// Magnitude scales with the power factor
    #[serde(default)]
    pub variable_magnitude: bool,
    /// Duration scales with the power factor
    #[serde(default)]
    pub variable_duration: bool,
    /// A dominant harmful effect turns the potion into a poison
    #[serde(default)]
    pub harmful: bool,
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// An effect as it appears on one ingredient, scaled by that ingredient's multipliers
#[derive(Debug, Clone, PartialEq)]
pub struct EffectInstance {
    effect: Arc<Effect>,
    pub cost_multiplier: f64,
    pub magnitude_multiplier: f64,
    pub duration_multiplier: f64,
}

impl EffectInstance {
    /// Wrap a catalog effect with unmodified multipliers
    pub fn new(effect: Arc<Effect>) -> Self {
        EffectInstance {
            effect,
            cost_multiplier: 1.0,
            magnitude_multiplier: 1.0,
            duration_multiplier: 1.0,
        }
    }

    /// Wrap a catalog effect with explicit multipliers
    pub fn with_multipliers(effect: Arc<Effect>, cost: f64, magnitude: f64, duration: f64) -> Self {
        EffectInstance {
            effect,
            cost_multiplier: cost,
            magnitude_multiplier: magnitude,
            duration_multiplier: duration,
        }
    }

    pub fn effect(&self) -> &Effect {
        &self.effect
    }

    pub fn name(&self) -> &str {
        &self.effect.name
    }

    pub fn description(&self) -> &str {
        &self.effect.description
    }

    pub fn base_cost(&self) -> f64 {
        self.effect.base_cost
    }

    pub fn variable_magnitude(&self) -> bool {
        self.effect.variable_magnitude
    }

    pub fn variable_duration(&self) -> bool {
        self.effect.variable_duration
    }

    pub fn harmful(&self) -> bool {
        self.effect.harmful
    }

    pub fn calculated_magnitude(&self) -> f64 {
        self.effect.base_magnitude * self.magnitude_multiplier
    }

    pub fn calculated_cost(&self) -> f64 {
        self.effect.base_cost * self.cost_multiplier
    }

    pub fn calculated_duration(&self) -> f64 {
        self.effect.base_duration * self.duration_multiplier
    }
}

impl fmt::Display for EffectInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.calculated_magnitude())
    }
}

/// Read-only table of effects, keyed by name
#[derive(Debug, Clone, Default)]
pub struct EffectCatalog {
    effects: BTreeMap<String, Arc<Effect>>,
}

impl EffectCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an effect, replacing any previous entry with the same name
    pub fn register(&mut self, effect: Effect) {
        self.effects.insert(effect.name.clone(), Arc::new(effect));
    }

    /// Get an effect by name
    pub fn get(&self, name: &str) -> Option<&Arc<Effect>> {
        self.effects.get(name)
    }

    /// Get an effect by name, failing if it is not catalogued
    pub fn require(&self, name: &str) -> Result<Arc<Effect>, AlchemyError> {
        self.get(name)
            .cloned()
            .ok_or_else(|| AlchemyError::UnknownEffect(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.effects.contains_key(name)
    }

    /// Effect names in ascending order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.effects.keys().map(|s| s.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.effects.values().map(|e| e.as_ref())
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
