//! Prelude module for convenient imports
//!
//! ```rust
//! use alchemy_core::prelude::*;
//! ```

// Data model
pub use crate::effect::{Effect, EffectCatalog, EffectInstance};
pub use crate::ingredient::{Dlc, EffectSpec, Ingredient, IngredientRecord};

// Mixing
pub use crate::combination::{combination_key, find_possible_combinations, Combinations};

// Valuation
pub use crate::potion::{create_potion_builder, BrewSettings, Potion, PotionBuilder};

// Config and errors
pub use crate::config::ValuationConstants;
pub use crate::AlchemyError;
