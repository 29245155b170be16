//! alchemy_core - Ingredient mixing and potion valuation
//!
//! This library provides:
//! - EffectCatalog: The static table of magical effects
//! - Ingredient: A named bundle of up to four effect instances
//! - Combination engine: Which effects survive when 2 or 3 ingredients are mixed
//! - PotionBuilder: Turns a surviving effect list into a named, priced Potion
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use alchemy_core::prelude::*;
//!
//! let catalog = EffectCatalog::bundled()?;
//! let flower = Ingredient::from_record(&flower_record, &catalog)?;
//! let wheat = Ingredient::from_record(&wheat_record, &catalog)?;
//!
//! let combinations = find_possible_combinations(&[flower, wheat])?;
//! let builder = PotionBuilder::new(BrewSettings::new(15.0));
//! for (key, effects) in &combinations {
//!     let potion = builder.brew(effects);
//!     println!("{}: {}", key, potion);
//! }
//! ```

pub mod combination;
pub mod config;
pub mod effect;
pub mod ingredient;
pub mod potion;
pub mod prelude;

// Core API - what most users need
pub use combination::{combination_key, find_possible_combinations, Combinations};
pub use effect::{Effect, EffectCatalog, EffectInstance};
pub use ingredient::{Dlc, EffectSpec, Ingredient, IngredientRecord, MAX_EFFECTS};
pub use potion::{create_potion_builder, BrewSettings, EffectValue, Potion, PotionBuilder};

// Configuration
pub use config::{ConfigError, ValuationConstants};

use thiserror::Error;

/// Error raised by the mixing engine
#[derive(Debug, Error, PartialEq)]
pub enum AlchemyError {
    #[error("Invalid ingredient '{ingredient}': {message}")]
    Validation { ingredient: String, message: String },
    #[error("Unknown effect: {0}")]
    UnknownEffect(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
