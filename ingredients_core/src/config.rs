use alchemy_core::IngredientRecord;
use serde::Deserialize;

/// Ingredient data shipped with the crate, one file per DLC
pub const BUNDLED_INGREDIENTS: &[(&str, &str)] = &[
    ("vanilla.toml", include_str!("../data/vanilla.toml")),
    ("dawnguard.toml", include_str!("../data/dawnguard.toml")),
    ("dragonborn.toml", include_str!("../data/dragonborn.toml")),
    ("hearthfire.toml", include_str!("../data/hearthfire.toml")),
];

/// TOML configuration for an ingredient file
#[derive(Debug, Deserialize)]
pub struct IngredientFileConfig {
    #[serde(default)]
    pub ingredients: Vec<IngredientRecord>,
}
