//! Configuration loading - effect catalog and valuation constants

mod constants;
mod effects;

pub use constants::ValuationConstants;
pub use effects::{load_effect_catalog, parse_effect_catalog, EffectsConfig, BUNDLED_EFFECTS};

use serde::de::DeserializeOwned;
use std::path::Path;
use thiserror::Error;

/// Error loading alchemy configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Read and deserialize a TOML file
pub fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_toml(&content)
}

/// Deserialize a TOML string
pub fn parse_toml<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    Ok(toml::from_str(content)?)
}
