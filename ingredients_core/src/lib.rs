mod config;
mod query;
mod registry;

pub use config::{IngredientFileConfig, BUNDLED_INGREDIENTS};
pub use query::{to_title_case, SortOrder};
pub use registry::IngredientRegistry;

use std::path::PathBuf;
use thiserror::Error;

/// Error loading ingredient data
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading '{path:?}': {error}")]
    Io {
        error: std::io::Error,
        path: Option<PathBuf>,
    },
    #[error("Parse error in '{path}': {error}")]
    Parse {
        error: toml::de::Error,
        path: PathBuf,
    },
    #[error("Validation error in '{path}': {message}")]
    Validation { message: String, path: PathBuf },
}

/// Error looking up an ingredient
#[derive(Debug, Error, PartialEq)]
pub enum QueryError {
    #[error("Unknown ingredient: {0}")]
    UnknownIngredient(String),
}
