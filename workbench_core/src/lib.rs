//! workbench_core - The request/response surface of the alchemy calculator
//!
//! The engine in `alchemy_core` is pure computation. This crate wraps it in
//! the small message protocol a background worker speaks: search, populate,
//! calculate, ready and error.
//!
//! ```rust,ignore
//! use workbench_core::{Request, Workbench, WorkbenchConfig};
//!
//! let workbench = Workbench::from_config(&WorkbenchConfig::default())?;
//! let reply = workbench.handle_json(r#"{"type":"calculate","ingredients":["Wheat","Blue Mountain Flower"],"skill":15}"#);
//! ```

mod config;
mod message;
mod workbench;

pub use config::WorkbenchConfig;
pub use message::{CalculateRequest, CalculationResult, IngredientSummary, Request, Response};
pub use workbench::{encode, Workbench};

use alchemy_core::AlchemyError;
use ingredients_core::QueryError;
use thiserror::Error;

/// Error handling a request
#[derive(Debug, Error)]
pub enum WorkbenchError {
    #[error("At least 2 ingredients are required, got {0}")]
    TooFewIngredients(usize),
    #[error("Expected a number for '{field}', got {found}")]
    InvalidType { field: &'static str, found: String },
    #[error(transparent)]
    Alchemy(#[from] AlchemyError),
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error("Malformed request: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    Config(#[from] alchemy_core::ConfigError),
    #[error("Ingredient data error: {0}")]
    Ingredients(#[from] ingredients_core::ConfigError),
}
