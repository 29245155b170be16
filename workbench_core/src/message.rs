use alchemy_core::{Dlc, Ingredient, Potion};
use ingredients_core::SortOrder;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::WorkbenchError;

/// A request sent to the worker
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    /// Ingredients whose name starts with `query`
    Search {
        query: String,
        #[serde(default)]
        dlcs: Option<Vec<Dlc>>,
        #[serde(default)]
        order: Option<SortOrder>,
    },
    /// Every ingredient, optionally restricted to some DLCs
    Populate {
        #[serde(default)]
        dlcs: Option<Vec<Dlc>>,
        #[serde(default)]
        order: Option<SortOrder>,
    },
    /// Mix and value a selection of ingredients
    Calculate(CalculateRequest),
}

/// Flat parameter record for a calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateRequest {
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub skill: f64,
    /// Kept loosely typed so a non-number is reported instead of rejected at decode time
    #[serde(default = "default_perk_level")]
    pub alchemist_perk_level: Value,
    #[serde(default)]
    pub physician: bool,
    #[serde(default)]
    pub benefactor: bool,
    #[serde(default)]
    pub poisoner: bool,
    #[serde(default)]
    pub fortify_alchemy: f64,
}

fn default_perk_level() -> Value {
    Value::from(0)
}

impl CalculateRequest {
    /// Request with the given ingredients, skill 15 and no perks
    pub fn new<S: Into<String>>(ingredients: impl IntoIterator<Item = S>) -> Self {
        CalculateRequest {
            ingredients: ingredients.into_iter().map(Into::into).collect(),
            skill: 15.0,
            alchemist_perk_level: default_perk_level(),
            physician: false,
            benefactor: false,
            poisoner: false,
            fortify_alchemy: 0.0,
        }
    }

    /// The Alchemist perk rank as a number
    pub fn perk_level(&self) -> Result<f64, WorkbenchError> {
        match &self.alchemist_perk_level {
            Value::Number(n) => n.as_f64().ok_or_else(|| WorkbenchError::InvalidType {
                field: "alchemist_perk_level",
                found: n.to_string(),
            }),
            Value::Null => Ok(0.0),
            other => Err(WorkbenchError::InvalidType {
                field: "alchemist_perk_level",
                found: json_type_name(other).to_string(),
            }),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A reply from the worker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    Ready,
    SearchResults { ingredients: Vec<IngredientSummary> },
    Populated { ingredients: Vec<IngredientSummary> },
    Calculated { result: CalculationResult },
    Error { error: String },
}

/// A single potion for two ingredients, or one potion per combination for three
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CalculationResult {
    Single(Potion),
    Combinations(BTreeMap<String, Potion>),
}

/// What the UI shows for an ingredient in a list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientSummary {
    pub name: String,
    pub gold_value: f64,
    pub weight: f64,
    pub dlc: Dlc,
    pub effects: Vec<String>,
}

impl From<&Ingredient> for IngredientSummary {
    fn from(ingredient: &Ingredient) -> Self {
        IngredientSummary {
            name: ingredient.name().to_string(),
            gold_value: ingredient.gold_value(),
            weight: ingredient.weight(),
            dlc: ingredient.dlc(),
            effects: ingredient.effect_names().map(str::to_string).collect(),
        }
    }
}
