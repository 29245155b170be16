use crate::config::{IngredientFileConfig, BUNDLED_INGREDIENTS};
use crate::query::{to_title_case, SortOrder};
use crate::{ConfigError, QueryError};
use alchemy_core::{Dlc, EffectCatalog, Ingredient};
use std::collections::BTreeMap;
use std::path::Path;

/// Registry of all ingredients, keyed by name, loaded from TOML files
#[derive(Debug, Default)]
pub struct IngredientRegistry {
    ingredients: BTreeMap<String, Ingredient>,
}

impl IngredientRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Load all ingredient files from a directory (recursively)
    pub fn load(dir: &Path, catalog: &EffectCatalog) -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        registry.load_dir(dir, catalog)?;
        tracing::info!(
            dir = %dir.display(),
            ingredients = registry.len(),
            "loaded ingredient registry"
        );
        Ok(registry)
    }

    /// The ingredient data bundled with the crate
    pub fn bundled(catalog: &EffectCatalog) -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        for (name, content) in BUNDLED_INGREDIENTS {
            registry.load_str(content, Path::new(name), catalog)?;
        }
        Ok(registry)
    }

    /// Parse a single ingredient file from a string
    pub fn from_toml_str(content: &str, catalog: &EffectCatalog) -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        registry.load_str(content, Path::new("<inline>"), catalog)?;
        Ok(registry)
    }

    /// Load ingredient files from a directory recursively
    fn load_dir(&mut self, dir: &Path, catalog: &EffectCatalog) -> Result<(), ConfigError> {
        if !dir.exists() {
            return Ok(());
        }

        let entries = std::fs::read_dir(dir).map_err(|e| ConfigError::Io {
            error: e,
            path: Some(dir.to_path_buf()),
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| ConfigError::Io {
                error: e,
                path: Some(dir.to_path_buf()),
            })?;
            let path = entry.path();

            if path.is_dir() {
                self.load_dir(&path, catalog)?;
            } else if path.extension().is_some_and(|ext| ext == "toml") {
                self.load_file(&path, catalog)?;
            }
        }

        Ok(())
    }

    /// Load a single ingredient file
    pub fn load_file(&mut self, path: &Path, catalog: &EffectCatalog) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            error: e,
            path: Some(path.to_path_buf()),
        })?;
        self.load_str(&content, path, catalog)
    }

    fn load_str(&mut self, content: &str, path: &Path, catalog: &EffectCatalog) -> Result<(), ConfigError> {
        let config: IngredientFileConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
            error: e,
            path: path.to_path_buf(),
        })?;

        for record in &config.ingredients {
            let ingredient = Ingredient::from_record(record, catalog).map_err(|e| ConfigError::Validation {
                message: e.to_string(),
                path: path.to_path_buf(),
            })?;

            if self.ingredients.contains_key(ingredient.name()) {
                return Err(ConfigError::Validation {
                    message: format!("duplicate ingredient '{}'", ingredient.name()),
                    path: path.to_path_buf(),
                });
            }
            self.ingredients.insert(ingredient.name().to_string(), ingredient);
        }

        tracing::debug!(
            path = %path.display(),
            ingredients = config.ingredients.len(),
            "loaded ingredient file"
        );
        Ok(())
    }

    /// Get an ingredient by exact name
    pub fn get(&self, name: &str) -> Option<&Ingredient> {
        self.ingredients.get(name)
    }

    /// Get an ingredient by exact name, failing if unknown
    pub fn require(&self, name: &str) -> Result<&Ingredient, QueryError> {
        self.get(name)
            .ok_or_else(|| QueryError::UnknownIngredient(name.to_string()))
    }

    /// Resolve a list of names to owned ingredients, preserving order
    pub fn resolve<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<Ingredient>, QueryError> {
        names
            .iter()
            .map(|name| self.require(name.as_ref()).cloned())
            .collect()
    }

    /// Check if an ingredient exists
    pub fn contains(&self, name: &str) -> bool {
        self.ingredients.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }

    /// Every ingredient
    pub fn all(&self, order: SortOrder) -> Vec<&Ingredient> {
        self.select(order, |_| true)
    }

    /// Ingredients whose name starts with `prefix`, compared in title case
    pub fn search_prefix(&self, prefix: &str, order: SortOrder) -> Vec<&Ingredient> {
        let prefix = to_title_case(prefix);
        self.select(order, |ingredient| {
            to_title_case(ingredient.name()).starts_with(&prefix)
        })
    }

    /// Ingredients carrying an effect with exactly this name
    pub fn with_effect(&self, effect_name: &str, order: SortOrder) -> Vec<&Ingredient> {
        self.select(order, |ingredient| ingredient.has_effect(effect_name))
    }

    /// Ingredients from any of the given DLCs
    pub fn in_dlcs(&self, dlcs: &[Dlc], order: SortOrder) -> Vec<&Ingredient> {
        self.select(order, |ingredient| dlcs.contains(&ingredient.dlc()))
    }

    fn select<F>(&self, order: SortOrder, predicate: F) -> Vec<&Ingredient>
    where
        F: Fn(&Ingredient) -> bool,
    {
        let mut selected: Vec<&Ingredient> = self
            .ingredients
            .values()
            .filter(|ingredient| predicate(ingredient))
            .collect();
        selected.sort_by(|a, b| order.compare(a.name(), b.name()));
        selected
    }
}
