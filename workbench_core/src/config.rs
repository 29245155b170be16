use alchemy_core::ValuationConstants;
use ingredients_core::SortOrder;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Worker configuration
///
/// Every field is optional; an empty file runs on the bundled data with the
/// default valuation constants.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkbenchConfig {
    /// Effect catalog to use instead of the bundled one
    #[serde(default)]
    pub effects_file: Option<PathBuf>,
    /// Directory of ingredient files to use instead of the bundled ones
    #[serde(default)]
    pub ingredients_dir: Option<PathBuf>,
    #[serde(default)]
    pub valuation: ValuationConstants,
    #[serde(default)]
    pub default_order: SortOrder,
}

impl WorkbenchConfig {
    /// Load configuration from a TOML file
    pub fn load_from_path(path: &Path) -> Result<Self, alchemy_core::ConfigError> {
        let config: WorkbenchConfig = alchemy_core::config::load_toml(path)?;
        config.valuation.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: WorkbenchConfig = toml::from_str("").unwrap();
        assert!(config.effects_file.is_none());
        assert!(config.ingredients_dir.is_none());
        assert_eq!(config.valuation, ValuationConstants::default());
        assert_eq!(config.default_order, SortOrder::Ascending);
    }

    #[test]
    fn test_parse_config() {
        let config: WorkbenchConfig = toml::from_str(
            r#"
ingredients_dir = "data/ingredients"
default_order = "desc"

[valuation]
gold_exponent = 1.2
"#,
        )
        .unwrap();

        assert_eq!(config.ingredients_dir, Some(PathBuf::from("data/ingredients")));
        assert_eq!(config.default_order, SortOrder::Descending);
        assert!((config.valuation.gold_exponent - 1.2).abs() < f64::EPSILON);
        assert!((config.valuation.base_power - 4.0).abs() < f64::EPSILON);
    }
}
