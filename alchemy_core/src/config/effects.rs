//! Effect catalog loading and validation

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use super::ConfigError;
use crate::effect::{Effect, EffectCatalog};

/// Effect table shipped with the crate
pub const BUNDLED_EFFECTS: &str = include_str!("../../data/effects.toml");

/// Container for effect definitions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectsConfig {
    pub effects: Vec<Effect>,
}

impl EffectsConfig {
    fn into_catalog(self) -> Result<EffectCatalog, ConfigError> {
        let mut seen = HashSet::new();
        let mut catalog = EffectCatalog::new();

        for effect in self.effects {
            if effect.name.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "effect with empty name".to_string(),
                ));
            }
            if !seen.insert(effect.name.clone()) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate effect '{}'",
                    effect.name
                )));
            }
            if !(effect.base_cost.is_finite() && effect.base_cost >= 0.0) {
                return Err(ConfigError::ValidationError(format!(
                    "effect '{}' has invalid base_cost {}",
                    effect.name, effect.base_cost
                )));
            }
            if effect.variable_magnitude && effect.variable_duration {
                return Err(ConfigError::ValidationError(format!(
                    "effect '{}' cannot vary both magnitude and duration",
                    effect.name
                )));
            }
            catalog.register(effect);
        }

        Ok(catalog)
    }
}

/// Load an effect catalog from a TOML file
pub fn load_effect_catalog(path: &Path) -> Result<EffectCatalog, ConfigError> {
    let config: EffectsConfig = super::load_toml(path)?;
    let catalog = config.into_catalog()?;
    tracing::debug!(path = %path.display(), effects = catalog.len(), "loaded effect catalog");
    Ok(catalog)
}

/// Parse an effect catalog from a TOML string
pub fn parse_effect_catalog(toml: &str) -> Result<EffectCatalog, ConfigError> {
    let config: EffectsConfig = super::parse_toml(toml)?;
    config.into_catalog()
}

impl EffectCatalog {
    /// The catalog bundled with the crate
    pub fn bundled() -> Result<Self, ConfigError> {
        parse_effect_catalog(BUNDLED_EFFECTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_catalog() {
        let catalog = EffectCatalog::bundled().unwrap();
        assert!(catalog.len() >= 50);

        let restore = catalog.get("Restore Health").unwrap();
        assert!((restore.base_cost - 0.5).abs() < f64::EPSILON);
        assert!((restore.base_magnitude - 5.0).abs() < f64::EPSILON);
        assert!(restore.variable_magnitude);
        assert!(!restore.harmful);

        let paralysis = catalog.get("Paralysis").unwrap();
        assert!(paralysis.harmful);
        assert!(paralysis.variable_duration);
    }

    #[test]
    fn test_bundled_flags_never_both_variable() {
        let catalog = EffectCatalog::bundled().unwrap();
        assert!(catalog
            .iter()
            .all(|e| !(e.variable_magnitude && e.variable_duration)));
    }

    #[test]
    fn test_parse_effects() {
        let toml = r#"
[[effects]]
name = "Cure Disease"
description = "Cures all diseases."
base_cost = 0.5
base_magnitude = 5
base_duration = 0

[[effects]]
name = "Slow"
description = "Target moves at 50% speed for <dur> seconds."
base_cost = 1.0
base_magnitude = 50
base_duration = 5
variable_duration = true
harmful = true
"#;

        let catalog = parse_effect_catalog(toml).unwrap();
        assert_eq!(catalog.len(), 2);
        let cure = catalog.get("Cure Disease").unwrap();
        assert!(!cure.variable_magnitude && !cure.variable_duration && !cure.harmful);
        assert!(catalog.get("Slow").unwrap().harmful);
    }

    #[test]
    fn test_duplicate_effect_rejected() {
        let toml = r#"
[[effects]]
name = "Fear"
description = ""
base_cost = 5.0
base_magnitude = 1
base_duration = 30

[[effects]]
name = "Fear"
description = ""
base_cost = 5.0
base_magnitude = 1
base_duration = 30
"#;
        assert!(matches!(
            parse_effect_catalog(toml),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_both_variable_rejected() {
        let toml = r#"
[[effects]]
name = "Odd"
description = ""
base_cost = 1.0
base_magnitude = 1
base_duration = 1
variable_magnitude = true
variable_duration = true
"#;
        assert!(matches!(
            parse_effect_catalog(toml),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
