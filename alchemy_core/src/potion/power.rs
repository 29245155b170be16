//! Power factor - the skill and perk scalar applied to variable magnitude/duration
//!
//! Formula:
//! ```text
//! power = base_power
//!       * (1 + skill_factor * skill / 100)
//!       * (1 + fortify_alchemy / 100)
//!       * (1 + alchemist / 100)
//!       * (1 + physician / 100)
//!       * (1 + (benefactor + poisoner) / 100)
//! ```

use super::BrewSettings;
use crate::config::ValuationConstants;
use crate::effect::EffectInstance;

/// Perk bonuses that depend on the effect and the potion's classification
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EffectPerkBonus {
    pub physician: f64,
    pub benefactor: f64,
    pub poisoner: f64,
}

impl EffectPerkBonus {
    /// Work out which conditional perks apply to one effect
    pub fn for_effect(
        settings: &BrewSettings,
        constants: &ValuationConstants,
        effect: &EffectInstance,
        is_poison: bool,
    ) -> Self {
        let physician = if settings.physician && constants.is_physician_effect(effect.name()) {
            constants.perk_bonus
        } else {
            0.0
        };
        let benefactor = if settings.benefactor && !is_poison && !effect.harmful() {
            constants.perk_bonus
        } else {
            0.0
        };
        let poisoner = if settings.poisoner && is_poison && effect.harmful() {
            constants.perk_bonus
        } else {
            0.0
        };

        EffectPerkBonus {
            physician,
            benefactor,
            poisoner,
        }
    }
}

/// Power factor for one effect
pub fn power_factor(
    settings: &BrewSettings,
    constants: &ValuationConstants,
    alchemist_bonus: f64,
    bonus: EffectPerkBonus,
) -> f64 {
    constants.base_power
        * (1.0 + constants.skill_factor * settings.skill / 100.0)
        * (1.0 + settings.fortify_alchemy / 100.0)
        * (1.0 + alchemist_bonus / 100.0)
        * (1.0 + bonus.physician / 100.0)
        * (1.0 + (bonus.benefactor + bonus.poisoner) / 100.0)
}
