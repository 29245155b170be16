//! Per-effect magnitude, duration and gold value

use serde::{Deserialize, Serialize};

use crate::config::ValuationConstants;
use crate::effect::EffectInstance;

/// Realized numbers for one effect of a brewed potion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectValue {
    pub name: String,
    /// Template with `<mag>`/`<dur>` still in place
    pub description: String,
    pub magnitude: i64,
    pub duration: i64,
    pub value: u64,
}

impl EffectValue {
    /// Description with the first `<mag>` and `<dur>` filled in and the first `.` removed
    ///
    /// Only the first occurrence of each token is touched.
    pub fn rendered_description(&self) -> String {
        let mut text = self
            .description
            .replacen("<mag>", &self.magnitude.to_string(), 1)
            .replacen("<dur>", &self.duration.to_string(), 1);
        if let Some(idx) = text.find('.') {
            text.remove(idx);
        }
        text
    }
}

/// Calculate magnitude, duration and gold value for one effect at a given power factor
pub fn calculate_effect_value(
    effect: &EffectInstance,
    power_factor: f64,
    constants: &ValuationConstants,
) -> EffectValue {
    let mut magnitude = effect.calculated_magnitude();
    if magnitude <= 0.0 && !effect.variable_magnitude() {
        magnitude = 0.0;
    }
    let magnitude_factor = if effect.variable_magnitude() {
        power_factor
    } else {
        1.0
    };
    let magnitude = round_half_up(magnitude * magnitude_factor);

    let duration = effect.calculated_duration().max(0.0);
    let duration_factor = if effect.variable_duration() {
        power_factor
    } else {
        1.0
    };
    let duration = round_half_up(duration * duration_factor);

    let magnitude_factor = if magnitude > 0.0 { magnitude } else { 1.0 };
    let duration_factor = if duration > 0.0 {
        duration / constants.duration_divisor
    } else {
        1.0
    };
    let gold = (effect.base_cost()
        * (magnitude_factor * duration_factor).powf(constants.gold_exponent))
    .floor();

    EffectValue {
        name: effect.name().to_string(),
        description: effect.description().to_string(),
        magnitude: magnitude as i64,
        duration: duration as i64,
        value: gold.max(0.0) as u64,
    }
}

/// Round to the nearest integer, halves towards positive infinity
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
