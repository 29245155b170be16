//! Combination engine - every brewable recipe within a 2 or 3 ingredient selection

use std::collections::BTreeMap;

use crate::effect::EffectInstance;
use crate::ingredient::Ingredient;
use crate::AlchemyError;

/// Separator between ingredient names in a combination key
pub const KEY_SEPARATOR: &str = ",";

/// Surviving effects per combination, keyed by the sorted ingredient names
pub type Combinations = BTreeMap<String, Vec<EffectInstance>>;

/// Order-independent key for a set of ingredients
pub fn combination_key(ingredients: &[&Ingredient]) -> String {
    let mut names: Vec<&str> = ingredients.iter().map(|i| i.name()).collect();
    names.sort_unstable();
    names.join(KEY_SEPARATOR)
}

/// Find every non-empty combination within a selection of 2 or 3 ingredients
///
/// Two ingredients yield at most one entry. Three yield at most four: the full
/// triple plus each of the three pairs.
pub fn find_possible_combinations(ingredients: &[Ingredient]) -> Result<Combinations, AlchemyError> {
    let mut combinations = Combinations::new();

    match ingredients {
        [a, b] => {
            insert_non_empty(&mut combinations, &[a, b], a.mix_two(b));
        }
        [a, b, c] => {
            insert_non_empty(&mut combinations, &[a, b, c], a.mix_three(b, c));
            insert_non_empty(&mut combinations, &[b, c], b.mix_two(c));
            insert_non_empty(&mut combinations, &[c, a], c.mix_two(a));
            insert_non_empty(&mut combinations, &[a, b], a.mix_two(b));
        }
        _ => {
            return Err(AlchemyError::InvalidArgument(format!(
                "expected 2 or 3 ingredients, got {}",
                ingredients.len()
            )));
        }
    }

    tracing::debug!(
        selected = ingredients.len(),
        found = combinations.len(),
        "enumerated combinations"
    );
    Ok(combinations)
}

fn insert_non_empty(combinations: &mut Combinations, ingredients: &[&Ingredient], effects: Vec<EffectInstance>) {
    if !effects.is_empty() {
        combinations.insert(combination_key(ingredients), effects);
    }
}
