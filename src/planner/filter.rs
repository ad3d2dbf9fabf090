use tracing::debug;

use super::Preferences;
use crate::catalog::Recipe;

/// Narrows the catalog to recipes compatible with the given preferences,
/// preserving catalog order. All criteria are applied conjunctively; an
/// empty result is a valid outcome the caller must handle.
pub fn filter_recipes<'a>(catalog: &'a [Recipe], preferences: &Preferences) -> Vec<&'a Recipe> {
    let filtered: Vec<&Recipe> = catalog
        .iter()
        .filter(|recipe| matches_preferences(recipe, preferences))
        .collect();
    debug!(
        total = catalog.len(),
        kept = filtered.len(),
        "filtered recipe catalog"
    );
    filtered
}

fn matches_preferences(recipe: &Recipe, preferences: &Preferences) -> bool {
    // Restrictions are OR'd: one shared diet tag is enough.
    if !preferences.dietary_restrictions.is_empty()
        && !preferences
            .dietary_restrictions
            .iter()
            .any(|tag| recipe.diet.contains(tag))
    {
        return false;
    }

    if let Some((low, high)) = preferences.calorie_range {
        if recipe.calories < low || recipe.calories > high {
            return false;
        }
    }

    // Preferred ingredients only filter in strict mode; otherwise they bias
    // ranking during selection instead. The match is case-sensitive exact
    // ingredient membership.
    if preferences.strict_ingredients && !preferences.preferred_ingredients.is_empty() {
        let shares_ingredient = preferences
            .preferred_ingredients
            .iter()
            .any(|preferred| recipe.ingredients.contains(preferred));
        if !shares_ingredient {
            return false;
        }
    }

    true
}
