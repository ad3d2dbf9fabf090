pub mod filter;
pub mod generator;
pub mod nutrition;
pub mod selector;

pub use filter::filter_recipes;
pub use generator::{DayPlan, MealPlan, PlanError, PlanGenerator, DEFAULT_PLAN_DAYS};
pub use nutrition::{suggest_snack, NutritionTotals, SnackSuggestion};
pub use selector::select_meal;

use serde::Serialize;

use crate::catalog::DietTag;

/// User preferences accumulated field-by-field during the dialogue. Every
/// parsing branch has a default, so a `Preferences` is always well-formed by
/// the time plan generation runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preferences {
    pub dietary_restrictions: Vec<DietTag>,
    /// Inclusive calorie window; `None` until elicited. Always low <= high.
    pub calorie_range: Option<(u32, u32)>,
    pub preferred_ingredients: Vec<String>,
    /// When true, recipes sharing no preferred ingredient are excluded
    /// outright instead of merely down-ranked. Never set by the dialogue
    /// flow today; kept for callers that construct preferences directly.
    pub strict_ingredients: bool,
    pub daily_calories: u32,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            dietary_restrictions: Vec::new(),
            calorie_range: None,
            preferred_ingredients: Vec::new(),
            strict_ingredients: false,
            daily_calories: 2000,
        }
    }
}
