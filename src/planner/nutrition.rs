use serde::Serialize;

use super::Preferences;
use crate::catalog::Recipe;

/// Running macro totals across the whole plan. A pure fold: meals add in,
/// nothing resets per day, and snacks contribute no macros.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NutritionTotals {
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
}

impl NutritionTotals {
    pub fn add(&mut self, recipe: &Recipe) {
        self.calories += recipe.calories;
        self.protein += recipe.protein;
        self.carbs += recipe.carbs;
        self.fat += recipe.fat;
    }
}

/// The snack category suggested to round out a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SnackSuggestion {
    ProteinDense,
    Carbohydrate,
    Vegetable,
}

impl SnackSuggestion {
    pub fn description(&self) -> &'static str {
        match self {
            SnackSuggestion::ProteinDense => "Protein shake or handful of nuts",
            SnackSuggestion::Carbohydrate => "Fruit or whole grain crackers",
            SnackSuggestion::Vegetable => "Vegetables with hummus",
        }
    }
}

// Heuristic macro-balancing thresholds; tests depend on these exact values.
const MIN_SNACK_CALORIES: u32 = 150;
const PROTEIN_RATIO_FLOOR: f32 = 0.15;
const CARB_RATIO_FLOOR: f32 = 0.45;

/// Suggests a snack category from the running totals, or `None` when fewer
/// than 150 kcal remain against the daily target.
pub fn suggest_snack(totals: &NutritionTotals, preferences: &Preferences) -> Option<SnackSuggestion> {
    let remaining = preferences.daily_calories.saturating_sub(totals.calories);
    if remaining < MIN_SNACK_CALORIES {
        return None;
    }

    let (protein_ratio, carb_ratio) = if totals.calories == 0 {
        (0.0, 0.0)
    } else {
        (
            totals.protein as f32 / totals.calories as f32,
            totals.carbs as f32 / totals.calories as f32,
        )
    };

    if protein_ratio < PROTEIN_RATIO_FLOOR {
        Some(SnackSuggestion::ProteinDense)
    } else if carb_ratio < CARB_RATIO_FLOOR {
        Some(SnackSuggestion::Carbohydrate)
    } else {
        Some(SnackSuggestion::Vegetable)
    }
}
