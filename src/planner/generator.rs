use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use super::filter::filter_recipes;
use super::nutrition::{suggest_snack, NutritionTotals, SnackSuggestion};
use super::selector::select_meal;
use super::Preferences;
use crate::catalog::{MealSlot, Recipe};
use crate::similarity::Vocabulary;

pub const DEFAULT_PLAN_DAYS: u32 = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    /// The filtered catalog is empty; the whole generation is abandoned and
    /// no partial plan is returned. Surfaced to the user as a message, not
    /// fatal.
    #[error("no recipes match the current preferences")]
    NoRecipesMatch,
}

/// One day of the plan. Absent slots simply have no entry in `meals`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayPlan {
    pub day: u32,
    pub meals: BTreeMap<MealSlot, Recipe>,
    pub snack: Option<SnackSuggestion>,
}

/// A generated plan. Immutable after creation; regeneration supersedes it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealPlan {
    pub days: Vec<DayPlan>,
    pub total_nutrition: NutritionTotals,
    pub shopping_list: BTreeMap<String, u32>,
}

/// Orchestrates filter, selection, nutrition accumulation and snack advice
/// across N days, then aggregates the shopping list.
///
/// Owns the catalog, the vocabulary trained from it at construction, and the
/// RNG driving meal selection.
pub struct PlanGenerator {
    catalog: Vec<Recipe>,
    vocabulary: Vocabulary,
    days: u32,
    rng: StdRng,
}

impl PlanGenerator {
    pub fn new(catalog: Vec<Recipe>) -> Self {
        let vocabulary = Vocabulary::build(&catalog);
        PlanGenerator {
            catalog,
            vocabulary,
            days: DEFAULT_PLAN_DAYS,
            rng: StdRng::from_entropy(),
        }
    }

    /// Like [`PlanGenerator::new`] but with a fixed selection seed, for
    /// reproducible plans in tests.
    pub fn with_seed(catalog: Vec<Recipe>, seed: u64) -> Self {
        let vocabulary = Vocabulary::build(&catalog);
        PlanGenerator {
            catalog,
            vocabulary,
            days: DEFAULT_PLAN_DAYS,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn days(mut self, days: u32) -> Self {
        self.days = days;
        self
    }

    pub fn catalog(&self) -> &[Recipe] {
        &self.catalog
    }

    pub fn generate(&mut self, preferences: &Preferences) -> Result<MealPlan, PlanError> {
        let filtered = filter_recipes(&self.catalog, preferences);
        if filtered.is_empty() {
            return Err(PlanError::NoRecipesMatch);
        }

        let mut days = Vec::with_capacity(self.days as usize);
        let mut totals = NutritionTotals::default();

        for day in 1..=self.days {
            let mut meals = BTreeMap::new();
            for slot in MealSlot::ALL {
                if let Some(recipe) =
                    select_meal(&filtered, slot, preferences, &self.vocabulary, &mut self.rng)
                {
                    totals.add(recipe);
                    meals.insert(slot, recipe.clone());
                }
            }
            // Snack advice looks at the plan-wide running total after this
            // day's meals are in.
            let snack = suggest_snack(&totals, preferences);
            debug!(day, meals = meals.len(), snack = ?snack, "planned day");
            days.push(DayPlan { day, meals, snack });
        }

        let shopping_list = aggregate_shopping_list(&days);
        info!(
            days = days.len(),
            calories = totals.calories,
            "generated meal plan"
        );
        Ok(MealPlan {
            days,
            total_nutrition: totals,
            shopping_list,
        })
    }
}

/// Tallies ingredient occurrences across every present meal of every day:
/// an ingredient used in three meals over the plan yields count 3, whatever
/// the recipes involved.
pub fn aggregate_shopping_list(days: &[DayPlan]) -> BTreeMap<String, u32> {
    let mut counts = BTreeMap::new();
    for day in days {
        for recipe in day.meals.values() {
            for ingredient in &recipe.ingredients {
                *counts.entry(ingredient.clone()).or_insert(0) += 1;
            }
        }
    }
    counts
}
