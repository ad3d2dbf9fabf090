use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("catalog file contains no recipes")]
    Empty,
}

/// A dietary classification a recipe may satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DietTag {
    Vegetarian,
    Vegan,
    GlutenFree,
    DairyFree,
    NutFree,
    Pescatarian,
}

impl DietTag {
    pub const ALL: [DietTag; 6] = [
        DietTag::Vegetarian,
        DietTag::Vegan,
        DietTag::GlutenFree,
        DietTag::DairyFree,
        DietTag::NutFree,
        DietTag::Pescatarian,
    ];

    /// The lowercase keyword scanned for in dialogue input. Matches the
    /// kebab-case serde form.
    pub fn keyword(&self) -> &'static str {
        match self {
            DietTag::Vegetarian => "vegetarian",
            DietTag::Vegan => "vegan",
            DietTag::GlutenFree => "gluten-free",
            DietTag::DairyFree => "dairy-free",
            DietTag::NutFree => "nut-free",
            DietTag::Pescatarian => "pescatarian",
        }
    }
}

impl fmt::Display for DietTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One of the three daily meal occasions a recipe may serve.
///
/// Ordered breakfast < lunch < dinner so slot maps iterate in day order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealSlot {
    pub const ALL: [MealSlot; 3] = [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner];

    pub fn label(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "Breakfast",
            MealSlot::Lunch => "Lunch",
            MealSlot::Dinner => "Dinner",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single recipe record. Immutable once loaded; the catalog is an ordered
/// sequence of these, shared read-only for the life of the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub ingredients: Vec<String>,
    pub diet: Vec<DietTag>,
    pub meal_type: Vec<MealSlot>,
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
}

/// The built-in fallback catalog, used when no recipe file can be loaded.
pub fn default_catalog() -> Vec<Recipe> {
    vec![
        Recipe {
            name: "Vegetable Stir Fry".to_string(),
            ingredients: vec![
                "bell pepper".to_string(),
                "broccoli".to_string(),
                "carrot".to_string(),
                "soy sauce".to_string(),
            ],
            diet: vec![DietTag::Vegetarian, DietTag::Vegan],
            meal_type: vec![MealSlot::Lunch, MealSlot::Dinner],
            calories: 320,
            protein: 12,
            carbs: 45,
            fat: 8,
        },
        Recipe {
            name: "Greek Yogurt Parfait".to_string(),
            ingredients: vec![
                "greek yogurt".to_string(),
                "granola".to_string(),
                "berries".to_string(),
                "honey".to_string(),
            ],
            diet: vec![DietTag::Vegetarian],
            meal_type: vec![MealSlot::Breakfast],
            calories: 250,
            protein: 18,
            carbs: 30,
            fat: 6,
        },
        Recipe {
            name: "Quinoa Bowl".to_string(),
            ingredients: vec![
                "quinoa".to_string(),
                "avocado".to_string(),
                "black beans".to_string(),
                "corn".to_string(),
            ],
            diet: vec![DietTag::Vegetarian, DietTag::Vegan, DietTag::GlutenFree],
            meal_type: vec![MealSlot::Lunch, MealSlot::Dinner],
            calories: 400,
            protein: 15,
            carbs: 55,
            fat: 14,
        },
        Recipe {
            name: "Avocado Toast".to_string(),
            ingredients: vec![
                "bread".to_string(),
                "avocado".to_string(),
                "tomato".to_string(),
                "salt".to_string(),
            ],
            diet: vec![DietTag::Vegetarian],
            meal_type: vec![MealSlot::Breakfast, MealSlot::Lunch],
            calories: 350,
            protein: 10,
            carbs: 40,
            fat: 18,
        },
    ]
}

/// Loads a recipe catalog from a JSON file (an array of recipe objects).
pub fn load_catalog(path: &Path) -> Result<Vec<Recipe>, CatalogError> {
    let contents = fs::read_to_string(path)?;
    let recipes: Vec<Recipe> = serde_json::from_str(&contents)?;
    if recipes.is_empty() {
        return Err(CatalogError::Empty);
    }
    Ok(recipes)
}

/// Loads the catalog from `path`, falling back to the built-in recipes when
/// the file is missing or malformed.
pub fn load_catalog_or_default(path: &Path) -> Vec<Recipe> {
    match load_catalog(path) {
        Ok(recipes) => {
            info!(count = recipes.len(), "loaded recipe catalog from {}", path.display());
            recipes
        }
        Err(err) => {
            warn!("could not load {}: {err}; using built-in catalog", path.display());
            default_catalog()
        }
    }
}
