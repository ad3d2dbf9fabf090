use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};

use nutribot::catalog::load_catalog_or_default;
use nutribot::cli::parse_args;
use nutribot::conversation::{Reply, Session};
use nutribot::planner::{MealPlan, PlanGenerator, Preferences};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli_args = parse_args();
    let catalog = load_catalog_or_default(Path::new(&cli_args.recipe_file));

    let generator = match cli_args.seed {
        Some(seed) => PlanGenerator::with_seed(catalog, seed),
        None => PlanGenerator::new(catalog),
    }
    .days(cli_args.days);
    let mut session = Session::new(generator);

    println!("\n🍎 Welcome to NutriBot - Your Meal Planning Assistant! 🥗");
    println!("Type 'quit' at any time to exit.\n");
    println!("Bot: {}", render_reply(&session.advance("hello"), "hello"));

    let stdin = io::stdin();
    loop {
        print!("You: ");
        io::stdout().flush().context("failed to flush stdout")?;

        let mut line = String::new();
        let bytes_read = stdin
            .lock()
            .read_line(&mut line)
            .context("failed to read input")?;
        if bytes_read == 0 {
            break; // EOF
        }

        let input = line.trim().to_lowercase();
        if input == "quit" {
            println!("Bot: Goodbye! Happy meal planning!");
            break;
        }

        let reply = session.advance(&input);
        println!("Bot: {}", render_reply(&reply, &input));
    }

    Ok(())
}

fn render_reply(reply: &Reply, input: &str) -> String {
    match reply {
        Reply::Greeting => render_greeting(input).to_string(),
        Reply::AskCalorieGoal => {
            "Got it! What's your daily calorie goal? (e.g., '2000 calories' or '1500-1800')"
                .to_string()
        }
        Reply::AskIngredientPreferences => {
            "Thanks! Any favorite ingredients you'd like to include? \
             (e.g., 'chicken, quinoa, avocado')"
                .to_string()
        }
        Reply::ConfirmPreferences(preferences) => render_preferences_summary(preferences),
        Reply::PlanReady(plan) => render_plan(plan),
        Reply::AdjustPreferences => {
            "Okay, let's adjust your preferences. Do you have any dietary restrictions?"
                .to_string()
        }
        Reply::NoRecipesMatch => {
            "No recipes match your preferences. Let's adjust them. \
             Do you have any dietary restrictions?"
                .to_string()
        }
        Reply::ShoppingList(list) => render_shopping_list(list),
        Reply::ModifyPreferences => {
            "Let's modify your preferences. Do you have any dietary restrictions?".to_string()
        }
        Reply::StartOver => "Starting fresh! Say hello when you're ready to plan again.".to_string(),
        Reply::Help => "I'm not sure what you mean. You can ask for 'shopping list', \
                        'modify', 'new', or 'quit'"
            .to_string(),
    }
}

/// Greeting variants keyed on the exact (lowercased) opener, with a generic
/// fallback for anything else.
fn render_greeting(input: &str) -> &'static str {
    match input {
        "hello" => {
            "Hi there! I can help you create a personalized meal plan. Do you have any \
             dietary restrictions? (e.g., vegetarian, vegan, gluten-free)"
        }
        "hi" => {
            "Hello! Ready to plan some delicious meals? Do you have any food allergies \
             or dietary preferences?"
        }
        "hey" => {
            "Hey! Let's create your perfect meal plan. Any dietary restrictions I \
             should know about?"
        }
        _ => {
            "Great! Let's get started with your meal plan. First, do you have any \
             dietary restrictions?"
        }
    }
}

fn render_preferences_summary(preferences: &Preferences) -> String {
    let restrictions = if preferences.dietary_restrictions.is_empty() {
        "none".to_string()
    } else {
        preferences
            .dietary_restrictions
            .iter()
            .map(|tag| tag.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };
    let (low, high) = preferences
        .calorie_range
        .unwrap_or(nutribot::conversation::DEFAULT_CALORIE_RANGE);
    let ingredients = if preferences.preferred_ingredients.is_empty() {
        "none".to_string()
    } else {
        preferences.preferred_ingredients.join(", ")
    };

    format!(
        "Great! Based on your preferences:\n\
         - Dietary restrictions: {restrictions}\n\
         - Calorie range: [{low}, {high}]\n\
         - Preferred ingredients: {ingredients}\n\n\
         Shall I generate your meal plan now? (yes/no)"
    )
}

fn render_plan(plan: &MealPlan) -> String {
    let mut out = String::from("Here's your personalized meal plan:\n\n");
    for day in &plan.days {
        out.push_str(&format!("Day {}:\n", day.day));
        for (slot, recipe) in &day.meals {
            out.push_str(&format!(
                "- {}: {} ({} cal)\n",
                slot,
                recipe.name,
                recipe.calories
            ));
        }
        let snack = day
            .snack
            .map(|s| s.description())
            .unwrap_or("None suggested");
        out.push_str(&format!("- Snack: {snack}\n\n"));
    }

    let totals = &plan.total_nutrition;
    out.push_str(&format!(
        "Nutrition Totals:\n\
         - Calories: {}\n\
         - Protein: {}g\n\
         - Carbs: {}g\n\
         - Fat: {}g\n\n\
         You can:\n\
         - Type 'shopping list' to see ingredients needed\n\
         - Type 'modify' to change your preferences\n\
         - Type 'new' to start over\n\
         - Type 'quit' to exit",
        totals.calories, totals.protein, totals.carbs, totals.fat
    ));
    out
}

fn render_shopping_list(list: &BTreeMap<String, u32>) -> String {
    let mut out = String::from("Here's your shopping list:");
    for (ingredient, count) in list {
        out.push_str(&format!("\n- {ingredient} ({count}x)"));
    }
    out
}
