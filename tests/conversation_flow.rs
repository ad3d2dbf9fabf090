use nutribot::catalog::{default_catalog, MealSlot};
use nutribot::conversation::{ConversationState, Reply, Session};
use nutribot::planner::{NutritionTotals, PlanGenerator};

fn seeded_session(seed: u64) -> Session {
    Session::new(PlanGenerator::with_seed(default_catalog(), seed))
}

/// Drives a session from greeting through confirmation and returns the plan.
fn generate_plan(session: &mut Session, restrictions: &str, calories: &str, ingredients: &str) -> Reply {
    session.advance("hello");
    session.advance(restrictions);
    session.advance(calories);
    session.advance(ingredients);
    session.advance("yes")
}

#[test]
fn full_dialogue_produces_a_complete_three_day_plan() {
    let mut session = seeded_session(17);
    let reply = generate_plan(&mut session, "none", "0-10000", "none");

    let plan = match reply {
        Reply::PlanReady(plan) => plan,
        other => panic!("expected PlanReady, got {other:?}"),
    };

    assert_eq!(plan.days.len(), 3);
    // The default catalog serves all three slots, so every day fills them.
    for day in &plan.days {
        for slot in MealSlot::ALL {
            assert!(day.meals.contains_key(&slot), "day {} missing {slot}", day.day);
        }
    }

    let mut expected = NutritionTotals::default();
    for day in &plan.days {
        for recipe in day.meals.values() {
            expected.add(recipe);
        }
    }
    assert_eq!(plan.total_nutrition, expected);

    for (ingredient, &count) in &plan.shopping_list {
        let occurrences = plan
            .days
            .iter()
            .flat_map(|day| day.meals.values())
            .filter(|recipe| recipe.ingredients.contains(ingredient))
            .count() as u32;
        assert_eq!(count, occurrences, "shopping count wrong for {ingredient}");
    }
}

#[test]
fn shopping_list_command_returns_the_generated_list() {
    let mut session = seeded_session(23);
    generate_plan(&mut session, "vegetarian", "0-10000", "avocado");

    match session.advance("show me the shopping list") {
        Reply::ShoppingList(list) => {
            assert!(!list.is_empty());
            assert_eq!(&list, &session.plan().unwrap().shopping_list);
        }
        other => panic!("expected ShoppingList, got {other:?}"),
    }
    // The command does not change state.
    assert_eq!(session.state(), ConversationState::PlanGenerated);
}

#[test]
fn modify_keeps_preferences_as_the_base_to_overwrite() {
    let mut session = seeded_session(5);
    generate_plan(&mut session, "vegan", "0-10000", "quinoa");

    assert_eq!(session.advance("modify"), Reply::ModifyPreferences);
    assert_eq!(session.state(), ConversationState::CollectingPreferences);
    // Old answers stay until a collecting turn overwrites them.
    assert_eq!(session.preferences().preferred_ingredients, ["quinoa"]);

    // Overwrite just the restrictions, walk the rest of the sequence again.
    session.advance("none");
    assert!(session.preferences().dietary_restrictions.is_empty());
    session.advance("1500-1800");
    assert_eq!(session.preferences().calorie_range, Some((1500, 1800)));
}

#[test]
fn impossible_constraints_return_to_collection_without_a_plan() {
    let mut session = seeded_session(9);
    let reply = generate_plan(&mut session, "vegan", "100-150", "none");
    assert_eq!(reply, Reply::NoRecipesMatch);
    assert_eq!(session.state(), ConversationState::CollectingPreferences);
    assert!(session.plan().is_none());

    // The session recovers: widening the calorie window succeeds.
    session.advance("vegan");
    session.advance("0-10000");
    session.advance("none");
    assert!(matches!(session.advance("y"), Reply::PlanReady(_)));
}

#[test]
fn regeneration_supersedes_the_previous_plan() {
    let mut session = seeded_session(31);
    let first = match generate_plan(&mut session, "none", "0-10000", "none") {
        Reply::PlanReady(plan) => plan,
        other => panic!("expected PlanReady, got {other:?}"),
    };

    session.advance("modify");
    session.advance("vegan");
    session.advance("0-10000");
    session.advance("none");
    let second = match session.advance("yes") {
        Reply::PlanReady(plan) => plan,
        other => panic!("expected PlanReady, got {other:?}"),
    };

    // Vegan filtering leaves no breakfast recipe, so day one differs in shape
    // from the unrestricted plan.
    assert!(first.days[0].meals.contains_key(&MealSlot::Breakfast));
    assert!(!second.days[0].meals.contains_key(&MealSlot::Breakfast));
    assert_eq!(&second.shopping_list, &session.plan().unwrap().shopping_list);
}

#[test]
fn unrecognized_post_plan_input_is_help_without_state_change() {
    let mut session = seeded_session(2);
    generate_plan(&mut session, "none", "0-10000", "none");

    for garbage in ["what now", "rainbow", "plan harder"] {
        assert_eq!(session.advance(garbage), Reply::Help);
        assert_eq!(session.state(), ConversationState::PlanGenerated);
    }
}
