//! Turn-based dialogue that elicits preferences, confirms them, triggers
//! plan generation and handles post-plan commands.
//!
//! One call to [`Session::advance`] consumes one line of (stripped,
//! lowercased) input and yields exactly one [`Reply`]. Replies carry
//! structured values only; rendering them to text is the caller's job.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::catalog::DietTag;
use crate::planner::{MealPlan, PlanError, PlanGenerator, Preferences};

/// Default calorie window when the calorie-goal input has no usable number.
pub const DEFAULT_CALORIE_RANGE: (u32, u32) = (1600, 2200);

/// Spread applied around a single calorie figure like "2000 calories".
const SINGLE_GOAL_SPREAD: u32 = 200;

static CALORIE_RANGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*-\s*(\d+)").expect("valid calorie range pattern"));
static CALORIE_SINGLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+").expect("valid calorie pattern"));
static INGREDIENT_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",|\band\b").expect("valid ingredient split pattern"));
static NONE_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bnone\b").expect("valid none pattern"));
static DECLINE_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:none|no)\b").expect("valid decline pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationState {
    Welcome,
    CollectingPreferences,
    ConfirmPlan,
    PlanGenerated,
}

/// The preference field the next collecting turn will fill. Fields are
/// always visited in declaration order; none is ever skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceField {
    DietaryRestrictions,
    CalorieGoal,
    IngredientPreferences,
}

/// Structured outcome of one conversational turn.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Greeting consumed; now asking for dietary restrictions.
    Greeting,
    AskCalorieGoal,
    AskIngredientPreferences,
    /// All fields collected; echo them back and ask to generate.
    ConfirmPreferences(Preferences),
    /// Plan generated successfully.
    PlanReady(MealPlan),
    /// Confirmation declined; collection restarts at dietary restrictions
    /// with the previous answers kept as the base.
    AdjustPreferences,
    /// Generation failed because nothing passed the filter; collection
    /// restarts at dietary restrictions.
    NoRecipesMatch,
    ShoppingList(BTreeMap<String, u32>),
    /// "modify" command: collection restarts, preferences kept.
    ModifyPreferences,
    /// "new" command: everything reset, back to the welcome state.
    StartOver,
    /// Unrecognized post-plan input; state unchanged.
    Help,
}

/// One conversation session: all mutable dialogue state plus the shared
/// planner it drives. Sessions are independent; nothing is shared between
/// them except the read-only catalog inside the generator.
pub struct Session {
    state: ConversationState,
    pending: Option<PreferenceField>,
    preferences: Preferences,
    plan: Option<MealPlan>,
    generator: PlanGenerator,
}

impl Session {
    pub fn new(generator: PlanGenerator) -> Self {
        Session {
            state: ConversationState::Welcome,
            pending: None,
            preferences: Preferences::default(),
            plan: None,
            generator,
        }
    }

    pub fn state(&self) -> ConversationState {
        self.state
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn plan(&self) -> Option<&MealPlan> {
        self.plan.as_ref()
    }

    /// Advances the dialogue by one turn. Input is expected stripped and
    /// lowercased by the driving loop; parsing is lenient regardless.
    pub fn advance(&mut self, input: &str) -> Reply {
        debug!(state = ?self.state, pending = ?self.pending, "conversation turn");
        match self.state {
            ConversationState::Welcome => {
                self.state = ConversationState::CollectingPreferences;
                self.pending = Some(PreferenceField::DietaryRestrictions);
                Reply::Greeting
            }
            ConversationState::CollectingPreferences => self.collect_field(input),
            ConversationState::ConfirmPlan => self.handle_confirmation(input),
            ConversationState::PlanGenerated => self.handle_command(input),
        }
    }

    fn collect_field(&mut self, input: &str) -> Reply {
        let field = self.pending.unwrap_or(PreferenceField::DietaryRestrictions);
        match field {
            PreferenceField::DietaryRestrictions => {
                self.preferences.dietary_restrictions = parse_dietary_restrictions(input);
                self.pending = Some(PreferenceField::CalorieGoal);
                Reply::AskCalorieGoal
            }
            PreferenceField::CalorieGoal => {
                self.preferences.calorie_range = Some(parse_calorie_goal(input));
                self.pending = Some(PreferenceField::IngredientPreferences);
                Reply::AskIngredientPreferences
            }
            PreferenceField::IngredientPreferences => {
                self.preferences.preferred_ingredients = parse_ingredient_preferences(input);
                self.pending = None;
                self.state = ConversationState::ConfirmPlan;
                Reply::ConfirmPreferences(self.preferences.clone())
            }
        }
    }

    fn handle_confirmation(&mut self, input: &str) -> Reply {
        if input.trim().to_lowercase().starts_with('y') {
            match self.generator.generate(&self.preferences) {
                Ok(plan) => {
                    self.state = ConversationState::PlanGenerated;
                    self.plan = Some(plan.clone());
                    Reply::PlanReady(plan)
                }
                Err(PlanError::NoRecipesMatch) => {
                    self.restart_collection();
                    Reply::NoRecipesMatch
                }
            }
        } else {
            // Anything non-affirmative re-collects from the top, keeping the
            // answers given so far as the base to overwrite.
            self.restart_collection();
            Reply::AdjustPreferences
        }
    }

    fn handle_command(&mut self, input: &str) -> Reply {
        if input.contains("shopping") {
            let list = self
                .plan
                .as_ref()
                .map(|plan| plan.shopping_list.clone())
                .unwrap_or_default();
            Reply::ShoppingList(list)
        } else if input.contains("modify") {
            self.restart_collection();
            Reply::ModifyPreferences
        } else if input.contains("new") {
            self.preferences = Preferences::default();
            self.plan = None;
            self.pending = None;
            self.state = ConversationState::Welcome;
            Reply::StartOver
        } else {
            Reply::Help
        }
    }

    fn restart_collection(&mut self) {
        self.state = ConversationState::CollectingPreferences;
        self.pending = Some(PreferenceField::DietaryRestrictions);
    }
}

/// Keyword containment scan over the six diet tags. The literal token
/// "none" forces an empty set and suppresses scanning for the turn.
pub fn parse_dietary_restrictions(input: &str) -> Vec<DietTag> {
    let input = input.to_lowercase();
    // Word-boundary match so punctuation-adjacent forms like "none," still
    // suppress scanning.
    if NONE_WORD_RE.is_match(&input) {
        return Vec::new();
    }
    DietTag::ALL
        .iter()
        .copied()
        .filter(|tag| input.contains(tag.keyword()))
        .collect()
}

/// Parses a calorie goal: a `low-high` range first, else a single figure
/// widened by ±200, else the documented default. A reversed range is
/// normalized so low <= high always holds.
pub fn parse_calorie_goal(input: &str) -> (u32, u32) {
    if let Some(caps) = CALORIE_RANGE_RE.captures(input) {
        let low: u32 = caps[1].parse().unwrap_or(DEFAULT_CALORIE_RANGE.0);
        let high: u32 = caps[2].parse().unwrap_or(DEFAULT_CALORIE_RANGE.1);
        return if low <= high { (low, high) } else { (high, low) };
    }
    if let Some(m) = CALORIE_SINGLE_RE.find(input) {
        if let Ok(goal) = m.as_str().parse::<u32>() {
            return (
                goal.saturating_sub(SINGLE_GOAL_SPREAD),
                goal.saturating_add(SINGLE_GOAL_SPREAD),
            );
        }
    }
    DEFAULT_CALORIE_RANGE
}

/// Splits preferred ingredients on commas and the word "and", trimming each
/// token. "none"/"no" yields an empty list.
pub fn parse_ingredient_preferences(input: &str) -> Vec<String> {
    let input = input.to_lowercase();
    if DECLINE_WORD_RE.is_match(&input) {
        return Vec::new();
    }
    INGREDIENT_SPLIT_RE
        .split(&input)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect()
}
