//! Episode state: targets, cumulative totals, and the selection log.
//!
//! The cumulative counters have exactly one mutation path (recording a
//! selection), so they always equal the literal sums over the selection log.

use crate::catalog::{Dish, MealType, MEAL_TYPES};
use crate::config::NutritionTargets;

/// Meal type served at the given slot, or `None` once past the last slot.
///
/// Slots are grouped by meal in fixed order: the first `dishes_per_meal`
/// slots are breakfast, the next lunch, the last dinner.
#[inline]
pub fn meal_type_for_slot(slot: usize, dishes_per_meal: usize) -> Option<MealType> {
    MEAL_TYPES.get(slot / dishes_per_meal).copied()
}

/// Mutable per-episode state owned by the environment.
#[derive(Clone, Debug)]
pub struct EpisodeState {
    /// Current decision slot, 0..=max_slots. Advances by exactly 1 per step.
    pub slot_index: usize,
    /// Total slots in the episode.
    pub max_slots: usize,
    /// Slots allotted to each meal.
    pub dishes_per_meal: usize,

    /// Nutrition targets, fixed once reset completes.
    pub targets: NutritionTargets,
    /// Budget limit, fixed per episode.
    pub budget_limit: f32,
    /// Tags the user refuses to eat, fixed per episode.
    pub disliked_tags: Vec<String>,

    /// Sum of calories over the selection log.
    pub cumulative_calories: f32,
    /// Sum of protein over the selection log.
    pub cumulative_protein: f32,
    /// Sum of carbs over the selection log.
    pub cumulative_carbs: f32,
    /// Sum of fat over the selection log.
    pub cumulative_fat: f32,
    /// Sum of price over the selection log.
    pub cumulative_cost: f32,

    /// Chosen dishes in selection order. Append-only within an episode.
    pub selections: Vec<Dish>,

    /// Running sum of rewards emitted this episode.
    pub episode_return: f32,
}

impl EpisodeState {
    /// Create state for an episode shape. Targets are placeholders until the
    /// first reset.
    pub fn new(dishes_per_meal: usize) -> Self {
        Self {
            slot_index: 0,
            max_slots: MEAL_TYPES.len() * dishes_per_meal,
            dishes_per_meal,
            targets: NutritionTargets::canonical(),
            budget_limit: crate::constants::CANONICAL_BUDGET,
            disliked_tags: Vec::new(),
            cumulative_calories: 0.0,
            cumulative_protein: 0.0,
            cumulative_carbs: 0.0,
            cumulative_fat: 0.0,
            cumulative_cost: 0.0,
            selections: Vec::new(),
            episode_return: 0.0,
        }
    }

    /// Begin a fresh episode with the given targets.
    pub fn begin_episode(
        &mut self,
        targets: NutritionTargets,
        budget_limit: f32,
        disliked_tags: Vec<String>,
    ) {
        self.slot_index = 0;
        self.targets = targets;
        self.budget_limit = budget_limit;
        self.disliked_tags = disliked_tags;
        self.cumulative_calories = 0.0;
        self.cumulative_protein = 0.0;
        self.cumulative_carbs = 0.0;
        self.cumulative_fat = 0.0;
        self.cumulative_cost = 0.0;
        self.selections.clear();
        self.episode_return = 0.0;
    }

    /// Record a selection: append to the log, accumulate its fields, and
    /// advance the slot. The only mutation path for the cumulative counters.
    pub fn record_selection(&mut self, dish: &Dish) {
        self.cumulative_calories += dish.calories;
        self.cumulative_protein += dish.protein;
        self.cumulative_carbs += dish.carbs;
        self.cumulative_fat += dish.fat;
        self.cumulative_cost += dish.price;
        self.selections.push(dish.clone());
        self.slot_index += 1;
    }

    /// Meal type of the current slot, or `None` after the last slot.
    #[inline]
    pub fn current_meal_type(&self) -> Option<MealType> {
        meal_type_for_slot(self.slot_index, self.dishes_per_meal)
    }

    /// Whether all slots have been filled.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.slot_index >= self.max_slots
    }

    /// Budget left before hitting the limit. May go negative.
    #[inline]
    pub fn remaining_budget(&self) -> f32 {
        self.budget_limit - self.cumulative_cost
    }

    /// Fraction of the episode completed.
    #[inline]
    pub fn progress(&self) -> f32 {
        self.slot_index as f32 / self.max_slots as f32
    }

    /// Number of distinct categories among the selections so far.
    pub fn distinct_categories(&self) -> usize {
        let mut seen: Vec<&str> = Vec::with_capacity(self.selections.len());
        for dish in &self.selections {
            if !seen.contains(&dish.category.as_str()) {
                seen.push(&dish.category);
            }
        }
        seen.len()
    }

    /// Whether the selection log contains any repeated dish name.
    pub fn has_duplicate_selection(&self) -> bool {
        for (i, dish) in self.selections.iter().enumerate() {
            if self.selections[..i].iter().any(|d| d.name == dish.name) {
                return true;
            }
        }
        false
    }

    /// Number of selected dishes whose tags intersect the dislike list.
    pub fn disliked_selection_count(&self) -> usize {
        self.selections
            .iter()
            .filter(|d| d.has_disliked_tag(&self.disliked_tags))
            .count()
    }
}
