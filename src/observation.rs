//! Observation encoding from episode state to a fixed-length vector.
//!
//! The encoding is a fixed-shape struct with named fields and a documented
//! flat layout; every component is clipped into [`OBS_CLIP`].
//!
//! Flat layout (see [`Observation::to_array`]):
//!
//! | index | component                                   |
//! |-------|---------------------------------------------|
//! | 0     | progress fraction                           |
//! | 1–4   | cumulative/target ratios (cal, prot, carb, fat) |
//! | 5     | cumulative cost / budget                    |
//! | 6–9   | remaining-nutrient fractions                |
//! | 10    | remaining-budget fraction                   |
//! | 11    | remaining-slot fraction                     |
//! | 12–14 | one-hot current meal type                   |
//! | 15    | diversity ratio                             |

use crate::constants::OBS_CLIP;
use crate::state::EpisodeState;

/// Length of the flattened observation vector.
pub const OBS_SIZE: usize = 16;

/// Fixed-shape observation with named components.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Observation {
    /// Slots filled / max slots.
    pub progress: f32,
    /// Cumulative calories / target calories.
    pub calorie_ratio: f32,
    /// Cumulative protein / target protein.
    pub protein_ratio: f32,
    /// Cumulative carbs / target carbs.
    pub carb_ratio: f32,
    /// Cumulative fat / target fat.
    pub fat_ratio: f32,
    /// Cumulative cost / budget limit.
    pub cost_ratio: f32,
    /// 1 − calorie_ratio (negative when overshot).
    pub remaining_calories: f32,
    /// 1 − protein_ratio.
    pub remaining_protein: f32,
    /// 1 − carb_ratio.
    pub remaining_carbs: f32,
    /// 1 − fat_ratio.
    pub remaining_fat: f32,
    /// 1 − cost_ratio.
    pub remaining_budget: f32,
    /// Unfilled slots / max slots.
    pub remaining_slots: f32,
    /// One-hot of the current slot's meal type; all zeros after termination.
    pub meal_one_hot: [f32; 3],
    /// Distinct categories so far / dishes chosen so far; 0 before the
    /// first selection.
    pub diversity_ratio: f32,
}

#[inline]
fn clip(value: f32) -> f32 {
    value.clamp(OBS_CLIP.0, OBS_CLIP.1)
}

impl Observation {
    /// Encode the current episode state.
    ///
    /// Targets and budget are validated positive at construction/reset, so
    /// the ratios here are always well-defined.
    pub fn encode(state: &EpisodeState) -> Self {
        let calorie_ratio = state.cumulative_calories / state.targets.calories;
        let protein_ratio = state.cumulative_protein / state.targets.protein;
        let carb_ratio = state.cumulative_carbs / state.targets.carbs;
        let fat_ratio = state.cumulative_fat / state.targets.fat;
        let cost_ratio = state.cumulative_cost / state.budget_limit;

        let mut meal_one_hot = [0.0; 3];
        if let Some(meal) = state.current_meal_type() {
            meal_one_hot[meal.index()] = 1.0;
        }

        let chosen = state.selections.len();
        let diversity_ratio = if chosen == 0 {
            0.0
        } else {
            state.distinct_categories() as f32 / chosen as f32
        };

        Self {
            progress: clip(state.progress()),
            calorie_ratio: clip(calorie_ratio),
            protein_ratio: clip(protein_ratio),
            carb_ratio: clip(carb_ratio),
            fat_ratio: clip(fat_ratio),
            cost_ratio: clip(cost_ratio),
            remaining_calories: clip(1.0 - calorie_ratio),
            remaining_protein: clip(1.0 - protein_ratio),
            remaining_carbs: clip(1.0 - carb_ratio),
            remaining_fat: clip(1.0 - fat_ratio),
            remaining_budget: clip(1.0 - cost_ratio),
            remaining_slots: clip(1.0 - state.progress()),
            meal_one_hot,
            diversity_ratio: clip(diversity_ratio),
        }
    }

    /// Flatten into the documented layout.
    pub fn to_array(&self) -> [f32; OBS_SIZE] {
        [
            self.progress,
            self.calorie_ratio,
            self.protein_ratio,
            self.carb_ratio,
            self.fat_ratio,
            self.cost_ratio,
            self.remaining_calories,
            self.remaining_protein,
            self.remaining_carbs,
            self.remaining_fat,
            self.remaining_budget,
            self.remaining_slots,
            self.meal_one_hot[0],
            self.meal_one_hot[1],
            self.meal_one_hot[2],
            self.diversity_ratio,
        ]
    }

    /// Write the flattened observation into a buffer.
    ///
    /// The buffer must be at least [`OBS_SIZE`] long. Returns the number of
    /// elements written.
    pub fn write_into(&self, output: &mut [f32]) -> usize {
        output[..OBS_SIZE].copy_from_slice(&self.to_array());
        OBS_SIZE
    }
}
