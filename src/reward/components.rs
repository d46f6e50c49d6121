//! Built-in dense shaping terms.
//!
//! Each term is a zero-cost struct implementing [`RewardTerm`]. Pace terms
//! compare the cumulative totals against the ideal linear trajectory toward
//! the episode targets, evaluated after the step.

use super::RewardTerm;
use crate::constants::{
    BUDGET_PACE_FLOOR, BUDGET_PACE_ZERO, CALORIE_PACE_FLOOR, CALORIE_PACE_FULL_CREDIT,
    CALORIE_PACE_ZERO,
};
use crate::state::EpisodeState;

// ============================================================================
// Calorie Progress Term
// ============================================================================

/// Piecewise-linear credit for staying near the ideal calorie pace.
///
/// Full credit (+2) within 100 kcal of `progress × target_calories`,
/// tapering to 0 by 300 kcal, then down to a floor of −2.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CalorieProgress {
    /// Weight applied to the banded value (typically 0.5).
    pub weight: f32,
}

impl RewardTerm for CalorieProgress {
    const NAME: &'static str = "CalorieProgress";

    #[inline]
    fn compute(&self, state: &EpisodeState) -> f32 {
        if self.weight == 0.0 {
            return 0.0;
        }

        let ideal = state.progress() * state.targets.calories;
        let deviation = (state.cumulative_calories - ideal).abs();

        let banded = if deviation <= CALORIE_PACE_FULL_CREDIT {
            2.0
        } else if deviation <= CALORIE_PACE_ZERO {
            2.0 * (CALORIE_PACE_ZERO - deviation) / (CALORIE_PACE_ZERO - CALORIE_PACE_FULL_CREDIT)
        } else {
            (-2.0 * (deviation - CALORIE_PACE_ZERO) / (CALORIE_PACE_FLOOR - CALORIE_PACE_ZERO))
                .max(-2.0)
        };

        self.weight * banded
    }
}

// ============================================================================
// Budget Pace Term
// ============================================================================

/// Credit for spending at or under the ideal budget pace.
///
/// +0.5 on/under `progress × budget_limit`, tapering to 0 over a
/// 10-currency-unit overshoot window, then down to a floor of −1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BudgetPace {
    /// Weight applied to the banded value (typically 0.3).
    pub weight: f32,
}

impl RewardTerm for BudgetPace {
    const NAME: &'static str = "BudgetPace";

    #[inline]
    fn compute(&self, state: &EpisodeState) -> f32 {
        if self.weight == 0.0 {
            return 0.0;
        }

        let ideal = state.progress() * state.budget_limit;
        let overshoot = state.cumulative_cost - ideal;

        let banded = if overshoot <= 0.0 {
            0.5
        } else if overshoot <= BUDGET_PACE_ZERO {
            0.5 * (BUDGET_PACE_ZERO - overshoot) / BUDGET_PACE_ZERO
        } else {
            (-(overshoot - BUDGET_PACE_ZERO) / (BUDGET_PACE_FLOOR - BUDGET_PACE_ZERO)).max(-1.0)
        };

        self.weight * banded
    }
}

// ============================================================================
// Diversity Bonus Term
// ============================================================================

/// Bonus per distinct category already present beyond the first.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiversityBonus {
    /// Bonus per additional distinct category (typically 0.3).
    pub per_category: f32,
}

impl RewardTerm for DiversityBonus {
    const NAME: &'static str = "DiversityBonus";

    #[inline]
    fn compute(&self, state: &EpisodeState) -> f32 {
        let distinct = state.distinct_categories();
        self.per_category * distinct.saturating_sub(1) as f32
    }
}

// ============================================================================
// Duplicate Selection Penalty Term
// ============================================================================

/// Flat penalty whenever the selection log contains any repeated dish name.
///
/// Recomputed from the full log each step, so the charge recurs on every
/// subsequent step once a duplicate is introduced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DuplicatePenalty {
    /// Magnitude of the penalty (typically 1.0).
    pub penalty: f32,
}

impl RewardTerm for DuplicatePenalty {
    const NAME: &'static str = "DuplicatePenalty";

    #[inline]
    fn compute(&self, state: &EpisodeState) -> f32 {
        if state.has_duplicate_selection() {
            -self.penalty
        } else {
            0.0
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
