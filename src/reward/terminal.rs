//! Terminal composite reward: nutrition bands, budget discipline, variety,
//! and the disliked-tag penalty.
//!
//! Computed once, replacing the dense shaping value on the terminating step.

use crate::config::RewardWeights;
use crate::state::EpisodeState;

/// Per-nutrient band parameters: (max_bonus, tolerance).
///
/// Fat gets the widest tolerance since it is the hardest target to hit
/// exactly with discrete dish choices.
pub const CALORIE_BAND: (f32, f32) = (15.0, 0.10);
pub const PROTEIN_BAND: (f32, f32) = (10.0, 0.20);
pub const CARBS_BAND: (f32, f32) = (8.0, 0.25);
pub const FAT_BAND: (f32, f32) = (7.0, 0.30);

/// Penalty magnitude per selected dish carrying a disliked tag.
pub const DISLIKE_PENALTY_PER_DISH: f32 = 8.0;

// ============================================================================
// Nutrition Band Score
// ============================================================================

/// Banded accuracy score for one nutrient.
///
/// With `ratio = actual / target` and `error = |ratio − 1|`:
/// - `error ≤ tolerance` → `max_bonus`
/// - `tolerance < error ≤ 2·tolerance` → linear `max_bonus → 0.5·max_bonus`
/// - `2·tolerance < error ≤ 3·tolerance` → linear `0.5·max_bonus → 0`
/// - `error > 3·tolerance` → `max(−0.3·max_bonus, −error·0.5·max_bonus)`
///
/// `target` must be positive; this is enforced at construction/reset.
pub fn score(actual: f32, target: f32, max_bonus: f32, tolerance: f32) -> f32 {
    debug_assert!(target > 0.0, "score target must be positive");
    let ratio = actual / target;
    let error = (ratio - 1.0).abs();

    if error <= tolerance {
        max_bonus
    } else if error <= 2.0 * tolerance {
        let t = (error - tolerance) / tolerance;
        max_bonus * (1.0 - 0.5 * t)
    } else if error <= 3.0 * tolerance {
        let t = (error - 2.0 * tolerance) / tolerance;
        0.5 * max_bonus * (1.0 - t)
    } else {
        (-0.3 * max_bonus).max(-error * 0.5 * max_bonus)
    }
}

/// Summed banded scores over the four tracked nutrients.
pub fn nutrition_score(state: &EpisodeState) -> f32 {
    let (cal_bonus, cal_tol) = CALORIE_BAND;
    let (prot_bonus, prot_tol) = PROTEIN_BAND;
    let (carb_bonus, carb_tol) = CARBS_BAND;
    let (fat_bonus, fat_tol) = FAT_BAND;

    score(state.cumulative_calories, state.targets.calories, cal_bonus, cal_tol)
        + score(state.cumulative_protein, state.targets.protein, prot_bonus, prot_tol)
        + score(state.cumulative_carbs, state.targets.carbs, carb_bonus, carb_tol)
        + score(state.cumulative_fat, state.targets.fat, fat_bonus, fat_tol)
}

// ============================================================================
// Budget Score
// ============================================================================

/// Budget discipline score from the spend/budget ratio.
pub fn budget_score(state: &EpisodeState) -> f32 {
    let ratio = state.cumulative_cost / state.budget_limit;
    if ratio <= 0.90 {
        5.0
    } else if ratio <= 1.00 {
        3.0
    } else if ratio <= 1.05 {
        1.0
    } else if ratio <= 1.15 {
        -2.0
    } else {
        (-5.0 - (ratio - 1.15) * 20.0).max(-8.0)
    }
}

// ============================================================================
// Variety Score
// ============================================================================

/// Category variety score, plus a bonus for an all-distinct plan.
pub fn variety_score(state: &EpisodeState) -> f32 {
    let distinct = state.distinct_categories();
    let base = match distinct {
        0 | 1 => 0.0,
        2 => 2.0,
        3 => 4.0,
        _ => 6.0,
    };
    let all_distinct_bonus = if !state.selections.is_empty() && !state.has_duplicate_selection() {
        3.0
    } else {
        0.0
    };
    base + all_distinct_bonus
}

// ============================================================================
// Dislike Penalty
// ============================================================================

/// −8 per selected dish whose tags intersect the dislike list. Unbounded
/// and unweighted.
pub fn dislike_penalty(state: &EpisodeState) -> f32 {
    -DISLIKE_PENALTY_PER_DISH * state.disliked_selection_count() as f32
}

// ============================================================================
// Composite
// ============================================================================

/// Weighted terminal composite for a finished episode.
pub fn terminal_reward(state: &EpisodeState, weights: &RewardWeights) -> f32 {
    weights.nutrition * nutrition_score(state)
        + weights.budget * budget_score(state)
        + weights.variety * variety_score(state)
        + dislike_penalty(state)
}
