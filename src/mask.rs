//! Per-slot action legality: meal-type and affordability rules, with a
//! deadlock fallback guaranteeing the mask is never all-false mid-episode.

use crate::catalog::Catalog;
use crate::constants::BUDGET_BUFFER_FRACTION;
use crate::state::EpisodeState;

// ============================================================================
// Action Mask
// ============================================================================

/// How the mask for the current slot was derived.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaskMode {
    /// Meal-type and affordability rules both applied.
    Standard,
    /// No dish was affordable: affordability dropped, only the cheapest
    /// meal-type-legal dish(es) admitted. Expected under tight budgets.
    CheapestFallback,
    /// No dish serves the current meal at all: a catalog defect. Everything
    /// is admitted so the episode can proceed.
    FailOpen,
}

/// Boolean legality vector over the catalog for the current slot.
#[derive(Clone, Debug)]
pub struct ActionMask {
    mask: Vec<bool>,
    mode: MaskMode,
}

impl ActionMask {
    /// All-false mask (used once the episode has terminated).
    pub fn all_false(len: usize) -> Self {
        Self {
            mask: vec![false; len],
            mode: MaskMode::Standard,
        }
    }

    /// Whether the given action index is admissible.
    #[inline]
    pub fn is_admissible(&self, action: usize) -> bool {
        self.mask.get(action).copied().unwrap_or(false)
    }

    /// Whether any action is admissible.
    pub fn any(&self) -> bool {
        self.mask.iter().any(|&m| m)
    }

    /// Number of admissible actions.
    pub fn count_admissible(&self) -> usize {
        self.mask.iter().filter(|&&m| m).count()
    }

    /// Indices of admissible actions.
    pub fn admissible_indices(&self) -> Vec<usize> {
        self.mask
            .iter()
            .enumerate()
            .filter_map(|(i, &m)| m.then_some(i))
            .collect()
    }

    /// The boolean vector, indexed by catalog position.
    #[inline]
    pub fn as_slice(&self) -> &[bool] {
        &self.mask
    }

    /// How this mask was derived.
    #[inline]
    pub fn mode(&self) -> MaskMode {
        self.mode
    }
}

// ============================================================================
// Mask Computation
// ============================================================================

/// Compute the legality mask for the current slot.
///
/// A dish is admissible when it serves the slot's meal type and its price
/// fits within the remaining budget plus a 10%-of-budget overshoot buffer.
/// If that intersection is empty, affordability is dropped and only the
/// cheapest meal-type-legal dish(es) are admitted, so the mask is never
/// all-false while slots remain. If even the meal-type rule admits nothing,
/// every dish is admitted and the catalog defect is reported via the log.
pub fn compute_action_mask(state: &EpisodeState, catalog: &Catalog) -> ActionMask {
    let Some(meal) = state.current_meal_type() else {
        return ActionMask::all_false(catalog.len());
    };

    let mut mask = vec![false; catalog.len()];
    let affordable_limit =
        state.remaining_budget() + BUDGET_BUFFER_FRACTION * state.budget_limit;

    let mut any_meal_legal = false;
    let mut any_admissible = false;
    for (i, dish) in catalog.dishes_for_meal(meal) {
        any_meal_legal = true;
        if dish.price <= affordable_limit {
            mask[i] = true;
            any_admissible = true;
        }
    }

    if any_admissible {
        return ActionMask {
            mask,
            mode: MaskMode::Standard,
        };
    }

    if any_meal_legal {
        // Nothing affordable: admit the cheapest dish(es) for this meal.
        let cheapest = catalog
            .cheapest_price_for_meal(meal)
            .expect("meal has at least one dish");
        for (i, dish) in catalog.dishes_for_meal(meal) {
            if (dish.price - cheapest).abs() < f32::EPSILON {
                mask[i] = true;
            }
        }
        return ActionMask {
            mask,
            mode: MaskMode::CheapestFallback,
        };
    }

    // Catalog defect: some meal type has zero dishes. Fail open.
    log::warn!(
        "no dish in the catalog serves {}; admitting all {} dishes",
        meal.name(),
        catalog.len()
    );
    ActionMask {
        mask: vec![true; catalog.len()],
        mode: MaskMode::FailOpen,
    }
}
