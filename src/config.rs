//! Configuration types and builders for the meal-planning environment.
//!
//! Provides builder-pattern configuration for:
//! - Episode nutrition/budget targets (evaluation mode)
//! - Reward term weights
//! - Episode shape (dishes per meal)
//! - Training vs. evaluation target sourcing

use crate::constants::*;
use crate::error::{MealPlanError, Result};

// ============================================================================
// Nutrition Targets
// ============================================================================

/// Per-episode nutrition targets. All values must be positive: they are
/// reward-normalization denominators and are rejected otherwise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NutritionTargets {
    /// Daily calorie target (kcal).
    pub calories: f32,
    /// Daily protein target (g).
    pub protein: f32,
    /// Daily carbohydrate target (g).
    pub carbs: f32,
    /// Daily fat target (g).
    pub fat: f32,
}

impl Default for NutritionTargets {
    fn default() -> Self {
        Self::canonical()
    }
}

impl NutritionTargets {
    /// The Stage 1 canonical targets.
    pub fn canonical() -> Self {
        Self {
            calories: CANONICAL_CALORIES,
            protein: CANONICAL_PROTEIN,
            carbs: CANONICAL_CARBS,
            fat: CANONICAL_FAT,
        }
    }

    /// Validate that every target is a positive finite number.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("target_calories", self.calories),
            ("target_protein", self.protein),
            ("target_carbs", self.carbs),
            ("target_fat", self.fat),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(MealPlanError::invalid_config(
                    name,
                    format!("must be a positive finite number, got {}", value),
                ));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Reward Weights
// ============================================================================

/// Weights applied to the terminal reward's scored terms.
///
/// The disliked-tag penalty is intentionally unweighted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RewardWeights {
    /// Weight on the summed nutrition band scores.
    pub nutrition: f32,
    /// Weight on the budget discipline score.
    pub budget: f32,
    /// Weight on the category variety score.
    pub variety: f32,
}

impl Default for RewardWeights {
    fn default() -> Self {
        Self {
            nutrition: 1.0,
            budget: 0.5,
            variety: 0.3,
        }
    }
}

impl RewardWeights {
    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("weight_nutrition", self.nutrition),
            ("weight_budget", self.budget),
            ("weight_variety", self.variety),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(MealPlanError::invalid_config(
                    name,
                    format!("must be a non-negative finite number, got {}", value),
                ));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Main Environment Configuration
// ============================================================================

/// Configuration for [`MealPlanEnv`](crate::env::MealPlanEnv).
///
/// # Example
///
/// ```ignore
/// use mealplan_env::{MealPlanConfig, NutritionTargets};
///
/// // Training: the curriculum controller samples targets at reset.
/// let config = MealPlanConfig::new().with_seed(42);
///
/// // Evaluation: fixed targets restored verbatim on every reset.
/// let config = MealPlanConfig::evaluation(NutritionTargets::canonical(), 150.0)
///     .with_disliked_tags(vec!["fried".to_string()]);
/// ```
#[derive(Clone, Debug)]
pub struct MealPlanConfig {
    /// Evaluation-mode targets; also the pre-curriculum defaults.
    pub targets: NutritionTargets,
    /// Evaluation-mode budget limit (currency units).
    pub budget_limit: f32,
    /// Tags the user refuses to eat; fixed across resets.
    pub disliked_tags: Vec<String>,
    /// Terminal reward weights.
    pub weights: RewardWeights,
    /// Slots allotted to each of the three meals. max_slots = 3 × this.
    pub dishes_per_meal: usize,
    /// Training mode samples targets through the curriculum controller;
    /// evaluation mode restores the configured targets on every reset.
    pub training: bool,
    /// Seed for the curriculum sampling RNG.
    pub seed: u64,
}

impl Default for MealPlanConfig {
    fn default() -> Self {
        Self {
            targets: NutritionTargets::canonical(),
            budget_limit: CANONICAL_BUDGET,
            disliked_tags: Vec::new(),
            weights: RewardWeights::default(),
            dishes_per_meal: 2,
            training: true,
            seed: 0,
        }
    }
}

impl MealPlanConfig {
    /// Create a training-mode configuration with default targets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an evaluation-mode configuration with fixed targets.
    pub fn evaluation(targets: NutritionTargets, budget_limit: f32) -> Self {
        Self {
            targets,
            budget_limit,
            training: false,
            ..Self::default()
        }
    }

    /// Set the evaluation-mode nutrition targets.
    pub fn with_targets(mut self, targets: NutritionTargets) -> Self {
        self.targets = targets;
        self
    }

    /// Set the evaluation-mode budget limit.
    pub fn with_budget(mut self, budget_limit: f32) -> Self {
        self.budget_limit = budget_limit;
        self
    }

    /// Set the disliked tag list.
    pub fn with_disliked_tags(mut self, tags: Vec<String>) -> Self {
        self.disliked_tags = tags;
        self
    }

    /// Set terminal reward weights.
    pub fn with_weights(mut self, weights: RewardWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Set the number of dish slots per meal.
    pub fn with_dishes_per_meal(mut self, dishes_per_meal: usize) -> Self {
        self.dishes_per_meal = dishes_per_meal;
        self
    }

    /// Enable/disable training mode.
    pub fn with_training(mut self, training: bool) -> Self {
        self.training = training;
        self
    }

    /// Set the curriculum sampling seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Total slots per episode: three meals × dishes per meal.
    #[inline]
    pub fn max_slots(&self) -> usize {
        crate::catalog::MEAL_TYPES.len() * self.dishes_per_meal
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.dishes_per_meal == 0 {
            return Err(MealPlanError::invalid_config(
                "dishes_per_meal",
                "must be at least 1",
            ));
        }
        self.targets.validate()?;
        if !self.budget_limit.is_finite() || self.budget_limit <= 0.0 {
            return Err(MealPlanError::invalid_config(
                "budget_limit",
                format!("must be a positive finite number, got {}", self.budget_limit),
            ));
        }
        self.weights.validate()?;
        Ok(())
    }
}
