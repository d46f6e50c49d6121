//! Three-stage curriculum controller for episode target sampling.
//!
//! An externally maintained global step counter is read at reset time and
//! mapped deterministically to a stage; the stage decides how the episode's
//! nutrition targets and budget are drawn. Evaluation mode bypasses the
//! controller entirely.

use crate::catalog::Catalog;
use crate::config::NutritionTargets;
use crate::constants::*;
use crate::rng::{random_in, random_uniform, Xoshiro256StarStar};

// ============================================================================
// Curriculum Stage
// ============================================================================

/// Target-sampling regime, a pure function of the global training step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CurriculumStage {
    /// Stage 1: fixed canonical targets, zero variance.
    Fixed,
    /// Stage 2: light jitter around the canonical setup, fixed macro split.
    Jittered,
    /// Stage 3: full randomization across calories, budget, and diet modes.
    Randomized,
}

impl CurriculumStage {
    /// Map a global step counter to its stage.
    #[inline]
    pub fn from_global_step(step: u64) -> Self {
        if step < STAGE2_START_STEP {
            Self::Fixed
        } else if step < STAGE3_START_STEP {
            Self::Jittered
        } else {
            Self::Randomized
        }
    }

    /// Stage number (1-based), for logging and episode metadata.
    #[inline]
    pub fn number(self) -> u8 {
        match self {
            Self::Fixed => 1,
            Self::Jittered => 2,
            Self::Randomized => 3,
        }
    }
}

// ============================================================================
// Diet Mode (Stage 3)
// ============================================================================

/// Macro-split regime drawn in Stage 3.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DietMode {
    Keto,
    HighProtein,
    Balanced,
}

impl DietMode {
    fn draw(rng: &mut Xoshiro256StarStar) -> Self {
        let u = random_uniform(rng, 0.0, 1.0);
        if u < 0.2 {
            Self::Keto
        } else if u < 0.5 {
            Self::HighProtein
        } else {
            Self::Balanced
        }
    }

    /// Sample (protein, carb, fat) calorie-share ratios for this mode.
    fn sample_ratios(self, rng: &mut Xoshiro256StarStar) -> (f32, f32, f32) {
        match self {
            Self::Keto => {
                let carb = random_uniform(rng, 0.05, 0.15);
                let protein = random_uniform(rng, 0.20, 0.35);
                let fat = 1.0 - protein - carb;
                (protein, carb, fat)
            }
            Self::HighProtein => {
                let protein = random_uniform(rng, 0.30, 0.50);
                let fat = random_uniform(rng, 0.15, 0.25);
                let carb = 1.0 - protein - fat;
                (protein, carb, fat)
            }
            Self::Balanced => {
                let protein = random_uniform(rng, 0.15, 0.25);
                let fat = random_uniform(rng, 0.20, 0.35);
                let carb = 1.0 - protein - fat;
                (protein, carb, fat)
            }
        }
    }
}

// ============================================================================
// Sampled Episode Targets
// ============================================================================

/// One reset's worth of sampled episode parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EpisodeTargets {
    /// Nutrition targets for the episode.
    pub nutrition: NutritionTargets,
    /// Budget limit for the episode.
    pub budget: f32,
}

/// Derive gram targets from a calorie budget and normalized macro shares.
fn macros_from_ratios(calories: f32, protein: f32, carb: f32, fat: f32) -> NutritionTargets {
    // Normalize so the shares sum to exactly 1 despite float drift.
    let total = protein + carb + fat;
    let protein = protein / total;
    let carb = carb / total;
    let fat = fat / total;

    NutritionTargets {
        calories,
        protein: calories * protein / KCAL_PER_G_PROTEIN,
        carbs: calories * carb / KCAL_PER_G_CARBS,
        fat: calories * fat / KCAL_PER_G_FAT,
    }
}

/// Sample episode targets for the given stage.
///
/// The catalog is consulted only by Stage 3's feasibility floor, which
/// raises the sampled budget to at least [`FEASIBILITY_MARGIN`] times the
/// cheapest-full-plan estimate so tight draws stay solvable.
pub fn sample_targets(
    stage: CurriculumStage,
    rng: &mut Xoshiro256StarStar,
    catalog: &Catalog,
    dishes_per_meal: usize,
) -> EpisodeTargets {
    match stage {
        CurriculumStage::Fixed => EpisodeTargets {
            nutrition: NutritionTargets::canonical(),
            budget: CANONICAL_BUDGET,
        },
        CurriculumStage::Jittered => {
            let calories = random_uniform(rng, 1800.0, 2200.0);
            let budget = random_uniform(rng, 120.0, 180.0);
            EpisodeTargets {
                nutrition: macros_from_ratios(calories, 0.20, 0.50, 0.30),
                budget,
            }
        }
        CurriculumStage::Randomized => {
            let calories = random_in(rng, STAGE3_CALORIE_RANGE);

            let rate = random_in(rng, STAGE3_COST_RATE_RANGE);
            let budget = (calories / 100.0 * rate)
                .clamp(STAGE3_BUDGET_BOUNDS.0, STAGE3_BUDGET_BOUNDS.1);

            let (protein, carb, fat) = DietMode::draw(rng).sample_ratios(rng);

            let floor = FEASIBILITY_MARGIN * catalog.min_plan_cost(dishes_per_meal);
            EpisodeTargets {
                nutrition: macros_from_ratios(calories, protein, carb, fat),
                budget: budget.max(floor),
            }
        }
    }
}
