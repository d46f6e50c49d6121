//! Physical constants and canonical parameters for the meal-planning
//! environment.
//!
//! Gram-to-kilocalorie conversions, curriculum stage boundaries, reward
//! band edges, and the Stage 1 canonical episode targets live here so the
//! rest of the crate never hard-codes magic numbers inline.

// ============================================================================
// Macronutrient Energy Density
// ============================================================================

/// Kilocalories per gram of protein.
pub const KCAL_PER_G_PROTEIN: f32 = 4.0;
/// Kilocalories per gram of carbohydrate.
pub const KCAL_PER_G_CARBS: f32 = 4.0;
/// Kilocalories per gram of fat.
pub const KCAL_PER_G_FAT: f32 = 9.0;

// ============================================================================
// Canonical Targets (Curriculum Stage 1)
// ============================================================================

/// Stage 1 calorie target (kcal).
pub const CANONICAL_CALORIES: f32 = 2000.0;
/// Stage 1 protein target (g).
pub const CANONICAL_PROTEIN: f32 = 100.0;
/// Stage 1 carbohydrate target (g).
pub const CANONICAL_CARBS: f32 = 250.0;
/// Stage 1 fat target (g).
pub const CANONICAL_FAT: f32 = 65.0;
/// Stage 1 budget limit (currency units).
pub const CANONICAL_BUDGET: f32 = 150.0;

// ============================================================================
// Curriculum Stage Boundaries
// ============================================================================

/// Global training step at which Stage 2 (jittered targets) begins.
pub const STAGE2_START_STEP: u64 = 100_000;
/// Global training step at which Stage 3 (full randomization) begins.
pub const STAGE3_START_STEP: u64 = 300_000;

// ============================================================================
// Stage 3 Sampling Ranges
// ============================================================================

/// Stage 3 calorie target range (kcal).
pub const STAGE3_CALORIE_RANGE: (f32, f32) = (1200.0, 3000.0);
/// Stage 3 cost rate range, currency units per 100 kcal.
pub const STAGE3_COST_RATE_RANGE: (f32, f32) = (4.0, 9.0);
/// Stage 3 budget clamp bounds (currency units).
pub const STAGE3_BUDGET_BOUNDS: (f32, f32) = (40.0, 200.0);
/// Multiplier over the cheapest-full-plan estimate below which the sampled
/// budget is raised to keep episodes solvable.
pub const FEASIBILITY_MARGIN: f32 = 1.2;

// ============================================================================
// Legality / Masking
// ============================================================================

/// Fraction of the episode budget granted as late-episode overshoot slack
/// when testing affordability.
pub const BUDGET_BUFFER_FRACTION: f32 = 0.10;

// ============================================================================
// Reward Constants
// ============================================================================

/// Fixed reward emitted when the caller submits a mask-false action.
/// The episode is forcibly terminated; this is a caller-contract breach.
pub const ILLEGAL_ACTION_PENALTY: f32 = -50.0;

/// Dense calorie-progress band edges (kcal deviation from the ideal pace).
pub const CALORIE_PACE_FULL_CREDIT: f32 = 100.0;
pub const CALORIE_PACE_ZERO: f32 = 300.0;
pub const CALORIE_PACE_FLOOR: f32 = 500.0;

/// Dense budget-pace band edges (currency units over the ideal pace).
pub const BUDGET_PACE_ZERO: f32 = 10.0;
pub const BUDGET_PACE_FLOOR: f32 = 20.0;

// ============================================================================
// Observation Encoding
// ============================================================================

/// Every observation component is clipped into this range.
pub const OBS_CLIP: (f32, f32) = (-2.0, 2.0);
