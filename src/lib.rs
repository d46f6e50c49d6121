//! Meal-Planning RL Environment
//!
//! A single-episode, finite-horizon decision environment that models one
//! day's meal selection as a sequential choice problem. At each of a fixed
//! number of slots an agent picks one dish from a catalog, subject to
//! per-slot legality constraints, and receives a reward blending nutrition
//! accuracy, budget discipline, and dish variety.
//!
//! # Features
//!
//! - **Action Masking**: per-slot meal-type and affordability legality with
//!   a deadlock fallback keeping the mask from going all-false mid-episode
//! - **Dense + Terminal Rewards**: linear-pace shaping terms composed at
//!   compile time, replaced by a banded composite on the final step
//! - **Three-Stage Curriculum**: an externally advanced step counter
//!   reshapes target sampling from fixed canonical values to fully
//!   randomized diet modes
//! - **Fixed-Shape Payloads**: observations and step info are named-field
//!   structs with documented flat layouts, not string maps
//!
//! # Example
//!
//! ```rust,ignore
//! use mealplan_env::{Catalog, MealPlanConfig, MealPlanEnv};
//!
//! let catalog = Catalog::from_json_file("dishes.json")?;
//! let mut env = MealPlanEnv::new(catalog, MealPlanConfig::new().with_seed(42))?;
//!
//! // Harness drives the curriculum.
//! env.set_global_step(150_000);
//!
//! let (obs, meta) = env.reset();
//! loop {
//!     let mask = env.action_mask();
//!     let action = mask.admissible_indices()[0]; // policy choice goes here
//!     let outcome = env.step(action);
//!     if outcome.terminated {
//!         break;
//!     }
//! }
//! ```
//!
//! # Integration
//!
//! The environment is single-threaded and synchronous; a parallel training
//! harness replicates one instance per worker and sets `global_step` on
//! each. The external learner consumes `(observation, reward, mask)`
//! triples and must restrict its action choice to mask-true indices; a
//! mask-false action forcibly terminates the episode with a fixed penalty.

// Core modules
pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod state;

// Environment components
pub mod curriculum;
pub mod mask;
pub mod observation;
pub mod reward;

// Orchestration
pub mod env;

// Support
pub mod rng;

// Comprehensive test suite
#[cfg(test)]
pub mod tests;

// Re-exports for convenience
pub use catalog::{Catalog, Dish, MealType, MEAL_TYPES};
pub use config::{MealPlanConfig, NutritionTargets, RewardWeights};
pub use curriculum::{sample_targets, CurriculumStage, EpisodeTargets};
pub use env::{EpisodeMeta, MealPlanEnv, StepInfo, StepOutcome};
pub use error::{MealPlanError, Result};
pub use mask::{compute_action_mask, ActionMask, MaskMode};
pub use observation::{Observation, OBS_SIZE};
pub use state::{meal_type_for_slot, EpisodeState};

// Re-export reward types for easy access
pub use reward::components::{BudgetPace, CalorieProgress, DiversityBonus, DuplicatePenalty};
pub use reward::{dense, score, terminal_reward, DenseReward, RewardTerm};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
