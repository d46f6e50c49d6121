//! The meal-planning environment: reset/step orchestration over the
//! catalog, mask generator, reward engine, and curriculum controller.

use rand::SeedableRng;

use crate::catalog::{Catalog, MealType};
use crate::config::{MealPlanConfig, NutritionTargets};
use crate::constants::ILLEGAL_ACTION_PENALTY;
use crate::curriculum::{sample_targets, CurriculumStage};
use crate::error::Result;
use crate::mask::{compute_action_mask, ActionMask};
use crate::observation::Observation;
use crate::reward::{compute_dense, dense, terminal_reward, DenseReward};
use crate::rng::Xoshiro256StarStar;
use crate::state::{meal_type_for_slot, EpisodeState};

// ============================================================================
// Step and Reset Payloads
// ============================================================================

/// Episode metadata returned from `reset`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EpisodeMeta {
    /// Nutrition targets in force for this episode.
    pub targets: NutritionTargets,
    /// Budget limit for this episode.
    pub budget_limit: f32,
    /// Curriculum stage the targets were sampled under; `None` in
    /// evaluation mode, where the controller is bypassed.
    pub stage: Option<CurriculumStage>,
    /// Total decision slots in the episode.
    pub max_slots: usize,
}

/// Side-channel information emitted with every step.
#[derive(Clone, Debug, PartialEq)]
pub struct StepInfo {
    /// Name of the dish just selected; `None` on a contract violation.
    pub selected_dish: Option<String>,
    /// Cumulative spend after the step.
    pub cumulative_cost: f32,
    /// Cumulative calories after the step.
    pub cumulative_calories: f32,
    /// Slot number after the step.
    pub slot: usize,
    /// Distinct categories selected so far.
    pub distinct_categories: usize,
    /// Set when the caller submitted a mask-false action. The episode has
    /// been forcibly terminated; this signals a bug in the caller's mask
    /// handling, never a recoverable condition.
    pub contract_violation: bool,
}

/// Result of one environment step.
#[derive(Clone, Debug)]
pub struct StepOutcome {
    /// Observation after the step.
    pub observation: Observation,
    /// Dense shaping reward, or the terminal composite on the final step.
    pub reward: f32,
    /// Whether the episode has ended.
    pub terminated: bool,
    /// Always false: episodes end exactly at max_slots, never by time limit.
    pub truncated: bool,
    /// Structured step information.
    pub info: StepInfo,
}

// ============================================================================
// Environment
// ============================================================================

/// Single-instance, finite-horizon meal-planning environment.
///
/// One `reset` followed by exactly `max_slots` `step` calls per episode.
/// Instances hold no shared state and are meant to be replicated one per
/// worker by an external training harness, which drives the curriculum by
/// setting `global_step` on each instance.
///
/// # Example
///
/// ```ignore
/// use mealplan_env::{Catalog, MealPlanConfig, MealPlanEnv};
///
/// let catalog = Catalog::from_json_file("dishes.json")?;
/// let mut env = MealPlanEnv::new(catalog, MealPlanConfig::new().with_seed(42))?;
///
/// let (obs, meta) = env.reset();
/// loop {
///     let mask = env.action_mask();
///     let action = mask.admissible_indices()[0]; // policy goes here
///     let outcome = env.step(action);
///     if outcome.terminated {
///         break;
///     }
/// }
/// ```
pub struct MealPlanEnv {
    catalog: Catalog,
    config: MealPlanConfig,
    state: EpisodeState,
    dense_reward: DenseReward,
    rng: Xoshiro256StarStar,
    /// Training-harness step counter, read only at reset.
    global_step: u64,
    /// Set when a caller-contract breach forcibly ended the episode early.
    faulted: bool,
}

impl MealPlanEnv {
    /// Create an environment over a validated catalog and configuration.
    ///
    /// Fails on any invalid configuration; no partially initialized
    /// environment is ever returned.
    pub fn new(catalog: Catalog, config: MealPlanConfig) -> Result<Self> {
        config.validate()?;
        let state = EpisodeState::new(config.dishes_per_meal);
        let rng = Xoshiro256StarStar::seed_from_u64(config.seed);
        Ok(Self {
            catalog,
            config,
            state,
            dense_reward: dense(),
            rng,
            global_step: 0,
            faulted: false,
        })
    }

    /// The environment configuration.
    pub fn config(&self) -> &MealPlanConfig {
        &self.config
    }

    /// The dish catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Read access to the episode state.
    pub fn state(&self) -> &EpisodeState {
        &self.state
    }

    /// Size of the discrete action space (= catalog size).
    #[inline]
    pub fn num_actions(&self) -> usize {
        self.catalog.len()
    }

    /// Total decision slots per episode.
    #[inline]
    pub fn max_slots(&self) -> usize {
        self.state.max_slots
    }

    /// Set the global training step. Read by the curriculum controller at
    /// the next reset; has no effect mid-episode.
    pub fn set_global_step(&mut self, step: u64) {
        self.global_step = step;
    }

    /// The current global training step.
    #[inline]
    pub fn global_step(&self) -> u64 {
        self.global_step
    }

    /// Stage the curriculum controller would use at the next reset.
    #[inline]
    pub fn current_stage(&self) -> CurriculumStage {
        CurriculumStage::from_global_step(self.global_step)
    }

    /// Meal served at the given slot, for mapping plans back to meal names.
    #[inline]
    pub fn meal_type_for_slot(&self, slot: usize) -> Option<MealType> {
        meal_type_for_slot(slot, self.config.dishes_per_meal)
    }

    /// Begin a new episode.
    ///
    /// Training mode samples targets through the curriculum controller at
    /// the stage implied by `global_step`; evaluation mode restores the
    /// configured targets verbatim, with zero resampling.
    pub fn reset(&mut self) -> (Observation, EpisodeMeta) {
        let stage = if self.config.training {
            let stage = CurriculumStage::from_global_step(self.global_step);
            let sampled = sample_targets(
                stage,
                &mut self.rng,
                &self.catalog,
                self.config.dishes_per_meal,
            );
            log::debug!(
                "reset: stage {} targets {:?} budget {:.1}",
                stage.number(),
                sampled.nutrition,
                sampled.budget
            );
            self.state.begin_episode(
                sampled.nutrition,
                sampled.budget,
                self.config.disliked_tags.clone(),
            );
            Some(stage)
        } else {
            self.state.begin_episode(
                self.config.targets,
                self.config.budget_limit,
                self.config.disliked_tags.clone(),
            );
            None
        };
        self.faulted = false;

        let meta = EpisodeMeta {
            targets: self.state.targets,
            budget_limit: self.state.budget_limit,
            stage,
            max_slots: self.state.max_slots,
        };
        (Observation::encode(&self.state), meta)
    }

    /// Reseed the target sampler, then reset. Two environments reseeded with
    /// the same value produce identical target sequences.
    pub fn reset_seeded(&mut self, seed: u64) -> (Observation, EpisodeMeta) {
        self.rng = Xoshiro256StarStar::seed_from_u64(seed);
        self.reset()
    }

    /// Legality mask for the current slot.
    ///
    /// Never all-false while slots remain; all-false once the episode has
    /// ended (naturally or through a contract breach).
    pub fn action_mask(&self) -> ActionMask {
        if self.faulted {
            return ActionMask::all_false(self.catalog.len());
        }
        compute_action_mask(&self.state, &self.catalog)
    }

    /// Indices of the currently admissible actions.
    pub fn valid_actions(&self) -> Vec<usize> {
        self.action_mask().admissible_indices()
    }

    /// Take one step.
    ///
    /// **Contract**: `action` must be marked legal by the current mask.
    /// A mask-false action (including any step after termination) forcibly
    /// ends the episode with [`ILLEGAL_ACTION_PENALTY`] and sets
    /// `contract_violation` in the info; it is never silently repaired,
    /// because it signals a bug in the caller's mask handling.
    pub fn step(&mut self, action: usize) -> StepOutcome {
        let mask = self.action_mask();
        if !mask.is_admissible(action) {
            log::error!(
                "illegal action {} at slot {} despite masking; terminating episode",
                action,
                self.state.slot_index
            );
            self.faulted = true;
            self.state.episode_return += ILLEGAL_ACTION_PENALTY;
            return StepOutcome {
                observation: Observation::encode(&self.state),
                reward: ILLEGAL_ACTION_PENALTY,
                terminated: true,
                truncated: false,
                info: StepInfo {
                    selected_dish: None,
                    cumulative_cost: self.state.cumulative_cost,
                    cumulative_calories: self.state.cumulative_calories,
                    slot: self.state.slot_index,
                    distinct_categories: self.state.distinct_categories(),
                    contract_violation: true,
                },
            };
        }

        let dish = self
            .catalog
            .get(action)
            .expect("admissible action is within catalog range")
            .clone();
        self.state.record_selection(&dish);

        let terminated = self.state.is_done();
        let reward = if terminated {
            terminal_reward(&self.state, &self.config.weights)
        } else {
            compute_dense(&self.dense_reward, &self.state)
        };
        self.state.episode_return += reward;

        StepOutcome {
            observation: Observation::encode(&self.state),
            reward,
            terminated,
            truncated: false,
            info: StepInfo {
                selected_dish: Some(dish.name),
                cumulative_cost: self.state.cumulative_cost,
                cumulative_calories: self.state.cumulative_calories,
                slot: self.state.slot_index,
                distinct_categories: self.state.distinct_categories(),
                contract_violation: false,
            },
        }
    }

    /// Human-readable episode summary for debugging.
    pub fn render(&self) -> String {
        use std::fmt::Write;

        let mut out = String::new();
        let _ = writeln!(
            out,
            "slots {}/{} | calories {:.1}/{:.1} | protein {:.1}g | carbs {:.1}g | fat {:.1}g",
            self.state.slot_index,
            self.state.max_slots,
            self.state.cumulative_calories,
            self.state.targets.calories,
            self.state.cumulative_protein,
            self.state.cumulative_carbs,
            self.state.cumulative_fat,
        );
        let _ = writeln!(
            out,
            "spend {:.1}/{:.1} | return {:.2}",
            self.state.cumulative_cost, self.state.budget_limit, self.state.episode_return,
        );
        for (i, dish) in self.state.selections.iter().enumerate() {
            let meal = meal_type_for_slot(i, self.config.dishes_per_meal)
                .map(MealType::name)
                .unwrap_or("?");
            let _ = writeln!(
                out,
                "  {}. [{}] {} ({}) - {:.0} kcal - {:.1}",
                i + 1,
                meal,
                dish.name,
                dish.category,
                dish.calories,
                dish.price,
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Dish;

    fn dish(id: u32, name: &str, meal: MealType, calories: f32, price: f32) -> Dish {
        Dish {
            id,
            name: name.to_string(),
            category: "staple".to_string(),
            calories,
            protein: 10.0,
            carbs: 30.0,
            fat: 5.0,
            price,
            tags: vec![],
            meal_type: vec![meal],
        }
    }

    fn three_dish_catalog() -> Catalog {
        Catalog::new(vec![
            dish(0, "porridge", MealType::Breakfast, 300.0, 5.0),
            dish(1, "noodles", MealType::Lunch, 500.0, 10.0),
            dish(2, "stir fry", MealType::Dinner, 600.0, 8.0),
        ])
        .unwrap()
    }

    fn eval_env() -> MealPlanEnv {
        let config = MealPlanConfig::evaluation(NutritionTargets::canonical(), 150.0)
            .with_dishes_per_meal(1);
        MealPlanEnv::new(three_dish_catalog(), config).unwrap()
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let config = MealPlanConfig::new().with_budget(-1.0);
        assert!(MealPlanEnv::new(three_dish_catalog(), config).is_err());
    }

    #[test]
    fn test_reset_metadata() {
        let mut env = eval_env();
        let (obs, meta) = env.reset();
        assert_eq!(meta.max_slots, 3);
        assert_eq!(meta.stage, None);
        assert_eq!(meta.budget_limit, 150.0);
        assert_eq!(obs.progress, 0.0);
    }

    #[test]
    fn test_training_reset_reports_stage() {
        let config = MealPlanConfig::new().with_dishes_per_meal(1);
        let mut env = MealPlanEnv::new(three_dish_catalog(), config).unwrap();
        let (_, meta) = env.reset();
        assert_eq!(meta.stage, Some(CurriculumStage::Fixed));

        env.set_global_step(300_000);
        let (_, meta) = env.reset();
        assert_eq!(meta.stage, Some(CurriculumStage::Randomized));
    }

    #[test]
    fn test_step_advances_and_terminates() {
        let mut env = eval_env();
        env.reset();

        let o1 = env.step(0);
        assert!(!o1.terminated);
        assert_eq!(o1.info.slot, 1);
        assert_eq!(o1.info.selected_dish.as_deref(), Some("porridge"));

        let o2 = env.step(1);
        assert!(!o2.terminated);

        let o3 = env.step(2);
        assert!(o3.terminated);
        assert!(!o3.truncated);
        assert_eq!(o3.info.cumulative_calories, 1400.0);
        assert_eq!(o3.info.cumulative_cost, 23.0);
    }

    #[test]
    fn test_illegal_action_faults_episode() {
        let mut env = eval_env();
        env.reset();

        // Lunch dish at a breakfast slot: mask-false.
        let outcome = env.step(1);
        assert!(outcome.terminated);
        assert!(outcome.info.contract_violation);
        assert_eq!(outcome.reward, ILLEGAL_ACTION_PENALTY);
        assert_eq!(outcome.info.selected_dish, None);
        assert!(!env.action_mask().any());
    }

    #[test]
    fn test_meal_type_for_slot_mapping() {
        let env = eval_env();
        assert_eq!(env.meal_type_for_slot(0), Some(MealType::Breakfast));
        assert_eq!(env.meal_type_for_slot(1), Some(MealType::Lunch));
        assert_eq!(env.meal_type_for_slot(2), Some(MealType::Dinner));
        assert_eq!(env.meal_type_for_slot(3), None);
    }

    #[test]
    fn test_render_lists_selections() {
        let mut env = eval_env();
        env.reset();
        env.step(0);
        let rendered = env.render();
        assert!(rendered.contains("porridge"));
        assert!(rendered.contains("breakfast"));
    }
}
