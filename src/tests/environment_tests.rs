//! Environment API tests: reset/step lifecycle, info payloads, and the
//! bookkeeping invariants of the episode state machine.

use super::{scenario_catalog, varied_catalog};
use crate::config::{MealPlanConfig, NutritionTargets};
use crate::env::MealPlanEnv;

fn eval_config() -> MealPlanConfig {
    MealPlanConfig::evaluation(NutritionTargets::canonical(), 150.0).with_dishes_per_meal(1)
}

/// Step through an episode always taking the first admissible action.
fn run_masked_episode(env: &mut MealPlanEnv) -> Vec<crate::env::StepOutcome> {
    let mut outcomes = Vec::new();
    loop {
        let mask = env.action_mask();
        let action = mask.admissible_indices()[0];
        let outcome = env.step(action);
        let done = outcome.terminated;
        outcomes.push(outcome);
        if done {
            break;
        }
    }
    outcomes
}

#[test]
fn slot_index_equals_steps_taken() {
    let mut env = MealPlanEnv::new(varied_catalog(), MealPlanConfig::new().with_dishes_per_meal(2))
        .unwrap();
    env.reset();

    for expected in 1..=env.max_slots() {
        let action = env.action_mask().admissible_indices()[0];
        let outcome = env.step(action);
        assert_eq!(outcome.info.slot, expected);
        assert_eq!(env.state().slot_index, expected);
    }
}

#[test]
fn terminates_exactly_at_max_slots() {
    let mut env = MealPlanEnv::new(varied_catalog(), eval_config()).unwrap();
    env.reset();

    let outcomes = run_masked_episode(&mut env);
    assert_eq!(outcomes.len(), env.max_slots());
    for outcome in &outcomes[..outcomes.len() - 1] {
        assert!(!outcome.terminated);
    }
    assert!(outcomes.last().unwrap().terminated);
}

#[test]
fn truncated_is_always_false() {
    let mut env = MealPlanEnv::new(varied_catalog(), eval_config()).unwrap();
    env.reset();
    for outcome in run_masked_episode(&mut env) {
        assert!(!outcome.truncated);
    }
}

#[test]
fn cumulative_totals_match_recomputed_sums() {
    let mut env = MealPlanEnv::new(
        varied_catalog(),
        MealPlanConfig::new().with_dishes_per_meal(2).with_seed(5),
    )
    .unwrap();

    for _ in 0..5 {
        env.reset();
        run_masked_episode(&mut env);

        let state = env.state();
        let sum = |f: fn(&crate::catalog::Dish) -> f32| -> f32 {
            state.selections.iter().map(f).sum()
        };
        assert_eq!(state.cumulative_calories, sum(|d| d.calories));
        assert_eq!(state.cumulative_protein, sum(|d| d.protein));
        assert_eq!(state.cumulative_carbs, sum(|d| d.carbs));
        assert_eq!(state.cumulative_fat, sum(|d| d.fat));
        assert_eq!(state.cumulative_cost, sum(|d| d.price));
    }
}

#[test]
fn info_reports_selection_details() {
    let mut env = MealPlanEnv::new(scenario_catalog(), eval_config()).unwrap();
    env.reset();

    let outcome = env.step(0);
    assert_eq!(outcome.info.selected_dish.as_deref(), Some("congee"));
    assert_eq!(outcome.info.cumulative_cost, 5.0);
    assert_eq!(outcome.info.cumulative_calories, 300.0);
    assert_eq!(outcome.info.slot, 1);
    assert_eq!(outcome.info.distinct_categories, 1);
    assert!(!outcome.info.contract_violation);
}

#[test]
fn evaluation_resets_restore_targets_exactly() {
    let targets = NutritionTargets {
        calories: 1800.0,
        protein: 90.0,
        carbs: 225.0,
        fat: 60.0,
    };
    let config = MealPlanConfig::evaluation(targets, 130.0).with_dishes_per_meal(1);
    let mut env = MealPlanEnv::new(varied_catalog(), config).unwrap();

    // Even with the global step deep in Stage 3 territory, evaluation mode
    // must not let curriculum logic leak in.
    env.set_global_step(1_000_000);
    for _ in 0..10 {
        let (_, meta) = env.reset();
        assert_eq!(meta.targets, targets);
        assert_eq!(meta.budget_limit, 130.0);
        assert_eq!(meta.stage, None);
        run_masked_episode(&mut env);
    }
}

#[test]
fn seeded_resets_are_deterministic() {
    let config = MealPlanConfig::new().with_dishes_per_meal(1);
    let mut a = MealPlanEnv::new(varied_catalog(), config.clone()).unwrap();
    let mut b = MealPlanEnv::new(varied_catalog(), config).unwrap();
    a.set_global_step(400_000);
    b.set_global_step(400_000);

    let (_, meta_a) = a.reset_seeded(77);
    let (_, meta_b) = b.reset_seeded(77);
    assert_eq!(meta_a.targets, meta_b.targets);
    assert_eq!(meta_a.budget_limit, meta_b.budget_limit);
}

#[test]
fn episode_return_accumulates_emitted_rewards() {
    let mut env = MealPlanEnv::new(varied_catalog(), eval_config()).unwrap();
    env.reset();

    let total: f32 = run_masked_episode(&mut env).iter().map(|o| o.reward).sum();
    assert!((env.state().episode_return - total).abs() < 1e-4);
}

#[test]
fn disliked_tags_are_fixed_across_resets() {
    let config = eval_config().with_disliked_tags(vec!["fried".to_string()]);
    let mut env = MealPlanEnv::new(varied_catalog(), config).unwrap();
    for _ in 0..3 {
        env.reset();
        assert_eq!(env.state().disliked_tags, vec!["fried".to_string()]);
    }
}
