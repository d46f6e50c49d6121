//! Legality mask tests: meal-type gating, affordability pruning, the
//! deadlock fallback, and the fail-open catalog guard.

use super::{scenario_catalog, test_dish, varied_catalog};
use crate::catalog::{Catalog, MealType};
use crate::config::{MealPlanConfig, NutritionTargets};
use crate::env::MealPlanEnv;
use crate::mask::MaskMode;

fn eval_config(budget: f32) -> MealPlanConfig {
    MealPlanConfig::evaluation(NutritionTargets::canonical(), budget).with_dishes_per_meal(1)
}

#[test]
fn scenario_mask_has_exactly_one_true_entry_per_slot() {
    let mut env = MealPlanEnv::new(scenario_catalog(), eval_config(150.0)).unwrap();
    env.reset();

    for expected_action in 0..3 {
        let mask = env.action_mask();
        assert_eq!(mask.count_admissible(), 1);
        assert!(mask.is_admissible(expected_action));
        env.step(expected_action);
    }
    assert!(!env.action_mask().any());
}

#[test]
fn mask_never_all_false_under_adversarial_budget() {
    // budget_limit = 1.0: nothing is ever affordable, the fallback carries
    // every slot.
    let mut env = MealPlanEnv::new(varied_catalog(), eval_config(1.0)).unwrap();
    env.reset();

    while !env.state().is_done() {
        let mask = env.action_mask();
        assert!(mask.any(), "all-false mask at slot {}", env.state().slot_index);
        env.step(mask.admissible_indices()[0]);
    }
}

#[test]
fn depleted_budget_falls_back_to_cheapest() {
    let catalog = Catalog::new(vec![
        test_dish(0, "pancake", "staple", &[MealType::Breakfast], 300.0, 18.0),
        test_dish(1, "rice", "staple", &[MealType::Lunch], 116.0, 1.5),
        test_dish(2, "beef noodles", "noodles", &[MealType::Lunch], 450.0, 18.0),
        test_dish(3, "stew", "meat", &[MealType::Dinner], 400.0, 20.0),
    ])
    .unwrap();
    // Budget 20: breakfast spends 18, leaving 2 + 2 buffer = 4 for lunch.
    let mut env = MealPlanEnv::new(catalog, eval_config(20.0)).unwrap();
    env.reset();
    env.step(0);

    let mask = env.action_mask();
    assert_eq!(mask.mode(), MaskMode::Standard);
    assert_eq!(mask.admissible_indices(), vec![1]);
    env.step(1);

    // Dinner: remaining 0.5 + buffer 2 cannot afford the 20-unit stew, so
    // the fallback admits it as the sole (cheapest) dinner dish.
    let mask = env.action_mask();
    assert_eq!(mask.mode(), MaskMode::CheapestFallback);
    assert_eq!(mask.admissible_indices(), vec![3]);
}

#[test]
fn fallback_admits_all_cheapest_ties() {
    let catalog = Catalog::new(vec![
        test_dish(0, "toast", "staple", &[MealType::Breakfast], 200.0, 9.0),
        test_dish(1, "bun", "staple", &[MealType::Breakfast], 250.0, 9.0),
        test_dish(2, "omelette", "egg", &[MealType::Breakfast], 300.0, 12.0),
    ])
    .unwrap();
    let mut env = MealPlanEnv::new(catalog, eval_config(1.0)).unwrap();
    env.reset();

    let mask = env.action_mask();
    assert_eq!(mask.mode(), MaskMode::CheapestFallback);
    assert_eq!(mask.admissible_indices(), vec![0, 1]);
}

#[test]
fn fail_open_admits_everything_for_unserved_meal() {
    // No dinner dish at all: a catalog defect the mask survives.
    let catalog = Catalog::new(vec![
        test_dish(0, "congee", "staple", &[MealType::Breakfast], 300.0, 5.0),
        test_dish(1, "rice", "staple", &[MealType::Lunch], 116.0, 1.5),
    ])
    .unwrap();
    let mut env = MealPlanEnv::new(catalog, eval_config(150.0)).unwrap();
    env.reset();
    env.step(0);
    env.step(1);

    let mask = env.action_mask();
    assert_eq!(mask.mode(), MaskMode::FailOpen);
    assert_eq!(mask.count_admissible(), 2);
}

#[test]
fn valid_actions_matches_mask() {
    let mut env = MealPlanEnv::new(varied_catalog(), eval_config(150.0)).unwrap();
    env.reset();

    let mask = env.action_mask();
    assert_eq!(env.valid_actions(), mask.admissible_indices());
    for action in env.valid_actions() {
        assert!(mask.is_admissible(action));
    }
}

#[test]
fn affordability_tracks_spend_within_episode() {
    let catalog = Catalog::new(vec![
        test_dish(0, "cheap breakfast", "staple", &[MealType::Breakfast], 300.0, 5.0),
        test_dish(1, "cheap lunch", "staple", &[MealType::Lunch], 300.0, 5.0),
        test_dish(2, "lavish lunch", "meat", &[MealType::Lunch], 600.0, 40.0),
        test_dish(3, "supper", "soup", &[MealType::Dinner], 300.0, 5.0),
    ])
    .unwrap();
    // Budget 40: after a 5-unit breakfast, remaining 35 + 4 buffer = 39
    // prunes the 40-unit lunch.
    let mut env = MealPlanEnv::new(catalog, eval_config(40.0)).unwrap();
    env.reset();

    // Before spending, 40 + 4 buffer admits both lunches, but the slot is
    // breakfast, so only the breakfast dish shows.
    assert_eq!(env.valid_actions(), vec![0]);
    env.step(0);
    assert_eq!(env.valid_actions(), vec![1]);
}
