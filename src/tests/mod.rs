//! Comprehensive tests for the meal-planning environment.
//!
//! These tests define the environment's observable behavior end to end,
//! on top of the per-module unit tests.
//!
//! ## Organization
//!
//! - `environment_tests`: reset/step API, info payloads, termination
//! - `mask_tests`: legality rules, deadlock fallback, fail-open guard
//! - `reward_tests`: dense shaping and terminal composite behavior
//! - `curriculum_tests`: stage mapping and target sampling regimes
//! - `edge_case_tests`: adversarial budgets, catalog defects, misuse
//! - `integration_tests`: full-episode scenarios

pub mod environment_tests;
pub mod mask_tests;

use crate::catalog::{Catalog, Dish, MealType};

/// Build a dish with the given macros; meals default from the slice.
pub(crate) fn test_dish(
    id: u32,
    name: &str,
    category: &str,
    meals: &[MealType],
    calories: f32,
    price: f32,
) -> Dish {
    Dish {
        id,
        name: name.to_string(),
        category: category.to_string(),
        calories,
        protein: calories * 0.05,
        carbs: calories * 0.125,
        fat: calories * 0.032,
        price,
        tags: vec![],
        meal_type: meals.to_vec(),
    }
}

/// The three-dish catalog from the acceptance scenario: one dish per meal.
pub(crate) fn scenario_catalog() -> Catalog {
    Catalog::new(vec![
        test_dish(0, "congee", "staple", &[MealType::Breakfast], 300.0, 5.0),
        test_dish(1, "beef noodles", "noodles", &[MealType::Lunch], 500.0, 10.0),
        test_dish(2, "fried rice", "staple", &[MealType::Dinner], 600.0, 8.0),
    ])
    .unwrap()
}

/// A varied catalog with several options per meal.
pub(crate) fn varied_catalog() -> Catalog {
    Catalog::new(vec![
        test_dish(0, "congee", "staple", &[MealType::Breakfast], 360.0, 3.0),
        test_dish(1, "soy milk", "drink", &[MealType::Breakfast], 85.0, 3.0),
        test_dish(2, "fried egg", "egg", &[MealType::Breakfast, MealType::Lunch, MealType::Dinner], 155.0, 2.5),
        test_dish(3, "rice", "staple", &[MealType::Lunch, MealType::Dinner], 116.0, 1.5),
        test_dish(4, "kung pao chicken", "meat", &[MealType::Lunch, MealType::Dinner], 280.0, 18.0),
        test_dish(5, "beef noodles", "noodles", &[MealType::Lunch, MealType::Dinner], 450.0, 18.0),
        test_dish(6, "stir-fried greens", "vegetable", &[MealType::Lunch, MealType::Dinner], 45.0, 3.0),
        test_dish(7, "braised pork", "meat", &[MealType::Lunch, MealType::Dinner], 489.0, 25.0),
        test_dish(8, "tomato egg soup", "soup", &[MealType::Dinner], 80.0, 6.0),
        test_dish(9, "steamed fish", "fish", &[MealType::Dinner], 206.0, 28.0),
    ])
    .unwrap()
}
