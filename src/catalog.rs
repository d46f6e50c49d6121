//! Dish records and the immutable catalog they are loaded into.
//!
//! The catalog is built once, validated eagerly, and never mutated
//! afterwards. Catalog indices double as action identifiers for the
//! environment's discrete action space.

use serde::{Deserialize, Serialize};

use crate::error::{MealPlanError, Result};

// ============================================================================
// Meal Type
// ============================================================================

/// The three daily meals, in fixed slot order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

/// All meal types in slot order (breakfast → lunch → dinner).
pub const MEAL_TYPES: [MealType; 3] = [MealType::Breakfast, MealType::Lunch, MealType::Dinner];

impl MealType {
    /// Index of this meal type in the fixed slot order.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            MealType::Breakfast => 0,
            MealType::Lunch => 1,
            MealType::Dinner => 2,
        }
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
        }
    }
}

// ============================================================================
// Dish
// ============================================================================

/// One dish record. Immutable once the catalog is constructed.
///
/// Every field is required at ingestion; a record missing any of them is a
/// fatal construction-time error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    /// Stable identifier from the source database.
    pub id: u32,
    /// Display name; duplicate-selection checks compare by name.
    pub name: String,
    /// Single category tag (e.g. staple, meat, vegetable).
    pub category: String,
    /// Energy (kcal).
    pub calories: f32,
    /// Protein (g).
    pub protein: f32,
    /// Carbohydrates (g).
    pub carbs: f32,
    /// Fat (g).
    pub fat: f32,
    /// Price (currency units).
    pub price: f32,
    /// Free-form descriptive tags; matched against episode dislikes.
    pub tags: Vec<String>,
    /// Meals this dish may be served at. Must be non-empty.
    pub meal_type: Vec<MealType>,
}

impl Dish {
    /// Whether this dish may be served at the given meal.
    #[inline]
    pub fn serves(&self, meal: MealType) -> bool {
        self.meal_type.contains(&meal)
    }

    /// Whether any of this dish's tags appears in the given dislike list.
    pub fn has_disliked_tag(&self, disliked: &[String]) -> bool {
        self.tags.iter().any(|t| disliked.contains(t))
    }

    fn validate(&self, index: usize) -> Result<()> {
        let fail = |reason: &str| {
            Err(MealPlanError::InvalidDish {
                index,
                reason: reason.to_string(),
            })
        };

        if self.name.is_empty() {
            return fail("empty name");
        }
        if self.category.is_empty() {
            return fail("empty category");
        }
        if self.meal_type.is_empty() {
            return fail("no meal types");
        }
        if !self.calories.is_finite() || self.calories < 0.0 {
            return fail("calories must be a non-negative finite number");
        }
        if !self.protein.is_finite() || self.protein < 0.0 {
            return fail("protein must be a non-negative finite number");
        }
        if !self.carbs.is_finite() || self.carbs < 0.0 {
            return fail("carbs must be a non-negative finite number");
        }
        if !self.fat.is_finite() || self.fat < 0.0 {
            return fail("fat must be a non-negative finite number");
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return fail("price must be a non-negative finite number");
        }
        Ok(())
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// On-disk catalog layout: a single `dishes` array.
#[derive(Deserialize)]
struct CatalogFile {
    dishes: Vec<Dish>,
}

/// Immutable, ordered dish collection. Indices are action identifiers.
#[derive(Clone, Debug)]
pub struct Catalog {
    dishes: Vec<Dish>,
}

impl Catalog {
    /// Build a catalog from dish records, validating every record.
    ///
    /// Fails on an empty collection or any malformed dish; no partially
    /// validated catalog is ever returned.
    pub fn new(dishes: Vec<Dish>) -> Result<Self> {
        if dishes.is_empty() {
            return Err(MealPlanError::EmptyCatalog);
        }
        for (index, dish) in dishes.iter().enumerate() {
            dish.validate(index)?;
        }
        Ok(Self { dishes })
    }

    /// Parse a catalog from a JSON document of the form `{"dishes": [...]}`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::new(file.dishes)
    }

    /// Load a catalog from a JSON file.
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Number of dishes (= size of the action space).
    #[inline]
    pub fn len(&self) -> usize {
        self.dishes.len()
    }

    /// A validated catalog is never empty, but the standard pairing is kept.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }

    /// Dish at the given action index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Dish> {
        self.dishes.get(index)
    }

    /// Iterate over all dishes in action order.
    pub fn iter(&self) -> impl Iterator<Item = &Dish> {
        self.dishes.iter()
    }

    /// Iterate over (index, dish) pairs for dishes serving the given meal.
    pub fn dishes_for_meal(&self, meal: MealType) -> impl Iterator<Item = (usize, &Dish)> {
        self.dishes
            .iter()
            .enumerate()
            .filter(move |(_, d)| d.serves(meal))
    }

    /// Lowest price among dishes serving the given meal, if any serve it.
    pub fn cheapest_price_for_meal(&self, meal: MealType) -> Option<f32> {
        self.dishes_for_meal(meal)
            .map(|(_, d)| d.price)
            .fold(None, |min, p| match min {
                Some(m) if m <= p => Some(m),
                _ => Some(p),
            })
    }

    /// Estimated minimum cost of filling every slot of an episode with the
    /// cheapest dish legal for that slot's meal.
    ///
    /// Meals with no serving dish contribute nothing; that catalog defect is
    /// handled by the mask generator's fail-open guard, not here.
    pub fn min_plan_cost(&self, dishes_per_meal: usize) -> f32 {
        MEAL_TYPES
            .iter()
            .filter_map(|&meal| self.cheapest_price_for_meal(meal))
            .map(|p| p * dishes_per_meal as f32)
            .sum()
    }
}
