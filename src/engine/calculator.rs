//! Nutrient calculator
//!
//! Turns logged meals and per-100g food profiles into absolute daily
//! nutrition. Pure functions over borrowed collections.

use crate::models::{Food, Meal, NutrientProfile, NutritionSummary};

/// Sum the nutrient contributions of one meal's items.
///
/// Each item scales its food's per-100g profile by `quantity / 100`. Items
/// whose food lookup fails contribute nothing.
pub fn meal_totals(meal: &Meal, foods: &[Food]) -> NutrientProfile {
    meal.items
        .iter()
        .filter_map(|item| {
            let food = foods.iter().find(|f| f.id == item.food_id)?;
            Some(food.nutrients.scale(item.quantity / 100.0))
        })
        .sum()
}

/// Nutrition for a single meal, rounded
pub fn meal_nutrition(meal: &Meal, foods: &[Food]) -> NutritionSummary {
    meal_totals(meal, foods).into()
}

/// Aggregate nutrition consumed on one calendar date.
///
/// Meals are matched by exact string equality on `date`; the caller supplies
/// a canonical `YYYY-MM-DD` string. Sums stay in f64 until the end so
/// rounding never compounds per item.
pub fn calculate_daily_nutrition(date: &str, meals: &[Meal], foods: &[Food]) -> NutritionSummary {
    meals
        .iter()
        .filter(|meal| meal.date == date)
        .map(|meal| meal_totals(meal, foods))
        .sum::<NutrientProfile>()
        .into()
}
