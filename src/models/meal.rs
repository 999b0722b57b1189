//! Meal model
//!
//! A named collection of food quantities logged for one calendar date.

use serde::{Deserialize, Serialize};

/// One food quantity inside a meal.
///
/// `food_id` is a reference, not ownership: the food is looked up at read
/// time, and a dangling reference contributes zero nutrition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealItem {
    pub id: String,
    pub food_id: String,
    /// Consumed amount in grams
    pub quantity: f64,
}

/// A meal logged for a single date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub id: String,
    pub name: String,
    /// ISO calendar date: "2024-01-15"
    pub date: String,
    /// 24-hour "HH:MM"; fixed width, so lexicographic order is time order
    pub time: String,
    pub items: Vec<MealItem>,
}

/// Data for creating a meal item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealItemCreate {
    pub food_id: String,
    pub quantity: f64,
}

/// Data for creating a meal
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealCreate {
    pub name: String,
    pub date: String,
    pub time: String,
    pub items: Vec<MealItemCreate>,
}
