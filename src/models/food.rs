//! Food model
//!
//! A food with its nutrient profile per 100g.

use serde::{Deserialize, Serialize};

use super::NutrientProfile;

/// A food with nutritional information per 100g
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Food {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub nutrients: NutrientProfile,
    /// Default reference portion in grams
    pub serving_size: f64,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for creating a new food
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodCreate {
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub serving_size: f64,
}

impl FoodCreate {
    /// The per-100g nutrient profile of the new food
    pub fn nutrients(&self) -> NutrientProfile {
        NutrientProfile {
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
        }
    }
}
