//! Daily goal model
//!
//! Target calorie and macro values for one day.

use serde::{Deserialize, Serialize};

/// The calorie/macro targets a user aims to hit in one day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyGoal {
    pub calories: f64,
    pub protein: f64, // grams
    pub carbs: f64,   // grams
    pub fat: f64,     // grams
}

impl Default for DailyGoal {
    /// The process-wide default goal, used when no plan overrides it
    fn default() -> Self {
        Self {
            calories: 2000.0,
            protein: 120.0,
            carbs: 200.0,
            fat: 70.0,
        }
    }
}
