//! Shared nutrition data structures
//!
//! Used across foods, meals, goals, and daily summaries.

use serde::{Deserialize, Serialize};

/// Macro-nutrient values, per 100g on a food or accumulated during a
/// calculation
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NutrientProfile {
    pub calories: f64,
    pub protein: f64, // grams
    pub carbs: f64,   // grams
    pub fat: f64,     // grams
}

impl NutrientProfile {
    /// Create a NutrientProfile with all zeros
    pub fn zero() -> Self {
        Self::default()
    }

    /// Scale nutrient values by a multiplier
    pub fn scale(&self, multiplier: f64) -> Self {
        Self {
            calories: self.calories * multiplier,
            protein: self.protein * multiplier,
            carbs: self.carbs * multiplier,
            fat: self.fat * multiplier,
        }
    }

    /// Add another profile to this one
    pub fn add(&self, other: &NutrientProfile) -> Self {
        Self {
            calories: self.calories + other.calories,
            protein: self.protein + other.protein,
            carbs: self.carbs + other.carbs,
            fat: self.fat + other.fat,
        }
    }
}

impl std::ops::Add for NutrientProfile {
    type Output = NutrientProfile;

    fn add(self, other: NutrientProfile) -> NutrientProfile {
        NutrientProfile::add(&self, &other)
    }
}

impl std::ops::Mul<f64> for NutrientProfile {
    type Output = NutrientProfile;

    fn mul(self, multiplier: f64) -> NutrientProfile {
        self.scale(multiplier)
    }
}

impl std::iter::Sum for NutrientProfile {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(NutrientProfile::zero(), |acc, n| acc + n)
    }
}

/// Aggregated consumption for one calendar date, rounded to whole units.
///
/// Derived on demand, never stored. Rounding happens once at the end of a
/// calculation, not per item, to avoid compounding rounding error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NutritionSummary {
    pub calories: i64,
    pub protein: i64,
    pub carbs: i64,
    pub fat: i64,
}

/// Round to the nearest integer with halves going up: -7.5 becomes -7,
/// where `f64::round` would give -8
pub(crate) fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

impl From<NutrientProfile> for NutritionSummary {
    fn from(totals: NutrientProfile) -> Self {
        Self {
            calories: round_half_up(totals.calories),
            protein: round_half_up(totals.protein),
            carbs: round_half_up(totals.carbs),
            fat: round_half_up(totals.fat),
        }
    }
}
