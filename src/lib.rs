//! NutriTrack Core
//!
//! Nutrition-tracking engine: foods, meals, daily goals, nutrition plans,
//! and the aggregation/goal-resolution logic that measures consumption
//! against them. Presentation layers call in and render the results.

pub mod engine;
pub mod models;
pub mod repository;
pub mod store;

pub use repository::NutritionRepository;
