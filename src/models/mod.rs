//! Data models
//!
//! Rust structs for the persisted entities and derived values.

mod food;
mod goal;
mod meal;
mod nutrition;
mod plan;
mod weight;

pub use food::{Food, FoodCreate};
pub use goal::DailyGoal;
pub use meal::{Meal, MealCreate, MealItem, MealItemCreate};
pub(crate) use nutrition::round_half_up;
pub use nutrition::{NutrientProfile, NutritionSummary};
pub use plan::{LegacyPlan, LegacyPlanDay, NutritionPlan, PlanCategory, PlanCreate, PlanSchedule};
pub use weight::{WeightRecord, WeightRecordCreate};
