//! Nutrition repository
//!
//! Owns the in-memory entity collections (foods, meals, goal, plans, active
//! plan pointer), persisting each record through the key-value store after
//! every mutation. The engine reads snapshots from here and never mutates.

use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

use crate::engine::{
    active_plan_goals_for_date, build_window_report, calculate_daily_nutrition, weight_stats,
    DateWindow, WeightStats, WindowReport,
};
use crate::models::{
    DailyGoal, Food, FoodCreate, Meal, MealCreate, MealItem, NutritionPlan, NutritionSummary,
    PlanCreate, WeightRecord, WeightRecordCreate,
};
use crate::store::migrations::run_migrations;
use crate::store::{
    KvStore, StoreResult, ACTIVE_PLAN_KEY, FOODS_KEY, GOAL_KEY, MEALS_KEY, PLANS_KEY,
    WEIGHT_RECORDS_KEY,
};

/// Current RFC 3339 timestamp with millisecond precision
fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Fresh unique entity identifier
fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Negative quantities are clamped at this boundary; the engine downstream
/// treats whatever it sees as a plain scaling factor
fn clamp_quantity(quantity: f64) -> f64 {
    if quantity < 0.0 {
        tracing::warn!(quantity, "clamping negative meal item quantity to zero");
        0.0
    } else {
        quantity
    }
}

/// In-memory entity collections backed by a key-value store
pub struct NutritionRepository<S: KvStore> {
    store: S,
    foods: Vec<Food>,
    meals: Vec<Meal>,
    daily_goal: DailyGoal,
    plans: Vec<NutritionPlan>,
    active_plan_id: Option<String>,
    weight_records: Vec<WeightRecord>,
}

impl<S: KvStore> NutritionRepository<S> {
    /// Load the persisted snapshot, running any pending migrations first.
    ///
    /// Missing records start empty (or at the default goal) so a fresh store
    /// needs no seeding step.
    pub fn load(store: S) -> StoreResult<Self> {
        run_migrations(&store)?;

        let foods: Vec<Food> = store.get(FOODS_KEY)?.unwrap_or_default();
        let meals: Vec<Meal> = store.get(MEALS_KEY)?.unwrap_or_default();
        let daily_goal: DailyGoal = store.get(GOAL_KEY)?.unwrap_or_default();
        let plans: Vec<NutritionPlan> = store.get(PLANS_KEY)?.unwrap_or_default();
        let active_plan_id: Option<String> = store.get(ACTIVE_PLAN_KEY)?.flatten();
        let weight_records: Vec<WeightRecord> = store.get(WEIGHT_RECORDS_KEY)?.unwrap_or_default();

        tracing::debug!(
            foods = foods.len(),
            meals = meals.len(),
            plans = plans.len(),
            "loaded nutrition snapshot"
        );

        Ok(Self {
            store,
            foods,
            meals,
            daily_goal,
            plans,
            active_plan_id,
            weight_records,
        })
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    pub fn meals(&self) -> &[Meal] {
        &self.meals
    }

    pub fn daily_goal(&self) -> &DailyGoal {
        &self.daily_goal
    }

    pub fn plans(&self) -> &[NutritionPlan] {
        &self.plans
    }

    pub fn active_plan_id(&self) -> Option<&str> {
        self.active_plan_id.as_deref()
    }

    /// Weight records, newest first
    pub fn weight_records(&self) -> &[WeightRecord] {
        &self.weight_records
    }

    /// Weight trend statistics, with min/max narrowed to `recent`
    pub fn weight_stats(&self, recent: &DateWindow) -> Option<WeightStats> {
        weight_stats(&self.weight_records, recent)
    }

    /// Look up a food by id
    pub fn food(&self, id: &str) -> Option<&Food> {
        self.foods.iter().find(|f| f.id == id)
    }

    /// Meals logged for one calendar date, in insertion order
    pub fn meals_for_date(&self, date: &str) -> Vec<&Meal> {
        self.meals.iter().filter(|m| m.date == date).collect()
    }

    /// Aggregated consumption for one calendar date
    pub fn daily_nutrition(&self, date: &str) -> NutritionSummary {
        calculate_daily_nutrition(date, &self.meals, &self.foods)
    }

    /// The active plan's goal for a date, when one resolves
    pub fn active_plan_goals(&self, date: &str) -> Option<DailyGoal> {
        active_plan_goals_for_date(date, self.active_plan_id(), &self.plans)
    }

    /// The goal that applies to a date: the active plan's resolved goal,
    /// falling back to the default goal
    pub fn goal_for_date(&self, date: &str) -> DailyGoal {
        self.active_plan_goals(date).unwrap_or(self.daily_goal)
    }

    /// Per-day progress and trend statistics over a date window
    pub fn window_report(&self, window: &DateWindow) -> WindowReport {
        build_window_report(
            window,
            &self.meals,
            &self.foods,
            &self.daily_goal,
            self.active_plan_id(),
            &self.plans,
        )
    }

    // ------------------------------------------------------------------
    // Food mutations
    // ------------------------------------------------------------------

    /// Add a food, assigning a fresh id and timestamps
    pub fn add_food(&mut self, data: FoodCreate) -> StoreResult<Food> {
        let now = now_iso();
        let food = Food {
            id: new_id(),
            name: data.name.clone(),
            nutrients: data.nutrients(),
            serving_size: data.serving_size,
            created_at: now.clone(),
            updated_at: now,
        };

        self.foods.push(food.clone());
        self.store.put(FOODS_KEY, &self.foods)?;
        Ok(food)
    }

    /// Update a food in place, refreshing its `updated_at` timestamp.
    ///
    /// Returns `None` when no food with that id exists.
    pub fn update_food(&mut self, mut food: Food) -> StoreResult<Option<Food>> {
        let Some(existing) = self.foods.iter_mut().find(|f| f.id == food.id) else {
            return Ok(None);
        };

        food.updated_at = now_iso();
        *existing = food.clone();
        self.store.put(FOODS_KEY, &self.foods)?;
        Ok(Some(food))
    }

    /// Delete a food. Meal items referencing it are left untouched and
    /// contribute zero nutrition from now on.
    pub fn delete_food(&mut self, id: &str) -> StoreResult<bool> {
        let before = self.foods.len();
        self.foods.retain(|f| f.id != id);
        if self.foods.len() == before {
            return Ok(false);
        }

        self.store.put(FOODS_KEY, &self.foods)?;
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Meal mutations
    // ------------------------------------------------------------------

    /// Add a meal, assigning fresh ids to the meal and its items
    pub fn add_meal(&mut self, data: MealCreate) -> StoreResult<Meal> {
        let meal = Meal {
            id: new_id(),
            name: data.name,
            date: data.date,
            time: data.time,
            items: data
                .items
                .into_iter()
                .map(|item| MealItem {
                    id: new_id(),
                    food_id: item.food_id,
                    quantity: clamp_quantity(item.quantity),
                })
                .collect(),
        };

        self.meals.push(meal.clone());
        self.store.put(MEALS_KEY, &self.meals)?;
        Ok(meal)
    }

    /// Replace a meal by id; returns `None` when the id is unknown
    pub fn update_meal(&mut self, mut meal: Meal) -> StoreResult<Option<Meal>> {
        let Some(existing) = self.meals.iter_mut().find(|m| m.id == meal.id) else {
            return Ok(None);
        };

        for item in &mut meal.items {
            item.quantity = clamp_quantity(item.quantity);
        }
        *existing = meal.clone();
        self.store.put(MEALS_KEY, &self.meals)?;
        Ok(Some(meal))
    }

    /// Delete a meal by id
    pub fn delete_meal(&mut self, id: &str) -> StoreResult<bool> {
        let before = self.meals.len();
        self.meals.retain(|m| m.id != id);
        if self.meals.len() == before {
            return Ok(false);
        }

        self.store.put(MEALS_KEY, &self.meals)?;
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Goal and plan mutations
    // ------------------------------------------------------------------

    /// Replace the default daily goal
    pub fn update_daily_goal(&mut self, goal: DailyGoal) -> StoreResult<()> {
        self.daily_goal = goal;
        self.store.put(GOAL_KEY, &self.daily_goal)
    }

    /// Add a nutrition plan, assigning a fresh id
    pub fn add_plan(&mut self, data: PlanCreate) -> StoreResult<NutritionPlan> {
        let plan = NutritionPlan {
            id: new_id(),
            name: data.name,
            schedule: data.schedule,
            category: data.category,
            description: data.description,
        };

        self.plans.push(plan.clone());
        self.store.put(PLANS_KEY, &self.plans)?;
        Ok(plan)
    }

    /// Replace a plan by id; returns `None` when the id is unknown
    pub fn update_plan(&mut self, plan: NutritionPlan) -> StoreResult<Option<NutritionPlan>> {
        let Some(existing) = self.plans.iter_mut().find(|p| p.id == plan.id) else {
            return Ok(None);
        };

        *existing = plan.clone();
        self.store.put(PLANS_KEY, &self.plans)?;
        Ok(Some(plan))
    }

    /// Delete a plan by id.
    ///
    /// Deleting the currently-active plan also clears the active pointer, so
    /// the resolver behaves exactly as if no plan were active.
    pub fn delete_plan(&mut self, id: &str) -> StoreResult<bool> {
        let before = self.plans.len();
        self.plans.retain(|p| p.id != id);
        if self.plans.len() == before {
            return Ok(false);
        }
        self.store.put(PLANS_KEY, &self.plans)?;

        if self.active_plan_id.as_deref() == Some(id) {
            tracing::warn!(plan_id = id, "deleted plan was active, clearing pointer");
            self.set_active_plan(None)?;
        }

        Ok(true)
    }

    /// Point the active-plan pointer at a plan, or clear it with `None`
    pub fn set_active_plan(&mut self, plan_id: Option<String>) -> StoreResult<()> {
        self.active_plan_id = plan_id;
        self.store.put(ACTIVE_PLAN_KEY, &self.active_plan_id)
    }

    // ------------------------------------------------------------------
    // Weight record mutations
    // ------------------------------------------------------------------

    /// Log a weight measurement, assigning a fresh id.
    ///
    /// At most one record exists per date: logging a date that already has a
    /// record replaces it wholesale. New dates keep the list sorted newest
    /// first. Blank notes are stored as no notes.
    pub fn upsert_weight_record(&mut self, data: WeightRecordCreate) -> StoreResult<WeightRecord> {
        let record = WeightRecord {
            id: new_id(),
            date: data.date,
            weight: data.weight,
            notes: data.notes.filter(|n| !n.trim().is_empty()),
        };

        if let Some(existing) = self.weight_records.iter_mut().find(|r| r.date == record.date) {
            *existing = record.clone();
        } else {
            self.weight_records.push(record.clone());
            self.weight_records.sort_by(|a, b| b.date.cmp(&a.date));
        }

        self.store.put(WEIGHT_RECORDS_KEY, &self.weight_records)?;
        Ok(record)
    }

    /// Delete a weight record by id
    pub fn delete_weight_record(&mut self, id: &str) -> StoreResult<bool> {
        let before = self.weight_records.len();
        self.weight_records.retain(|r| r.id != id);
        if self.weight_records.len() == before {
            return Ok(false);
        }

        self.store.put(WEIGHT_RECORDS_KEY, &self.weight_records)?;
        Ok(true)
    }
}
