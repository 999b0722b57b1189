//! Goal resolver
//!
//! Determines which daily goal a nutrition plan assigns to a calendar date.

use chrono::{Datelike, NaiveDate};

use crate::models::{DailyGoal, NutritionPlan, PlanSchedule};

/// Day-of-week index for an ISO date string, 0 = Sunday .. 6 = Saturday.
///
/// Dates are parsed as plain calendar dates with no timezone shift, so a
/// `YYYY-MM-DD` string maps to the same weekday everywhere.
pub fn day_of_week(date: &str) -> Option<u8> {
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    Some(parsed.weekday().num_days_from_sunday() as u8)
}

/// Resolve the goal the active plan assigns to `date`.
///
/// Returns `None` when there is no active plan, the id matches no plan, a
/// daily plan carries no goals, or a weekly plan has no entry for the date's
/// weekday. `None` is not an error: it tells the caller to fall back to the
/// default goal, and that fallback belongs at the call site.
pub fn active_plan_goals_for_date(
    date: &str,
    active_plan_id: Option<&str>,
    plans: &[NutritionPlan],
) -> Option<DailyGoal> {
    let active_id = active_plan_id?;
    let plan = plans.iter().find(|p| p.id == active_id)?;

    match &plan.schedule {
        PlanSchedule::Daily { goals } => *goals,
        PlanSchedule::Weekly { weekly_goals } => weekly_goals.get(&day_of_week(date)?).copied(),
    }
}
