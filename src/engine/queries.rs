//! Aggregation queries
//!
//! Date-window iteration producing per-day progress rows and trend/streak
//! statistics over the window.

use chrono::{Days, Local, NaiveDate};
use serde::Serialize;

use crate::models::{round_half_up, DailyGoal, Food, Meal, NutritionPlan, NutritionSummary};

use super::calculator::calculate_daily_nutrition;
use super::resolver::active_plan_goals_for_date;

/// A day qualifies when its calorie percentage reaches this threshold
pub const SUCCESS_THRESHOLD: i64 = 80;

/// Window length for trend queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowSize {
    Week,
    Month,
}

impl WindowSize {
    /// Number of calendar days in the window
    pub fn days(self) -> u64 {
        match self {
            WindowSize::Week => 7,
            WindowSize::Month => 30,
        }
    }
}

/// A consecutive run of calendar dates ending at (and including) `end`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    end: NaiveDate,
    size: WindowSize,
}

impl DateWindow {
    /// Window ending at the given date
    pub fn ending_at(end: NaiveDate, size: WindowSize) -> Self {
        Self { end, size }
    }

    /// Window ending at the host's local calendar date
    pub fn ending_today(size: WindowSize) -> Self {
        Self::ending_at(Local::now().date_naive(), size)
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// First date in the window
    pub fn start(&self) -> NaiveDate {
        self.end - Days::new(self.size.days() - 1)
    }

    pub fn size(&self) -> WindowSize {
        self.size
    }

    /// The window's dates in chronological order, as canonical `YYYY-MM-DD`
    /// strings
    pub fn dates(&self) -> Vec<String> {
        let start = self.start();
        (0..self.size.days())
            .map(|offset| (start + Days::new(offset)).format("%Y-%m-%d").to_string())
            .collect()
    }

    /// Move back by exactly one window size
    pub fn prev(self) -> Self {
        Self {
            end: self.end - Days::new(self.size.days()),
            size: self.size,
        }
    }

    /// Move forward by exactly one window size, clamped so the end date
    /// never passes `today`
    pub fn next(self, today: NaiveDate) -> Self {
        let end = (self.end + Days::new(self.size.days())).min(today);
        Self { end, size: self.size }
    }
}

/// One day's consumption measured against its resolved goal
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayProgress {
    pub date: String,
    pub nutrition: NutritionSummary,
    pub goal: DailyGoal,
    pub calorie_percentage: i64,
    pub meal_count: usize,
    pub met_goal: bool,
}

/// Statistics aggregated over one date window
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowReport {
    pub days: Vec<DayProgress>,
    pub avg_calories: i64,
    pub avg_protein: i64,
    pub avg_meal_count: f64,
    /// Rounded percent of days in the window meeting the threshold
    pub success_rate: i64,
    /// Trailing consecutive qualifying days, most recent backwards
    pub current_streak: usize,
}

/// Percent of the goal's calories consumed, rounded.
///
/// A goal of zero (or negative) calories yields 0% rather than a NaN or
/// infinite ratio.
pub fn calorie_percentage(consumed: i64, goal_calories: f64) -> i64 {
    if goal_calories <= 0.0 {
        return 0;
    }
    round_half_up(consumed as f64 / goal_calories * 100.0)
}

/// Compute one day's progress row.
///
/// The goal is the active plan's resolved goal for the date when one exists,
/// otherwise the default goal (the two-level fallback lives here, not in the
/// resolver).
pub fn day_progress(
    date: &str,
    meals: &[Meal],
    foods: &[Food],
    default_goal: &DailyGoal,
    active_plan_id: Option<&str>,
    plans: &[NutritionPlan],
) -> DayProgress {
    let nutrition = calculate_daily_nutrition(date, meals, foods);
    let goal = active_plan_goals_for_date(date, active_plan_id, plans).unwrap_or(*default_goal);
    let percentage = calorie_percentage(nutrition.calories, goal.calories);
    let meal_count = meals.iter().filter(|m| m.date == date).count();

    DayProgress {
        date: date.to_string(),
        nutrition,
        goal,
        calorie_percentage: percentage,
        meal_count,
        met_goal: percentage >= SUCCESS_THRESHOLD,
    }
}

/// Build the full report for a date window
pub fn build_window_report(
    window: &DateWindow,
    meals: &[Meal],
    foods: &[Food],
    default_goal: &DailyGoal,
    active_plan_id: Option<&str>,
    plans: &[NutritionPlan],
) -> WindowReport {
    let days: Vec<DayProgress> = window
        .dates()
        .iter()
        .map(|date| day_progress(date, meals, foods, default_goal, active_plan_id, plans))
        .collect();

    let count = days.len() as f64;
    let avg_calories =
        round_half_up(days.iter().map(|d| d.nutrition.calories).sum::<i64>() as f64 / count);
    let avg_protein =
        round_half_up(days.iter().map(|d| d.nutrition.protein).sum::<i64>() as f64 / count);
    let avg_meal_count = days.iter().map(|d| d.meal_count).sum::<usize>() as f64 / count;

    let qualifying = days.iter().filter(|d| d.met_goal).count();
    let success_rate = round_half_up(qualifying as f64 / count * 100.0);
    let current_streak = days.iter().rev().take_while(|d| d.met_goal).count();

    WindowReport {
        days,
        avg_calories,
        avg_protein,
        avg_meal_count,
        success_rate,
        current_streak,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MealItem, NutrientProfile};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn food(id: &str, calories: f64) -> Food {
        Food {
            id: id.to_string(),
            name: id.to_string(),
            nutrients: NutrientProfile {
                calories,
                protein: 10.0,
                carbs: 20.0,
                fat: 5.0,
            },
            serving_size: 100.0,
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    fn meal_of(date: &str, food_id: &str, quantity: f64) -> Meal {
        Meal {
            id: format!("{}-{}", date, food_id),
            name: "meal".to_string(),
            date: date.to_string(),
            time: "12:00".to_string(),
            items: vec![MealItem {
                id: "i1".to_string(),
                food_id: food_id.to_string(),
                quantity,
            }],
        }
    }

    #[test]
    fn test_window_dates_are_consecutive_and_inclusive() {
        let window = DateWindow::ending_at(date(2024, 1, 15), WindowSize::Week);
        let dates = window.dates();

        assert_eq!(dates.len(), 7);
        assert_eq!(dates.first().unwrap(), "2024-01-09");
        assert_eq!(dates.last().unwrap(), "2024-01-15");
    }

    #[test]
    fn test_month_window_spans_thirty_days() {
        let window = DateWindow::ending_at(date(2024, 3, 1), WindowSize::Month);
        let dates = window.dates();

        assert_eq!(dates.len(), 30);
        assert_eq!(dates.first().unwrap(), "2024-02-01");
        assert_eq!(dates.last().unwrap(), "2024-03-01");
    }

    #[test]
    fn test_navigation_steps_by_window_size() {
        let window = DateWindow::ending_at(date(2024, 1, 15), WindowSize::Week);
        assert_eq!(window.prev().end(), date(2024, 1, 8));
        assert_eq!(window.prev().prev().end(), date(2024, 1, 1));
    }

    #[test]
    fn test_forward_navigation_clamps_at_today() {
        let today = date(2024, 1, 18);
        let window = DateWindow::ending_at(date(2024, 1, 15), WindowSize::Week);

        // One step forward would land on the 22nd; clamped to today instead
        let moved = window.next(today);
        assert_eq!(moved.end(), today);

        // Already at today: stays put, not rejected
        assert_eq!(moved.next(today).end(), today);
    }

    #[test]
    fn test_zero_calorie_goal_yields_zero_percent() {
        assert_eq!(calorie_percentage(1500, 0.0), 0);
        assert_eq!(calorie_percentage(1500, -10.0), 0);
        assert_eq!(calorie_percentage(1500, 2000.0), 75);
    }

    #[test]
    fn test_day_progress_falls_back_to_default_goal() {
        let foods = vec![food("a", 1000.0)];
        let meals = vec![meal_of("2024-01-15", "a", 180.0)];
        let default_goal = DailyGoal::default();

        let row = day_progress("2024-01-15", &meals, &foods, &default_goal, None, &[]);
        assert_eq!(row.goal, default_goal);
        assert_eq!(row.nutrition.calories, 1800);
        assert_eq!(row.calorie_percentage, 90);
        assert_eq!(row.meal_count, 1);
        assert!(row.met_goal);
    }

    #[test]
    fn test_streak_and_success_rate_over_seven_days() {
        // Days 1,2,5,6,7 of the window hit the 80% threshold; day 7 is the
        // most recent. Streak counts days 5-7, success rate is 5/7.
        let foods = vec![food("a", 1000.0)];
        let window = DateWindow::ending_at(date(2024, 1, 15), WindowSize::Week);
        let qualifying = ["2024-01-09", "2024-01-10", "2024-01-13", "2024-01-14", "2024-01-15"];
        let meals: Vec<Meal> = qualifying
            .iter()
            .map(|d| meal_of(d, "a", 200.0)) // 2000 kcal = 100%
            .collect();

        let report = build_window_report(
            &window,
            &meals,
            &foods,
            &DailyGoal::default(),
            None,
            &[],
        );

        assert_eq!(report.current_streak, 3);
        assert_eq!(report.success_rate, 71);
    }

    #[test]
    fn test_streak_is_zero_when_most_recent_day_misses() {
        let foods = vec![food("a", 1000.0)];
        let window = DateWindow::ending_at(date(2024, 1, 15), WindowSize::Week);
        let meals = vec![meal_of("2024-01-14", "a", 200.0)];

        let report = build_window_report(
            &window,
            &meals,
            &foods,
            &DailyGoal::default(),
            None,
            &[],
        );

        assert_eq!(report.current_streak, 0);
        assert_eq!(report.success_rate, 14); // 1/7
    }

    #[test]
    fn test_window_averages() {
        let foods = vec![food("a", 1000.0)];
        let window = DateWindow::ending_at(date(2024, 1, 15), WindowSize::Week);
        // Two days with 1000 kcal each, five empty days
        let meals = vec![
            meal_of("2024-01-14", "a", 100.0),
            meal_of("2024-01-15", "a", 100.0),
        ];

        let report = build_window_report(
            &window,
            &meals,
            &foods,
            &DailyGoal::default(),
            None,
            &[],
        );

        assert_eq!(report.avg_calories, (2000.0f64 / 7.0).round() as i64);
        assert!((report.avg_meal_count - 2.0 / 7.0).abs() < 1e-9);
    }
}
