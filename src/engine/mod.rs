//! Aggregation and goal-resolution engine
//!
//! Pure computations over in-memory snapshots: no I/O, no suspension
//! points, no mutation of the collections it reads.

pub mod calculator;
pub mod queries;
pub mod resolver;
pub mod weight;

pub use calculator::{calculate_daily_nutrition, meal_nutrition, meal_totals};
pub use queries::{
    build_window_report, calorie_percentage, day_progress, DateWindow, DayProgress, WindowReport,
    WindowSize, SUCCESS_THRESHOLD,
};
pub use resolver::{active_plan_goals_for_date, day_of_week};
pub use weight::{records_in_window, weight_stats, WeightStats};
