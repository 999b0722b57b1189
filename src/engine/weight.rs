//! Weight trend statistics
//!
//! Overall change across the whole history plus min/max narrowed to a recent
//! date window.

use serde::Serialize;

use crate::models::WeightRecord;

use super::queries::DateWindow;

/// Weight trend over the full history, with min/max over a recent window
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightStats {
    /// Earliest measurement on record
    pub first_weight: f64,
    /// Most recent measurement on record
    pub latest_weight: f64,
    /// Latest minus first; negative when weight went down
    pub change: f64,
    pub min: f64,
    pub max: f64,
    pub record_count: usize,
}

/// Records whose date falls inside the window, in chronological order
pub fn records_in_window<'a>(
    records: &'a [WeightRecord],
    window: &DateWindow,
) -> Vec<&'a WeightRecord> {
    let start = window.start().format("%Y-%m-%d").to_string();
    let end = window.end().format("%Y-%m-%d").to_string();

    let mut inside: Vec<&WeightRecord> = records
        .iter()
        .filter(|r| r.date >= start && r.date <= end)
        .collect();
    inside.sort_by(|a, b| a.date.cmp(&b.date));
    inside
}

/// Compute trend statistics.
///
/// First/latest/change span the entire history; min/max are taken over the
/// records inside `recent`, falling back to the full history when that window
/// holds none so the bounds are never undefined. Returns `None` when there
/// are no records at all.
pub fn weight_stats(records: &[WeightRecord], recent: &DateWindow) -> Option<WeightStats> {
    if records.is_empty() {
        return None;
    }

    let mut ordered: Vec<&WeightRecord> = records.iter().collect();
    ordered.sort_by(|a, b| a.date.cmp(&b.date));

    let first_weight = ordered.first()?.weight;
    let latest_weight = ordered.last()?.weight;

    let in_window = records_in_window(records, recent);
    let scope = if in_window.is_empty() {
        &ordered
    } else {
        &in_window
    };
    let min = scope.iter().map(|r| r.weight).fold(f64::INFINITY, f64::min);
    let max = scope
        .iter()
        .map(|r| r.weight)
        .fold(f64::NEG_INFINITY, f64::max);

    Some(WeightStats {
        first_weight,
        latest_weight,
        change: latest_weight - first_weight,
        min,
        max,
        record_count: records.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::queries::WindowSize;
    use chrono::NaiveDate;

    fn record(date: &str, weight: f64) -> WeightRecord {
        WeightRecord {
            id: date.to_string(),
            date: date.to_string(),
            weight,
            notes: None,
        }
    }

    fn week_ending(y: i32, m: u32, d: u32) -> DateWindow {
        DateWindow::ending_at(NaiveDate::from_ymd_opt(y, m, d).unwrap(), WindowSize::Week)
    }

    #[test]
    fn test_no_records_yields_no_stats() {
        assert!(weight_stats(&[], &week_ending(2024, 1, 15)).is_none());
    }

    #[test]
    fn test_change_spans_full_history_regardless_of_order() {
        // Stored newest-first; stats must still read oldest-to-newest
        let records = vec![
            record("2024-01-15", 78.2),
            record("2024-01-10", 79.0),
            record("2023-12-01", 82.5),
        ];

        let stats = weight_stats(&records, &week_ending(2024, 1, 15)).unwrap();
        assert_eq!(stats.first_weight, 82.5);
        assert_eq!(stats.latest_weight, 78.2);
        assert!((stats.change - (-4.3)).abs() < 1e-9);
        assert_eq!(stats.record_count, 3);
    }

    #[test]
    fn test_min_max_narrow_to_the_recent_window() {
        let records = vec![
            record("2023-12-01", 82.5), // outside the window
            record("2024-01-10", 79.0),
            record("2024-01-15", 78.2),
        ];

        let stats = weight_stats(&records, &week_ending(2024, 1, 15)).unwrap();
        assert_eq!(stats.min, 78.2);
        assert_eq!(stats.max, 79.0);
    }

    #[test]
    fn test_min_max_fall_back_to_history_when_window_is_empty() {
        let records = vec![record("2023-12-01", 82.5), record("2023-12-15", 81.0)];

        let stats = weight_stats(&records, &week_ending(2024, 6, 1)).unwrap();
        assert_eq!(stats.min, 81.0);
        assert_eq!(stats.max, 82.5);
    }

    #[test]
    fn test_records_in_window_are_chronological_and_bounded() {
        let records = vec![
            record("2024-01-15", 78.2),
            record("2024-01-09", 79.5),
            record("2024-01-08", 80.0), // one day before the window opens
        ];

        let inside = records_in_window(&records, &week_ending(2024, 1, 15));
        let dates: Vec<&str> = inside.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-01-09", "2024-01-15"]);
    }
}
