//! Weight record model
//!
//! Body-weight measurements, at most one per calendar date.

use serde::{Deserialize, Serialize};

/// One logged body-weight measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightRecord {
    pub id: String,
    /// ISO calendar date: "2024-01-15"
    pub date: String,
    /// Kilograms
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Data for logging a weight measurement
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightRecordCreate {
    pub date: String,
    pub weight: f64,
    #[serde(default)]
    pub notes: Option<String>,
}
