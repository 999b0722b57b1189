//! Nutrition plan model
//!
//! A named, possibly day-of-week-varying override of the default daily goal.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::DailyGoal;

/// Presentation metadata describing what a plan is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PlanCategory {
    Bulking,
    Cutting,
    Maintenance,
    CarbCycling,
    PeakWeek,
    #[default]
    Custom,
}

/// How a plan assigns goals to dates.
///
/// Daily plans return the same goal for every date; weekly-cycling plans key
/// a distinct goal per day-of-week index (0 = Sunday .. 6 = Saturday).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PlanSchedule {
    Daily {
        #[serde(default)]
        goals: Option<DailyGoal>,
    },
    Weekly {
        #[serde(default, rename = "weeklyGoals", with = "weekday_keys")]
        weekly_goals: BTreeMap<u8, DailyGoal>,
    },
}

/// `weeklyGoals` persists as a JSON object, so its keys are the strings
/// "0".."6" on the wire and numeric weekday indices in memory. Going through
/// strings explicitly also keeps the map readable after the tagged schedule
/// is flattened into the plan record, where deserialization is buffered.
mod weekday_keys {
    use std::collections::BTreeMap;

    use serde::de::{Deserialize, Deserializer, Error};
    use serde::ser::Serializer;

    use super::DailyGoal;

    pub fn serialize<S>(map: &BTreeMap<u8, DailyGoal>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(map.iter().map(|(day, goal)| (day.to_string(), goal)))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeMap<u8, DailyGoal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, DailyGoal>::deserialize(deserializer)?;
        raw.into_iter()
            .map(|(day, goal)| day.parse::<u8>().map(|day| (day, goal)).map_err(Error::custom))
            .collect()
    }
}

/// A named nutrition plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionPlan {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub schedule: PlanSchedule,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<PlanCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Data for creating a nutrition plan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanCreate {
    pub name: String,
    #[serde(flatten)]
    pub schedule: PlanSchedule,
    #[serde(default)]
    pub category: Option<PlanCategory>,
    #[serde(default)]
    pub description: Option<String>,
}

/// An entry in the legacy persisted plan shape.
///
/// Older snapshots stored weekly plans as a `days` array keyed by ordinal
/// day names ("sunday", "second", .., "saturday") with a `fats` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyPlanDay {
    pub day_of_week: String,
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fats: f64,
}

impl LegacyPlanDay {
    /// Map the legacy day name to the 0=Sunday..6=Saturday index
    fn day_index(&self) -> Option<u8> {
        match self.day_of_week.as_str() {
            "sunday" => Some(0),
            "second" => Some(1),
            "third" => Some(2),
            "fourth" => Some(3),
            "fifth" => Some(4),
            "sixth" => Some(5),
            "saturday" => Some(6),
            _ => None,
        }
    }
}

/// The legacy persisted plan shape, normalized at load time
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyPlan {
    pub id: String,
    pub name: String,
    pub days: Vec<LegacyPlanDay>,
    #[serde(default)]
    pub category: Option<PlanCategory>,
    #[serde(default)]
    pub description: Option<String>,
}

impl LegacyPlan {
    /// Normalize into a weekly-cycling plan.
    ///
    /// Entries with an unrecognized day name are dropped; those weekdays fall
    /// through to the default goal at resolution time.
    pub fn into_plan(self) -> NutritionPlan {
        let mut weekly_goals = BTreeMap::new();
        for day in self.days {
            let Some(index) = day.day_index() else {
                tracing::warn!(plan = %self.name, day = %day.day_of_week, "dropping unrecognized plan day");
                continue;
            };
            weekly_goals.insert(
                index,
                DailyGoal {
                    calories: day.calories,
                    protein: day.protein,
                    carbs: day.carbs,
                    fat: day.fats,
                },
            );
        }

        NutritionPlan {
            id: self.id,
            name: self.name,
            schedule: PlanSchedule::Weekly { weekly_goals },
            category: self.category,
            description: self.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_plan_normalizes_to_weekly() {
        let json = r#"{
            "id": "p1",
            "name": "Meu Planejamento",
            "days": [
                {"dayOfWeek": "sunday", "calories": 1800, "protein": 140, "carbs": 120, "fats": 60},
                {"dayOfWeek": "second", "calories": 2200, "protein": 150, "carbs": 250, "fats": 55}
            ]
        }"#;

        let legacy: LegacyPlan = serde_json::from_str(json).unwrap();
        let plan = legacy.into_plan();

        let PlanSchedule::Weekly { weekly_goals } = &plan.schedule else {
            panic!("expected weekly schedule");
        };
        assert_eq!(weekly_goals.len(), 2);
        assert_eq!(weekly_goals[&0].fat, 60.0);
        assert_eq!(weekly_goals[&1].calories, 2200.0);
    }

    #[test]
    fn test_legacy_plan_drops_unknown_day_names() {
        let legacy = LegacyPlan {
            id: "p1".to_string(),
            name: "plan".to_string(),
            days: vec![LegacyPlanDay {
                day_of_week: "someday".to_string(),
                calories: 2000.0,
                protein: 0.0,
                carbs: 0.0,
                fats: 0.0,
            }],
            category: None,
            description: None,
        };

        let PlanSchedule::Weekly { weekly_goals } = legacy.into_plan().schedule else {
            panic!("expected weekly schedule");
        };
        assert!(weekly_goals.is_empty());
    }

    #[test]
    fn test_plan_json_round_trip() {
        let plan = NutritionPlan {
            id: "p1".to_string(),
            name: "Cut".to_string(),
            schedule: PlanSchedule::Daily {
                goals: Some(DailyGoal {
                    calories: 1700.0,
                    protein: 150.0,
                    carbs: 130.0,
                    fat: 55.0,
                }),
            },
            category: Some(PlanCategory::Cutting),
            description: None,
        };

        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["type"], "daily");
        assert_eq!(json["category"], "cutting");
        assert_eq!(json["goals"]["calories"], 1700.0);

        let back: NutritionPlan = serde_json::from_value(json).unwrap();
        assert_eq!(back, plan);
    }

    #[test]
    fn test_weekly_plan_json_round_trip() {
        let mut weekly_goals = BTreeMap::new();
        weekly_goals.insert(
            3,
            DailyGoal {
                calories: 2400.0,
                protein: 160.0,
                carbs: 280.0,
                fat: 50.0,
            },
        );
        let plan = NutritionPlan {
            id: "p2".to_string(),
            name: "Cycle".to_string(),
            schedule: PlanSchedule::Weekly { weekly_goals },
            category: None,
            description: None,
        };

        let json = serde_json::to_string(&plan).unwrap();
        let back: NutritionPlan = serde_json::from_str(&json).unwrap();
        assert_eq!(back, plan);

        let PlanSchedule::Weekly { weekly_goals } = back.schedule else {
            panic!("expected weekly schedule");
        };
        assert_eq!(weekly_goals[&3].calories, 2400.0);
    }

    #[test]
    fn test_weekly_goals_serialize_as_index_map() {
        let mut weekly_goals = BTreeMap::new();
        weekly_goals.insert(3, DailyGoal::default());
        let plan = NutritionPlan {
            id: "p2".to_string(),
            name: "Cycle".to_string(),
            schedule: PlanSchedule::Weekly { weekly_goals },
            category: Some(PlanCategory::CarbCycling),
            description: None,
        };

        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["type"], "weekly");
        assert_eq!(json["weeklyGoals"]["3"]["calories"], 2000.0);
    }
}
