//! Stored-state migrations
//!
//! Brings persisted records up to the current schema version. Runs once at
//! load time so the engine never has to branch on record shape.

use serde_json::Value;

use crate::models::{LegacyPlan, NutritionPlan};

use super::connection::StoreResult;
use super::kv::{KvStore, PLANS_KEY, SCHEMA_VERSION_KEY};

/// Current schema version
const SCHEMA_VERSION: i64 = 2;

/// Run all migrations to bring the stored records up to the current version
pub fn run_migrations<S: KvStore>(store: &S) -> StoreResult<()> {
    let current: i64 = store.get(SCHEMA_VERSION_KEY)?.unwrap_or(1);

    if current < 2 {
        migrate_v2_normalize_plans(store)?;
        store.put(SCHEMA_VERSION_KEY, &2i64)?;
        tracing::info!("migrated stored state to schema version 2");
    }

    Ok(())
}

/// Get the current stored schema version
pub fn get_schema_version<S: KvStore>(store: &S) -> StoreResult<i64> {
    Ok(store.get(SCHEMA_VERSION_KEY)?.unwrap_or(1))
}

/// Check whether the stored state needs migration
pub fn needs_migration<S: KvStore>(store: &S) -> StoreResult<bool> {
    Ok(get_schema_version(store)? < SCHEMA_VERSION)
}

/// Migration v2: normalize legacy plan records.
///
/// Version 1 snapshots could hold weekly plans as a `days` array keyed by
/// ordinal day names with a `fats` field. Each such record is rewritten as a
/// regular weekly-cycling plan; records already in the current shape pass
/// through untouched.
fn migrate_v2_normalize_plans<S: KvStore>(store: &S) -> StoreResult<()> {
    let raw_plans: Option<Vec<Value>> = store.get(PLANS_KEY)?;
    let Some(raw_plans) = raw_plans else {
        return Ok(());
    };

    let mut plans: Vec<NutritionPlan> = Vec::with_capacity(raw_plans.len());
    for raw in raw_plans {
        if raw.get("days").map_or(false, Value::is_array) {
            let legacy: LegacyPlan = serde_json::from_value(raw)?;
            tracing::warn!(plan = %legacy.name, "normalizing legacy plan record");
            plans.push(legacy.into_plan());
        } else {
            plans.push(serde_json::from_value(raw)?);
        }
    }

    store.put(PLANS_KEY, &plans)
}
