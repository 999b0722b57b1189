//! Key-value record access
//!
//! The repository persists six logical records (foods, meals, daily goal,
//! nutrition plans, active plan id, weight records), each stored as one JSON
//! value under a fixed key.

use rusqlite::{params, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::connection::{Database, StoreResult};

/// Record key for the food list
pub const FOODS_KEY: &str = "nutritrack_foods";
/// Record key for the meal list
pub const MEALS_KEY: &str = "nutritrack_meals";
/// Record key for the default daily goal
pub const GOAL_KEY: &str = "nutritrack_goal";
/// Record key for the nutrition plan list
pub const PLANS_KEY: &str = "nutritrack_plans";
/// Record key for the nullable active plan id
pub const ACTIVE_PLAN_KEY: &str = "nutritrack_active_plan";
/// Record key for the weight record list. Older snapshots stored it under
/// this unprefixed key, so it stays that way.
pub const WEIGHT_RECORDS_KEY: &str = "weightRecords";
/// Record key for the persisted schema version
pub const SCHEMA_VERSION_KEY: &str = "nutritrack_schema_version";

/// Read/write access to the persisted key-value records.
///
/// The repository talks to storage only through this trait, never through
/// SQL directly.
pub trait KvStore {
    /// Read and deserialize the record stored under `key`
    fn get<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>>;

    /// Serialize and write `value` under `key`, replacing any previous record
    fn put<T: Serialize>(&self, key: &str, value: &T) -> StoreResult<()>;
}

/// Key-value store backed by a pooled SQLite database
#[derive(Clone)]
pub struct SqliteKv {
    db: Database,
}

impl SqliteKv {
    /// Open the store and ensure the records table exists
    pub fn new(db: Database) -> StoreResult<Self> {
        db.with_conn(|conn| {
            conn.execute(
                "CREATE TABLE IF NOT EXISTS kv_records (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL,
                    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
                )",
                [],
            )?;
            Ok(())
        })?;

        Ok(Self { db })
    }

    /// Read the raw JSON text stored under `key`
    pub fn get_raw(&self, key: &str) -> StoreResult<Option<String>> {
        self.db.with_conn(|conn| {
            let value = conn
                .query_row(
                    "SELECT value FROM kv_records WHERE key = ?1",
                    [key],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(value)
        })
    }

    /// Write raw JSON text under `key`
    pub fn put_raw(&self, key: &str, value: &str) -> StoreResult<()> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO kv_records (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET
                     value = excluded.value,
                     updated_at = datetime('now')",
                params![key, value],
            )?;
            Ok(())
        })
    }
}

impl KvStore for SqliteKv {
    fn get<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        match self.get_raw(key)? {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    fn put<T: Serialize>(&self, key: &str, value: &T) -> StoreResult<()> {
        let text = serde_json::to_string(value)?;
        self.put_raw(key, &text)
    }
}
