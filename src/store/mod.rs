//! Persistence layer
//!
//! SQLite-backed key-value storage for the repository's records.

pub mod connection;
pub mod kv;
pub mod migrations;

pub use connection::{Database, StoreError, StoreResult};
pub use kv::{
    KvStore, SqliteKv, ACTIVE_PLAN_KEY, FOODS_KEY, GOAL_KEY, MEALS_KEY, PLANS_KEY,
    SCHEMA_VERSION_KEY, WEIGHT_RECORDS_KEY,
};
