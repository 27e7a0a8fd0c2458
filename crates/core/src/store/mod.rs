//! SQLite-backed store for the cached categories.
//!
//! This module provides the persistent side of the cache-aside lookups
//! using SQLite with async access via tokio-rusqlite. It supports:
//!
//! - Automatic schema migrations
//! - WAL mode with foreign keys enforced
//! - Atomic replacement of a location's weather or restaurant group
//! - Purging groups that are past their TTL

pub mod connection;
pub mod locations;
pub mod migrations;
pub mod restaurants;
pub mod weathers;

pub use crate::Error;

pub use connection::{Store, StoreCounts};

use tokio_rusqlite::rusqlite;

/// Every entry of a replaced group must carry the group's `location_id`.
pub(crate) fn check_group(location_id: i64, entry_ids: impl IntoIterator<Item = i64>) -> Result<(), Error> {
    match entry_ids.into_iter().find(|id| *id != location_id) {
        Some(other) => Err(Error::InvalidInput(format!(
            "entry for location {other} cannot be stored in the group of location {location_id}"
        ))),
        None => Ok(()),
    }
}

/// Map a foreign key failure on group insert to a missing location.
pub(crate) fn missing_location(err: rusqlite::Error, location_id: i64) -> Error {
    match err.sqlite_error_code() {
        Some(rusqlite::ErrorCode::ConstraintViolation) => {
            Error::NotFound(format!("no stored location with id {location_id}"))
        }
        _ => Error::from(err),
    }
}
