//! Weather group operations.
//!
//! All rows for one `location_id` form a single cache unit: they are read,
//! replaced and purged together.
//!
//! Lookups only read and replace groups. `delete_weather_group` drops one
//! location's group outright and `purge_stale_weather` drops every expired one.

use super::connection::Store;
use super::{check_group, missing_location};
use crate::Error;
use crate::model::WeatherEntry;
use tokio_rusqlite::params;

impl Store {
    /// Get every cached forecast row for a location, oldest first.
    pub async fn weather_group(&self, location_id: i64) -> Result<Vec<WeatherEntry>, Error> {
        self.conn
            .call(move |conn| -> Result<Vec<WeatherEntry>, Error> {
                let mut stmt = conn.prepare(
                    "SELECT forecast, time, location_id, created_at
                     FROM weathers WHERE location_id = ?1 ORDER BY id",
                )?;

                let rows = stmt.query_map(params![location_id], |row| {
                    Ok(WeatherEntry {
                        forecast: row.get(0)?,
                        time: row.get(1)?,
                        location_id: row.get(2)?,
                        created_at: row.get(3)?,
                    })
                })?;

                rows.collect::<Result<Vec<_>, _>>().map_err(Error::from)
            })
            .await
            .map_err(Error::from)
    }

    /// Replace a location's weather group in one transaction.
    ///
    /// Existing rows for `location_id` are deleted and `entries` inserted;
    /// readers never observe a half-written group.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if an entry belongs to another location
    /// - `NotFound` if `location_id` is not a stored location
    pub async fn replace_weather_group(&self, location_id: i64, entries: &[WeatherEntry]) -> Result<(), Error> {
        check_group(location_id, entries.iter().map(|e| e.location_id))?;
        let entries = entries.to_vec();
        self.conn
            .call(move |conn| -> Result<(), Error> {
                let tx = conn.transaction()?;
                let deleted = tx.execute("DELETE FROM weathers WHERE location_id = ?1", params![location_id])?;
                {
                    let mut stmt = tx.prepare(
                        "INSERT INTO weathers (forecast, time, location_id, created_at) VALUES (?1, ?2, ?3, ?4)",
                    )?;
                    for entry in &entries {
                        stmt.execute(params![&entry.forecast, &entry.time, location_id, entry.created_at])
                            .map_err(|e| missing_location(e, location_id))?;
                    }
                }
                tx.commit()?;

                tracing::debug!(location_id, deleted, inserted = entries.len(), "replaced weather group");
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// Delete a location's weather group.
    ///
    /// Returns the number of deleted rows.
    pub async fn delete_weather_group(&self, location_id: i64) -> Result<u64, Error> {
        self.conn
            .call(move |conn| -> Result<u64, Error> {
                let count = conn.execute("DELETE FROM weathers WHERE location_id = ?1", params![location_id])?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }

    /// Delete every weather group whose first row was created before `cutoff_ms`.
    ///
    /// Returns the number of deleted rows.
    pub async fn purge_stale_weather(&self, cutoff_ms: i64) -> Result<u64, Error> {
        self.conn
            .call(move |conn| -> Result<u64, Error> {
                let count = conn.execute(
                    "DELETE FROM weathers WHERE location_id IN (
                        SELECT w.location_id FROM weathers w
                        WHERE w.id = (SELECT MIN(id) FROM weathers WHERE location_id = w.location_id)
                        AND w.created_at < ?1
                    )",
                    params![cutoff_ms],
                )?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }
}
