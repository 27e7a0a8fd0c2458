//! Restaurant group operations, stored in the `yelps` table.
//!
//! Same group semantics as weather: lookups read and replace,
//! `delete_restaurant_group` and `purge_stale_restaurants` remove.

use super::connection::Store;
use super::{check_group, missing_location};
use crate::Error;
use crate::model::RestaurantEntry;
use tokio_rusqlite::params;

impl Store {
    /// Get every cached restaurant row for a location, oldest first.
    pub async fn restaurant_group(&self, location_id: i64) -> Result<Vec<RestaurantEntry>, Error> {
        self.conn
            .call(move |conn| -> Result<Vec<RestaurantEntry>, Error> {
                let mut stmt = conn.prepare(
                    "SELECT name, image_url, price, rating, url, location_id, created_at
                     FROM yelps WHERE location_id = ?1 ORDER BY id",
                )?;

                let rows = stmt.query_map(params![location_id], |row| {
                    Ok(RestaurantEntry {
                        name: row.get(0)?,
                        image_url: row.get(1)?,
                        price: row.get(2)?,
                        rating: row.get(3)?,
                        url: row.get(4)?,
                        location_id: row.get(5)?,
                        created_at: row.get(6)?,
                    })
                })?;

                rows.collect::<Result<Vec<_>, _>>().map_err(Error::from)
            })
            .await
            .map_err(Error::from)
    }

    /// Replace a location's restaurant group in one transaction.
    ///
    /// Fails like [`Store::replace_weather_group`] on foreign or unknown locations.
    pub async fn replace_restaurant_group(&self, location_id: i64, entries: &[RestaurantEntry]) -> Result<(), Error> {
        check_group(location_id, entries.iter().map(|e| e.location_id))?;
        let entries = entries.to_vec();
        self.conn
            .call(move |conn| -> Result<(), Error> {
                let tx = conn.transaction()?;
                let deleted = tx.execute("DELETE FROM yelps WHERE location_id = ?1", params![location_id])?;
                {
                    let mut stmt = tx.prepare(
                        "INSERT INTO yelps (name, image_url, price, rating, url, location_id, created_at)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    )?;
                    for entry in &entries {
                        stmt.execute(params![
                            &entry.name,
                            &entry.image_url,
                            &entry.price,
                            entry.rating,
                            &entry.url,
                            location_id,
                            entry.created_at,
                        ])
                        .map_err(|e| missing_location(e, location_id))?;
                    }
                }
                tx.commit()?;

                tracing::debug!(location_id, deleted, inserted = entries.len(), "replaced restaurant group");
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// Delete a location's restaurant group.
    ///
    /// Returns the number of deleted rows.
    pub async fn delete_restaurant_group(&self, location_id: i64) -> Result<u64, Error> {
        self.conn
            .call(move |conn| -> Result<u64, Error> {
                let count = conn.execute("DELETE FROM yelps WHERE location_id = ?1", params![location_id])?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }

    /// Delete every restaurant group whose first row was created before `cutoff_ms`.
    ///
    /// Returns the number of deleted rows.
    pub async fn purge_stale_restaurants(&self, cutoff_ms: i64) -> Result<u64, Error> {
        self.conn
            .call(move |conn| -> Result<u64, Error> {
                let count = conn.execute(
                    "DELETE FROM yelps WHERE location_id IN (
                        SELECT y.location_id FROM yelps y
                        WHERE y.id = (SELECT MIN(id) FROM yelps WHERE location_id = y.location_id)
                        AND y.created_at < ?1
                    )",
                    params![cutoff_ms],
                )?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }
}
